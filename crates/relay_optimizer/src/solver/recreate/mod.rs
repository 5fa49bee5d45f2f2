pub mod construction_best_insertion;
pub mod recreate_context;
pub mod recreate_params;
