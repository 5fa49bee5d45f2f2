pub mod accepted_solution;
pub mod construction;
pub mod insertion;
pub(crate) mod insertion_cache;
pub mod noise;
pub mod recreate;
pub mod ruin;
pub mod score;
pub mod search;
pub mod solution;
#[allow(clippy::module_inception)]
pub mod solver;
pub mod solver_params;
pub mod termination;
