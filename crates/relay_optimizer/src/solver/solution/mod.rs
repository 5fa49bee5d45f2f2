pub mod route;
pub mod route_id;
pub(crate) mod utils;
pub mod working_solution;
