pub mod capacity;
pub mod error;
pub mod fleet;
pub mod job;
pub(crate) mod job_location_index;
pub mod location;
pub mod time_window;
pub mod travel_cost_matrix;
pub mod vehicle;
pub mod vehicle_routing_problem;
