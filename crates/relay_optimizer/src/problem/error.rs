use thiserror::Error;

/// Reasons a [`VehicleRoutingProblem`](super::vehicle_routing_problem::VehicleRoutingProblem)
/// can't be built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("the fleet has no vehicles")]
    NoVehicles,
    #[error("{entity} references unknown location {location}")]
    UnknownLocation { entity: String, location: usize },
    #[error("{entity} has {found} capacity dimensions, expected {expected}")]
    CapacityDimensionMismatch {
        entity: String,
        expected: usize,
        found: usize,
    },
    #[error("{entity} has a negative capacity")]
    NegativeCapacity { entity: String },
    #[error("job {job} exceeds the capacity of every vehicle in dimension {dimension}")]
    JobExceedsFleetCapacity { job: String, dimension: usize },
    #[error("job {job} has a time window that ends before it starts")]
    InvalidTimeWindow { job: String },
    #[error("vehicle {vehicle} must arrive before it can start")]
    InvalidVehicleTimeWindow { vehicle: String },
    #[error("negative travel distance or time from location {from} to location {to}")]
    NegativeTravelData { from: String, to: String },
    #[error("no travel data from location {from} to location {to} used by vehicle {vehicle}")]
    MissingTravelData {
        vehicle: String,
        from: String,
        to: String,
    },
}
