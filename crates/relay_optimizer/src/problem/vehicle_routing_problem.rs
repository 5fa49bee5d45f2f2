use tracing::debug;

use crate::utils::enumerate_idx::EnumerateIdx;

use super::{
    capacity::Capacity,
    error::ProblemError,
    fleet::Fleet,
    job::{Job, JobIdx},
    job_location_index::JobLocationIndex,
    location::{Location, LocationIdx},
    travel_cost_matrix::{Travel, TravelMatrices},
    vehicle::{Vehicle, VehicleIdx},
};

pub type Cost = f64;

/// Immutable description of the routing problem, shared by every solution.
pub struct VehicleRoutingProblem {
    locations: Vec<Location>,
    fleet: Fleet,
    jobs: Vec<Job>,
    travel_matrices: TravelMatrices,
    job_location_index: JobLocationIndex,
    capacity_dimensions: usize,
    max_cost: Cost,
}

impl VehicleRoutingProblem {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job_id: JobIdx) -> &Job {
        &self.jobs[job_id]
    }

    pub fn jobs_iter(&self) -> impl Iterator<Item = (JobIdx, &Job)> {
        self.jobs.iter().enumerate_idx()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        self.fleet.vehicle(vehicle_id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.fleet.vehicles()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, location_id: LocationIdx) -> &Location {
        &self.locations[location_id]
    }

    pub fn travel_matrices(&self) -> &TravelMatrices {
        &self.travel_matrices
    }

    pub fn capacity_dimensions(&self) -> usize {
        self.capacity_dimensions
    }

    pub fn travel(&self, from: LocationIdx, to: LocationIdx) -> Option<Travel> {
        self.travel_matrices.travel(from, to)
    }

    /// Cost of driving an edge with `vehicle`.
    #[inline]
    pub fn edge_cost(&self, vehicle: &Vehicle, travel: Travel) -> Cost {
        vehicle.cost_per_distance() * travel.distance + vehicle.cost_per_time() * travel.time
    }

    pub fn travel_cost(&self, vehicle: &Vehicle, from: LocationIdx, to: LocationIdx) -> Option<Cost> {
        self.travel(from, to)
            .map(|travel| self.edge_cost(vehicle, travel))
    }

    /// Most expensive edge any vehicle can drive, used to scale noise.
    pub fn max_cost(&self) -> Cost {
        self.max_cost
    }

    pub fn has_coordinates(&self) -> bool {
        !self.job_location_index.is_empty()
    }

    /// Jobs ordered by increasing straight-line distance to `job_id`, the job
    /// itself included. Empty when the job location has no coordinates.
    pub fn nearest_jobs(&self, job_id: JobIdx) -> impl Iterator<Item = JobIdx> + '_ {
        let point = self.location(self.job(job_id).location_id()).point();
        point
            .into_iter()
            .flat_map(|point| self.job_location_index.nearest_neighbor_iter(point))
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    locations: Vec<Location>,
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    travel_matrices: Option<TravelMatrices>,
}

impl VehicleRoutingProblemBuilder {
    pub fn set_locations(&mut self, locations: Vec<Location>) -> &mut VehicleRoutingProblemBuilder {
        self.locations = locations;
        self
    }

    pub fn set_jobs(&mut self, jobs: Vec<Job>) -> &mut VehicleRoutingProblemBuilder {
        self.jobs = jobs;
        self
    }

    pub fn add_job(&mut self, job: Job) -> &mut VehicleRoutingProblemBuilder {
        self.jobs.push(job);
        self
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles = vehicles;
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles.push(vehicle);
        self
    }

    /// Defaults to straight-line distances at unit speed when not set.
    pub fn set_travel_matrices(
        &mut self,
        travel_matrices: TravelMatrices,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.travel_matrices = Some(travel_matrices);
        self
    }

    pub fn build(&mut self) -> Result<VehicleRoutingProblem, ProblemError> {
        let locations = std::mem::take(&mut self.locations);
        let jobs = std::mem::take(&mut self.jobs);
        let vehicles = std::mem::take(&mut self.vehicles);
        let travel_matrices = self
            .travel_matrices
            .take()
            .unwrap_or_else(|| TravelMatrices::from_euclidean(&locations, 1.0));

        let capacity_dimensions = validate_capacities(&vehicles, &jobs)?;
        validate_locations(&locations, &vehicles, &jobs)?;
        validate_time_windows(&vehicles, &jobs)?;
        validate_travel_values(&travel_matrices, &locations)?;
        validate_travel_data(&travel_matrices, &locations, &vehicles, &jobs)?;

        let job_location_index = JobLocationIndex::new(&locations, &jobs);
        let max_travel = travel_matrices.max_travel();
        let max_cost = vehicles
            .iter()
            .map(|vehicle| {
                vehicle.cost_per_distance() * max_travel.distance
                    + vehicle.cost_per_time() * max_travel.time
            })
            .fold(0.0_f64, f64::max);

        debug!(
            jobs = jobs.len(),
            vehicles = vehicles.len(),
            locations = locations.len(),
            capacity_dimensions,
            "Built vehicle routing problem"
        );

        Ok(VehicleRoutingProblem {
            locations,
            fleet: Fleet::new(vehicles),
            jobs,
            travel_matrices,
            job_location_index,
            capacity_dimensions,
            max_cost,
        })
    }
}

fn validate_capacities(vehicles: &[Vehicle], jobs: &[Job]) -> Result<usize, ProblemError> {
    let Some(first) = vehicles.first() else {
        return Err(ProblemError::NoVehicles);
    };
    let expected = first.capacity().dimensions();

    let capacities = vehicles
        .iter()
        .map(|vehicle| (format!("vehicle {}", vehicle.external_id()), vehicle.capacity()))
        .chain(
            jobs.iter()
                .map(|job| (format!("job {}", job.external_id()), job.size())),
        );

    for (entity, capacity) in capacities {
        if capacity.dimensions() != expected {
            return Err(ProblemError::CapacityDimensionMismatch {
                entity,
                expected,
                found: capacity.dimensions(),
            });
        }
        if capacity.has_negative_values() {
            return Err(ProblemError::NegativeCapacity { entity });
        }
    }

    let max_capacity = Capacity::from_vec(
        (0..expected)
            .map(|dimension| {
                vehicles
                    .iter()
                    .map(|vehicle| vehicle.capacity().get(dimension))
                    .fold(0.0_f64, f64::max)
            })
            .collect(),
    );

    for job in jobs {
        if let Some(dimension) = job.size().first_overloaded_dimension(&max_capacity) {
            return Err(ProblemError::JobExceedsFleetCapacity {
                job: job.external_id().to_owned(),
                dimension,
            });
        }
    }

    Ok(expected)
}

fn validate_locations(
    locations: &[Location],
    vehicles: &[Vehicle],
    jobs: &[Job],
) -> Result<(), ProblemError> {
    let check = |entity: String, location_id: LocationIdx| {
        if location_id.get() < locations.len() {
            Ok(())
        } else {
            Err(ProblemError::UnknownLocation {
                entity,
                location: location_id.get(),
            })
        }
    };

    for vehicle in vehicles {
        let entity = || format!("vehicle {}", vehicle.external_id());
        check(entity(), vehicle.start_location_id())?;
        if let Some(end_location_id) = vehicle.end_location_id() {
            check(entity(), end_location_id)?;
        }
    }

    for job in jobs {
        check(format!("job {}", job.external_id()), job.location_id())?;
    }

    Ok(())
}

fn validate_time_windows(vehicles: &[Vehicle], jobs: &[Job]) -> Result<(), ProblemError> {
    if let Some(vehicle) = vehicles
        .iter()
        .find(|vehicle| vehicle.latest_arrival() < vehicle.earliest_start())
    {
        return Err(ProblemError::InvalidVehicleTimeWindow {
            vehicle: vehicle.external_id().to_owned(),
        });
    }

    if let Some(job) = jobs.iter().find(|job| !job.time_window().is_valid()) {
        return Err(ProblemError::InvalidTimeWindow {
            job: job.external_id().to_owned(),
        });
    }

    Ok(())
}

fn location_name(locations: &[Location], location_id: LocationIdx) -> String {
    locations
        .get(location_id.get())
        .map_or_else(|| location_id.to_string(), |location| location.external_id().to_owned())
}

fn validate_travel_values(
    travel_matrices: &TravelMatrices,
    locations: &[Location],
) -> Result<(), ProblemError> {
    match travel_matrices.first_negative_pair() {
        Some((from, to)) => Err(ProblemError::NegativeTravelData {
            from: location_name(locations, from),
            to: location_name(locations, to),
        }),
        None => Ok(()),
    }
}

/// Every vehicle must be able to reach every job from its start location, and
/// to reach its end location from every job when the route is closed.
fn validate_travel_data(
    travel_matrices: &TravelMatrices,
    locations: &[Location],
    vehicles: &[Vehicle],
    jobs: &[Job],
) -> Result<(), ProblemError> {
    for vehicle in vehicles {
        for job in jobs {
            let mut edges = vec![(vehicle.start_location_id(), job.location_id())];
            if let Some(end_location_id) = vehicle.end_location_id() {
                edges.push((job.location_id(), end_location_id));
            }

            for (from, to) in edges {
                if !travel_matrices.is_reachable(from, to) {
                    return Err(ProblemError::MissingTravelData {
                        vehicle: vehicle.external_id().to_owned(),
                        from: locations[from].external_id().to_owned(),
                        to: locations[to].external_id().to_owned(),
                    });
                }
            }
        }
    }

    Ok(())
}
