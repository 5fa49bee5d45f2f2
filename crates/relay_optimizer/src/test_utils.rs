use std::sync::Arc;

use jiff::SignedDuration;
use rand::RngCore;

use crate::{
    problem::{
        capacity::Capacity,
        job::{Job, JobBuilder},
        location::Location,
        time_window::TimeWindow,
        travel_cost_matrix::{TravelMatrices, TravelMatricesBuilder},
        vehicle::{Vehicle, VehicleBuilder},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::{
        insertion::Insertion,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

pub fn create_location_grid(rows: usize, cols: usize) -> Vec<Location> {
    let mut locations = Vec::new();

    for y in 0..rows {
        for x in 0..cols {
            let id = locations.len().to_string();
            locations.push(Location::from_cartesian(id, x as f64, y as f64));
        }
    }

    locations
}

pub fn create_locations(points: Vec<(f64, f64)>) -> Vec<Location> {
    points
        .iter()
        .enumerate()
        .map(|(index, &(x, y))| Location::from_cartesian(index.to_string(), x, y))
        .collect()
}

pub fn create_basic_jobs(location_ids: Vec<usize>) -> Vec<Job> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = JobBuilder::default();
            builder.set_location_id(location_id);
            builder.set_external_id(index.to_string());
            builder.build()
        })
        .collect()
}

pub fn create_sized_jobs(jobs: Vec<(usize, Vec<f64>)>) -> Vec<Job> {
    jobs.into_iter()
        .enumerate()
        .map(|(index, (location_id, size))| {
            let mut builder = JobBuilder::default();
            builder
                .set_location_id(location_id)
                .set_external_id(index.to_string())
                .set_size(Capacity::from_vec(size));
            builder.build()
        })
        .collect()
}

pub fn create_jobs_with_time_windows(
    jobs: Vec<(usize, Option<TimeWindow>, SignedDuration)>,
) -> Vec<Job> {
    jobs.into_iter()
        .enumerate()
        .map(|(index, (location_id, time_window, duration))| {
            let mut builder = JobBuilder::default();
            builder
                .set_location_id(location_id)
                .set_external_id(index.to_string())
                .set_duration(duration);
            if let Some(time_window) = time_window {
                builder.set_time_window(time_window);
            }
            builder.build()
        })
        .collect()
}

pub fn create_basic_vehicles(location_ids: Vec<usize>) -> Vec<Vehicle> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = VehicleBuilder::default();
            builder.set_start_location_id(location_id);
            builder.set_vehicle_id(index.to_string());
            builder.build()
        })
        .collect()
}

pub fn create_capacitated_vehicles(vehicles: Vec<(usize, Vec<f64>)>) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .enumerate()
        .map(|(index, (location_id, capacity))| {
            let mut builder = VehicleBuilder::default();
            builder
                .set_start_location_id(location_id)
                .set_vehicle_id(index.to_string())
                .set_capacity(Capacity::from_vec(capacity));
            builder.build()
        })
        .collect()
}

pub fn create_test_problem(
    locations: Vec<Location>,
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();

    builder.set_travel_matrices(TravelMatrices::from_euclidean(&locations, 1.0));
    builder.set_jobs(jobs);
    builder.set_locations(locations);
    builder.set_vehicles(vehicles);

    builder.build().unwrap()
}

/// Jobs at locations 1 and 2 served from location 0, with no travel data
/// between the two job locations.
pub fn create_problem_with_missing_edge() -> VehicleRoutingProblem {
    let mut matrices = TravelMatricesBuilder::new(3, true);
    matrices
        .add_transport_distance(0, 1, 10.0)
        .add_transport_time(0, 1, 10.0)
        .add_transport_distance(0, 2, 10.0)
        .add_transport_time(0, 2, 10.0);

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_locations(vec![Location::new("0"), Location::new("1"), Location::new("2")])
        .set_jobs(create_basic_jobs(vec![1, 2]))
        .set_vehicles(create_basic_vehicles(vec![0]))
        .set_travel_matrices(matrices.build());

    builder.build().unwrap()
}

pub fn create_thread_pool(num_threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .unwrap()
}

pub struct TestRoute {
    pub vehicle_id: usize,
    pub job_ids: Vec<usize>,
}

pub fn create_test_working_solution(
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<TestRoute>,
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(problem);

    for route in routes {
        for (position, &job_id) in route.job_ids.iter().enumerate() {
            solution.insert(&Insertion {
                route_id: RouteIdx::new(route.vehicle_id),
                job_id: job_id.into(),
                position,
            });
        }
    }

    solution
}

pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_rng_cycles() {
        let data = vec![4, 8, 15];
        let mut rng = MockRng::new(data.clone());

        for &expected in data.iter().cycle().take(7) {
            assert_eq!(rng.next_u64(), expected);
        }
    }

    #[test]
    fn test_location_grid_ids() {
        let locations = create_location_grid(2, 3);

        assert_eq!(locations.len(), 6);
        assert_eq!(locations[4].external_id(), "4");
        let point = locations[4].point().unwrap();
        assert_eq!((point.x(), point.y()), (1.0, 1.0));
    }
}
