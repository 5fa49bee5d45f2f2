#![allow(dead_code)]

use jiff::{SignedDuration, Timestamp};
use relay_optimizer::{
    problem::{
        capacity::Capacity,
        job::{Job, JobBuilder},
        location::Location,
        time_window::TimeWindow,
        travel_cost_matrix::{TravelMatrices, TravelMatricesBuilder},
        vehicle::{Vehicle, VehicleBuilder},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::solution::working_solution::WorkingSolution,
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

/// Jobs on every grid location but the first, demand alternating between 1
/// and 2, with a window every third job.
pub fn create_grid_problem(rows: usize, cols: usize, vehicles: usize) -> VehicleRoutingProblem {
    let locations = create_location_grid(rows, cols);

    let jobs: Vec<Job> = (1..locations.len())
        .map(|location_id| {
            let mut builder = JobBuilder::default();
            builder
                .set_external_id(format!("job-{location_id}"))
                .set_location_id(location_id)
                .set_size(Capacity::from_vec(vec![1.0 + (location_id % 2) as f64]))
                .set_duration(SignedDuration::from_secs(1));
            if location_id % 3 == 0 {
                builder.set_time_window(TimeWindow::from_seconds(0, 20).unwrap());
            }
            builder.build()
        })
        .collect();

    let vehicles: Vec<Vehicle> = (0..vehicles)
        .map(|index| {
            let mut builder = VehicleBuilder::default();
            builder
                .set_vehicle_id(format!("vehicle-{index}"))
                .set_start_location_id(0)
                .set_capacity(Capacity::from_vec(vec![8.0]))
                .set_return(true);
            builder.build()
        })
        .collect();

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_travel_matrices(TravelMatrices::from_euclidean(&locations, 1.0))
        .set_locations(locations)
        .set_jobs(jobs)
        .set_vehicles(vehicles);

    builder.build().unwrap()
}

/// Two open routes from the same depot, three jobs sharing one late window.
/// The 2059 job only fits the first vehicle, which cannot also carry both of
/// the others.
pub fn create_two_vehicles_problem() -> VehicleRoutingProblem {
    let locations: Vec<Location> = ["1", "2", "3", "4"].into_iter().map(Location::new).collect();

    let mut matrices = TravelMatricesBuilder::new(4, true);
    for (from, to, distance) in [
        (0, 1, 25970.0),
        (0, 2, 20104.0),
        (0, 3, 33114.0),
        (1, 2, 22523.0),
        (1, 3, 11855.0),
        (2, 3, 22775.0),
    ] {
        matrices
            .add_transport_distance(from, to, distance)
            .add_transport_time(from, to, distance * 0.003);
    }

    let time_window = TimeWindow::from_seconds(26841, 27201).unwrap();
    let jobs: Vec<Job> = [(1, "2", 2059.0), (2, "3", 375.0), (3, "4", 323.0)]
        .into_iter()
        .map(|(location_id, external_id, weight)| {
            let mut builder = JobBuilder::default();
            builder
                .set_external_id(external_id)
                .set_location_id(location_id)
                .set_size(Capacity::from_vec(vec![1.0, 0.0, weight]))
                .set_duration(SignedDuration::from_secs(120))
                .set_time_window(time_window.clone());
            builder.build()
        })
        .collect();

    let vehicles: Vec<Vehicle> = [("vehicle-01", 2100.0), ("vehicle-02", 1100.0)]
        .into_iter()
        .map(|(external_id, weight)| {
            let mut builder = VehicleBuilder::default();
            builder
                .set_vehicle_id(external_id)
                .set_start_location_id(0)
                .set_capacity(Capacity::from_vec(vec![6.0, 0.0, weight]))
                .set_earliest_start(Timestamp::UNIX_EPOCH)
                .set_latest_arrival(Timestamp::from_second(27201).unwrap())
                .set_cost_per_distance(1.0)
                .set_cost_per_time(1.0);
            builder.build()
        })
        .collect();

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_travel_matrices(matrices.build())
        .set_locations(locations)
        .set_jobs(jobs)
        .set_vehicles(vehicles);

    builder.build().unwrap()
}

/// Panics when a route breaks capacity, time windows or the vehicle latest
/// arrival, or when a job is served twice or lost.
pub fn assert_solution_invariants(solution: &WorkingSolution) {
    let problem = solution.problem();
    let mut seen = vec![false; problem.jobs().len()];

    for route in solution.routes() {
        let vehicle = route.vehicle(problem);
        assert!(route.is_feasible(), "{:?}", route.violation());

        for (position, &job_id) in route.job_ids().iter().enumerate() {
            assert!(!seen[job_id.get()], "job {job_id} served twice");
            seen[job_id.get()] = true;

            let job = problem.job(job_id);
            assert!(job.time_window().is_satisfied(route.arrival_time(position)));
            assert!(
                route
                    .load_at(position)
                    .first_overloaded_dimension(vehicle.capacity())
                    .is_none()
            );
        }

        if !route.is_empty() {
            assert!(route.end_time() <= vehicle.latest_arrival());
        }
    }

    for (index, served) in seen.into_iter().enumerate() {
        let unassigned = solution
            .unassigned_jobs()
            .iter()
            .any(|job_id| job_id.get() == index);
        assert!(served != unassigned, "job {index} lost or duplicated");
    }
}
