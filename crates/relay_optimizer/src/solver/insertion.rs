use jiff::Timestamp;

use crate::{
    problem::{job::JobIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::solution::{
        route::WorkingSolutionRoute,
        route_id::RouteIdx,
        utils::{compute_arrival_time, compute_departure_time},
        working_solution::WorkingSolution,
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// Why a job can't be placed at a given position of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleReason {
    CapacityExceeded { dimension: usize },
    /// Also reported when travel data is missing on an edge leading to `job`.
    TimeWindowViolated { job: JobIdx },
    VehicleLatestArrivalExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub route_id: RouteIdx,
    pub job_id: JobIdx,
    pub position: usize,
}

impl Insertion {
    pub fn route<'a>(&self, solution: &'a WorkingSolution) -> &'a WorkingSolutionRoute {
        solution.route(self.route_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionEvaluation {
    /// Cost added to the route
    pub cost: f64,
    /// Arrival at the inserted job once waiting for its window, i.e. the
    /// service start.
    pub arrival_time: Timestamp,
    pub departure_time: Timestamp,
}

pub fn for_each_insertion(
    solution: &WorkingSolution,
    job_id: JobIdx,
    mut f: impl FnMut(Insertion),
) {
    for (route_id, route) in solution.routes().iter().enumerate_idx() {
        for_each_route_insertion(route_id, route, job_id, &mut f);
    }
}

pub fn for_each_route_insertion(
    route_id: RouteIdx,
    route: &WorkingSolutionRoute,
    job_id: JobIdx,
    mut f: impl FnMut(Insertion),
) {
    for position in 0..=route.len() {
        f(Insertion {
            route_id,
            job_id,
            position,
        });
    }
}

/// Checks whether `job_id` fits at `position` of `route` and returns the cost
/// it adds. Only the edges around `position` are priced and the schedule is
/// only propagated until it stops changing.
///
/// Checks run in this order: the job's own time window, the shift of the
/// following stops and the vehicle latest arrival, then every capacity
/// dimension.
pub fn evaluate_insertion(
    problem: &VehicleRoutingProblem,
    route: &WorkingSolutionRoute,
    job_id: JobIdx,
    position: usize,
) -> Result<InsertionEvaluation, InfeasibleReason> {
    let vehicle = route.vehicle(problem);
    let job = problem.job(job_id);
    let (previous_location_id, previous_departure) = route.previous_stop(problem, position);

    let travel_to_job = problem
        .travel(previous_location_id, job.location_id())
        .ok_or(InfeasibleReason::TimeWindowViolated { job: job_id })?;

    let arrival_time = compute_arrival_time(previous_departure, travel_to_job.time);
    if !job.time_window().is_satisfied(arrival_time) {
        return Err(InfeasibleReason::TimeWindowViolated { job: job_id });
    }

    let departure_time = compute_departure_time(
        job,
        arrival_time,
        job.time_window().waiting_duration(arrival_time),
    );

    let end_time = propagate_shift(problem, route, job_id, position, departure_time)?;
    if end_time > vehicle.latest_arrival() {
        return Err(InfeasibleReason::VehicleLatestArrivalExceeded);
    }

    if let Some(dimension) = route
        .total_load()
        .first_exceeded_dimension(job.size(), vehicle.capacity())
    {
        return Err(InfeasibleReason::CapacityExceeded { dimension });
    }

    let mut cost = problem.edge_cost(vehicle, travel_to_job);
    if let Some(next_location_id) = route.next_location_id(problem, position) {
        let travel_from_job = problem
            .travel(job.location_id(), next_location_id)
            .ok_or(InfeasibleReason::TimeWindowViolated { job: job_id })?;
        cost += problem.edge_cost(vehicle, travel_from_job);

        // An empty closed route has no start -> end edge to replace.
        if !route.is_empty() {
            let replaced = problem
                .travel(previous_location_id, next_location_id)
                .ok_or(InfeasibleReason::TimeWindowViolated { job: job_id })?;
            cost -= problem.edge_cost(vehicle, replaced);
        }
    }

    Ok(InsertionEvaluation {
        cost,
        arrival_time: job.time_window().service_start(arrival_time),
        departure_time,
    })
}

/// Pushes the new departure time through the stops after `position` and
/// returns the resulting route end time.
fn propagate_shift(
    problem: &VehicleRoutingProblem,
    route: &WorkingSolutionRoute,
    job_id: JobIdx,
    position: usize,
    departure_time: Timestamp,
) -> Result<Timestamp, InfeasibleReason> {
    let vehicle = route.vehicle(problem);
    let mut location_id = problem.job(job_id).location_id();
    let mut departure = departure_time;

    for next_position in position..route.len() {
        let next_job_id = route.job_id(next_position);
        let next_job = problem.job(next_job_id);

        let travel = problem
            .travel(location_id, next_job.location_id())
            .ok_or(InfeasibleReason::TimeWindowViolated { job: next_job_id })?;
        let arrival = compute_arrival_time(departure, travel.time);
        if !next_job.time_window().is_satisfied(arrival) {
            return Err(InfeasibleReason::TimeWindowViolated { job: next_job_id });
        }

        let service_start = next_job.time_window().service_start(arrival);
        if service_start == route.service_start_time(next_position) {
            // The rest of the schedule is unchanged.
            return Ok(route.end_time());
        }

        departure = compute_departure_time(
            next_job,
            arrival,
            next_job.time_window().waiting_duration(arrival),
        );
        location_id = next_job.location_id();
    }

    match vehicle.end_location_id() {
        None => Ok(departure),
        Some(end_location_id) => {
            let travel = problem
                .travel(location_id, end_location_id)
                .ok_or(InfeasibleReason::TimeWindowViolated { job: job_id })?;
            Ok(compute_arrival_time(departure, travel.time))
        }
    }
}
