use fxhash::FxHashSet;
use jiff::{SignedDuration, Timestamp};

use crate::{
    problem::{
        capacity::Capacity,
        job::{Job, JobIdx},
        location::LocationIdx,
        vehicle::{Vehicle, VehicleIdx},
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        insertion::InfeasibleReason,
        solution::utils::{compute_arrival_time, compute_departure_time, travel_duration},
    },
};

static EMPTY_LOAD: Capacity = Capacity::EMPTY;

/// Ordered stops of one vehicle together with the schedule and loads they
/// produce. Every mutation recomputes the cached data from the first changed
/// stop onward.
#[derive(Clone, Debug)]
pub struct WorkingSolutionRoute {
    pub(super) vehicle_id: VehicleIdx,
    pub(super) jobs: FxHashSet<JobIdx>,

    /// Jobs in visiting order
    pub(super) job_ids: Vec<JobIdx>,

    /// Arrival at each stop, before waiting for the time window to open.
    /// `Timestamp::MAX` when the stop can't be reached.
    pub(super) arrival_times: Vec<Timestamp>,

    pub(super) waiting_durations: Vec<SignedDuration>,

    pub(super) departure_times: Vec<Timestamp>,

    // loads[i] is the load carried once stop i has been served
    pub(super) loads: Vec<Capacity>,

    end_time: Timestamp,
    distance: f64,
    transport_time: f64,
    cost: f64,
    violation: Option<InfeasibleReason>,
    version: usize,
}

impl WorkingSolutionRoute {
    pub fn empty(problem: &VehicleRoutingProblem, vehicle_id: VehicleIdx) -> Self {
        WorkingSolutionRoute {
            vehicle_id,
            jobs: FxHashSet::default(),
            job_ids: Vec::new(),
            arrival_times: Vec::new(),
            waiting_durations: Vec::new(),
            departure_times: Vec::new(),
            loads: Vec::new(),
            end_time: problem.vehicle(vehicle_id).earliest_start(),
            distance: 0.0,
            transport_time: 0.0,
            cost: 0.0,
            violation: None,
            version: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.job_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_ids.is_empty()
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    /// Bumped on every change, used to invalidate cached insertions.
    pub fn version(&self) -> usize {
        self.version
    }

    pub fn contains_job(&self, job_id: JobIdx) -> bool {
        self.jobs.contains(&job_id)
    }

    pub fn job_ids(&self) -> &[JobIdx] {
        &self.job_ids
    }

    pub fn job_id(&self, position: usize) -> JobIdx {
        self.job_ids[position]
    }

    pub fn job_position(&self, job_id: JobIdx) -> Option<usize> {
        if !self.contains_job(job_id) {
            return None;
        }

        self.job_ids.iter().position(|&id| id == job_id)
    }

    pub fn arrival_time(&self, position: usize) -> Timestamp {
        self.arrival_times[position]
    }

    pub fn waiting_duration(&self, position: usize) -> SignedDuration {
        self.waiting_durations[position]
    }

    /// Arrival clamped to the opening of the time window.
    pub fn service_start_time(&self, position: usize) -> Timestamp {
        self.arrival_times[position]
            .checked_add(self.waiting_durations[position])
            .unwrap_or(Timestamp::MAX)
    }

    pub fn departure_time(&self, position: usize) -> Timestamp {
        self.departure_times[position]
    }

    pub fn load_at(&self, position: usize) -> &Capacity {
        &self.loads[position]
    }

    /// Load once every stop has been served, the peak of the route.
    pub fn total_load(&self) -> &Capacity {
        self.loads.last().unwrap_or(&EMPTY_LOAD)
    }

    pub fn start_time(&self, problem: &VehicleRoutingProblem) -> Timestamp {
        self.vehicle(problem).earliest_start()
    }

    /// Departure from the last stop, plus the drive back for closed routes.
    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn duration(&self, problem: &VehicleRoutingProblem) -> SignedDuration {
        self.end_time.duration_since(self.start_time(problem))
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn transport_time(&self) -> f64 {
        self.transport_time
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// First constraint the current stops break, if any.
    pub fn violation(&self) -> Option<InfeasibleReason> {
        self.violation
    }

    pub fn is_feasible(&self) -> bool {
        self.violation.is_none()
    }

    /// Location and departure time of the stop preceding `position`, the
    /// vehicle start for the first position.
    pub fn previous_stop(
        &self,
        problem: &VehicleRoutingProblem,
        position: usize,
    ) -> (LocationIdx, Timestamp) {
        if position == 0 {
            let vehicle = self.vehicle(problem);
            (vehicle.start_location_id(), vehicle.earliest_start())
        } else {
            (
                problem.job(self.job_ids[position - 1]).location_id(),
                self.departure_times[position - 1],
            )
        }
    }

    /// Location visited right after an insertion at `position`: the stop
    /// currently there, or the end location of a closed route.
    pub fn next_location_id(
        &self,
        problem: &VehicleRoutingProblem,
        position: usize,
    ) -> Option<LocationIdx> {
        match self.job_ids.get(position) {
            Some(&job_id) => Some(problem.job(job_id).location_id()),
            None => self.vehicle(problem).end_location_id(),
        }
    }

    pub fn insert(&mut self, problem: &VehicleRoutingProblem, position: usize, job_id: JobIdx) {
        if !self.jobs.insert(job_id) {
            return;
        }

        self.job_ids.insert(position, job_id);
        self.update_data(problem, position);
    }

    pub fn remove(&mut self, problem: &VehicleRoutingProblem, position: usize) -> Option<JobIdx> {
        if position >= self.job_ids.len() {
            return None;
        }

        let job_id = self.job_ids.remove(position);
        self.jobs.remove(&job_id);
        self.update_data(problem, position);

        Some(job_id)
    }

    pub fn remove_job(&mut self, problem: &VehicleRoutingProblem, job_id: JobIdx) -> bool {
        match self.job_position(job_id) {
            Some(position) => self.remove(problem, position).is_some(),
            None => false,
        }
    }

    fn update_data(&mut self, problem: &VehicleRoutingProblem, from: usize) {
        let len = self.len();
        self.version += 1;

        self.arrival_times.resize(len, Timestamp::MAX);
        self.waiting_durations.resize(len, SignedDuration::ZERO);
        self.departure_times.resize(len, Timestamp::MAX);
        self.loads
            .resize_with(len, || Capacity::with_dimensions(problem.capacity_dimensions()));

        let mut is_reachable = from == 0 || self.departure_times[from - 1] != Timestamp::MAX;

        for position in from..len {
            let job = problem.job(self.job_ids[position]);
            let (previous_location_id, previous_departure) = self.previous_stop(problem, position);

            let arrival = if is_reachable {
                problem
                    .travel(previous_location_id, job.location_id())
                    .map(|travel| compute_arrival_time(previous_departure, travel.time))
            } else {
                None
            };

            match arrival {
                Some(arrival) => {
                    let waiting_duration = job.time_window().waiting_duration(arrival);
                    self.arrival_times[position] = arrival;
                    self.waiting_durations[position] = waiting_duration;
                    self.departure_times[position] =
                        compute_departure_time(job, arrival, waiting_duration);
                }
                None => {
                    is_reachable = false;
                    self.arrival_times[position] = Timestamp::MAX;
                    self.waiting_durations[position] = SignedDuration::ZERO;
                    self.departure_times[position] = Timestamp::MAX;
                }
            }

            self.update_load(problem, position, job);
        }

        self.update_summary(problem);
    }

    fn update_load(&mut self, problem: &VehicleRoutingProblem, position: usize, job: &Job) {
        let (previous, current) = self.loads.split_at_mut(position);
        let load = &mut current[0];
        match previous.last() {
            Some(previous_load) => load.clone_from(previous_load),
            None => *load = Capacity::with_dimensions(problem.capacity_dimensions()),
        }
        *load += job.size();
    }

    fn update_summary(&mut self, problem: &VehicleRoutingProblem) {
        let vehicle = problem.vehicle(self.vehicle_id);

        let mut distance = 0.0;
        let mut transport_time = 0.0;
        let mut cost = 0.0;
        let mut violation = None;

        let mut previous_location_id = vehicle.start_location_id();
        for (position, &job_id) in self.job_ids.iter().enumerate() {
            let job = problem.job(job_id);

            match problem.travel(previous_location_id, job.location_id()) {
                Some(travel) => {
                    distance += travel.distance;
                    transport_time += travel.time;
                    cost += problem.edge_cost(vehicle, travel);
                }
                None => {
                    violation.get_or_insert(InfeasibleReason::TimeWindowViolated { job: job_id });
                }
            }

            if violation.is_none() && !job.time_window().is_satisfied(self.arrival_times[position])
            {
                violation = Some(InfeasibleReason::TimeWindowViolated { job: job_id });
            }

            if violation.is_none()
                && let Some(dimension) =
                    self.loads[position].first_overloaded_dimension(vehicle.capacity())
            {
                violation = Some(InfeasibleReason::CapacityExceeded { dimension });
            }

            previous_location_id = job.location_id();
        }

        self.end_time = match self.job_ids.last() {
            None => vehicle.earliest_start(),
            Some(&last_job_id) => {
                let last_departure = self.departure_times[self.len() - 1];
                match vehicle.end_location_id() {
                    None => last_departure,
                    Some(end_location_id) => {
                        match problem.travel(previous_location_id, end_location_id) {
                            Some(travel) => {
                                distance += travel.distance;
                                transport_time += travel.time;
                                cost += problem.edge_cost(vehicle, travel);
                                last_departure
                                    .checked_add(travel_duration(travel.time))
                                    .unwrap_or(Timestamp::MAX)
                            }
                            None => {
                                violation.get_or_insert(InfeasibleReason::TimeWindowViolated {
                                    job: last_job_id,
                                });
                                Timestamp::MAX
                            }
                        }
                    }
                }
            }
        };

        if violation.is_none() && self.end_time > vehicle.latest_arrival() {
            violation = Some(InfeasibleReason::VehicleLatestArrivalExceeded);
        }

        self.distance = distance;
        self.transport_time = transport_time;
        self.cost = cost;
        self.violation = violation;
    }
}
