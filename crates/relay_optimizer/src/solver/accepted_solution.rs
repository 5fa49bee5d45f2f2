use jiff::Timestamp;
use serde::Serialize;

use super::{score::Score, solution::working_solution::WorkingSolution};

#[derive(Clone)]
pub struct AcceptedSolution {
    pub solution: WorkingSolution,
    pub score: Score,
}

impl AcceptedSolution {
    pub fn new(solution: WorkingSolution) -> Self {
        let score = solution.score();
        AcceptedSolution { solution, score }
    }

    pub fn has_unassigned(&self) -> bool {
        self.score.has_unassigned()
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary::from(&self.solution)
    }
}

/// Flattened view of a solution, with external ids, for result writers.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionSummary {
    pub cost: f64,
    pub distance: f64,
    pub routes: Vec<RouteSummary>,
    pub unassigned_jobs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub vehicle_id: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub distance: f64,
    pub transport_time: f64,
    pub cost: f64,
    pub stops: Vec<StopSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopSummary {
    pub job_id: String,
    pub location_id: String,
    pub arrival: Timestamp,
    pub service_start: Timestamp,
    pub departure: Timestamp,
    /// Load carried once the job is served
    pub load: Vec<f64>,
}

impl From<&WorkingSolution> for SolutionSummary {
    fn from(solution: &WorkingSolution) -> Self {
        let problem = solution.problem();

        let routes = solution
            .non_empty_routes_iter()
            .map(|route| RouteSummary {
                vehicle_id: route.vehicle(problem).external_id().to_owned(),
                start: route.start_time(problem),
                end: route.end_time(),
                distance: route.distance(),
                transport_time: route.transport_time(),
                cost: route.cost(),
                stops: route
                    .job_ids()
                    .iter()
                    .enumerate()
                    .map(|(position, &job_id)| {
                        let job = problem.job(job_id);
                        StopSummary {
                            job_id: job.external_id().to_owned(),
                            location_id: problem
                                .location(job.location_id())
                                .external_id()
                                .to_owned(),
                            arrival: route.arrival_time(position),
                            service_start: route.service_start_time(position),
                            departure: route.departure_time(position),
                            load: route.load_at(position).iter().collect(),
                        }
                    })
                    .collect(),
            })
            .collect();

        let unassigned_jobs = solution
            .sorted_unassigned_jobs()
            .into_iter()
            .map(|job_id| problem.job(job_id).external_id().to_owned())
            .collect();

        SolutionSummary {
            cost: solution.total_cost(),
            distance: solution.total_distance(),
            routes,
            unassigned_jobs,
        }
    }
}
