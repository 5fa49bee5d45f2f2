use std::sync::Arc;

use fxhash::FxHashSet;

use crate::{
    problem::{job::JobIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        insertion::Insertion,
        score::Score,
        solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// One route per vehicle of the fleet plus the jobs no route serves.
#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<WorkingSolutionRoute>,
    unassigned_jobs: FxHashSet<JobIdx>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<VehicleRoutingProblem>) -> Self {
        let routes = problem
            .fleet()
            .iter()
            .map(|(vehicle_id, _)| WorkingSolutionRoute::empty(&problem, vehicle_id))
            .collect();
        let unassigned_jobs = problem.jobs_iter().map(|(job_id, _)| job_id).collect();

        WorkingSolution {
            problem,
            routes,
            unassigned_jobs,
        }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        self.problem.as_ref()
    }

    pub fn problem_arc(&self) -> &Arc<VehicleRoutingProblem> {
        &self.problem
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn route_mut(&mut self, route_id: RouteIdx) -> &mut WorkingSolutionRoute {
        &mut self.routes[route_id]
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &WorkingSolutionRoute> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    pub fn non_empty_routes_count(&self) -> usize {
        self.non_empty_routes_iter().count()
    }

    pub fn unassigned_jobs(&self) -> &FxHashSet<JobIdx> {
        &self.unassigned_jobs
    }

    /// Unassigned jobs in declaration order.
    pub fn sorted_unassigned_jobs(&self) -> Vec<JobIdx> {
        let mut jobs: Vec<JobIdx> = self.unassigned_jobs.iter().copied().collect();
        jobs.sort_unstable();
        jobs
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned_jobs.is_empty()
    }

    pub fn is_unassigned(&self, job_id: JobIdx) -> bool {
        self.unassigned_jobs.contains(&job_id)
    }

    pub fn assigned_jobs_count(&self) -> usize {
        self.problem.jobs().len() - self.unassigned_jobs.len()
    }

    /// Assigned jobs in route order, routes in vehicle order.
    pub fn assigned_jobs_iter(&self) -> impl Iterator<Item = JobIdx> + '_ {
        self.routes
            .iter()
            .flat_map(|route| route.job_ids().iter().copied())
    }

    pub fn total_cost(&self) -> f64 {
        self.non_empty_routes_iter().map(|route| route.cost()).sum()
    }

    pub fn total_distance(&self) -> f64 {
        self.non_empty_routes_iter().map(|route| route.distance()).sum()
    }

    pub fn score(&self) -> Score {
        Score::new(self.unassigned_jobs.len(), self.total_cost())
    }

    pub fn is_feasible(&self) -> bool {
        self.routes.iter().all(|route| route.is_feasible())
    }

    /// Same vehicles visiting the same jobs in the same order.
    pub fn is_identical(&self, other: &WorkingSolution) -> bool {
        self.routes.len() == other.routes.len()
            && self
                .routes
                .iter()
                .zip(&other.routes)
                .all(|(route, other_route)| {
                    route.vehicle_id() == other_route.vehicle_id()
                        && route.job_ids() == other_route.job_ids()
                })
    }

    pub fn route_of_job(&self, job_id: JobIdx) -> Option<RouteIdx> {
        if self.is_unassigned(job_id) {
            return None;
        }

        self.routes
            .iter()
            .enumerate_idx()
            .find(|(_, route)| route.contains_job(job_id))
            .map(|(route_id, _)| route_id)
    }

    pub fn insert(&mut self, insertion: &Insertion) {
        if !self.unassigned_jobs.remove(&insertion.job_id) {
            return;
        }

        let route = &mut self.routes[insertion.route_id];
        route.insert(&self.problem, insertion.position, insertion.job_id);
    }

    pub fn remove_job(&mut self, job_id: JobIdx) -> bool {
        let Some(route_id) = self.route_of_job(job_id) else {
            return false;
        };

        let removed = self.routes[route_id].remove_job(&self.problem, job_id);
        if removed {
            self.unassigned_jobs.insert(job_id);
        }

        removed
    }
}
