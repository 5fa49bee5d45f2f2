use crate::{
    problem::{job::JobIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        insertion::evaluate_insertion, noise::NoiseGenerator,
        solution::route::WorkingSolutionRoute,
    },
};

pub struct RecreateContext<'a> {
    pub problem: &'a VehicleRoutingProblem,
    pub noise_generator: Option<&'a NoiseGenerator>,
    pub thread_pool: &'a rayon::ThreadPool,
}

impl<'a> RecreateContext<'a> {
    /// Selection cost of inserting `job_id` at `position`, `None` when the
    /// insertion is infeasible.
    pub fn insertion_cost(
        &self,
        route: &WorkingSolutionRoute,
        job_id: JobIdx,
        position: usize,
    ) -> Option<f64> {
        let evaluation = evaluate_insertion(self.problem, route, job_id, position).ok()?;

        Some(
            evaluation.cost
                + self
                    .noise_generator
                    .map_or(0.0, |noise_generator| noise_generator.create_noise(job_id)),
        )
    }
}
