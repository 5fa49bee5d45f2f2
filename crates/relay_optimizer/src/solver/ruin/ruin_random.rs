use rand::seq::IteratorRandom;

use crate::{problem::job::JobIdx, solver::solution::working_solution::WorkingSolution};

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

/// Removes jobs drawn uniformly, without replacement, among the assigned ones.
pub struct RuinRandom;

impl RuinSolution for RuinRandom {
    fn ruin_solution<R>(
        &self,
        solution: &mut WorkingSolution,
        RuinContext {
            rng,
            num_jobs_to_remove,
            ..
        }: RuinContext<R>,
    ) where
        R: rand::Rng,
    {
        let job_ids: Vec<JobIdx> = solution
            .assigned_jobs_iter()
            .choose_multiple(rng, num_jobs_to_remove);

        for job_id in job_ids {
            solution.remove_job(job_id);
        }
    }
}
