use rand::seq::IndexedRandom;

use crate::{problem::job::JobIdx, solver::solution::working_solution::WorkingSolution};

use super::{ruin_context::RuinContext, ruin_random::RuinRandom, ruin_solution::RuinSolution};

/// Removes a random assigned job and its closest assigned neighbours.
/// Falls back to [`RuinRandom`] when no assigned job has coordinates.
pub struct RuinRadial;

impl RuinSolution for RuinRadial {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>)
    where
        R: rand::Rng,
    {
        let problem = context.problem;
        let candidates: Vec<JobIdx> = solution
            .assigned_jobs_iter()
            .filter(|&job_id| {
                problem
                    .location(problem.job(job_id).location_id())
                    .has_coordinates()
            })
            .collect();

        let Some(&center) = candidates.choose(&mut *context.rng) else {
            RuinRandom.ruin_solution(solution, context);
            return;
        };

        let mut remaining_jobs_to_remove = context.num_jobs_to_remove;
        for job_id in problem.nearest_jobs(center) {
            if remaining_jobs_to_remove == 0 {
                break;
            }

            if solution.remove_job(job_id) {
                remaining_jobs_to_remove -= 1;
            }
        }
    }
}
