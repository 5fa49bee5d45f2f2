use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    problem::job::JobIdx,
    solver::{
        insertion::for_each_route_insertion,
        insertion_cache::{InsertionCache, InsertionCacheEntry},
        solution::{
            route::WorkingSolutionRoute, route_id::RouteIdx, working_solution::WorkingSolution,
        },
    },
    utils::enumerate_idx::EnumerateIdx,
};

use super::recreate_context::RecreateContext;

/// Global cheapest insertion: at every step all (unassigned job, route,
/// position) candidates are priced and the cheapest one is committed, until
/// no unassigned job fits anywhere.
///
/// Ties go to the lowest job index, then the lowest route index, then the
/// lowest position. Jobs are priced in parallel but reduced in job order, so
/// the result does not depend on the number of threads.
pub struct ConstructionBestInsertion;

struct JobCandidate {
    job_id: JobIdx,
    best: Option<InsertionCacheEntry>,
    computed: Vec<(RouteIdx, usize, Option<InsertionCacheEntry>)>,
}

impl ConstructionBestInsertion {
    pub fn insert_jobs(solution: &mut WorkingSolution, context: RecreateContext) {
        let mut insertion_cache = InsertionCache::new();

        loop {
            let unassigned_jobs = solution.sorted_unassigned_jobs();
            if unassigned_jobs.is_empty() {
                break;
            }

            let candidates: Vec<JobCandidate> = context.thread_pool.install(|| {
                unassigned_jobs
                    .par_iter()
                    .map(|&job_id| {
                        best_job_insertion(solution, job_id, &insertion_cache, &context)
                    })
                    .collect()
            });

            let mut best: Option<InsertionCacheEntry> = None;
            for candidate in candidates {
                for (route_id, version, entry) in candidate.computed {
                    insertion_cache.insert(route_id, version, candidate.job_id, entry);
                }

                if let Some(entry) = candidate.best
                    && best.is_none_or(|best| entry.cost < best.cost)
                {
                    best = Some(entry);
                }
            }

            let Some(best) = best else {
                break;
            };

            solution.insert(&best.insertion);
            insertion_cache.clear(solution.routes());
        }
    }
}

fn best_job_insertion(
    solution: &WorkingSolution,
    job_id: JobIdx,
    insertion_cache: &InsertionCache,
    context: &RecreateContext,
) -> JobCandidate {
    let mut best: Option<InsertionCacheEntry> = None;
    let mut computed = Vec::new();

    for (route_id, route) in solution.routes().iter().enumerate_idx() {
        let entry = match insertion_cache.get(route_id, route.version(), job_id) {
            Some(entry) => *entry,
            None => {
                let entry = best_route_insertion(route_id, route, job_id, context);
                computed.push((route_id, route.version(), entry));
                entry
            }
        };

        if let Some(entry) = entry
            && best.is_none_or(|best| entry.cost < best.cost)
        {
            best = Some(entry);
        }
    }

    JobCandidate {
        job_id,
        best,
        computed,
    }
}

fn best_route_insertion(
    route_id: RouteIdx,
    route: &WorkingSolutionRoute,
    job_id: JobIdx,
    context: &RecreateContext,
) -> Option<InsertionCacheEntry> {
    let mut best: Option<InsertionCacheEntry> = None;

    for_each_route_insertion(route_id, route, job_id, |insertion| {
        let Some(cost) = context.insertion_cost(route, job_id, insertion.position) else {
            return;
        };

        if best.is_none_or(|best| cost < best.cost) {
            best = Some(InsertionCacheEntry { cost, insertion });
        }
    });

    best
}
