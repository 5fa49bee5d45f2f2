use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        recreate::{
            construction_best_insertion::ConstructionBestInsertion,
            recreate_context::RecreateContext,
        },
        solution::working_solution::WorkingSolution,
    },
};

/// Builds the initial solution: one empty route per vehicle, then cheapest
/// insertion of every job without noise. Jobs that fit nowhere stay
/// unassigned.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_solution(
    problem: &Arc<VehicleRoutingProblem>,
    thread_pool: &rayon::ThreadPool,
) -> WorkingSolution {
    debug!("Start construction heuristic");
    let mut solution = WorkingSolution::new(Arc::clone(problem));

    ConstructionBestInsertion::insert_jobs(
        &mut solution,
        RecreateContext {
            problem,
            noise_generator: None,
            thread_pool,
        },
    );

    debug!(
        routes = solution.non_empty_routes_count(),
        unassigned = solution.unassigned_jobs().len(),
        cost = solution.total_cost(),
        "End construction heuristic"
    );

    solution
}
