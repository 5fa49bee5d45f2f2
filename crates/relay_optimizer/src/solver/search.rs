use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::{SignedDuration, Timestamp};
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::{
    acceptor::{
        accept_solution::{AcceptSolution, AcceptSolutionContext},
        solution_acceptor::SolutionAcceptor,
    },
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        accepted_solution::AcceptedSolution,
        construction::construct_solution::construct_solution,
        noise::NoiseGenerator,
        recreate::{
            construction_best_insertion::ConstructionBestInsertion,
            recreate_context::RecreateContext,
        },
        ruin::{ruin_context::RuinContext, ruin_solution::RuinSolution},
        solution::working_solution::WorkingSolution,
        solver_params::SolverParams,
        termination::{SearchProgress, should_stop},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Constructing,
    Searching,
    Terminated,
}

pub struct SearchOutcome {
    pub best: AcceptedSolution,
    pub iterations: usize,
    pub iterations_without_improvement: usize,
    pub duration: SignedDuration,
}

/// Single ruin and recreate search: construction, then iterations on a clone
/// of the incumbent until a termination is met or the search is stopped.
pub struct Search<'a> {
    problem: &'a Arc<VehicleRoutingProblem>,
    params: &'a SolverParams,
    acceptor: SolutionAcceptor,
    thread_pool: &'a rayon::ThreadPool,
    is_stopped: &'a AtomicBool,
    phase: SearchPhase,
}

struct SearchState {
    incumbent: AcceptedSolution,
    best: AcceptedSolution,
    progress: SearchProgress,
}

impl<'a> Search<'a> {
    pub fn new(
        problem: &'a Arc<VehicleRoutingProblem>,
        params: &'a SolverParams,
        thread_pool: &'a rayon::ThreadPool,
        is_stopped: &'a AtomicBool,
    ) -> Self {
        Search {
            problem,
            params,
            acceptor: SolutionAcceptor::from(&params.solver_acceptor),
            thread_pool,
            is_stopped,
            phase: SearchPhase::Constructing,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn run<F>(&mut self, rng: &mut SmallRng, mut on_best_solution: F) -> SearchOutcome
    where
        F: FnMut(&AcceptedSolution),
    {
        let start = Timestamp::now();
        self.phase = SearchPhase::Constructing;

        let initial = AcceptedSolution::new(construct_solution(self.problem, self.thread_pool));
        on_best_solution(&initial);

        let mut state = SearchState {
            incumbent: initial.clone(),
            best: initial,
            progress: SearchProgress::new(start),
        };

        self.phase = SearchPhase::Searching;
        debug!(
            cost = state.best.score.cost,
            unassigned = state.best.score.unassigned_jobs,
            "Start search"
        );

        while !self.is_stopped.load(Ordering::Relaxed)
            && !should_stop(&self.params.terminations, &state.progress)
        {
            let improved = self.run_iteration(&mut state, rng);

            state.progress.iteration += 1;
            if improved {
                state.progress.iterations_without_improvement = 0;
                on_best_solution(&state.best);
            } else {
                state.progress.iterations_without_improvement += 1;
                self.restart_from_best(&mut state);
            }
        }

        self.phase = SearchPhase::Terminated;

        SearchOutcome {
            iterations: state.progress.iteration,
            iterations_without_improvement: state.progress.iterations_without_improvement,
            duration: state.progress.elapsed(),
            best: state.best,
        }
    }

    /// Returns whether the iteration produced a new best solution.
    fn run_iteration(&self, state: &mut SearchState, rng: &mut SmallRng) -> bool {
        let mut solution = state.incumbent.solution.clone();

        if !self.ruin(&mut solution, rng) {
            warn!("Ignore iteration due to failing ruin");
            return false;
        }

        self.recreate(&mut solution, rng);

        let score = solution.score();
        let accepted = self.acceptor.accept(
            &state.incumbent.score,
            &score,
            AcceptSolutionContext {
                iteration: state.progress.iteration,
                rng,
            },
        );

        if !accepted {
            return false;
        }

        state.incumbent = AcceptedSolution { solution, score };

        if score < state.best.score {
            state.best = state.incumbent.clone();
            info!(
                iteration = state.progress.iteration,
                cost = score.cost,
                unassigned = score.unassigned_jobs,
                "New best solution"
            );
            return true;
        }

        false
    }

    /// Returns false when the ruined solution has an infeasible route, which
    /// can happen when travel times do not satisfy the triangle inequality.
    fn ruin(&self, solution: &mut WorkingSolution, rng: &mut SmallRng) -> bool {
        let Some(ruin_strategy) = self.params.ruin.select_strategy(rng) else {
            return true;
        };

        let num_jobs_to_remove = self.params.ruin.num_jobs_to_remove(
            self.problem.jobs().len(),
            solution.assigned_jobs_count(),
            rng,
        );

        ruin_strategy.ruin_solution(
            solution,
            RuinContext {
                problem: self.problem,
                rng,
                num_jobs_to_remove,
            },
        );

        solution.is_feasible()
    }

    fn recreate(&self, solution: &mut WorkingSolution, rng: &mut SmallRng) {
        let recreate = &self.params.recreate;
        let noise_generator = recreate.has_noise().then(|| {
            NoiseGenerator::new(
                self.problem.jobs().len(),
                self.problem.max_cost(),
                recreate.noise_probability,
                recreate.noise_level,
                rng,
            )
        });

        ConstructionBestInsertion::insert_jobs(
            solution,
            RecreateContext {
                problem: self.problem,
                noise_generator: noise_generator.as_ref(),
                thread_pool: self.thread_pool,
            },
        );
    }

    fn restart_from_best(&self, state: &mut SearchState) {
        let Some(interval) = self.params.restart_from_best_iterations else {
            return;
        };

        if interval > 0
            && state
                .progress
                .iterations_without_improvement
                .is_multiple_of(interval)
            && !state.incumbent.solution.is_identical(&state.best.solution)
        {
            debug!(
                iteration = state.progress.iteration,
                "Restart from best solution"
            );
            state.incumbent = state.best.clone();
        }
    }
}
