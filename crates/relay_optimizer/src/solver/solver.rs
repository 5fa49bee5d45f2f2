use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    acceptor::solution_acceptor::SolverAcceptorStrategy,
    problem::vehicle_routing_problem::VehicleRoutingProblem,
};

use super::{
    accepted_solution::AcceptedSolution,
    search::{Search, SearchOutcome},
    solver_params::SolverParams,
};

type BestSolutionHandler = Arc<Mutex<dyn FnMut(&AcceptedSolution) + Send + Sync + 'static>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("at least one termination condition is required")]
    MissingTermination,
    #[error("at least one ruin strategy with a positive weight is required")]
    MissingRuinStrategy,
    #[error("ruin ratios must satisfy 0 <= minimum ({minimum}) <= maximum ({maximum}) <= 1")]
    InvalidRuinRatio { minimum: f64, maximum: f64 },
    #[error("ruin minimum size {minimum} is greater than maximum size {maximum}")]
    InvalidRuinSize { minimum: usize, maximum: usize },
    #[error("noise probability must be within [0, 1] and noise level non-negative")]
    InvalidNoise,
    #[error("simulated annealing needs a non-negative temperature and a cooling rate in (0, 1]")]
    InvalidAcceptor,
    #[error("at least one search thread is required")]
    NoSearchThreads,
    #[error("failed to build insertion thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to spawn search thread: {0}")]
    SpawnThread(#[from] std::io::Error),
    #[error("search thread {0} panicked")]
    SearchThreadPanicked(usize),
}

/// Runs `search_threads` independent searches on the same problem and keeps
/// the best solution any of them finds.
pub struct Solver {
    problem: Arc<VehicleRoutingProblem>,
    params: SolverParams,
    status: RwLock<SolverStatus>,
    best_solution: RwLock<Option<AcceptedSolution>>,
    on_best_solution_handler: Option<BestSolutionHandler>,
    is_stopped: Arc<AtomicBool>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(problem: VehicleRoutingProblem, params: SolverParams) -> Result<Self, SolverError> {
        validate_params(&params)?;

        Ok(Solver {
            problem: Arc::new(problem),
            params,
            status: RwLock::new(SolverStatus::Pending),
            best_solution: RwLock::new(None),
            on_best_solution_handler: None,
            is_stopped: Arc::new(AtomicBool::new(false)),
            created_at: Timestamp::now(),
        })
    }

    /// Called with every solution that improves on the best one found so far,
    /// across all search threads. Scores passed in are strictly decreasing.
    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn solve(&self) -> Result<SearchOutcome, SolverError> {
        self.is_stopped.store(false, Ordering::Relaxed);
        *self.best_solution.write() = None;
        *self.status.write() = SolverStatus::Running;

        let result = self.run_searches();

        *self.status.write() = SolverStatus::Completed;
        result
    }

    /// Searches finish their current iteration and return.
    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn problem(&self) -> &Arc<VehicleRoutingProblem> {
        &self.problem
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn current_best_solution(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        RwLockReadGuard::try_map(self.best_solution.read(), |solution| solution.as_ref()).ok()
    }

    fn run_searches(&self) -> Result<SearchOutcome, SolverError> {
        let num_threads = self.params.search_threads.number_of_threads();
        let mut rng = SmallRng::seed_from_u64(self.params.seed);
        let thread_rngs: Vec<SmallRng> = (0..num_threads)
            .map(|_| SmallRng::from_rng(&mut rng))
            .collect();

        info!(
            threads = num_threads,
            jobs = self.problem.jobs().len(),
            vehicles = self.problem.vehicles().len(),
            "Start solver"
        );

        let outcomes = thread::scope(|s| {
            let handles = thread_rngs
                .into_iter()
                .enumerate()
                .map(|(thread_index, mut thread_rng)| {
                    thread::Builder::new()
                        .name(thread_index.to_string())
                        .spawn_scoped(s, move || -> Result<SearchOutcome, SolverError> {
                            let thread_pool = self.create_insertion_thread_pool()?;
                            let mut search = Search::new(
                                &self.problem,
                                &self.params,
                                &thread_pool,
                                &self.is_stopped,
                            );

                            Ok(search.run(&mut thread_rng, |solution| {
                                self.publish_best_solution(solution)
                            }))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            handles
                .into_iter()
                .enumerate()
                .map(|(thread_index, handle)| {
                    handle
                        .join()
                        .map_err(|_| SolverError::SearchThreadPanicked(thread_index))?
                })
                .collect::<Result<Vec<SearchOutcome>, SolverError>>()
        })?;

        // min_by keeps the first of equal elements, ties go to the lowest thread
        let best = outcomes
            .into_iter()
            .min_by(|a, b| a.best.score.cmp(&b.best.score))
            .ok_or(SolverError::NoSearchThreads)?;

        debug!(
            iterations = best.iterations,
            cost = best.best.score.cost,
            unassigned = best.best.score.unassigned_jobs,
            "Solver completed"
        );

        *self.best_solution.write() = Some(best.best.clone());

        Ok(best)
    }

    fn create_insertion_thread_pool(&self) -> Result<rayon::ThreadPool, SolverError> {
        Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.insertion_threads.number_of_threads())
            .build()?)
    }

    fn publish_best_solution(&self, solution: &AcceptedSolution) {
        // Lock order is callback then best solution, the callback may read
        // the best solution.
        let callback = self
            .on_best_solution_handler
            .as_ref()
            .map(|handler| handler.lock());

        {
            let mut best_solution = self.best_solution.write();
            if best_solution
                .as_ref()
                .is_some_and(|best| best.score <= solution.score)
            {
                return;
            }

            *best_solution = Some(solution.clone());
        }

        if let Some(mut callback) = callback {
            callback(solution);
        }
    }
}

fn validate_params(params: &SolverParams) -> Result<(), SolverError> {
    if params.terminations.is_empty() {
        return Err(SolverError::MissingTermination);
    }

    let ruin = &params.ruin;
    if ruin.ruin_strategies.iter().all(|&(_, weight)| weight == 0) {
        return Err(SolverError::MissingRuinStrategy);
    }

    if !(0.0..=1.0).contains(&ruin.ruin_minimum_ratio)
        || !(0.0..=1.0).contains(&ruin.ruin_maximum_ratio)
        || ruin.ruin_minimum_ratio > ruin.ruin_maximum_ratio
    {
        return Err(SolverError::InvalidRuinRatio {
            minimum: ruin.ruin_minimum_ratio,
            maximum: ruin.ruin_maximum_ratio,
        });
    }

    if ruin.ruin_minimum_size > ruin.ruin_maximum_size {
        return Err(SolverError::InvalidRuinSize {
            minimum: ruin.ruin_minimum_size,
            maximum: ruin.ruin_maximum_size,
        });
    }

    let recreate = &params.recreate;
    if !(0.0..=1.0).contains(&recreate.noise_probability)
        || recreate.noise_level.is_nan()
        || recreate.noise_level < 0.0
    {
        return Err(SolverError::InvalidNoise);
    }

    if let SolverAcceptorStrategy::SimulatedAnnealing {
        initial_temperature,
        cooling_rate,
    } = params.solver_acceptor
        && (initial_temperature.is_nan()
            || initial_temperature < 0.0
            || !(cooling_rate > 0.0 && cooling_rate <= 1.0))
    {
        return Err(SolverError::InvalidAcceptor);
    }

    if params.search_threads.number_of_threads() == 0 {
        return Err(SolverError::NoSearchThreads);
    }

    Ok(())
}
