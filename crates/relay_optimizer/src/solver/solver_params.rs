use serde::Deserialize;

use crate::acceptor::solution_acceptor::SolverAcceptorStrategy;

use super::{
    recreate::recreate_params::RecreateParams, ruin::ruin_params::RuinParams,
    termination::Termination,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub terminations: Vec<Termination>,
    pub solver_acceptor: SolverAcceptorStrategy,

    pub ruin: RuinParams,
    pub recreate: RecreateParams,

    pub insertion_threads: Threads,
    pub search_threads: Threads,

    /// Base seed, each search thread derives its own generator from it
    pub seed: u64,

    /// Reset the incumbent to the best solution every time this many
    /// iterations went by without improvement
    pub restart_from_best_iterations: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            terminations: vec![Termination::IterationsWithoutImprovement(100)],
            solver_acceptor: SolverAcceptorStrategy::Greedy,
            ruin: RuinParams::default(),
            recreate: RecreateParams::default(),
            insertion_threads: Threads::Single,
            search_threads: Threads::Single,
            seed: 2427121,
            restart_from_best_iterations: None,
        }
    }
}
