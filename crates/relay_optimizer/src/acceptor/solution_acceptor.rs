use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::solver::score::Score;

use super::{
    accept_solution::{AcceptSolution, AcceptSolutionContext},
    greedy_solution_acceptor::GreedySolutionAcceptor,
    simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
};

/// Acceptance criterion as configured in the solver params.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SolverAcceptorStrategy {
    #[default]
    Greedy,
    SimulatedAnnealing {
        initial_temperature: f64,
        cooling_rate: f64,
    },
}

pub enum SolutionAcceptor {
    Greedy(GreedySolutionAcceptor),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
}

impl From<&SolverAcceptorStrategy> for SolutionAcceptor {
    fn from(strategy: &SolverAcceptorStrategy) -> Self {
        match *strategy {
            SolverAcceptorStrategy::Greedy => SolutionAcceptor::Greedy(GreedySolutionAcceptor),
            SolverAcceptorStrategy::SimulatedAnnealing {
                initial_temperature,
                cooling_rate,
            } => SolutionAcceptor::SimulatedAnnealing(SimulatedAnnealingAcceptor::new(
                initial_temperature,
                cooling_rate,
            )),
        }
    }
}

impl AcceptSolution for SolutionAcceptor {
    fn accept<R>(
        &self,
        incumbent: &Score,
        candidate: &Score,
        context: AcceptSolutionContext<R>,
    ) -> bool
    where
        R: Rng,
    {
        match self {
            SolutionAcceptor::Greedy(acceptor) => acceptor.accept(incumbent, candidate, context),
            SolutionAcceptor::SimulatedAnnealing(acceptor) => {
                acceptor.accept(incumbent, candidate, context)
            }
        }
    }
}
