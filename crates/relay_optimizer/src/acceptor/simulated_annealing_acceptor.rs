use rand::Rng;

use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

/// Accepts everything [`GreedySolutionAcceptor`](super::greedy_solution_acceptor::GreedySolutionAcceptor) accepts. With the same number
/// of unassigned jobs, a worse cost is accepted with probability
/// `exp(-delta / T)` where `T = initial_temperature * cooling_rate^iteration`.
pub struct SimulatedAnnealingAcceptor {
    initial_temperature: f64,
    cooling_rate: f64,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(initial_temperature: f64, cooling_rate: f64) -> Self {
        SimulatedAnnealingAcceptor {
            initial_temperature,
            cooling_rate,
        }
    }

    fn temperature(&self, iteration: usize) -> f64 {
        let exponent = i32::try_from(iteration).unwrap_or(i32::MAX);
        self.initial_temperature * self.cooling_rate.powi(exponent)
    }
}

impl AcceptSolution for SimulatedAnnealingAcceptor {
    fn accept<R>(
        &self,
        incumbent: &Score,
        candidate: &Score,
        context: AcceptSolutionContext<R>,
    ) -> bool
    where
        R: Rng,
    {
        if candidate < incumbent {
            return true;
        }

        if candidate.unassigned_jobs != incumbent.unassigned_jobs {
            return false;
        }

        let temperature = self.temperature(context.iteration);
        if temperature <= 0.0 || !temperature.is_finite() {
            return false;
        }

        let delta = candidate.cost - incumbent.cost;
        let probability = (-delta / temperature).exp();

        context.rng.random::<f64>() < probability
    }
}
