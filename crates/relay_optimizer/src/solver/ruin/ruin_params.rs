use rand::{Rng, seq::IndexedRandom};
use serde::Deserialize;

use super::ruin_strategy::RuinStrategy;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RuinParams {
    /// Strategies with their selection weight
    pub ruin_strategies: Vec<(RuinStrategy, u64)>,

    /// Between 0.0 and 1.0, where 1.0 means that the ruin will remove up to 100% of the solution
    pub ruin_minimum_ratio: f64,

    /// Between 0.0 and 1.0, where 1.0 means that the ruin will remove up to 100% of the solution
    pub ruin_maximum_ratio: f64,

    pub ruin_minimum_size: usize,
    pub ruin_maximum_size: usize,
}

impl Default for RuinParams {
    fn default() -> Self {
        RuinParams {
            ruin_strategies: vec![(RuinStrategy::Random, 1), (RuinStrategy::Radial, 1)],
            ruin_minimum_ratio: 0.1,
            ruin_maximum_ratio: 0.5,
            ruin_minimum_size: 1,
            ruin_maximum_size: 50,
        }
    }
}

impl RuinParams {
    pub fn select_strategy<R>(&self, rng: &mut R) -> Option<RuinStrategy>
    where
        R: Rng,
    {
        self.ruin_strategies
            .choose_weighted(rng, |&(_, weight)| weight)
            .ok()
            .map(|&(strategy, _)| strategy)
    }

    /// Inclusive range the number of removed jobs is drawn from.
    pub fn num_jobs_to_remove_range(&self, num_jobs: usize) -> (usize, usize) {
        let num_jobs = num_jobs as f64;
        let minimum = self
            .ruin_minimum_size
            .max((self.ruin_minimum_ratio * num_jobs).ceil() as usize);
        let maximum = minimum.max(
            self.ruin_maximum_size
                .min((self.ruin_maximum_ratio * num_jobs).ceil() as usize),
        );

        (minimum, maximum)
    }

    /// Draws the ruin size, never more than the jobs currently assigned.
    pub fn num_jobs_to_remove<R>(
        &self,
        num_jobs: usize,
        num_assigned_jobs: usize,
        rng: &mut R,
    ) -> usize
    where
        R: Rng,
    {
        let (minimum, maximum) = self.num_jobs_to_remove_range(num_jobs);
        rng.random_range(minimum..=maximum).min(num_assigned_jobs)
    }
}
