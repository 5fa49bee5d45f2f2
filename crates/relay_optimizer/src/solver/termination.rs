use std::thread;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Termination {
    Iterations(usize),
    IterationsWithoutImprovement(usize),
    Duration(SignedDuration),
}

/// Counters a search checks its terminations against, between iterations.
#[derive(Clone, Copy, Debug)]
pub struct SearchProgress {
    pub start: Timestamp,
    pub iteration: usize,
    pub iterations_without_improvement: usize,
}

impl SearchProgress {
    pub fn new(start: Timestamp) -> Self {
        SearchProgress {
            start,
            iteration: 0,
            iterations_without_improvement: 0,
        }
    }

    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.start)
    }
}

impl Termination {
    pub fn is_met(&self, progress: &SearchProgress) -> bool {
        match *self {
            Termination::Iterations(max_iterations) => progress.iteration >= max_iterations,
            Termination::IterationsWithoutImprovement(max_iterations_without_improvement) => {
                progress.iterations_without_improvement >= max_iterations_without_improvement
            }
            Termination::Duration(max_duration) => progress.elapsed() > max_duration,
        }
    }
}

/// Terminations are OR-combined.
pub fn should_stop(terminations: &[Termination], progress: &SearchProgress) -> bool {
    terminations.iter().any(|termination| {
        if termination.is_met(progress) {
            debug!(
                thread = thread::current().name().unwrap_or("main"),
                "Termination condition met: {:?} at iteration {}",
                termination,
                progress.iteration
            );
            true
        } else {
            false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(iteration: usize, iterations_without_improvement: usize) -> SearchProgress {
        SearchProgress {
            start: Timestamp::now(),
            iteration,
            iterations_without_improvement,
        }
    }

    #[test]
    fn test_iterations() {
        let terminations = [Termination::Iterations(10)];

        assert!(!should_stop(&terminations, &progress(9, 9)));
        assert!(should_stop(&terminations, &progress(10, 0)));
    }

    #[test]
    fn test_iterations_without_improvement() {
        let terminations = [Termination::IterationsWithoutImprovement(100)];

        assert!(!should_stop(&terminations, &progress(500, 99)));
        assert!(should_stop(&terminations, &progress(100, 100)));
    }

    #[test]
    fn test_any_termination_stops() {
        let terminations = [
            Termination::Iterations(1000),
            Termination::IterationsWithoutImprovement(5),
        ];

        assert!(should_stop(&terminations, &progress(6, 5)));
        assert!(should_stop(&terminations, &progress(1000, 0)));
        assert!(!should_stop(&terminations, &progress(999, 4)));
    }

    #[test]
    fn test_duration() {
        let started_long_ago = SearchProgress {
            start: Timestamp::now() - SignedDuration::from_secs(10),
            iteration: 0,
            iterations_without_improvement: 0,
        };

        assert!(Termination::Duration(SignedDuration::from_secs(1)).is_met(&started_long_ago));
        assert!(!Termination::Duration(SignedDuration::from_mins(5)).is_met(&progress(0, 0)));
    }
}
