use std::cmp::Ordering;

use serde::Serialize;

/// Solutions are compared on the number of unassigned jobs first, then on the
/// total routing cost.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Score {
    pub unassigned_jobs: usize,
    pub cost: f64,
}

impl Score {
    pub const MAX: Score = Score {
        unassigned_jobs: usize::MAX,
        cost: f64::MAX,
    };

    pub const ZERO: Score = Score {
        unassigned_jobs: 0,
        cost: 0.0,
    };

    pub fn new(unassigned_jobs: usize, cost: f64) -> Self {
        Score {
            unassigned_jobs,
            cost,
        }
    }

    pub fn has_unassigned(&self) -> bool {
        self.unassigned_jobs > 0
    }
}

impl Eq for Score {}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unassigned_jobs
            .cmp(&other.unassigned_jobs)
            .then_with(|| self.cost.total_cmp(&other.cost))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
