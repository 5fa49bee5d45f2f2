use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

type CapacityVector = SmallVec<[f64; 4]>;

/// Amount per capacity dimension, used both for vehicle capacities and job
/// sizes. All capacities of a problem share the same number of dimensions.
#[derive(Default, Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Capacity(CapacityVector);

impl Capacity {
    pub const EMPTY: Capacity = Capacity(CapacityVector::new_const());

    pub fn from_vec(vec: Vec<f64>) -> Self {
        Capacity(CapacityVector::from_vec(vec))
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Capacity(smallvec::smallvec![0.0; dimensions])
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, dimension: usize) -> f64 {
        self.0.get(dimension).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// First dimension in which `self + demand` exceeds `limit`.
    pub fn first_exceeded_dimension(&self, demand: &Capacity, limit: &Capacity) -> Option<usize> {
        (0..limit.dimensions().max(demand.dimensions()))
            .find(|&dimension| self.get(dimension) + demand.get(dimension) > limit.get(dimension))
    }

    /// First dimension in which `self` exceeds `limit`.
    pub fn first_overloaded_dimension(&self, limit: &Capacity) -> Option<usize> {
        (0..self.dimensions().max(limit.dimensions()))
            .find(|&dimension| self.get(dimension) > limit.get(dimension))
    }

    pub fn has_negative_values(&self) -> bool {
        self.0.iter().any(|value| *value < 0.0)
    }
}

impl AddAssign<&Capacity> for Capacity {
    fn add_assign(&mut self, rhs: &Capacity) {
        if self.0.len() < rhs.0.len() {
            self.0.resize(rhs.0.len(), 0.0);
        }

        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}
