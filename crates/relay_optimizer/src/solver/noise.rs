use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::problem::job::JobIdx;

/// Perturbs insertion costs during recreate. Each job owns its generator so
/// jobs evaluated on different threads draw independent, reproducible values.
pub struct NoiseGenerator {
    rngs: Vec<Mutex<SmallRng>>,
    pub noise_probability: f64,
    pub noise_level: f64,
    pub max_cost: f64,
}

impl NoiseGenerator {
    pub fn new(
        num_jobs: usize,
        max_cost: f64,
        noise_probability: f64,
        noise_level: f64,
        rng: &mut SmallRng,
    ) -> Self {
        Self {
            rngs: (0..num_jobs)
                .map(|_| Mutex::new(SmallRng::from_rng(rng)))
                .collect(),
            noise_probability: noise_probability.clamp(0.0, 1.0),
            noise_level,
            max_cost,
        }
    }

    pub fn create_noise(&self, job_id: JobIdx) -> f64 {
        let mut rng = self.rngs[job_id.get()].lock();

        if rng.random_bool(self.noise_probability) {
            self.noise_level * self.max_cost * rng.random_range(0.0..=1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_noise_when_probability_is_zero() {
        let mut rng = SmallRng::seed_from_u64(7);
        let generator = NoiseGenerator::new(3, 1000.0, 0.0, 0.5, &mut rng);

        for job in 0..3 {
            assert_eq!(generator.create_noise(JobIdx::new(job)), 0.0);
        }
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut rng = SmallRng::seed_from_u64(7);
        let generator = NoiseGenerator::new(2, 1000.0, 1.0, 0.1, &mut rng);

        for _ in 0..100 {
            let noise = generator.create_noise(JobIdx::new(1));
            assert!((0.0..=100.0).contains(&noise));
        }
    }

    #[test]
    fn test_same_seed_same_noise() {
        let first = NoiseGenerator::new(2, 50.0, 0.5, 1.0, &mut SmallRng::seed_from_u64(42));
        let second = NoiseGenerator::new(2, 50.0, 0.5, 1.0, &mut SmallRng::seed_from_u64(42));

        for _ in 0..20 {
            assert_eq!(
                first.create_noise(JobIdx::new(0)),
                second.create_noise(JobIdx::new(0))
            );
        }
    }
}
