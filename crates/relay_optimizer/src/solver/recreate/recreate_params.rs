use serde::Deserialize;

/// Noise applied to insertion costs while repairing a ruined solution.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RecreateParams {
    /// Chance that a candidate insertion cost gets perturbed
    pub noise_probability: f64,

    /// Fraction of the most expensive edge added at most to a perturbed cost
    pub noise_level: f64,
}

impl Default for RecreateParams {
    fn default() -> Self {
        RecreateParams {
            noise_probability: 0.15,
            noise_level: 0.025,
        }
    }
}

impl RecreateParams {
    pub fn has_noise(&self) -> bool {
        self.noise_probability > 0.0 && self.noise_level > 0.0
    }
}
