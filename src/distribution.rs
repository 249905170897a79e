use rand::Rng;

use crate::models::{DurationProfile, Time};

/// Draws uniformly from the closed range `[mean - variance, mean + variance]`.
///
/// `variance` must be non-negative; configuration validation guarantees this
/// before the engine ever samples.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, mean: Time, variance: Time) -> Time {
    debug_assert!(variance >= 0, "variance must not be negative");
    rng.gen_range(mean - variance..=mean + variance)
}

impl DurationProfile {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        sample(rng, self.mean, self.variance)
    }
}
