use bevy_ecs::prelude::Resource;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded randomness for captain fabrication. One resource per world so
/// simulations replay deterministically under a fixed seed.
#[derive(Resource)]
pub struct RideRng {
    rng: StdRng,
}

impl RideRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Uniform offset in [-magnitude, magnitude] degrees.
    pub fn jitter(&mut self, magnitude: f64) -> f64 {
        self.rng.gen_range(-magnitude..=magnitude)
    }

    pub fn four_digit_otp(&mut self) -> String {
        self.rng.gen_range(1000..10_000).to_string()
    }

    /// Captain rating in [4.5, 5.0], one decimal place.
    pub fn rating(&mut self) -> f64 {
        (self.rng.gen_range(4.5..=5.0_f64) * 10.0).round() / 10.0
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Identifier like `user_k3f9ab12x`: a prefix plus random alphanumerics.
    pub fn suffixed_id(&mut self, prefix: &str, len: usize) -> String {
        let suffix: String = (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(|b| (b as char).to_ascii_lowercase())
            .collect();
        format!("{prefix}{suffix}")
    }
}
