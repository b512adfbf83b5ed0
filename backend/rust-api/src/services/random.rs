//! Injectable pseudo-random source. Each consumer gets its own generator, so
//! concurrent streams never contend on shared RNG state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RandomSource {
    seed: Option<u64>,
    issued: Arc<AtomicU64>,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self {
            seed: None,
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Deterministic source: the n-th generator handed out is always the same.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn rng(&self) -> StdRng {
        let n = self.issued.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Uniform pick from a non-empty compile-time pool.
pub fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}
