//! Per-file retrieval decision.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether an encountered file is retrieved.
///
/// Shared by every task of a run, so implementations must tolerate
/// concurrent calls.
pub trait Sampler: Send + Sync {
    fn should_retrieve(&self, probability: f64) -> bool;
}

/// Draws from the calling thread's generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChanceSampler;

impl Sampler for ChanceSampler {
    fn should_retrieve(&self, probability: f64) -> bool {
        decide(probability, || rand::rng().random::<f64>())
    }
}

/// Draws from one seeded generator so a run's choices can be replayed.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for SeededSampler {
    fn should_retrieve(&self, probability: f64) -> bool {
        decide(probability, || {
            self.rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .random::<f64>()
        })
    }
}

/// Certain outcomes skip the draw entirely.
fn decide(probability: f64, draw: impl FnOnce() -> f64) -> bool {
    if probability <= 0.0 {
        false
    } else if probability >= 1.0 {
        true
    } else {
        draw() < probability
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
