//! Synthetic failure injection for the refresh path.
//!
//! A successful scan is still discarded when the gate fires, which lets the
//! front end exercise its error surface against a healthy backend.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default chance that a successful refresh is discarded.
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.1;

/// Decides, once per completed refresh, whether to discard the response.
pub trait FailureGate {
    fn should_fail(&mut self) -> bool;
}

impl<G: FailureGate + ?Sized> FailureGate for Box<G> {
    fn should_fail(&mut self) -> bool {
        (**self).should_fail()
    }
}

/// Pseudo-random gate sampling a uniform value per call.
#[derive(Debug, Clone)]
pub struct RandomFailureGate {
    rng: StdRng,
    probability: f64,
}

impl RandomFailureGate {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            probability: DEFAULT_FAILURE_PROBABILITY,
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            probability: DEFAULT_FAILURE_PROBABILITY,
        }
    }

    /// Overrides the failure probability; clamped to `0.0..=1.0`.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FailureGate for RandomFailureGate {
    fn should_fail(&mut self) -> bool {
        self.rng.gen::<f64>() < self.probability
    }
}

/// Deterministic gate: replays a scripted sequence, then a fallback value.
#[derive(Debug, Clone, Default)]
pub struct FixedFailureGate {
    script: VecDeque<bool>,
    fallback: bool,
}

impl FixedFailureGate {
    pub fn always() -> Self {
        Self {
            script: VecDeque::new(),
            fallback: true,
        }
    }

    pub fn never() -> Self {
        Self::default()
    }

    pub fn scripted(script: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }
}

impl FailureGate for FixedFailureGate {
    fn should_fail(&mut self) -> bool {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
