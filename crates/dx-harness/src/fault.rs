use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

use crate::profile::clamp_probability;

/// Decides whether a single call should fail.
///
/// Implementations are stateless from the caller's point of view: each
/// decision is independent, with no backoff or circuit state.
pub trait FaultPolicy: Send + Sync {
    /// `probability` is the endpoint's configured failure rate.
    fn should_fail(&self, probability: f64) -> bool;

    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// RandomFaults
// ---------------------------------------------------------------------------

/// Fails each call independently with the given probability.
pub struct RandomFaults {
    rng: Mutex<StdRng>,
}

impl RandomFaults {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of decisions for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomFaults {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultPolicy for RandomFaults {
    fn should_fail(&self, probability: f64) -> bool {
        let p = clamp_probability(probability);
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>() < p
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

// ---------------------------------------------------------------------------
// Deterministic policies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FaultPolicy for NeverFail {
    fn should_fail(&self, _probability: f64) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "never"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FaultPolicy for AlwaysFail {
    fn should_fail(&self, _probability: f64) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "always"
    }
}

/// Ignores each endpoint's own rate and uses a fixed one instead.
pub struct FixedProbability {
    inner: Arc<dyn FaultPolicy>,
    probability: f64,
}

impl FixedProbability {
    pub fn new(inner: Arc<dyn FaultPolicy>, probability: f64) -> Self {
        Self {
            inner,
            probability: clamp_probability(probability),
        }
    }
}

impl FaultPolicy for FixedProbability {
    fn should_fail(&self, _probability: f64) -> bool {
        self.inner.should_fail(self.probability)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_need_no_randomness() {
        let faults = RandomFaults::new();
        assert!(!faults.should_fail(0.0));
        assert!(!faults.should_fail(-0.5));
        assert!(faults.should_fail(1.0));
        assert!(faults.should_fail(7.0));
    }

    #[test]
    fn seeded_policies_agree() {
        let a = RandomFaults::seeded(42);
        let b = RandomFaults::seeded(42);
        let xs: Vec<bool> = (0..200).map(|_| a.should_fail(0.3)).collect();
        let ys: Vec<bool> = (0..200).map(|_| b.should_fail(0.3)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn deterministic_policies() {
        assert!(!NeverFail.should_fail(1.0));
        assert!(AlwaysFail.should_fail(0.0));
    }

    #[test]
    fn fixed_probability_overrides_endpoint_rate() {
        let never = FixedProbability::new(Arc::new(RandomFaults::seeded(1)), 0.0);
        assert!((0..100).all(|_| !never.should_fail(1.0)));
        let always = FixedProbability::new(Arc::new(RandomFaults::seeded(1)), 1.0);
        assert!((0..100).all(|_| always.should_fail(0.0)));
    }
}
