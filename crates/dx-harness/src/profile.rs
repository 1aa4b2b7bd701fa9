use std::time::Duration;

/// Default per-call failure probability for mock endpoints.
pub const DEFAULT_FAULT_PROBABILITY: f64 = 0.05;

/// Latency and failure probability for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointProfile {
    pub latency: Duration,
    pub fault_probability: f64,
}

impl EndpointProfile {
    /// Probability is clamped into `[0, 1]`; NaN becomes zero.
    pub fn new(latency_ms: u64, fault_probability: f64) -> Self {
        Self {
            latency: Duration::from_millis(latency_ms),
            fault_probability: clamp_probability(fault_probability),
        }
    }

    /// An endpoint with the default fault probability.
    pub fn standard(latency_ms: u64) -> Self {
        Self::new(latency_ms, DEFAULT_FAULT_PROBABILITY)
    }

    pub fn with_fault_probability(mut self, probability: f64) -> Self {
        self.fault_probability = clamp_probability(probability);
        self
    }
}

pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
