use std::time::Duration;

/// Simulated network latency.
///
/// Every delay is multiplied by `scale`: `1.0` reproduces the configured
/// endpoint latencies, `0.0` makes every call resolve immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaySimulator {
    scale: f64,
}

impl Default for DelaySimulator {
    fn default() -> Self {
        Self::realistic()
    }
}

impl DelaySimulator {
    /// Negative, NaN and infinite scales are treated as zero.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            0.0
        };
        Self { scale }
    }

    pub fn realistic() -> Self {
        Self { scale: 1.0 }
    }

    pub fn instant() -> Self {
        Self { scale: 0.0 }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The effective wait for a base latency, saturating at `Duration::MAX`.
    pub fn scaled(&self, base: Duration) -> Duration {
        if self.scale == 0.0 {
            Duration::ZERO
        } else if base.as_secs_f64() * self.scale >= Duration::MAX.as_secs_f64() {
            Duration::MAX
        } else {
            base.mul_f64(self.scale)
        }
    }

    /// Complete no earlier than `base * scale` from now.
    pub async fn delay(&self, base: Duration) {
        let wait = self.scaled(base);
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}
