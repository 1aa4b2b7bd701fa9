//! Harness: simulated latency and fault injection for the mock backend.
//!
//! - [`latency::DelaySimulator`] stands in for network round-trip time
//! - [`fault::FaultPolicy`] decides per call whether to fail
//! - [`profile::EndpointProfile`] pairs the two settings for one endpoint
//! - [`Simulator`] composes them into a single await point

pub mod fault;
pub mod latency;
pub mod profile;

use std::sync::Arc;

use fault::FaultPolicy;
use latency::DelaySimulator;
use profile::EndpointProfile;

/// The fault policy chose to fail this call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("injected fault on `{endpoint}`")]
pub struct InjectedFault {
    pub endpoint: String,
}

/// Delay followed by a fault decision, applied before each mock call.
#[derive(Clone)]
pub struct Simulator {
    delay: DelaySimulator,
    faults: Arc<dyn FaultPolicy>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("delay", &self.delay)
            .field("faults", &self.faults.name())
            .finish()
    }
}

impl Simulator {
    pub fn new(delay: DelaySimulator, faults: Arc<dyn FaultPolicy>) -> Self {
        Self { delay, faults }
    }

    /// No latency and no faults.
    pub fn instant() -> Self {
        Self::new(DelaySimulator::instant(), Arc::new(fault::NeverFail))
    }

    pub fn delay(&self) -> &DelaySimulator {
        &self.delay
    }

    pub fn faults(&self) -> &Arc<dyn FaultPolicy> {
        &self.faults
    }

    /// Wait out the endpoint's latency, then roll for a fault.
    ///
    /// The delay always completes before the fault decision, so a failing
    /// call is never faster than a succeeding one.
    pub async fn run(&self, endpoint: &str, profile: &EndpointProfile) -> Result<(), InjectedFault> {
        self.delay.delay(profile.latency).await;
        if self.faults.should_fail(profile.fault_probability) {
            tracing::warn!(endpoint, probability = profile.fault_probability, "injecting fault");
            return Err(InjectedFault {
                endpoint: endpoint.to_string(),
            });
        }
        Ok(())
    }
}
