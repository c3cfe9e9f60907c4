//! Test double for [`HealthReporter`] that records structured events for
//! assertions.

use std::net::SocketAddr;
use std::sync::Mutex;

use esmini_ipc_config::{BackendKind, Config};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::session::SessionOutcome;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    BackendReady(BackendKind),
    SessionOpened(SocketAddr),
    SessionClosed {
        peer: SocketAddr,
        outcome: &'static str,
    },
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn backend_ready(&self, kind: BackendKind) {
        self.record(HealthEvent::BackendReady(kind));
    }

    fn session_opened(&self, peer: SocketAddr) {
        self.record(HealthEvent::SessionOpened(peer));
    }

    fn session_closed(&self, peer: SocketAddr, outcome: &SessionOutcome) {
        self.record(HealthEvent::SessionClosed {
            peer,
            outcome: outcome.label(),
        });
    }
}
