//! Structured health reporting for server lifecycle events.

use std::net::SocketAddr;

use esmini_ipc_config::{BackendKind, Config};

use crate::bootstrap::BootstrapError;
use crate::session::SessionOutcome;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the simulation backend has been created.
    fn backend_ready(&self, kind: BackendKind);

    /// Invoked when a client session begins.
    fn session_opened(&self, peer: SocketAddr);

    /// Invoked when a client session reaches a terminal state.
    fn session_closed(&self, peer: SocketAddr, outcome: &SessionOutcome);
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting server bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            listen = %config.listen(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            accept_policy = %config.accept_policy(),
            backend = %config.backend(),
            "server bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "server bootstrap failed"
        );
    }

    fn backend_ready(&self, kind: BackendKind) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "backend_ready",
            backend = %kind,
            "backend ready"
        );
    }

    fn session_opened(&self, peer: SocketAddr) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "session_opened",
            %peer,
            "client session opened"
        );
    }

    fn session_closed(&self, peer: SocketAddr, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::ClosedByError(error) => tracing::warn!(
                target: HEALTH_TARGET,
                event = "session_closed",
                %peer,
                outcome = outcome.label(),
                error = %error,
                "client session failed"
            ),
            _ => tracing::info!(
                target: HEALTH_TARGET,
                event = "session_closed",
                %peer,
                outcome = outcome.label(),
                "client session closed"
            ),
        }
    }
}
