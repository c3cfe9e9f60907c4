//! Server bootstrap orchestration.

use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

use esmini_ipc_config::{BackendKind, Config};

use crate::backend::{BackendError, BackendFactory};
use crate::dispatch::SharedBackend;
use crate::health::HealthReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the server configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::from_process()
    }
}

/// Loader that returns a pre-resolved configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already loaded configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The configured backend could not be created.
    #[error("failed to create {kind} backend: {source}")]
    Backend {
        /// Backend requested by configuration.
        kind: BackendKind,
        /// Underlying backend error.
        #[source]
        source: BackendError,
    },
}

/// Result of a successful bootstrap: a configured server ready to accept.
pub struct Server {
    pub(crate) config: Config,
    pub(crate) backend: SharedBackend,
    pub(crate) telemetry: TelemetryHandle,
    pub(crate) reporter: Arc<dyn HealthReporter>,
}

impl Server {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Shared handle to the simulation backend.
    #[must_use]
    pub const fn backend(&self) -> &SharedBackend {
        &self.backend
    }
}

/// Bootstraps the server using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration, telemetry, or backend
/// creation fails. Every failure is also passed to
/// [`HealthReporter::bootstrap_failed`].
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    factory: &dyn BackendFactory,
) -> Result<Server, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let kind = config.backend();
    let backend = match factory.create(kind) {
        Ok(backend) => backend,
        Err(source) => {
            let error = BootstrapError::Backend { kind, source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };
    reporter.backend_ready(kind);
    reporter.bootstrap_succeeded(&config);

    Ok(Server {
        config,
        backend: SharedBackend::new(backend),
        telemetry,
        reporter,
    })
}
