//! Shared configuration for the esmini command server.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! configuration file (`--config-path`), then `ESMINI_IPC_*` environment
//! variables, and finally command-line flags such as `--listen` and
//! `--log-filter`.

mod defaults;
mod endpoint;
mod options;

use std::sync::Arc;
use std::time::Duration;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TCP_HOST, DEFAULT_TCP_PORT, default_accept_policy,
    default_backend, default_listen_endpoint, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use endpoint::{EndpointParseError, EndpointResolveError, ListenEndpoint};
pub use options::{AcceptPolicy, BackendKind, LogFormat, OptionParseError};

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ESMINI_IPC")]
pub struct Config {
    /// Endpoint the command listener binds to.
    #[ortho_config(default = defaults::default_listen_endpoint())]
    pub listen: ListenEndpoint,
    /// `tracing` filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log line format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Per-read timeout for sessions in seconds. Absent or zero disables it.
    pub read_timeout_secs: Option<u64>,
    /// Whether the server exits after its first session.
    #[ortho_config(default = defaults::default_accept_policy())]
    pub accept_policy: AcceptPolicy,
    /// Simulation backend driven by received commands.
    #[ortho_config(default = defaults::default_backend())]
    pub backend: BackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            read_timeout_secs: None,
            accept_policy: default_accept_policy(),
            backend: default_backend(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    pub fn from_process() -> Result<Self, Arc<OrthoError>> {
        Self::load()
    }

    /// Endpoint the command listener binds to.
    #[must_use]
    pub const fn listen(&self) -> &ListenEndpoint {
        &self.listen
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log line format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Session read timeout, if one is configured.
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Session accept policy.
    #[must_use]
    pub const fn accept_policy(&self) -> AcceptPolicy {
        self.accept_policy
    }

    /// Configured simulation backend.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }
}
