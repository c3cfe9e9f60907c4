use crate::endpoint::ListenEndpoint;
use crate::options::{AcceptPolicy, BackendKind, LogFormat};

/// TCP port the command server has always listened on.
pub const DEFAULT_TCP_PORT: u16 = 8080;

/// Address the listener binds to unless configured otherwise.
pub const DEFAULT_TCP_HOST: &str = "0.0.0.0";

/// Default log filter expression used by the server.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the server.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Endpoint used when no listener address is configured.
#[must_use]
pub fn default_listen_endpoint() -> ListenEndpoint {
    ListenEndpoint::tcp(DEFAULT_TCP_HOST, DEFAULT_TCP_PORT)
}

/// Serve a single session, as the original server did.
#[must_use]
pub const fn default_accept_policy() -> AcceptPolicy {
    AcceptPolicy::Single
}

/// The log backend needs no native library, so it is always available.
#[must_use]
pub const fn default_backend() -> BackendKind {
    BackendKind::Log
}
