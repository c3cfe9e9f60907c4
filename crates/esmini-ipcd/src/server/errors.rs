//! Error surface for running the server.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Errors raised while the server is accepting sessions.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Binding or running the listener failed.
    #[error(transparent)]
    Listener(#[from] ListenerError),
    /// Signal handlers could not be installed.
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

/// Errors raised by [`super::run_server`].
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The server could not be bootstrapped.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// The server failed while serving.
    #[error(transparent)]
    Serve(#[from] ServeError),
}
