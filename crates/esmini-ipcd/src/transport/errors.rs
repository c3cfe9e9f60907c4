//! Error types for socket listener operations.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use esmini_ipc_config::EndpointResolveError;

/// Errors surfaced while binding or running the socket listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Resolve(#[from] EndpointResolveError),
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        #[source]
        source: io::Error,
    },
    #[error("listener thread panicked")]
    ThreadPanic,
}
