use esmini_ipc_config::BackendKind;
use thiserror::Error;

/// Failures reported by a simulation backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The engine returned a failure status code.
    #[error("{operation} failed with status {status}")]
    Status { operation: &'static str, status: i32 },

    /// The engine does not know an object by this name.
    #[error("unknown object '{name}'")]
    UnknownObject { name: String },

    /// The engine cannot accept an argument value.
    #[error("invalid argument for {operation}: {message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// The requested backend cannot be created in this process.
    #[error("backend '{kind}' is unavailable: {reason}")]
    Unavailable { kind: BackendKind, reason: String },
}
