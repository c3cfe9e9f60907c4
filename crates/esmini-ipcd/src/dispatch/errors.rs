//! Error types for command decoding and dispatch.
//!
//! Decode failures and internal faults end the session; validation, unknown
//! command, and backend failures are contained at the dispatch boundary and
//! the session keeps reading.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced while decoding or dispatching a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The frame body is not a well-formed command document.
    #[error("malformed command: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A required argument is missing or has the wrong type.
    #[error("invalid arguments for {command}: '{field}' must be {expected}")]
    Validation {
        command: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    /// The command name is not one of the supported verbs.
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    /// The backend rejected the command.
    #[error("{command} failed: {source}")]
    Backend {
        command: &'static str,
        #[source]
        source: BackendError,
    },

    /// The dispatcher could not reach the backend (e.g. lock poisoned).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DispatchError {
    /// Returns `true` when the session must stop after this error.
    #[must_use]
    pub const fn ends_session(&self) -> bool {
        match self {
            Self::Decode { .. } | Self::Internal { .. } => true,
            Self::Validation { .. } | Self::UnknownCommand { .. } | Self::Backend { .. } => false,
        }
    }

    /// Creates a decode error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::Decode {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a decode error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a validation error for one argument.
    pub const fn invalid_argument(
        command: &'static str,
        field: &'static str,
        expected: &'static str,
    ) -> Self {
        Self::Validation {
            command,
            field,
            expected,
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Wraps a backend failure for the given command.
    pub const fn backend(command: &'static str, source: BackendError) -> Self {
        Self::Backend { command, source }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
