use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::flag;
use thiserror::Error;

/// Abstraction over shutdown notification mechanisms.
pub trait ShutdownSignal: Send + Sync {
    /// Arranges for `requested` to be set once shutdown should proceed.
    fn install(&self, requested: Arc<AtomicBool>) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Shutdown listener for `SIGINT` and `SIGTERM`.
///
/// The first signal asks the listener to stop between sessions; a second one
/// terminates the process immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdownSignal;

impl ShutdownSignal for SystemShutdownSignal {
    fn install(&self, requested: Arc<AtomicBool>) -> Result<(), ShutdownError> {
        for signal in [SIGTERM, SIGINT] {
            flag::register_conditional_shutdown(signal, 1, Arc::clone(&requested))
                .map_err(|source| ShutdownError::Install { source })?;
            flag::register(signal, Arc::clone(&requested))
                .map_err(|source| ShutdownError::Install { source })?;
        }
        Ok(())
    }
}
