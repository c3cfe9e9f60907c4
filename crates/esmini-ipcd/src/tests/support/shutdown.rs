//! Shutdown signal doubles.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::server::{ShutdownError, ShutdownSignal};

/// Signal source that never fires; the accept policy alone ends serving.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShutdownSignal;

impl ShutdownSignal for NoShutdownSignal {
    fn install(&self, _requested: Arc<AtomicBool>) -> Result<(), ShutdownError> {
        Ok(())
    }
}
