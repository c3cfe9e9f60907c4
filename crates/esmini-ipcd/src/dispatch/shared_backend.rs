//! Process-wide backend handle with encapsulated locking.

use std::sync::{Arc, Mutex};

use crate::backend::SimulationBackend;

use super::errors::DispatchError;

/// Shared, mutex-guarded access to the single simulation backend.
///
/// Only one session runs at a time today, but every backend call still goes
/// through the lock so the engine is never entered concurrently.
#[derive(Clone)]
pub struct SharedBackend {
    inner: Arc<Mutex<Box<dyn SimulationBackend>>>,
}

impl SharedBackend {
    /// Takes ownership of a backend.
    #[must_use]
    pub fn new(backend: Box<dyn SimulationBackend>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(backend)),
        }
    }

    /// Runs `f` with exclusive access to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Internal`] if a previous holder panicked.
    pub fn with_backend<F, R>(&self, f: F) -> Result<R, DispatchError>
    where
        F: FnOnce(&mut dyn SimulationBackend) -> R,
    {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| DispatchError::internal("backend lock poisoned"))?;
        Ok(f(guard.as_mut()))
    }
}

impl std::fmt::Debug for SharedBackend {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("SharedBackend").finish_non_exhaustive()
    }
}
