//! Simulation backends driven by the command dispatcher.
//!
//! The engine is an opaque stateful service reached through five calls. Its
//! lifecycle runs uninitialised → initialised (`init`) → stepping (`step`,
//! `report_pose`) → closed (`close`). The dispatcher does not enforce this
//! ordering: calling `step` or `report_pose` before `init` is a precondition
//! violation whose outcome is defined by the backend alone.

mod errors;
#[cfg(feature = "esmini")]
mod esmini;
mod log;
mod types;

use esmini_ipc_config::BackendKind;

pub use self::errors::BackendError;
#[cfg(feature = "esmini")]
pub use self::esmini::EsminiBackend;
pub use self::log::{EngineState, LogBackend};
pub use self::types::{InitSettings, ObjectHandle, ObjectPose, RecordSetting};

/// Tracing target for backend operations.
pub(crate) const BACKEND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::backend");

/// Capability set of the simulation engine.
///
/// Implementations are not assumed to be reentrant; callers share a backend
/// through [`crate::SharedBackend`], which serialises every call.
#[cfg_attr(test, mockall::automock)]
pub trait SimulationBackend: Send {
    /// Loads a scenario and prepares the engine.
    fn init(&mut self, settings: &InitSettings) -> Result<(), BackendError>;

    /// Resolves an object name to the engine's numeric handle.
    fn lookup_handle(&mut self, name: &str) -> Result<ObjectHandle, BackendError>;

    /// Reports an externally controlled object's pose.
    fn report_pose(&mut self, handle: ObjectHandle, pose: &ObjectPose)
    -> Result<(), BackendError>;

    /// Advances the simulation by exactly one step.
    fn step(&mut self) -> Result<(), BackendError>;

    /// Shuts the engine down.
    fn close(&mut self) -> Result<(), BackendError>;
}

/// Creates the backend selected by configuration.
pub trait BackendFactory {
    /// Builds a backend of the requested kind.
    fn create(&self, kind: BackendKind) -> Result<Box<dyn SimulationBackend>, BackendError>;
}

/// Factory for the backends compiled into this binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackendFactory;

impl BackendFactory for SystemBackendFactory {
    fn create(&self, kind: BackendKind) -> Result<Box<dyn SimulationBackend>, BackendError> {
        match kind {
            BackendKind::Log => Ok(Box::new(LogBackend::new())),
            #[cfg(feature = "esmini")]
            BackendKind::Esmini => Ok(Box::new(EsminiBackend::claim()?)),
            #[cfg(not(feature = "esmini"))]
            BackendKind::Esmini => Err(BackendError::Unavailable {
                kind,
                reason: String::from("built without the `esmini` feature"),
            }),
        }
    }
}
