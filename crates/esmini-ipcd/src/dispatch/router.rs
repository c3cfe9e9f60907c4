//! Verb routing for decoded commands.
//!
//! The dispatcher validates a command's arguments, then makes exactly one
//! synchronous backend call for it. Validation runs before the backend lock
//! is taken, so a rejected command never touches the engine.

use tracing::debug;

use crate::backend::{BackendError, SimulationBackend};

use super::arguments::{self, Arguments};
use super::errors::DispatchError;
use super::request::{CommandRequest, Verb};
use super::shared_backend::SharedBackend;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

const INIT: &str = "SE_Init";
const REPORT_POSE: &str = "SE_ReportObjectPosXYH";
const STEP: &str = "SE_Step";
const CLOSE: &str = "SE_Close";

/// Routes decoded commands to the shared backend.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    backend: SharedBackend,
}

impl CommandDispatcher {
    /// Creates a dispatcher driving `backend`.
    #[must_use]
    pub const fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Validates and executes one command.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Validation`] for missing or mistyped
    /// arguments, [`DispatchError::UnknownCommand`] for unsupported verbs,
    /// [`DispatchError::Backend`] when the engine rejects the call, and
    /// [`DispatchError::Internal`] when the backend lock is poisoned.
    pub fn dispatch(&self, request: &CommandRequest) -> Result<(), DispatchError> {
        debug!(
            target: DISPATCH_TARGET,
            command = request.verb().as_str(),
            "dispatching command"
        );
        match request.verb() {
            Verb::Init => self.init(request),
            Verb::ReportObjectPos => self.report_pose(request),
            Verb::Step => self.run(STEP, |backend| backend.step()),
            Verb::Close => self.run(CLOSE, |backend| backend.close()),
            Verb::Unknown(name) => Err(DispatchError::unknown_command(name.as_str())),
        }
    }

    fn init(&self, request: &CommandRequest) -> Result<(), DispatchError> {
        let settings = arguments::init_settings(&Arguments::new(INIT, request.args()))?;
        self.run(INIT, |backend| backend.init(&settings))
    }

    fn report_pose(&self, request: &CommandRequest) -> Result<(), DispatchError> {
        let (object_id, pose) =
            arguments::object_pose(&Arguments::new(REPORT_POSE, request.args()))?;
        self.run(REPORT_POSE, |backend| {
            let handle = backend.lookup_handle(object_id)?;
            backend.report_pose(handle, &pose)
        })
    }

    fn run<F>(&self, command: &'static str, call: F) -> Result<(), DispatchError>
    where
        F: FnOnce(&mut dyn SimulationBackend) -> Result<(), BackendError>,
    {
        self.backend
            .with_backend(call)?
            .map_err(|source| DispatchError::backend(command, source))
    }
}
