//! Backend that records commands through the log instead of simulating.
//!
//! Useful for exercising clients without a native engine. Object names are
//! assigned handles in first-seen order, and lifecycle violations (stepping
//! before `init`, anything after `close`) are reported as warnings rather
//! than errors.

use std::collections::HashMap;

use tracing::{info, warn};

use super::{
    BACKEND_TARGET, BackendError, InitSettings, ObjectHandle, ObjectPose, RecordSetting,
    SimulationBackend,
};

/// Lifecycle state tracked by [`LogBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No scenario loaded yet.
    #[default]
    Uninitialised,
    /// A scenario is loaded and may be stepped.
    Initialised,
    /// The engine was shut down.
    Closed,
}

/// Logging stand-in for the simulation engine.
#[derive(Debug, Default)]
pub struct LogBackend {
    state: EngineState,
    handles: HashMap<String, ObjectHandle>,
    steps: u64,
}

impl LogBackend {
    /// Creates an uninitialised backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Number of steps taken since the last `init`.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    fn require_initialised(&self, operation: &'static str) {
        if self.state != EngineState::Initialised {
            warn!(
                target: BACKEND_TARGET,
                operation,
                state = ?self.state,
                "operation invoked outside an initialised scenario"
            );
        }
    }
}

impl SimulationBackend for LogBackend {
    fn init(&mut self, settings: &InitSettings) -> Result<(), BackendError> {
        if self.state == EngineState::Initialised {
            warn!(target: BACKEND_TARGET, "re-initialising an active scenario");
        }
        let record = match &settings.record {
            RecordSetting::Flag(flag) => flag.to_string(),
            RecordSetting::Path(path) => path.clone(),
        };
        info!(
            target: BACKEND_TARGET,
            scenario = %settings.scenario_path,
            disable_ctrls = settings.disable_ctrls,
            use_viewer = settings.use_viewer,
            threads = settings.threads,
            record = %record,
            "scenario initialised"
        );
        self.handles.clear();
        self.steps = 0;
        self.state = EngineState::Initialised;
        Ok(())
    }

    fn lookup_handle(&mut self, name: &str) -> Result<ObjectHandle, BackendError> {
        self.require_initialised("lookup_handle");
        let next = i32::try_from(self.handles.len()).map_err(|_| {
            BackendError::InvalidArgument {
                operation: "lookup_handle",
                message: String::from("object table is full"),
            }
        })?;
        Ok(*self
            .handles
            .entry(name.to_owned())
            .or_insert_with(|| ObjectHandle::new(next)))
    }

    fn report_pose(
        &mut self,
        handle: ObjectHandle,
        pose: &ObjectPose,
    ) -> Result<(), BackendError> {
        self.require_initialised("report_pose");
        info!(
            target: BACKEND_TARGET,
            object = %handle,
            timestamp = pose.timestamp,
            x = pose.x,
            y = pose.y,
            h = pose.h,
            "object pose reported"
        );
        Ok(())
    }

    fn step(&mut self) -> Result<(), BackendError> {
        self.require_initialised("step");
        self.steps += 1;
        info!(target: BACKEND_TARGET, step = self.steps, "simulation stepped");
        Ok(())
    }

    fn close(&mut self) -> Result<(), BackendError> {
        info!(target: BACKEND_TARGET, steps = self.steps, "simulation closed");
        self.state = EngineState::Closed;
        Ok(())
    }
}
