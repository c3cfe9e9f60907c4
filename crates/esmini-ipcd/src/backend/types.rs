//! Values passed from the dispatcher to a backend.

use std::fmt;

/// Engine-internal numeric identifier of a scenario object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(i32);

impl ObjectHandle {
    /// Wraps a raw engine identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw engine identifier.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Recording option forwarded verbatim to the engine.
///
/// Clients send either a boolean/integer flag or a path string; the backend
/// decides what each form means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSetting {
    /// Boolean or integer flag (booleans map to `0`/`1`).
    Flag(i32),
    /// Recording destination path.
    Path(String),
}

/// Arguments for loading a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSettings {
    /// Path to the OpenSCENARIO (`.xosc`) file.
    pub scenario_path: String,
    /// Non-zero disables the scenario's default controllers.
    pub disable_ctrls: i32,
    /// Viewer mode; zero runs headless.
    pub use_viewer: i32,
    /// Non-zero runs the viewer in a separate thread.
    pub threads: i32,
    /// Recording option.
    pub record: RecordSetting,
}

/// Pose of an object in the road plane at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectPose {
    /// Simulation time in seconds.
    pub timestamp: f64,
    /// World X coordinate in metres.
    pub x: f64,
    /// World Y coordinate in metres.
    pub y: f64,
    /// Heading in radians.
    pub h: f64,
}
