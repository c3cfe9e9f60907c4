//! Test harness utilities shared by unit and behavioural suites.

mod backend;
mod config_loader;
mod reporter;
mod shutdown;
mod stream;

pub use backend::{BackendCall, RecordingBackend, RecordingBackendFactory};
pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::NoShutdownSignal;
pub use stream::{TrackedStream, wire_bytes};
