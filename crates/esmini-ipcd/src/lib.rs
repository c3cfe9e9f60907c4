//! Command server that drives an esmini simulation from a remote client.
//!
//! Clients connect over TCP and send length-prefixed JSON commands
//! (`[u32 big-endian length][{"function": ..., "args": {...}}]`). Each command
//! is validated and forwarded as one synchronous call to the simulation
//! backend. The channel is one-way: outcomes are reported through structured
//! logs, never back to the client.
//!
//! The crate is layered bottom-up:
//!
//! - [`framing`] reads and writes length-prefixed frames.
//! - [`dispatch`] decodes frame bodies and routes verbs to the backend.
//! - [`backend`] defines the engine capability set and its implementations.
//! - [`Session`] drives one connection through its state machine.
//! - [`bootstrap_with`] and [`Server::serve`] wire configuration, telemetry,
//!   the listener, and signal handling together.

pub mod backend;
mod bootstrap;
mod client;
pub mod dispatch;
pub mod framing;
mod health;
mod server;
mod session;
mod telemetry;
mod transport;

pub use backend::{BackendError, BackendFactory, SimulationBackend, SystemBackendFactory};
pub use bootstrap::{
    BootstrapError, ConfigLoader, Server, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use client::{CommandSender, SendError};
pub use dispatch::{CommandDispatcher, CommandRequest, DispatchError, SharedBackend, Verb};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use server::{
    LaunchError, ServeError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_server,
};
pub use session::{Session, SessionError, SessionOutcome, SessionState};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
