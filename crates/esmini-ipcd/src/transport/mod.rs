//! TCP listener for the command channel.
//!
//! The listener binds the configured endpoint and accepts connections on a
//! background thread. Each connection is handled inline on that thread, so
//! at most one session is ever active.

mod errors;
mod handler;
mod listener;
#[cfg(test)]
mod test_utils;

pub use self::errors::ListenerError;
pub(crate) use self::handler::{ConnectionHandler, SessionConnectionHandler};
pub(crate) use self::listener::SocketListener;
#[cfg(test)]
pub(crate) use self::test_utils::CountingHandler;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
