//! Per-connection session loop.
//!
//! A session reads frames until the peer disconnects, a frame or document is
//! unusable, or `SE_Close` has been dispatched:
//!
//! ```text
//! AwaitingFrame ──frame──▶ Decoding ──request──▶ Dispatching ──▶ AwaitingFrame
//!       │                     │                      │
//!       ▼                     ▼                      ▼
//! ClosedByPeer /         ClosedByError         ClosedByCommand /
//! ClosedByError                                ClosedByError
//! ```
//!
//! The session owns its stream and drops it exactly once when [`Session::run`]
//! returns, so a terminal state can never be followed by another read.

use std::fmt;
use std::io::Read;
use std::ops::ControlFlow;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::dispatch::{CommandDispatcher, CommandRequest, DispatchError};
use crate::framing::{FrameError, FrameReader};

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Non-terminal phases of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next length prefix.
    AwaitingFrame,
    /// A body has arrived and is being decoded.
    Decoding,
    /// A decoded command is being executed.
    Dispatching,
}

impl fmt::Display for SessionState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::AwaitingFrame => "awaiting_frame",
            Self::Decoding => "decoding",
            Self::Dispatching => "dispatching",
        })
    }
}

/// Failure that ended a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The stream failed or announced an unacceptable frame.
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// The body could not be decoded or the backend became unreachable.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Terminal state reached by a session.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The peer disconnected.
    ClosedByPeer,
    /// A fatal read, framing, or decode failure.
    ClosedByError(SessionError),
    /// `SE_Close` was dispatched.
    ClosedByCommand,
}

impl SessionOutcome {
    /// Short label used in structured logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ClosedByPeer => "closed_by_peer",
            Self::ClosedByError(_) => "closed_by_error",
            Self::ClosedByCommand => "closed_by_command",
        }
    }
}

/// One client session over a readable stream.
pub struct Session<S> {
    reader: FrameReader<S>,
    dispatcher: CommandDispatcher,
    state: SessionState,
    commands: usize,
}

impl<S: Read> Session<S> {
    /// Creates a session reading from `stream`.
    pub const fn new(stream: S, dispatcher: CommandDispatcher) -> Self {
        Self {
            reader: FrameReader::new(stream),
            dispatcher,
            state: SessionState::AwaitingFrame,
            commands: 0,
        }
    }

    /// Drives the session to a terminal state and releases the stream.
    pub fn run(mut self) -> SessionOutcome {
        let outcome = loop {
            if let ControlFlow::Break(outcome) = self.step() {
                break outcome;
            }
        };
        debug!(
            target: SESSION_TARGET,
            outcome = outcome.label(),
            commands = self.commands,
            "session finished"
        );
        outcome
    }

    fn step(&mut self) -> ControlFlow<SessionOutcome> {
        self.transition(SessionState::AwaitingFrame);
        let body = match self.reader.read_frame() {
            Ok(body) => body,
            Err(error @ FrameError::ConnectionClosed { .. }) => {
                if error.is_clean_close() {
                    debug!(target: SESSION_TARGET, "peer disconnected");
                } else {
                    warn!(target: SESSION_TARGET, %error, "peer disconnected mid-frame");
                }
                return ControlFlow::Break(SessionOutcome::ClosedByPeer);
            }
            Err(error) => return self.fail(error.into()),
        };

        self.transition(SessionState::Decoding);
        let request = match CommandRequest::decode(&body) {
            Ok(request) => request,
            Err(error) => return self.fail(error.into()),
        };

        self.transition(SessionState::Dispatching);
        self.commands += 1;
        match self.dispatcher.dispatch(&request) {
            Ok(()) => {}
            Err(error) if error.ends_session() => return self.fail(error.into()),
            Err(error) => warn!(
                target: SESSION_TARGET,
                command = request.verb().as_str(),
                %error,
                "command failed"
            ),
        }

        if request.verb().is_terminal() {
            ControlFlow::Break(SessionOutcome::ClosedByCommand)
        } else {
            ControlFlow::Continue(())
        }
    }

    fn transition(&mut self, next: SessionState) {
        trace!(target: SESSION_TARGET, from = %self.state, to = %next, "session state");
        self.state = next;
    }

    fn fail(&self, error: SessionError) -> ControlFlow<SessionOutcome> {
        warn!(
            target: SESSION_TARGET,
            state = %self.state,
            %error,
            "session ended by error"
        );
        ControlFlow::Break(SessionOutcome::ClosedByError(error))
    }
}
