//! Client-side helper for driving the command server.

use std::io::Write;

use thiserror::Error;

use crate::dispatch::{CommandRequest, DispatchError};
use crate::framing::{FrameError, write_frame};

/// Errors raised while sending a command.
#[derive(Debug, Error)]
pub enum SendError {
    /// The request could not be serialised.
    #[error(transparent)]
    Encode(#[from] DispatchError),
    /// The frame was out of range or the writer failed.
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Writes framed commands to a byte sink such as a `TcpStream`.
///
/// ```rust,no_run
/// use std::net::TcpStream;
///
/// use esmini_ipcd::{CommandRequest, CommandSender};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut sender = CommandSender::new(TcpStream::connect("127.0.0.1:8080")?);
/// sender.send(&CommandRequest::step())?;
/// sender.send(&CommandRequest::close())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CommandSender<W> {
    writer: W,
}

impl<W: Write> CommandSender<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encodes and writes one command frame.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Encode`] if the request cannot be serialised and
    /// [`SendError::Frame`] if the body is out of range or the write fails.
    pub fn send(&mut self, request: &CommandRequest) -> Result<(), SendError> {
        let body = request.encode()?;
        write_frame(&mut self.writer, &body)?;
        Ok(())
    }

    /// Releases the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
