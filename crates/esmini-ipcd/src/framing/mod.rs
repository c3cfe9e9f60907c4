//! Length-prefixed framing for the command channel.
//!
//! Every message on the wire is a big-endian `u32` body length followed by
//! exactly that many bytes:
//!
//! ```text
//! +----------------+----------------------+
//! | length (u32be) | body (UTF-8 JSON)    |
//! +----------------+----------------------+
//! ```
//!
//! Bodies must be between one byte and [`MAX_FRAME_BYTES`] inclusive. The
//! same limit is enforced when reading and when encoding.

mod errors;
mod reader;

use std::io::Write;

pub use self::errors::{FrameError, FrameStage};
pub use self::reader::FrameReader;

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Largest body accepted on the wire (1 MiB).
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Validates an announced body length and converts it to a buffer size.
fn checked_body_len(length: u64) -> Result<usize, FrameError> {
    match usize::try_from(length) {
        Ok(size) if (1..=MAX_FRAME_BYTES).contains(&size) => Ok(size),
        _ => Err(FrameError::too_large(length)),
    }
}

/// Encodes `body` as a complete frame.
///
/// # Errors
///
/// Returns [`FrameError::TooLarge`] when `body` is empty or longer than
/// [`MAX_FRAME_BYTES`].
pub fn encode_frame(body: &[u8]) -> Result<Vec<u8>, FrameError> {
    let length = u32::try_from(body.len())
        .map_err(|_| FrameError::too_large(u64::MAX))
        .and_then(|length| checked_body_len(u64::from(length)).map(|_| length))?;
    let mut frame = Vec::with_capacity(LENGTH_PREFIX_BYTES + body.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(body);
    Ok(frame)
}

/// Encodes `body` and writes the frame to `writer` in a single call.
///
/// # Errors
///
/// Returns [`FrameError::TooLarge`] for out-of-range bodies and
/// [`FrameError::Write`] when the writer fails.
pub fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> Result<(), FrameError> {
    let frame = encode_frame(body)?;
    writer.write_all(&frame).map_err(FrameError::Write)?;
    writer.flush().map_err(FrameError::Write)
}
