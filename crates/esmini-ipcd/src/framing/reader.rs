//! Blocking frame reader.

use std::io::{self, Read};

use super::errors::{FrameError, FrameStage};
use super::{LENGTH_PREFIX_BYTES, checked_body_len};

/// Reads length-prefixed frames from a byte stream.
///
/// Every call to [`FrameReader::read_frame`] starts at a fresh length prefix;
/// the reader keeps no state between frames beyond the stream position.
#[derive(Debug)]
pub struct FrameReader<R> {
    source: R,
}

impl<R: Read> FrameReader<R> {
    /// Wraps a readable byte source.
    pub const fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads one complete frame body.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ConnectionClosed`] when the stream ends before the
    /// prefix or body completes, [`FrameError::Read`] when the stream reports
    /// an error, and [`FrameError::TooLarge`] when the announced length is zero
    /// or exceeds [`super::MAX_FRAME_BYTES`]. Oversized bodies are never
    /// buffered.
    pub fn read_frame(&mut self) -> Result<Vec<u8>, FrameError> {
        let mut prefix = [0_u8; LENGTH_PREFIX_BYTES];
        fill(&mut self.source, &mut prefix, FrameStage::Prefix)?;
        let length = checked_body_len(u64::from(u32::from_be_bytes(prefix)))?;

        let mut body = vec![0_u8; length];
        fill(&mut self.source, &mut body, FrameStage::Body)?;
        Ok(body)
    }

    /// Borrows the underlying stream.
    pub const fn get_ref(&self) -> &R {
        &self.source
    }

    /// Releases the underlying stream.
    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Fills `buffer` completely, retrying interrupted reads.
fn fill<R: Read>(source: &mut R, buffer: &mut [u8], stage: FrameStage) -> Result<(), FrameError> {
    let expected = buffer.len();
    let mut received = 0;
    while let Some(remaining) = buffer.get_mut(received..).filter(|rest| !rest.is_empty()) {
        match source.read(remaining) {
            Ok(0) => {
                return Err(FrameError::ConnectionClosed {
                    stage,
                    received,
                    expected,
                });
            }
            Ok(count) => received += count,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(FrameError::Read { stage, source }),
        }
    }
    Ok(())
}
