//! Error types for length-prefixed framing.

use std::fmt;
use std::io;

use thiserror::Error;

/// Part of a frame being transferred when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStage {
    /// The four-byte big-endian length prefix.
    Prefix,
    /// The body announced by the prefix.
    Body,
}

impl fmt::Display for FrameStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Prefix => "length prefix",
            Self::Body => "body",
        })
    }
}

/// Errors surfaced while reading or writing frames.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The peer closed the stream before the stage completed.
    #[error("connection closed after {received} of {expected} {stage} bytes")]
    ConnectionClosed {
        stage: FrameStage,
        received: usize,
        expected: usize,
    },

    /// The underlying stream reported an error.
    #[error("failed to read frame {stage}: {source}")]
    Read {
        stage: FrameStage,
        #[source]
        source: io::Error,
    },

    /// The announced or supplied body length is zero or above the limit.
    #[error("frame length {length} outside accepted range 1..={max}")]
    TooLarge { length: u64, max: usize },

    /// Writing an outgoing frame failed.
    #[error("failed to write frame: {0}")]
    Write(#[source] io::Error),
}

impl FrameError {
    /// Returns `true` when the peer disconnected on a frame boundary.
    #[must_use]
    pub fn is_clean_close(&self) -> bool {
        matches!(
            self,
            Self::ConnectionClosed {
                stage: FrameStage::Prefix,
                received: 0,
                ..
            }
        )
    }

    pub(crate) const fn too_large(length: u64) -> Self {
        Self::TooLarge {
            length,
            max: super::MAX_FRAME_BYTES,
        }
    }
}
