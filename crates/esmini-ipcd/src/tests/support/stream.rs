//! In-memory byte stream that records how a session consumes it.

use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::CommandSender;
use crate::dispatch::CommandRequest;

/// Counters shared between a [`TrackedStream`] and the test that built it.
#[derive(Debug, Default, Clone)]
pub struct StreamTracker {
    bytes_read: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl StreamTracker {
    /// Total bytes handed to the reader so far.
    #[must_use]
    pub fn bytes_read(&self) -> usize {
        self.bytes_read.load(Ordering::SeqCst)
    }

    /// Number of times the stream has been released.
    #[must_use]
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// Readable stream over scripted bytes.
pub struct TrackedStream {
    bytes: Cursor<Vec<u8>>,
    tracker: StreamTracker,
}

impl TrackedStream {
    /// Wraps raw wire bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> (Self, StreamTracker) {
        let tracker = StreamTracker::default();
        let stream = Self {
            bytes: Cursor::new(bytes),
            tracker: tracker.clone(),
        };
        (stream, tracker)
    }

    /// Frames each request as a client would send it.
    #[must_use]
    pub fn from_requests(requests: &[CommandRequest]) -> (Self, StreamTracker) {
        Self::new(wire_bytes(requests))
    }
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.bytes.read(buf)?;
        self.tracker.bytes_read.fetch_add(count, Ordering::SeqCst);
        Ok(count)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.tracker.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Encodes `requests` into one contiguous byte sequence.
#[must_use]
pub fn wire_bytes(requests: &[CommandRequest]) -> Vec<u8> {
    let mut sender = CommandSender::new(Vec::new());
    for request in requests {
        sender.send(request).expect("encode request");
    }
    sender.into_inner()
}
