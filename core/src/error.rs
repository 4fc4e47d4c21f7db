//! Core error types for feedkit.
//!
//! Every failure the byte accumulator and streaming context can produce is a
//! [`StreamError`]. Errors raised by a scanner or push parser never pass
//! through this type; the chunk driver carries them separately in
//! [`DriveError`](crate::driver::DriveError).
//!
//! Failures are returned to the caller and never recorded anywhere else. A
//! driver that wants to retry, abort or report decides that for itself.

use thiserror::Error;

/// Errors produced while ingesting chunks into a stream buffer.
///
/// # Example
///
/// ```ignore
/// use feedkit::{StreamContext, StreamError};
///
/// let mut ctx = StreamContext::new()?;
/// ctx.feed_chunk(b"let x = 1;", true)?;
///
/// // The stream has ended; more input is a caller error.
/// assert_eq!(ctx.feed_chunk(b"more", false), Err(StreamError::StreamClosed));
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamError {
    /// Reserving backing storage failed, or the required size overflowed.
    ///
    /// The buffer is left exactly as it was before the failing call.
    #[error("out of memory: could not reserve {requested} bytes")]
    OutOfMemory {
        /// Total logical capacity the buffer tried to reach.
        requested: usize,
    },

    /// Growth would exceed the configured `max_capacity`.
    ///
    /// The buffer is left exactly as it was before the failing call.
    #[error("buffer capacity {requested} exceeds maximum {max}")]
    CapacityExceeded {
        /// Capacity that would have been required.
        requested: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// Input was offered after end-of-stream had been declared.
    #[error("stream already ended; no further chunks are accepted")]
    StreamClosed,
}
