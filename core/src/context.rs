//! Chunk ingestion on top of a [`ByteAccumulator`].
//!
//! A [`StreamContext`] is the session object a host keeps per input stream.
//! The host feeds each received chunk with [`feed_chunk`](StreamContext::feed_chunk);
//! a scanner drains it through the [`PullSource`] implementation.
//!
#![cfg_attr(feature = "docs", doc = simple_mermaid::mermaid!("../docs/diagrams/stream_state.mmd"))]
//!
//! # Lifecycle
//!
//! ```text
//! Open ──feed_chunk(end)──> Draining ──consume to 0──> Closed
//!   └────────feed_chunk(end), nothing buffered────────────┘
//! ```
//!
//! Only `feed_chunk` with `is_end = true` ends the stream. After that, any
//! further chunk is refused with [`StreamError::StreamClosed`].

use crate::{
    accumulator::ByteAccumulator,
    config::BufferConfig,
    error::StreamError,
    traits::{Pull, PullSource},
};

/// Result of a successful [`StreamContext::feed_chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedStatus {
    /// More chunks are expected.
    ///
    /// Returned for every chunk fed with `is_end = false`, no matter how
    /// much is buffered.
    NeedData,
    /// End of input was declared.
    ///
    /// Returned for every chunk fed with `is_end = true`, even when nothing
    /// is left to read afterwards.
    Complete,
}

/// Where a [`StreamContext`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamState {
    /// More chunks may arrive.
    Open,
    /// End of input declared; buffered bytes remain to be read.
    Draining,
    /// End of input declared and everything has been read.
    Closed,
}

/// A chunk-fed byte stream for one scanner.
///
/// The type parameter `H` is the host association: a handle the host can
/// park on the context (an index into its own storage, an id, a `Weak`).
/// The context only stores it and hands it back. It never interprets it and
/// is never responsible for whatever it refers to.
///
/// # Example
///
/// ```ignore
/// let mut ctx = StreamContext::new()?;
///
/// assert_eq!(ctx.feed_chunk(b"let x", false)?, FeedStatus::NeedData);
/// assert_eq!(ctx.feed_chunk(b" = 42;", true)?, FeedStatus::Complete);
///
/// let mut buf = [0u8; 64];
/// assert_eq!(ctx.pull(&mut buf), Pull::Filled(11));
/// assert_eq!(ctx.pull(&mut buf), Pull::Eof);
/// ```
#[derive(Debug, Clone)]
pub struct StreamContext<H = ()> {
    buffer: ByteAccumulator,
    stream_open: bool,
    host: Option<H>,
}

impl StreamContext {
    /// Create an open, empty context with the default 64 KiB buffer.
    ///
    /// Fails only if the initial buffer cannot be allocated.
    #[inline]
    pub fn new() -> Result<Self, StreamError> {
        Self::with_config(BufferConfig::DEFAULT)
    }

    /// Create an open, empty context with the given buffer configuration.
    #[inline]
    pub fn with_config(config: BufferConfig) -> Result<Self, StreamError> {
        Self::build(config, None)
    }
}

impl<H> StreamContext<H> {
    /// Create an open, empty context already associated with `host`.
    #[inline]
    pub fn with_host(host: H, config: BufferConfig) -> Result<Self, StreamError> {
        Self::build(config, Some(host))
    }

    fn build(config: BufferConfig, host: Option<H>) -> Result<Self, StreamError> {
        Ok(Self {
            buffer: ByteAccumulator::with_config(config)?,
            stream_open: true,
            host,
        })
    }

    /// Ingest one chunk.
    ///
    /// Appends `chunk` and records whether it was the last one. Returns
    /// [`FeedStatus::NeedData`] when `is_end` is false and
    /// [`FeedStatus::Complete`] when it is true, regardless of how many
    /// bytes are buffered afterwards. An empty final chunk is fine.
    ///
    /// # Errors
    ///
    /// - [`StreamError::StreamClosed`] if end of input was already declared
    /// - [`StreamError::OutOfMemory`] / [`StreamError::CapacityExceeded`] if
    ///   the chunk cannot be buffered; the stream stays open and the buffer
    ///   is unchanged
    pub fn feed_chunk(&mut self, chunk: &[u8], is_end: bool) -> Result<FeedStatus, StreamError> {
        self.append(chunk)?;
        self.stream_open = !is_end;

        if is_end {
            tracing::debug!(
                buffered = self.buffer.available(),
                "end of stream declared"
            );
            Ok(FeedStatus::Complete)
        } else {
            Ok(FeedStatus::NeedData)
        }
    }

    /// Append bytes without touching the end-of-stream flag.
    ///
    /// The lower-level form of [`feed_chunk`](Self::feed_chunk) for drivers
    /// that track end of input themselves.
    ///
    /// # Errors
    ///
    /// Same as [`feed_chunk`](Self::feed_chunk).
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        if !self.stream_open {
            tracing::debug!(len = bytes.len(), "chunk refused after end of stream");
            return Err(StreamError::StreamClosed);
        }
        self.buffer.append(bytes)
    }

    /// Reclaim consumed bytes. See [`ByteAccumulator::compact`].
    #[inline]
    pub fn compact(&mut self) {
        self.buffer.compact();
    }

    /// Number of unread bytes.
    #[inline]
    pub fn available(&self) -> usize {
        self.buffer.available()
    }

    /// Returns true until end of input has been declared.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.stream_open
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        match (self.stream_open, self.buffer.is_empty()) {
            (true, _) => StreamState::Open,
            (false, false) => StreamState::Draining,
            (false, true) => StreamState::Closed,
        }
    }

    /// Read-only view of the underlying buffer.
    #[inline]
    pub fn buffer(&self) -> &ByteAccumulator {
        &self.buffer
    }

    /// Copy up to `dst.len()` unread bytes into `dst`.
    ///
    /// The raw form of [`pull`](PullSource::pull): 0 means nothing was
    /// available, whether or not the stream has ended.
    #[inline]
    pub fn consume(&mut self, dst: &mut [u8]) -> usize {
        self.buffer.consume(dst)
    }

    /// Associate a host handle, returning the previous one.
    #[inline]
    pub fn set_host(&mut self, host: H) -> Option<H> {
        self.host.replace(host)
    }

    /// The associated host handle, if any.
    #[inline]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Remove and return the host handle.
    #[inline]
    pub fn take_host(&mut self) -> Option<H> {
        self.host.take()
    }
}

impl<H> PullSource for StreamContext<H> {
    fn pull(&mut self, dst: &mut [u8]) -> Pull {
        if self.buffer.is_empty() {
            return if self.stream_open {
                Pull::WouldBlock
            } else {
                Pull::Eof
            };
        }
        Pull::Filled(self.buffer.consume(dst))
    }
}

/// Fill `dst` from `ctx`, returning the byte count.
///
/// Returns 0 both when the stream is merely starved and when it has ended;
/// scanners that need to tell the two apart should use
/// [`PullSource::pull`] instead.
#[inline]
pub fn read_input<H>(ctx: &mut StreamContext<H>, dst: &mut [u8]) -> usize {
    ctx.pull(dst).filled()
}
