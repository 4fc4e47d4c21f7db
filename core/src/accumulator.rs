//! Growable byte buffer with a read cursor.
//!
//! [`ByteAccumulator`] is where chunk bytes wait between the moment a host
//! receives them and the moment a scanner asks for them. Bytes are appended
//! at the end and consumed from the cursor; consumed bytes stay in storage
//! until the next compaction reclaims them.
//!
//! ```text
//!  0          cursor      total_bytes        capacity
//!  |-consumed-|----unread-----|----spare-----|
//! ```
//!
//! The layout always satisfies `cursor <= total_bytes <= capacity`, and capacity
//! only ever grows.

use crate::{config::BufferConfig, error::StreamError};

/// A byte buffer that accumulates chunks and hands them out through a
/// cursor.
///
/// # Example
/// ```ignore
/// let mut buffer = ByteAccumulator::new()?;
///
/// buffer.append(b"ab")?;
/// buffer.append(b"cd")?;
///
/// let mut out = [0u8; 3];
/// assert_eq!(buffer.consume(&mut out), 3);
/// assert_eq!(&out, b"abc");
/// assert_eq!(buffer.available(), 1);
///
/// // Reclaim the three consumed bytes
/// buffer.compact();
/// assert_eq!(buffer.cursor(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ByteAccumulator {
    /// Stored bytes; `data.len()` is the logical length.
    data: Vec<u8>,
    cursor: usize,
    /// Logical capacity. `data.capacity()` is always at least this large.
    capacity: usize,
    max_capacity: usize,
}

impl ByteAccumulator {
    /// Create an empty buffer with the default 64 KiB capacity.
    #[inline]
    pub fn new() -> Result<Self, StreamError> {
        Self::with_config(BufferConfig::DEFAULT)
    }

    /// Create an empty buffer with the given configuration.
    ///
    /// Fails if the initial allocation cannot be made or if the initial
    /// capacity is already above `max_capacity`.
    pub fn with_config(config: BufferConfig) -> Result<Self, StreamError> {
        let capacity = config.effective_initial_capacity();
        if capacity > config.max_capacity {
            return Err(StreamError::CapacityExceeded {
                requested: capacity,
                max: config.max_capacity,
            });
        }

        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| StreamError::OutOfMemory {
                requested: capacity,
            })?;

        Ok(Self {
            data,
            cursor: 0,
            capacity,
            max_capacity: config.max_capacity,
        })
    }

    /// Number of unread bytes.
    #[inline]
    pub fn available(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Returns the number of unread bytes; same as [`available`](Self::available).
    #[inline]
    pub fn len(&self) -> usize {
        self.available()
    }

    /// Returns true if there are no unread bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.data.len()
    }

    /// Get total bytes stored (including consumed).
    #[inline]
    pub fn total_bytes(&self) -> usize {
        self.data.len()
    }

    /// Index of the first unread byte.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured growth ceiling.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Get number of consumed bytes pending compaction.
    #[inline]
    pub fn consumed_pending(&self) -> usize {
        self.cursor
    }

    /// Returns unread bytes without consuming them.
    #[inline]
    pub fn unread(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    /// Append bytes at the end of the buffer.
    ///
    /// When the bytes do not fit behind the current contents, consumed bytes
    /// are reclaimed first. If the unread bytes plus the new ones still do
    /// not fit, capacity doubles until they do.
    ///
    /// The call is all-or-nothing: storage is reserved before anything is
    /// moved, so on error the cursor, length, capacity and contents are
    /// exactly as they were.
    ///
    /// Appending an empty slice is a no-op.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        if bytes.is_empty() {
            return Ok(());
        }

        let fits = self
            .data
            .len()
            .checked_add(bytes.len())
            .is_some_and(|end| end <= self.capacity);

        if !fits {
            let needed = self
                .available()
                .checked_add(bytes.len())
                .ok_or(StreamError::OutOfMemory {
                    requested: usize::MAX,
                })?;

            if needed > self.capacity {
                self.grow(needed)?;
            }
            self.compact();
        }

        // Never reallocates: `data.capacity() >= self.capacity`.
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Compact the buffer by removing consumed bytes.
    ///
    /// This shifts the unread bytes to the front and resets the cursor.
    /// The number of unread bytes and the capacity are unchanged.
    pub fn compact(&mut self) {
        if self.cursor > 0 {
            let reclaimed = self.cursor;
            self.data.drain(..self.cursor);
            self.cursor = 0;
            tracing::trace!(reclaimed, unread = self.data.len(), "compacted stream buffer");
        }
    }

    /// Copy up to `dst.len()` unread bytes into `dst` and advance the cursor.
    ///
    /// Returns the number of bytes copied. A return of 0 means nothing was
    /// buffered (or `dst` was empty); it does not say whether more input
    /// will come. Use [`PullSource`](crate::PullSource) on a
    /// [`StreamContext`](crate::StreamContext) for that.
    pub fn consume(&mut self, dst: &mut [u8]) -> usize {
        let unread = &self.data[self.cursor..];
        let count = unread.len().min(dst.len());
        dst[..count].copy_from_slice(&unread[..count]);
        self.cursor += count;
        count
    }

    /// Reserve storage for a logical capacity of at least `needed` bytes.
    ///
    /// Leaves `self` untouched on failure.
    fn grow(&mut self, needed: usize) -> Result<(), StreamError> {
        if needed > self.max_capacity {
            tracing::debug!(
                requested = needed,
                max = self.max_capacity,
                "stream buffer growth refused"
            );
            return Err(StreamError::CapacityExceeded {
                requested: needed,
                max: self.max_capacity,
            });
        }

        let mut grown = self.capacity;
        while grown < needed {
            grown = grown.saturating_mul(2);
        }
        let grown = grown.min(self.max_capacity);

        // `grown >= needed > capacity >= len`
        self.data
            .try_reserve_exact(grown - self.data.len())
            .map_err(|_| StreamError::OutOfMemory { requested: grown })?;

        tracing::debug!(from = self.capacity, to = grown, "grew stream buffer");
        self.capacity = grown;
        Ok(())
    }

    /// Apply a single [`BufferOp`], returning the bytes it consumed.
    ///
    /// Used by fuzz targets and model tests to replay operation sequences.
    pub fn apply(&mut self, op: &BufferOp) -> Result<Vec<u8>, StreamError> {
        match op {
            BufferOp::Append(bytes) => {
                self.append(bytes)?;
                Ok(Vec::new())
            }
            BufferOp::Consume(max) => {
                let mut out = vec![0u8; usize::from(*max)];
                let n = self.consume(&mut out);
                out.truncate(n);
                Ok(out)
            }
            BufferOp::Compact => {
                self.compact();
                Ok(Vec::new())
            }
        }
    }
}

/// One buffer operation, for replaying generated operation sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum BufferOp {
    /// Append these bytes.
    Append(Vec<u8>),
    /// Consume up to this many bytes.
    Consume(u16),
    /// Reclaim consumed bytes.
    Compact,
}
