/// Outcome of a single pull from a [`PullSource`].
///
/// Unlike a plain byte count, the two empty cases are distinct: the scanner
/// can tell "nothing yet, come back after the next chunk" from "nothing
/// ever again".
///
/// # Example
///
/// ```ignore
/// match source.pull(&mut scratch) {
///     Pull::Filled(n) => pending.extend_from_slice(&scratch[..n]),
///     Pull::WouldBlock => return Ok(Scan::WouldBlock),
///     Pull::Eof => at_eof = true,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pull {
    /// This many bytes were copied into the destination.
    ///
    /// Only zero when the destination itself was empty.
    Filled(usize),
    /// Nothing is buffered, but the stream is still open.
    ///
    /// The scanner should stop and wait for the host to feed another chunk.
    WouldBlock,
    /// Nothing is buffered and the stream has ended.
    Eof,
}

impl Pull {
    /// Number of bytes filled; 0 for `WouldBlock` and `Eof`.
    #[inline]
    pub fn filled(self) -> usize {
        match self {
            Pull::Filled(n) => n,
            Pull::WouldBlock | Pull::Eof => 0,
        }
    }

    /// Returns true if the source has ended.
    #[inline]
    pub fn is_eof(self) -> bool {
        matches!(self, Pull::Eof)
    }
}

/// The "give me more bytes" extension point a scanner reads through.
///
/// Implementations copy whatever is readily available into `dst` and return
/// immediately. They must never block and never fetch input themselves;
/// sourcing new chunks is the host's job.
pub trait PullSource {
    /// Fill up to `dst.len()` bytes.
    fn pull(&mut self, dst: &mut [u8]) -> Pull;
}

impl<S: PullSource + ?Sized> PullSource for &mut S {
    #[inline]
    fn pull(&mut self, dst: &mut [u8]) -> Pull {
        (**self).pull(dst)
    }
}

/// A [`PullSource`] over input that is already complete.
///
/// Never reports [`Pull::WouldBlock`]: once the slice is drained it reports
/// [`Pull::Eof`].
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    remaining: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Create a source that yields `bytes`, then reports end of input.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes }
    }

    /// Bytes not yet pulled.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }
}

impl PullSource for SliceSource<'_> {
    fn pull(&mut self, dst: &mut [u8]) -> Pull {
        if self.remaining.is_empty() {
            return Pull::Eof;
        }
        let count = self.remaining.len().min(dst.len());
        let (head, tail) = self.remaining.split_at(count);
        dst[..count].copy_from_slice(head);
        self.remaining = tail;
        Pull::Filled(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source_drains_then_eof() {
        let mut source = SliceSource::new(b"hello");
        let mut buf = [0u8; 3];

        assert_eq!(source.pull(&mut buf), Pull::Filled(3));
        assert_eq!(&buf, b"hel");
        assert_eq!(source.pull(&mut buf), Pull::Filled(2));
        assert_eq!(&buf[..2], b"lo");
        assert_eq!(source.pull(&mut buf), Pull::Eof);
        assert!(source.remaining().is_empty());
    }

    #[test]
    fn test_pull_filled_count() {
        assert_eq!(Pull::Filled(4).filled(), 4);
        assert_eq!(Pull::WouldBlock.filled(), 0);
        assert_eq!(Pull::Eof.filled(), 0);
        assert!(Pull::Eof.is_eof());
        assert!(!Pull::WouldBlock.is_eof());
    }

    #[test]
    fn test_pull_through_mut_ref() {
        fn pull_once<S: PullSource>(mut source: S) -> Pull {
            let mut buf = [0u8; 8];
            source.pull(&mut buf)
        }

        let mut source = SliceSource::new(b"ab");
        assert_eq!(pull_once(&mut source), Pull::Filled(2));
        assert_eq!(pull_once(&mut source), Pull::Eof);
    }
}
