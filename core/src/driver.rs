//! The feed → scan → push loop.
//!
//! A [`Driver`] owns one [`StreamContext`], one [`Scanner`] and one
//! [`PushParser`]. Each call to [`feed`](Driver::feed) ingests a chunk and
//! then pumps tokens from the scanner into the parser until the scanner
//! runs dry or the parser reaches a verdict.
//!
//! # Example
//!
//! ```ignore
//! let mut driver = Driver::new(StmtScanner::new(), StmtParser::new())?;
//!
//! for chunk in socket_chunks {
//!     if driver.feed(&chunk, false)?.is_final() {
//!         break;
//!     }
//! }
//! match driver.finish()? {
//!     DriveStatus::Accepted => println!("{:?}", driver.parser().statements()),
//!     DriveStatus::Aborted => eprintln!("syntax error"),
//!     DriveStatus::NeedData => unreachable!("finish always concludes"),
//! }
//! ```

use thiserror::Error;

use crate::{
    config::DriverConfig,
    context::StreamContext,
    error::StreamError,
    traits::{PushParser, PushStatus, Scan, Scanner},
};

/// Where a driven parse stands after a call to [`Driver::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveStatus {
    /// The scanner ran out of buffered bytes; feed another chunk.
    NeedData,
    /// The parser accepted the input.
    Accepted,
    /// The parser rejected the input.
    Aborted,
}

impl DriveStatus {
    /// Returns true once the parse has concluded.
    #[inline]
    pub fn is_final(self) -> bool {
        !matches!(self, DriveStatus::NeedData)
    }
}

/// Error type for driven parses.
///
/// `E` is the scanner's error type, passed through untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriveError<E> {
    /// The chunk could not be ingested.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The scanner failed.
    #[error("scan error: {0}")]
    Scan(E),

    /// Input ended while the parser was still expecting tokens.
    #[error("input ended but the parser expected more tokens")]
    IncompleteInput,

    /// The parse had already concluded.
    #[error("parse already concluded ({0:?})")]
    Finished(DriveStatus),
}

/// Drives a scanner and a push parser from chunked input.
///
/// `H` is the host association stored on the underlying [`StreamContext`].
pub struct Driver<S, P, H = ()> {
    context: StreamContext<H>,
    scanner: S,
    parser: P,
    outcome: Option<DriveStatus>,
}

impl<S, P> Driver<S, P>
where
    S: Scanner,
    P: PushParser<S::Token>,
{
    /// Create a driver with a default 64 KiB buffer.
    #[inline]
    pub fn new(scanner: S, parser: P) -> Result<Self, StreamError> {
        Self::with_config(scanner, parser, DriverConfig::DEFAULT)
    }

    /// Create a driver with a custom configuration.
    pub fn with_config(scanner: S, parser: P, config: DriverConfig) -> Result<Self, StreamError> {
        Ok(Self::from_context(
            StreamContext::with_config(config.buffer)?,
            scanner,
            parser,
        ))
    }
}

impl<S, P, H> Driver<S, P, H>
where
    S: Scanner,
    P: PushParser<S::Token>,
{
    /// Create a driver whose context is associated with `host`.
    pub fn with_host(
        scanner: S,
        parser: P,
        host: H,
        config: DriverConfig,
    ) -> Result<Self, StreamError> {
        Ok(Self::from_context(
            StreamContext::with_host(host, config.buffer)?,
            scanner,
            parser,
        ))
    }

    /// Wrap an existing context.
    ///
    /// Bytes already buffered in `context` are scanned on the first
    /// [`feed`](Self::feed).
    pub fn from_context(context: StreamContext<H>, scanner: S, parser: P) -> Self {
        Self {
            context,
            scanner,
            parser,
            outcome: None,
        }
    }

    /// Ingest one chunk and pump tokens until the scanner blocks or the
    /// parser concludes.
    ///
    /// With `is_end = true` the result is always final: either
    /// [`DriveStatus::Accepted`], [`DriveStatus::Aborted`] or an error.
    ///
    /// # Errors
    ///
    /// - [`DriveError::Finished`] if the parse had already concluded
    /// - [`DriveError::Stream`] if the chunk could not be buffered
    /// - [`DriveError::Scan`] if the scanner failed
    /// - [`DriveError::IncompleteInput`] if the parser still wanted tokens at
    ///   end of input
    pub fn feed(&mut self, chunk: &[u8], is_end: bool) -> Result<DriveStatus, DriveError<S::Error>> {
        if let Some(done) = self.outcome {
            return Err(DriveError::Finished(done));
        }
        self.context.feed_chunk(chunk, is_end)?;
        self.pump()
    }

    /// Declare end of input. Equivalent to `feed(&[], true)`.
    #[inline]
    pub fn finish(&mut self) -> Result<DriveStatus, DriveError<S::Error>> {
        self.feed(&[], true)
    }

    fn pump(&mut self) -> Result<DriveStatus, DriveError<S::Error>> {
        loop {
            let scanned = match self.scanner.next_token(&mut self.context) {
                Ok(scanned) => scanned,
                Err(err) => {
                    self.conclude(DriveStatus::Aborted);
                    return Err(DriveError::Scan(err));
                }
            };

            let status = match scanned {
                Scan::Token(token) => self.parser.push(token),
                Scan::WouldBlock => return Ok(DriveStatus::NeedData),
                Scan::Eof => match self.parser.finish() {
                    PushStatus::NeedMoreTokens => {
                        self.conclude(DriveStatus::Aborted);
                        return Err(DriveError::IncompleteInput);
                    }
                    status => status,
                },
            };

            match status {
                PushStatus::NeedMoreTokens => continue,
                PushStatus::Accepted => return Ok(self.conclude(DriveStatus::Accepted)),
                PushStatus::Aborted => return Ok(self.conclude(DriveStatus::Aborted)),
            }
        }
    }

    fn conclude(&mut self, status: DriveStatus) -> DriveStatus {
        tracing::debug!(
            ?status,
            unread = self.context.available(),
            "driven parse concluded"
        );
        self.outcome = Some(status);
        status
    }
}

impl<S, P, H> Driver<S, P, H> {
    /// The verdict, once the parse has concluded.
    #[inline]
    pub fn outcome(&self) -> Option<DriveStatus> {
        self.outcome
    }

    /// The underlying stream context.
    #[inline]
    pub fn context(&self) -> &StreamContext<H> {
        &self.context
    }

    /// Mutable access to the context, e.g. to change the host association.
    #[inline]
    pub fn context_mut(&mut self) -> &mut StreamContext<H> {
        &mut self.context
    }

    #[inline]
    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    #[inline]
    pub fn parser(&self) -> &P {
        &self.parser
    }

    #[inline]
    pub fn parser_mut(&mut self) -> &mut P {
        &mut self.parser
    }

    /// Take the scanner and parser back, dropping the context.
    #[inline]
    pub fn into_parts(self) -> (S, P) {
        (self.scanner, self.parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Pull, PullSource};

    /// Emits one token per byte, stopping at `!` with an error.
    struct ByteScanner;

    impl Scanner for ByteScanner {
        type Token = u8;
        type Error = &'static str;

        fn next_token<Src>(&mut self, source: &mut Src) -> Result<Scan<u8>, &'static str>
        where
            Src: PullSource + ?Sized,
        {
            let mut byte = [0u8; 1];
            match source.pull(&mut byte) {
                Pull::Filled(_) if byte[0] == b'!' => Err("bang"),
                Pull::Filled(_) => Ok(Scan::Token(byte[0])),
                Pull::WouldBlock => Ok(Scan::WouldBlock),
                Pull::Eof => Ok(Scan::Eof),
            }
        }
    }

    /// Accepts at end of input once it has seen `want` tokens; aborts on `x`.
    struct CountParser {
        seen: Vec<u8>,
        want: usize,
    }

    impl PushParser<u8> for CountParser {
        fn push(&mut self, token: u8) -> PushStatus {
            if token == b'x' {
                return PushStatus::Aborted;
            }
            self.seen.push(token);
            PushStatus::NeedMoreTokens
        }

        fn finish(&mut self) -> PushStatus {
            if self.seen.len() == self.want {
                PushStatus::Accepted
            } else if self.seen.len() < self.want {
                PushStatus::NeedMoreTokens
            } else {
                PushStatus::Aborted
            }
        }
    }

    fn driver(want: usize) -> Driver<ByteScanner, CountParser> {
        Driver::new(
            ByteScanner,
            CountParser {
                seen: Vec::new(),
                want,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_chunks_until_accept() {
        let mut d = driver(5);
        assert_eq!(d.feed(b"ab", false), Ok(DriveStatus::NeedData));
        assert_eq!(d.feed(b"cde", false), Ok(DriveStatus::NeedData));
        assert_eq!(d.finish(), Ok(DriveStatus::Accepted));
        assert_eq!(d.parser().seen, b"abcde");
        assert_eq!(d.outcome(), Some(DriveStatus::Accepted));
    }

    #[test]
    fn test_abort_passes_through() {
        let mut d = driver(5);
        assert_eq!(d.feed(b"abxcd", false), Ok(DriveStatus::Aborted));
        assert_eq!(d.context().available(), 2);
    }

    #[test]
    fn test_feed_after_conclusion_is_error() {
        let mut d = driver(0);
        assert_eq!(d.finish(), Ok(DriveStatus::Accepted));
        assert_eq!(
            d.feed(b"more", false),
            Err(DriveError::Finished(DriveStatus::Accepted))
        );
    }

    #[test]
    fn test_incomplete_input_at_end() {
        let mut d = driver(3);
        assert_eq!(d.feed(b"ab", true), Err(DriveError::IncompleteInput));
        assert_eq!(d.outcome(), Some(DriveStatus::Aborted));
    }

    #[test]
    fn test_scan_error_concludes() {
        let mut d = driver(3);
        assert_eq!(d.feed(b"a!", false), Err(DriveError::Scan("bang")));
        assert_eq!(
            d.feed(b"b", false),
            Err(DriveError::Finished(DriveStatus::Aborted))
        );
    }

    #[test]
    fn test_stream_error_propagates() {
        let config = DriverConfig::new().with_buffer(
            crate::config::BufferConfig::new()
                .with_initial_capacity(4)
                .with_max_capacity(4),
        );
        let mut d = Driver::with_config(
            ByteScanner,
            CountParser {
                seen: Vec::new(),
                want: 0,
            },
            config,
        )
        .unwrap();

        assert_eq!(
            d.feed(b"toolong", false),
            Err(DriveError::Stream(StreamError::CapacityExceeded {
                requested: 7,
                max: 4
            }))
        );
        assert_eq!(d.outcome(), None);
    }

    #[test]
    fn test_host_association_reaches_context() {
        let d = Driver::with_host(
            ByteScanner,
            CountParser {
                seen: Vec::new(),
                want: 0,
            },
            9u32,
            DriverConfig::DEFAULT,
        )
        .unwrap();
        assert_eq!(d.context().host(), Some(&9));
    }

    #[test]
    fn test_into_parts_returns_collaborators() {
        let mut d = driver(2);
        d.feed(b"hi", true).unwrap();
        let (_, parser) = d.into_parts();
        assert_eq!(parser.seen, b"hi");
    }
}
