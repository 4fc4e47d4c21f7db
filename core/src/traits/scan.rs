use super::pull::PullSource;

/// Outcome of asking a [`Scanner`] for its next token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan<T> {
    /// A complete token.
    Token(T),
    /// The source ran dry mid-stream. Call again after the next chunk.
    WouldBlock,
    /// The source has ended and every token has been emitted.
    Eof,
}

impl<T> Scan<T> {
    /// Returns the token, if this is one.
    #[inline]
    pub fn token(self) -> Option<T> {
        match self {
            Scan::Token(token) => Some(token),
            Scan::WouldBlock | Scan::Eof => None,
        }
    }
}

/// A pull-style tokenizer that reads raw bytes through a [`PullSource`].
///
/// The scanner owns whatever partial-token state it needs. When a pull
/// returns [`Pull::WouldBlock`](super::Pull::WouldBlock) it should keep any
/// incomplete token and return [`Scan::WouldBlock`]; the driver will call
/// again once more bytes have been fed.
///
/// # Example
///
/// ```ignore
/// impl Scanner for WordScanner {
///     type Token = String;
///     type Error = Utf8Error;
///
///     fn next_token<S>(&mut self, source: &mut S) -> Result<Scan<String>, Utf8Error>
///     where
///         S: PullSource + ?Sized,
///     {
///         loop {
///             if let Some(word) = self.take_word()? {
///                 return Ok(Scan::Token(word));
///             }
///             match source.pull(&mut self.scratch) {
///                 Pull::Filled(n) => self.pending.extend_from_slice(&self.scratch[..n]),
///                 Pull::WouldBlock => return Ok(Scan::WouldBlock),
///                 Pull::Eof => return self.finish(),
///             }
///         }
///     }
/// }
/// ```
pub trait Scanner {
    /// The token type produced, including any semantic value.
    type Token;
    /// The error type for tokenization failures.
    type Error;

    /// Produce the next token, or report why none is available.
    fn next_token<S>(&mut self, source: &mut S) -> Result<Scan<Self::Token>, Self::Error>
    where
        S: PullSource + ?Sized;
}
