//! Pull scanner for the statement language.
//!
//! [`StmtScanner`] reads from any [`PullSource`] into a small scratch
//! buffer and keeps the text it has not yet turned into tokens. A token
//! that reaches the end of what has been read so far is held back until
//! more bytes arrive or the source reports end of input: `pri` may yet
//! become `print`, and `4` may yet become `42`.
//!
//! Bytes are decoded as they arrive. Decoded text is lexed up to the first
//! undecodable byte, so tokens ahead of invalid UTF-8 are emitted no matter
//! how the input was split.

use feedkit::{Pull, PullSource, Scan, Scanner};
use logos::Logos;

use crate::{StmtError, tokens::Token};

/// Default number of bytes requested per pull.
pub const DEFAULT_READ_SIZE: usize = 256;

const LONG_QUOTE: &[u8] = b"\"\"\"";

/// What the pending text holds at its front.
enum Lexed {
    Token(Token, usize),
    /// More text is needed. Searching may restart at `resume`.
    Incomplete { resume: usize },
    Invalid,
    Unterminated,
}

pub struct StmtScanner {
    /// Decoded input; `text[start..]` is not yet scanned.
    text: String,
    start: usize,
    /// Bytes not yet decoded: a split character, or invalid UTF-8.
    tail: Vec<u8>,
    scratch: Box<[u8]>,
    /// Absolute offset of `text[start]` in the input.
    offset: usize,
    /// Where to resume searching for the end of a string token.
    resume: usize,
    eof: bool,
}

impl Default for StmtScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl StmtScanner {
    pub fn new() -> Self {
        Self::with_read_size(DEFAULT_READ_SIZE)
    }

    /// Create a scanner that pulls at most `read_size` bytes at a time.
    pub fn with_read_size(read_size: usize) -> Self {
        Self {
            text: String::new(),
            start: 0,
            tail: Vec::new(),
            scratch: vec![0u8; read_size.max(1)].into_boxed_slice(),
            offset: 0,
            resume: 0,
            eof: false,
        }
    }

    /// Decoded text read from the source but not yet scanned.
    pub fn pending(&self) -> &str {
        &self.text[self.start..]
    }

    /// Number of input bytes fully scanned.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn advance(&mut self, n: usize) {
        self.start += n;
        self.offset += n;
        self.resume = 0;
        if self.start == self.text.len() {
            self.text.clear();
            self.start = 0;
        } else if self.start * 2 >= self.text.len() {
            self.text.drain(..self.start);
            self.start = 0;
        }
    }

    /// Move the decodable prefix of `tail` into `text`.
    fn decode_tail(&mut self) {
        let valid = match std::str::from_utf8(&self.tail) {
            Ok(decoded) => decoded.len(),
            Err(err) => err.valid_up_to(),
        };
        if let Ok(decoded) = std::str::from_utf8(&self.tail[..valid]) {
            self.text.push_str(decoded);
        }
        self.tail.drain(..valid);
    }

    /// Returns true if `tail` can never be decoded.
    fn tail_is_invalid(&self) -> bool {
        if self.tail.is_empty() {
            return false;
        }
        match std::str::from_utf8(&self.tail) {
            Ok(_) => false,
            // A character split across chunks is only invalid at the end.
            Err(err) => err.error_len().is_some() || self.eof,
        }
    }

    fn take_token(&mut self) -> Result<Option<Token>, StmtError> {
        let blank = self
            .pending()
            .bytes()
            .take_while(u8::is_ascii_whitespace)
            .count();
        if blank > 0 {
            self.advance(blank);
        }

        let bad_tail = self.tail_is_invalid();
        let text = self.pending();
        if text.is_empty() {
            return if bad_tail {
                Err(StmtError::InvalidUtf8 {
                    offset: self.offset,
                })
            } else {
                Ok(None)
            };
        }

        match lex_one(text, self.eof, bad_tail, self.resume) {
            Lexed::Token(token, len) => {
                self.advance(len);
                Ok(Some(token))
            }
            // A string that runs into undecodable bytes.
            Lexed::Incomplete { .. } if bad_tail => Err(StmtError::InvalidUtf8 {
                offset: self.offset + text.len(),
            }),
            Lexed::Incomplete { resume } if !self.eof => {
                self.resume = resume;
                Ok(None)
            }
            Lexed::Incomplete { .. } | Lexed::Invalid => Err(StmtError::InvalidToken {
                offset: self.offset,
            }),
            Lexed::Unterminated => Err(StmtError::UnterminatedString {
                offset: self.offset,
            }),
        }
    }
}

impl Scanner for StmtScanner {
    type Token = Token;
    type Error = StmtError;

    fn next_token<S>(&mut self, source: &mut S) -> Result<Scan<Token>, StmtError>
    where
        S: PullSource + ?Sized,
    {
        loop {
            if let Some(token) = self.take_token()? {
                tracing::trace!(?token, offset = self.offset, "scanned token");
                return Ok(Scan::Token(token));
            }
            if self.eof {
                return Ok(Scan::Eof);
            }

            match source.pull(&mut self.scratch) {
                Pull::Filled(n) => {
                    self.tail.extend_from_slice(&self.scratch[..n]);
                    self.decode_tail();
                }
                Pull::WouldBlock => return Ok(Scan::WouldBlock),
                Pull::Eof => self.eof = true,
            }
        }
    }
}

/// Lex the first token of `text`, which starts with a non-blank character.
///
/// `bad_tail` means undecodable bytes follow `text`, so a token reaching
/// its end cannot grow any further.
fn lex_one(text: &str, at_eof: bool, bad_tail: bool, resume: usize) -> Lexed {
    if text.starts_with('"') {
        return lex_string(text, at_eof, resume);
    }

    let mut lexer = Token::lexer(text);
    let Some(result) = lexer.next() else {
        return Lexed::Incomplete { resume: 0 };
    };
    let end = lexer.span().end;
    if end >= text.len() && !at_eof && !bad_tail {
        return Lexed::Incomplete { resume: 0 };
    }
    match result {
        Ok(token) => Lexed::Token(token, end),
        Err(()) => Lexed::Invalid,
    }
}

fn lex_string(text: &str, at_eof: bool, resume: usize) -> Lexed {
    let bytes = text.as_bytes();

    if bytes.starts_with(LONG_QUOTE) {
        let from = resume.max(LONG_QUOTE.len());
        return match bytes[from..]
            .windows(LONG_QUOTE.len())
            .position(|window| window == LONG_QUOTE)
        {
            Some(i) => {
                let end = from + i;
                Lexed::Token(
                    Token::LongStr(text[LONG_QUOTE.len()..end].to_string()),
                    end + LONG_QUOTE.len(),
                )
            }
            None if at_eof => Lexed::Unterminated,
            // The closing quote may be split across chunks.
            None => Lexed::Incomplete {
                resume: bytes.len().saturating_sub(LONG_QUOTE.len() - 1).max(from),
            },
        };
    }

    // `"` or `""` at the end of input may still become `"""`.
    if !at_eof && bytes.len() < LONG_QUOTE.len() && bytes.iter().all(|&b| b == b'"') {
        return Lexed::Incomplete { resume: 0 };
    }
    let from = resume.max(1);
    match bytes[from..].iter().position(|&b| b == b'"' || b == b'\n') {
        Some(i) if bytes[from + i] == b'"' => {
            let end = from + i;
            Lexed::Token(Token::Str(text[1..end].to_string()), end + 1)
        }
        Some(_) => Lexed::Unterminated,
        None if at_eof => Lexed::Unterminated,
        None => Lexed::Incomplete { resume: bytes.len() },
    }
}
