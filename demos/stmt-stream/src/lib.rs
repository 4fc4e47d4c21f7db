#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Statement Stream Example
//!
//! A tiny statement language parsed from input that arrives in arbitrary
//! chunks. Bytes are fed into a feedkit [`Driver`], scanned by a
//! logos-backed [`StmtScanner`], and pushed one token at a time into
//! [`StmtParser`].
//!
//! # Format
//!
//! ```text
//! print "hello";
//! let x = 42;
//! print """a string
//! spanning lines""";
//! ```
//!
//! A chunk boundary may fall anywhere, including inside a keyword, a number
//! or a triple-quoted string. The result never depends on where the input
//! was split.

use feedkit::{DriveError, DriveStatus, Driver, StreamError};
use thiserror::Error;

pub mod ast;
pub mod parser;
pub mod scanner;
pub mod tokens;

pub use ast::{Statement, Value};
pub use parser::StmtParser;
pub use scanner::StmtScanner;
pub use tokens::Token;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StmtError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("invalid token at byte {offset}")]
    InvalidToken { offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("input ended inside a statement")]
    UnexpectedEof,

    /// Input was fed to a driver whose parse had already concluded.
    #[error("parse already concluded ({0:?})")]
    AlreadyConcluded(DriveStatus),
}

impl From<DriveError<StmtError>> for StmtError {
    fn from(err: DriveError<StmtError>) -> Self {
        match err {
            DriveError::Stream(err) => StmtError::Stream(err),
            DriveError::Scan(err) => err,
            DriveError::IncompleteInput => StmtError::UnexpectedEof,
            DriveError::Finished(status) => StmtError::AlreadyConcluded(status),
        }
    }
}

pub type StmtDriver = Driver<StmtScanner, StmtParser>;

/// Create a driver with default buffer and scanner settings.
pub fn driver() -> Result<StmtDriver, StmtError> {
    Ok(Driver::new(StmtScanner::new(), StmtParser::new())?)
}

/// Turn a concluded driver into its statements.
pub fn conclude(driver: StmtDriver, status: DriveStatus) -> Result<Vec<Statement>, StmtError> {
    let (_, parser) = driver.into_parts();
    match status {
        DriveStatus::Accepted => Ok(parser.into_statements()),
        DriveStatus::Aborted => Err(StmtError::Syntax(
            parser.error().unwrap_or("input rejected").to_string(),
        )),
        DriveStatus::NeedData => Err(StmtError::UnexpectedEof),
    }
}

/// Parse `input` by feeding it in pieces of `chunk_size` bytes.
///
/// The last piece is fed as the final chunk. A `chunk_size` of 0 is
/// treated as 1. Feeding stops at the first verdict, so this never returns
/// [`StmtError::AlreadyConcluded`].
pub fn parse_chunked(input: &[u8], chunk_size: usize) -> Result<Vec<Statement>, StmtError> {
    let chunk_size = chunk_size.max(1);
    let mut driver = driver()?;

    if input.is_empty() {
        let status = driver.finish()?;
        return conclude(driver, status);
    }

    let count = input.len().div_ceil(chunk_size);
    for (i, chunk) in input.chunks(chunk_size).enumerate() {
        let status = driver.feed(chunk, i + 1 == count)?;
        if status.is_final() {
            return conclude(driver, status);
        }
    }
    Err(StmtError::UnexpectedEof)
}

/// Parse chunks received on `rx` until every sender is dropped.
pub async fn parse_channel<B>(
    rx: tokio::sync::mpsc::Receiver<B>,
) -> Result<Vec<Statement>, StmtError>
where
    B: AsRef<[u8]>,
{
    let mut driver = driver()?;
    let status = feedkit::async_stream::tokio_impl::drive_channel(&mut driver, rx).await?;
    conclude(driver, status)
}
