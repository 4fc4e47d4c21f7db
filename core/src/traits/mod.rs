//! Collaborator traits for the feedkit streaming pipeline.
//!
//! The core never tokenizes or parses anything itself. These traits describe
//! the shape of the pieces it plugs between, so that any scanner and any
//! push-style parser can be driven from chunked input.
//!
//! # Trait Hierarchy
//!
//! ```text
//! PullSource (byte supply, non-blocking)
//!     ├── StreamContext   (chunk-fed)
//!     └── SliceSource     (complete input)
//!
//! Scanner (bytes -> tokens)
//!     └── next_token(&mut impl PullSource) -> Scan<Token>
//!
//! PushParser<Token> (tokens -> verdict)
//!     └── push(token) -> PushStatus
//! ```
//!
//! # Usage Patterns
//!
//! ```ignore
//! use feedkit::{PullSource, PushParser, PushStatus, Scan, Scanner};
//!
//! fn pump<S: Scanner, P: PushParser<S::Token>>(
//!     scanner: &mut S,
//!     parser: &mut P,
//!     source: &mut impl PullSource,
//! ) -> Result<Option<PushStatus>, S::Error> {
//!     loop {
//!         match scanner.next_token(source)? {
//!             Scan::Token(tok) => match parser.push(tok) {
//!                 PushStatus::NeedMoreTokens => continue,
//!                 done => return Ok(Some(done)),
//!             },
//!             Scan::WouldBlock => return Ok(None),
//!             Scan::Eof => return Ok(Some(parser.finish())),
//!         }
//!     }
//! }
//! ```
//!
//! [`Driver`](crate::driver::Driver) implements exactly this loop.

mod pull;
mod push;
mod scan;

pub use pull::{Pull, PullSource, SliceSource};
pub use push::{PushParser, PushStatus};
pub use scan::{Scan, Scanner};
