//! Async chunk sources for a [`Driver`].
//!
//! The core itself never awaits. These helpers sit one level up: they wait
//! for the next chunk from an async source, hand it to
//! [`Driver::feed`], and stop as soon as the parse concludes or the source
//! closes. Everything runs on the caller's task; nothing is spawned.
//!
//! # Example
//!
//! ```ignore
//! use feedkit::async_stream::tokio_impl::drive_channel;
//!
//! async fn parse_socket(rx: tokio::sync::mpsc::Receiver<Vec<u8>>) -> Result<(), Error> {
//!     let mut driver = Driver::new(StmtScanner::new(), StmtParser::new())?;
//!     match drive_channel(&mut driver, rx).await? {
//!         DriveStatus::Accepted => println!("{:?}", driver.parser().statements()),
//!         _ => eprintln!("rejected"),
//!     }
//!     Ok(())
//! }
//! ```

use crate::{
    driver::{DriveError, DriveStatus, Driver},
    traits::{PushParser, Scanner},
};

/// Feed one chunk, or end the stream when the source is exhausted.
///
/// Returns `Some(status)` once the parse has concluded.
fn step<S, P, H, B>(
    driver: &mut Driver<S, P, H>,
    chunk: Option<B>,
) -> Result<Option<DriveStatus>, DriveError<S::Error>>
where
    S: Scanner,
    P: PushParser<S::Token>,
    B: AsRef<[u8]>,
{
    let status = match chunk {
        Some(chunk) => driver.feed(chunk.as_ref(), false)?,
        None => driver.finish()?,
    };
    Ok(status.is_final().then_some(status))
}

#[cfg(feature = "tokio")]
pub mod tokio_impl {
    //! Tokio-based chunk source.

    use super::*;
    use ::tokio::sync::mpsc;

    /// Drive `driver` from chunks received on `rx`.
    ///
    /// Each received chunk is fed as a non-final chunk. When every sender
    /// has been dropped, end of input is declared. Returns early, leaving
    /// the remaining chunks in the channel, if the parser concludes first.
    pub async fn drive_channel<S, P, H, B>(
        driver: &mut Driver<S, P, H>,
        mut rx: mpsc::Receiver<B>,
    ) -> Result<DriveStatus, DriveError<S::Error>>
    where
        S: Scanner,
        P: PushParser<S::Token>,
        B: AsRef<[u8]>,
    {
        loop {
            let chunk = rx.recv().await;
            if let Some(status) = step(driver, chunk)? {
                return Ok(status);
            }
        }
    }
}

#[cfg(feature = "futures")]
pub mod futures_impl {
    //! Futures-based chunk source (runtime-agnostic).

    use super::*;
    use core::future::poll_fn;
    use core::pin::Pin;
    use futures_core::Stream;

    /// Drive `driver` from the chunks yielded by `chunks`.
    ///
    /// Behaves like [`drive_channel`](super::tokio_impl) but accepts any
    /// [`Stream`]. End of input is declared when the stream yields `None`.
    pub async fn drive_stream<S, P, H, St, B>(
        driver: &mut Driver<S, P, H>,
        mut chunks: St,
    ) -> Result<DriveStatus, DriveError<S::Error>>
    where
        S: Scanner,
        P: PushParser<S::Token>,
        St: Stream<Item = B> + Unpin,
        B: AsRef<[u8]>,
    {
        loop {
            let chunk = poll_fn(|cx| Pin::new(&mut chunks).poll_next(cx)).await;
            if let Some(status) = step(driver, chunk)? {
                return Ok(status);
            }
        }
    }
}
