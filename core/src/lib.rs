pub mod accumulator;
pub mod config;
pub mod context;
pub mod driver;
mod error;
pub mod traits;

#[cfg(any(feature = "tokio", feature = "futures"))]
pub mod async_stream;

pub use accumulator::{BufferOp, ByteAccumulator};
pub use config::{BufferConfig, DriverConfig, DEFAULT_CAPACITY};
pub use context::{FeedStatus, StreamContext, StreamState, read_input};
pub use driver::{DriveError, DriveStatus, Driver};
pub use error::StreamError;
pub use traits::{Pull, PullSource, PushParser, PushStatus, Scan, Scanner, SliceSource};
