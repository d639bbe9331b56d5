//! tabfeed: resumable, bounded-memory loading of delimited numeric text.
//!
//! A [`StreamingLoader`] turns a CSV-like file or memory region into
//! labeled [`Record`]s, a caller-sized buffer at a time, so datasets larger
//! than memory can be consumed in batches. Repeated bounded fills produce
//! exactly the records a single unbounded fill would.
//!
//! The [`training`] module carries the consumption contract for a batch
//! optimizer: configuration, an epoch loop and loss reporting.

pub mod data;
pub mod error;
pub mod testing;
pub mod training;

pub use data::io::{Batch, DataSource, LoadError, ParseError, SourceConfig, StreamingLoader};
pub use data::{DenseMatrix, MatrixError, Record};
pub use error::ConfigError;
