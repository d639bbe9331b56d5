//! Streaming delimited-text loading.
//!
//! [`StreamingLoader`] turns a file or memory region of delimited numeric text
//! into [`Record`](crate::data::Record)s, a bounded buffer at a time, without
//! holding the dataset in memory.
//!
//! # Pipeline
//!
//! - a byte cursor hands out bounded chunks and takes back unconsumed tails
//! - the tokenizer splits chunks into fields and record boundaries
//! - the assembler maps columns to label/features and fills record slots
//!
//! Successive fills consume the source exactly once, so any sequence of
//! bounded fills yields the same records as one unbounded fill.

mod assembler;
mod batches;
mod config;
mod error;
mod loader;
mod source;
mod tokenizer;

pub use batches::{Batch, RecordBatches};
pub use config::{DataSource, SourceConfig, SourceConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_FIELD_LEN};
pub use error::{LoadError, ParseError};
pub use loader::StreamingLoader;
