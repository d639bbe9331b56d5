//! Resumable streaming loader.
//!
//! A [`StreamingLoader`] owns one byte source and parses it incrementally into
//! caller-provided [`Record`] buffers. Each [`fill`](StreamingLoader::fill)
//! writes at most `buffer.len()` records and leaves the source positioned
//! right after the last byte it consumed, so successive fills see every byte
//! of the source exactly once.
//!
//! Errors never abort with `Err` from `fill`. They are recorded on the loader,
//! the call returns the records completed so far, and later fills return 0.
//!
//! # Example
//!
//! ```
//! use tabfeed::data::io::{DataSource, LoadError, SourceConfig, StreamingLoader};
//!
//! let csv = b"x0,x1,y\n1.5,2.5,9.0\n3.0,4.0,1.0\n";
//! let config = SourceConfig::builder()
//!     .source(DataSource::memory(csv))
//!     .has_header(true)
//!     .label_column(2)
//!     .feature_columns([0, 1])
//!     .build()
//!     .unwrap();
//!
//! let mut loader = StreamingLoader::new(config).unwrap();
//! let mut buffer = loader.record_buffer(1);
//!
//! assert_eq!(loader.fill(&mut buffer), 1);
//! assert_eq!(buffer[0].label(), 9.0);
//! assert_eq!(loader.fill(&mut buffer), 1);
//! assert_eq!(buffer[0].features(), &[3.0, 4.0]);
//! assert!(loader.is_at_end());
//!
//! // The region is consumed; reading on is a range error.
//! assert_eq!(loader.fill(&mut buffer), 0);
//! assert!(matches!(loader.last_error(), Some(LoadError::Range { .. })));
//! ```

use std::fs::File;

use crate::data::Record;
use crate::error::ConfigError;

use super::assembler::{Assembler, ColumnMap};
use super::batches::RecordBatches;
use super::config::{DataSource, SourceConfig};
use super::error::LoadError;
use super::source::{ByteCursor, FileCursor, MemoryCursor};
use super::tokenizer::{FieldSink, Tokenizer};

/// Streaming, resumable parser from delimited text to [`Record`]s.
///
/// The loader is the sole reader of its source for its whole lifetime. It is
/// single-threaded: `fill` takes `&mut self`. Dropping the loader closes the
/// file, if any.
pub struct StreamingLoader<'a> {
    config: SourceConfig<'a>,
    cursor: Box<dyn ByteCursor + 'a>,
    tokenizer: Tokenizer,
    columns: ColumnMap,
    rows_seen: u64,
    exhausted: bool,
    failed: bool,
    last_error: Option<LoadError>,
}

impl<'a> StreamingLoader<'a> {
    /// Open the configured source.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Config`] if the configuration is invalid
    /// - [`LoadError::SourceOpen`] if a file source cannot be opened or
    ///   positioned at `start_offset`
    /// - [`LoadError::Range`] if `start_offset` lies past a memory region
    pub fn new(config: SourceConfig<'a>) -> Result<Self, LoadError> {
        config.validate()?;

        let cursor: Box<dyn ByteCursor + 'a> = match &config.source {
            DataSource::File(path) => {
                let open_error = |source| LoadError::SourceOpen {
                    path: path.clone(),
                    source,
                };
                let file = File::open(path).map_err(open_error)?;
                Box::new(FileCursor::new(file, config.chunk_size, config.start_offset).map_err(open_error)?)
            }
            DataSource::Memory(bytes) => Box::new(MemoryCursor::new(*bytes, config.start_offset)?),
        };

        log::debug!(
            "opened {} source: label column {}, {} feature columns, header: {}",
            if config.source.is_memory() { "memory" } else { "file" },
            config.label_column,
            config.dimension(),
            config.has_header,
        );

        Ok(Self::with_cursor(config, cursor))
    }

    fn with_cursor(config: SourceConfig<'a>, cursor: Box<dyn ByteCursor + 'a>) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.delimiter, config.max_field_len),
            columns: ColumnMap::new(&config),
            config,
            cursor,
            rows_seen: 0,
            exhausted: false,
            failed: false,
            last_error: None,
        }
    }

    /// Fill `buffer` with the next records of the source.
    ///
    /// Returns the number of records written to the front of `buffer`.
    /// A count below `buffer.len()` with no recorded error means the source is
    /// exhausted. Every record must have capacity [`dimension`](Self::dimension).
    pub fn fill(&mut self, buffer: &mut [Record]) -> usize {
        if self.failed || buffer.is_empty() {
            return 0;
        }

        let expected = self.columns.dimension();
        if let Some(record) = buffer.iter().find(|r| r.capacity() != expected) {
            let found = record.capacity();
            self.fail(LoadError::BufferShape { expected, found });
            return 0;
        }
        if let Err(err) = self.cursor.check_readable() {
            self.fail(err);
            return 0;
        }
        if self.exhausted {
            return 0;
        }

        let start = self.cursor.position();
        let data_start_row = u64::from(self.config.has_header);
        let mut assembler = Assembler::new(&self.columns, buffer, data_start_row, self.rows_seen);
        let outcome = pump(self.cursor.as_mut(), &mut self.tokenizer, &mut assembler);
        let produced = assembler.produced();
        self.rows_seen = assembler.rows();

        match outcome {
            Ok(reached_end) => self.exhausted = reached_end,
            Err(err) => self.fail(err),
        }

        log::debug!(
            "fill produced {} records from {} bytes, position {}",
            produced,
            self.cursor.position() - start,
            self.cursor.position()
        );
        produced
    }

    /// Iterate over batches of up to `batch_size` records.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroBatchSize`] if `batch_size` is 0.
    pub fn batches(&mut self, batch_size: usize) -> Result<RecordBatches<'_, 'a>, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        let buffer = self.record_buffer(batch_size);
        Ok(RecordBatches::new(self, buffer))
    }

    /// Allocate `capacity` records shaped for this loader.
    pub fn record_buffer(&self, capacity: usize) -> Vec<Record> {
        vec![Record::new(self.dimension()); capacity]
    }

    /// Number of features per record.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.columns.dimension()
    }

    pub fn config(&self) -> &SourceConfig<'a> {
        &self.config
    }

    /// Byte offset just past the last consumed byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Whether a fill has reached end of source.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether no further records can come from the source: a fill has
    /// reached its end, or a memory region has been consumed completely.
    ///
    /// A fill on a consumed memory region records [`LoadError::Range`].
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.exhausted || self.cursor.is_drained()
    }

    /// Whether an error was recorded. A failed loader produces no more records.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Most recently recorded error.
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// Take the recorded error. The loader stays failed.
    pub fn take_error(&mut self) -> Option<LoadError> {
        self.last_error.take()
    }

    fn fail(&mut self, err: LoadError) {
        log::warn!("streaming load failed at byte {}: {}", self.cursor.position(), err);
        self.failed = true;
        self.last_error = Some(err);
    }
}

/// Move bytes from cursor to tokenizer until the assembler is full or the
/// source ends. Returns whether end of source was reached.
fn pump<C: ByteCursor + ?Sized>(
    cursor: &mut C,
    tokenizer: &mut Tokenizer,
    assembler: &mut Assembler<'_>,
) -> Result<bool, LoadError> {
    if tokenizer.is_finished() {
        return Ok(true);
    }
    while !assembler.is_full() {
        let chunk = cursor.next_chunk().map_err(LoadError::SourceRead)?;
        if chunk.is_empty() {
            cursor.consume(0).map_err(LoadError::SourceRead)?;
            tokenizer.finish(assembler)?;
            return Ok(true);
        }
        let consumed = tokenizer.feed(chunk, assembler)?;
        cursor.consume(consumed).map_err(LoadError::SourceRead)?;
    }
    Ok(false)
}
