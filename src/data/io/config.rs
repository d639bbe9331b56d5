//! Source configuration with builder pattern.
//!
//! [`SourceConfig`] declares where bytes come from and how text columns map to
//! the label and features of a [`Record`](crate::data::Record). It uses the
//! `bon` crate for builder generation, with validation at build time.
//!
//! # Example
//!
//! ```
//! use tabfeed::data::io::{DataSource, SourceConfig};
//!
//! let csv = b"a,b,y\n1.5,2.5,9.0\n";
//! let config = SourceConfig::builder()
//!     .source(DataSource::memory(csv))
//!     .has_header(true)
//!     .label_column(2)
//!     .feature_columns([0, 1])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.dimension(), 2);
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use bon::Builder;

use crate::error::ConfigError;

/// Default number of bytes pulled from a file per read.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Default upper bound on the length of a single field, in bytes.
pub const DEFAULT_MAX_FIELD_LEN: usize = 1024;

/// Origin of the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource<'a> {
    /// A file opened read-only when the loader is created.
    File(PathBuf),
    /// A borrowed, read-only byte region.
    Memory(&'a [u8]),
}

impl<'a> DataSource<'a> {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn memory(bytes: &'a [u8]) -> Self {
        Self::Memory(bytes)
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

/// Where data comes from and how its columns map to records.
///
/// Column indices are zero-based positions within a delimited line.
/// Validation rejects:
/// - an empty `feature_columns`
/// - a feature column listed twice
/// - a label column that is also a feature column
/// - a delimiter of `\n` or `\r`
/// - a zero `chunk_size` or `max_field_len`
///
/// Columns beyond the width of an actual row are not an error; they are left
/// as missing (`NaN`) in the produced record.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct SourceConfig<'a> {
    /// File path or memory region.
    pub source: DataSource<'a>,

    /// Skip the first line read from the source. Default: `false`.
    #[builder(default)]
    pub has_header: bool,

    /// Column holding the label.
    pub label_column: usize,

    /// Columns holding features, in record order.
    #[builder(into)]
    pub feature_columns: Vec<usize>,

    /// Field delimiter. Default: `,`.
    #[builder(default = b',')]
    pub delimiter: u8,

    /// Bytes pulled per file read. Default: [`DEFAULT_CHUNK_SIZE`].
    #[builder(default = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Longest accepted field. Default: [`DEFAULT_MAX_FIELD_LEN`].
    #[builder(default = DEFAULT_MAX_FIELD_LEN)]
    pub max_field_len: usize,

    /// Byte offset at which reading starts. Default: 0.
    ///
    /// Used to split one source across independent loaders. The offset
    /// should sit at the start of a line.
    #[builder(default)]
    pub start_offset: u64,
}

impl<'a, S: source_config_builder::IsComplete> SourceConfigBuilder<'a, S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the column mapping or read limits are invalid.
    pub fn build(self) -> Result<SourceConfig<'a>, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl SourceConfig<'_> {
    /// Number of features per record.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.feature_columns.len()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.feature_columns.is_empty() {
            return Err(ConfigError::EmptyFeatures);
        }

        let mut seen = HashSet::with_capacity(self.feature_columns.len());
        for &col in &self.feature_columns {
            if col == self.label_column {
                return Err(ConfigError::OverlappingColumns(col));
            }
            if !seen.insert(col) {
                return Err(ConfigError::DuplicateFeatureColumn(col));
            }
        }

        if self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.max_field_len == 0 {
            return Err(ConfigError::ZeroFieldLimit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DATA: &[u8] = b"1,2,3\n";

    #[test]
    fn defaults() {
        let config = SourceConfig::builder()
            .source(DataSource::memory(DATA))
            .label_column(0)
            .feature_columns([1, 2])
            .build()
            .unwrap();

        assert!(!config.has_header);
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.max_field_len, DEFAULT_MAX_FIELD_LEN);
        assert_eq!(config.start_offset, 0);
        assert_eq!(config.dimension(), 2);
        assert!(config.source.is_memory());
    }

    #[test]
    fn label_also_feature_rejected() {
        let err = SourceConfig::builder()
            .source(DataSource::memory(DATA))
            .label_column(1)
            .feature_columns([0, 1])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::OverlappingColumns(1));
    }

    #[test]
    fn duplicate_feature_rejected() {
        let err = SourceConfig::builder()
            .source(DataSource::memory(DATA))
            .label_column(2)
            .feature_columns([0, 1, 0])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateFeatureColumn(0));
    }

    #[test]
    fn empty_features_rejected() {
        let err = SourceConfig::builder()
            .source(DataSource::memory(DATA))
            .label_column(0)
            .feature_columns(Vec::new())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyFeatures);
    }

    #[rstest]
    #[case(b'\n')]
    #[case(b'\r')]
    fn terminator_delimiter_rejected(#[case] delimiter: u8) {
        let err = SourceConfig::builder()
            .source(DataSource::memory(DATA))
            .label_column(0)
            .feature_columns([1])
            .delimiter(delimiter)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidDelimiter(delimiter));
    }

    #[test]
    fn zero_limits_rejected() {
        let base = SourceConfig::builder()
            .source(DataSource::file("data.csv"))
            .label_column(0)
            .feature_columns([1]);

        assert_eq!(
            base.clone().chunk_size(0).build().unwrap_err(),
            ConfigError::ZeroChunkSize
        );
        assert_eq!(
            base.max_field_len(0).build().unwrap_err(),
            ConfigError::ZeroFieldLimit
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::OverlappingColumns(3).to_string(),
            "column 3 is mapped to both the label and a feature"
        );
        assert_eq!(
            ConfigError::InvalidDelimiter(b'\n').to_string(),
            "delimiter '\\n' cannot be a line terminator"
        );
    }
}
