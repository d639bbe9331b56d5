//! Error types for streaming loads.

use std::io;
use std::path::PathBuf;

use crate::data::MatrixError;
use crate::error::ConfigError;

/// Errors recorded by a [`StreamingLoader`](super::StreamingLoader).
///
/// `SourceOpen`, `Config` and an out-of-range start offset are returned from
/// construction. Everything else is recorded on the loader during a fill and
/// makes that loader unusable.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("cannot open {}: {source}", .path.display())]
	SourceOpen {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("read error: {0}")]
	SourceRead(#[source] io::Error),

	#[error("parse error: {0}")]
	Parse(#[from] ParseError),

	#[error("memory cursor at offset {offset} is past the end of the {len}-byte region")]
	Range { offset: u64, len: usize },

	#[error("record buffer holds {found} features per record, loader expects {expected}")]
	BufferShape { expected: usize, found: usize },

	#[error("cannot assemble batch: {0}")]
	Matrix(#[from] MatrixError),

	#[error("invalid configuration: {0}")]
	Config(#[from] ConfigError),
}

/// Malformed input rejected while tokenizing or converting a field.
///
/// `row` counts non-blank lines from the loader's starting offset, header
/// included. `column` is the zero-based field index within that row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	#[error("row {row}, column {column}: field exceeds {limit} bytes")]
	FieldTooLong { row: u64, column: usize, limit: usize },

	#[error("row {row}, column {column}: {text:?} is not a number")]
	InvalidNumber { row: u64, column: usize, text: String },

	#[error("row {row}, column {column}: field is not valid UTF-8")]
	InvalidUtf8 { row: u64, column: usize },
}
