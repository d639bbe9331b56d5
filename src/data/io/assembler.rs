//! Field/record assembler.
//!
//! Receives tokenizer events for one fill and writes typed values into the
//! caller's record slots. Two coordinates drive it: the row index (counting
//! every record boundary, header included) and the field index within the
//! row.

use crate::data::Record;

use super::config::SourceConfig;
use super::error::ParseError;
use super::tokenizer::FieldSink;

/// Destination of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnTarget {
    Label,
    Feature(usize),
}

/// Column index to target lookup, built once per loader.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    targets: Vec<Option<ColumnTarget>>,
    dimension: usize,
}

impl ColumnMap {
    pub(crate) fn new(config: &SourceConfig<'_>) -> Self {
        let width = config
            .feature_columns
            .iter()
            .copied()
            .chain(std::iter::once(config.label_column))
            .max()
            .map_or(0, |max| max + 1);

        let mut targets = vec![None; width];
        for (k, &col) in config.feature_columns.iter().enumerate() {
            targets[col] = Some(ColumnTarget::Feature(k));
        }
        // Label is assigned last so it wins on any overlap.
        targets[config.label_column] = Some(ColumnTarget::Label);

        Self {
            targets,
            dimension: config.feature_columns.len(),
        }
    }

    #[inline]
    pub(crate) fn target(&self, column: usize) -> Option<ColumnTarget> {
        self.targets.get(column).copied().flatten()
    }

    #[inline]
    pub(crate) fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Per-fill assembler context.
pub(crate) struct Assembler<'b> {
    columns: &'b ColumnMap,
    records: &'b mut [Record],
    data_start_row: u64,
    row: u64,
    field: usize,
    slot: usize,
    written: bool,
}

impl<'b> Assembler<'b> {
    /// `first_row` is the number of rows earlier fills already completed;
    /// rows below `data_start_row` are skipped as header.
    pub(crate) fn new(
        columns: &'b ColumnMap,
        records: &'b mut [Record],
        data_start_row: u64,
        first_row: u64,
    ) -> Self {
        Self {
            columns,
            records,
            data_start_row,
            row: first_row,
            field: 0,
            slot: 0,
            written: false,
        }
    }

    /// Records finalized so far.
    #[inline]
    pub(crate) fn produced(&self) -> usize {
        self.slot
    }

    /// Rows completed, counting from the loader's first row.
    #[inline]
    pub(crate) fn rows(&self) -> u64 {
        self.row
    }
}

/// Parse a field as `f64`. Empty or blank text is a missing value.
fn parse_value(raw: &[u8], row: u64, column: usize) -> Result<Option<f64>, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidUtf8 { row, column })?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| ParseError::InvalidNumber {
            row,
            column,
            text: text.to_owned(),
        })
}

impl FieldSink for Assembler<'_> {
    fn field(&mut self, raw: &[u8]) -> Result<(), ParseError> {
        let column = self.field;
        self.field += 1;

        if self.row < self.data_start_row {
            return Ok(());
        }
        let Some(target) = self.columns.target(column) else {
            return Ok(());
        };
        let Some(value) = parse_value(raw, self.row, column)? else {
            return Ok(());
        };

        let record = &mut self.records[self.slot];
        if !self.written {
            record.clear();
            self.written = true;
        }
        match target {
            ColumnTarget::Label => record.set_label(value),
            ColumnTarget::Feature(k) => record.set_feature(k, value),
        }
        Ok(())
    }

    fn record_end(&mut self) {
        self.field = 0;
        self.row += 1;
        if self.written {
            self.records[self.slot].finalize();
            self.slot += 1;
        }
        self.written = false;
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.slot >= self.records.len()
    }

    fn location(&self) -> (u64, usize) {
        (self.row, self.field)
    }
}
