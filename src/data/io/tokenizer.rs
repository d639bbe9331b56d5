//! Push-based delimited-text tokenizer.
//!
//! Bytes are pushed in arbitrary chunks; every completed field and record
//! boundary is reported to a [`FieldSink`]. Tokenizer state (including a field
//! split across chunks) survives between pushes, so chunk boundaries may fall
//! anywhere. Quoting is disabled: quote characters are ordinary bytes.
//!
//! Line terminators are `\n`, `\r` or `\r\n`.

use csv_core::{ReadFieldResult, Reader, ReaderBuilder};

use super::error::ParseError;

const INITIAL_FIELD_CAPACITY: usize = 64;

/// Receiver of tokenizer events.
pub(crate) trait FieldSink {
    /// A complete field's raw bytes.
    fn field(&mut self, raw: &[u8]) -> Result<(), ParseError>;

    /// End of the current record.
    fn record_end(&mut self);

    /// When true, the tokenizer stops consuming input.
    fn is_full(&self) -> bool;

    /// `(row, column)` of the field being read, for error reporting.
    fn location(&self) -> (u64, usize);
}

pub(crate) struct Tokenizer {
    reader: Reader,
    field: Vec<u8>,
    field_len: usize,
    max_field_len: usize,
    finished: bool,
}

impl Tokenizer {
    pub(crate) fn new(delimiter: u8, max_field_len: usize) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .quoting(false)
            .build();
        Self {
            reader,
            field: vec![0; INITIAL_FIELD_CAPACITY.min(max_field_len.saturating_add(1))],
            field_len: 0,
            max_field_len,
            finished: false,
        }
    }

    /// Whether end of input has been flushed.
    #[inline]
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Tokenize from the start of `input` until it is exhausted or the sink is
    /// full. Returns the number of bytes consumed.
    ///
    /// The sink only fills at a record boundary, so a short return always
    /// leaves the tokenizer between records.
    pub(crate) fn feed<S: FieldSink>(&mut self, input: &[u8], sink: &mut S) -> Result<usize, ParseError> {
        let mut consumed = 0;
        while consumed < input.len() && !sink.is_full() {
            let (result, nin, nout) =
                self.reader.read_field(&input[consumed..], &mut self.field[self.field_len..]);
            consumed += nin;
            self.field_len += nout;
            match result {
                ReadFieldResult::InputEmpty => {}
                ReadFieldResult::OutputFull => self.grow(sink)?,
                ReadFieldResult::Field { record_end } => self.emit(record_end, sink)?,
                ReadFieldResult::End => break,
            }
        }
        Ok(consumed)
    }

    /// Signal end of input, emitting a final record that had no terminator.
    pub(crate) fn finish<S: FieldSink>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        while !self.finished {
            let (result, _, nout) = self.reader.read_field(&[], &mut self.field[self.field_len..]);
            self.field_len += nout;
            match result {
                ReadFieldResult::OutputFull => self.grow(sink)?,
                ReadFieldResult::Field { record_end } => self.emit(record_end, sink)?,
                ReadFieldResult::InputEmpty | ReadFieldResult::End => self.finished = true,
            }
        }
        Ok(())
    }

    /// Double the field buffer, up to one byte past the limit.
    fn grow<S: FieldSink>(&mut self, sink: &S) -> Result<(), ParseError> {
        let cap = self.max_field_len.saturating_add(1);
        if self.field.len() >= cap {
            return Err(self.too_long(sink));
        }
        let new_len = self.field.len().saturating_mul(2).clamp(1, cap);
        self.field.resize(new_len, 0);
        Ok(())
    }

    fn emit<S: FieldSink>(&mut self, record_end: bool, sink: &mut S) -> Result<(), ParseError> {
        if self.field_len > self.max_field_len {
            return Err(self.too_long(sink));
        }
        let result = sink.field(&self.field[..self.field_len]);
        self.field_len = 0;
        result?;
        if record_end {
            sink.record_end();
        }
        Ok(())
    }

    fn too_long<S: FieldSink>(&self, sink: &S) -> ParseError {
        let (row, column) = sink.location();
        ParseError::FieldTooLong {
            row,
            column,
            limit: self.max_field_len,
        }
    }
}
