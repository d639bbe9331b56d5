//! Fixed-size batches of records as dense matrices.

use crate::data::{DenseMatrix, Record};

use super::error::LoadError;
use super::loader::StreamingLoader;

/// Features and labels for a run of consecutive records.
///
/// `features` has one row per record; `labels[i]` belongs to row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    features: DenseMatrix<f64>,
    labels: Vec<f64>,
}

impl Batch {
    /// Copy finalized records into a batch.
    ///
    /// # Errors
    ///
    /// [`LoadError::Matrix`] if `records` is empty or the records differ in
    /// feature count.
    pub fn from_records(records: &[Record]) -> Result<Self, LoadError> {
        let features = DenseMatrix::from_rows(records.iter().map(Record::features))?;
        let labels = records.iter().map(Record::label).collect();
        Ok(Self { features, labels })
    }

    #[inline]
    pub fn features(&self) -> &DenseMatrix<f64> {
        &self.features
    }

    #[inline]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; batches hold at least one record.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn into_parts(self) -> (DenseMatrix<f64>, Vec<f64>) {
        (self.features, self.labels)
    }
}

/// Iterator of [`Batch`]es pulled from a [`StreamingLoader`].
///
/// Created by [`StreamingLoader::batches`]. Every batch except possibly the
/// last holds exactly `batch_size` records. If the loader records an error,
/// the records completed before it are yielded first, then the error, then
/// iteration ends.
///
/// Iteration stops without filling once the loader [is at
/// end](StreamingLoader::is_at_end), so a memory region whose record count
/// is a multiple of `batch_size` ends cleanly rather than with
/// [`LoadError::Range`].
pub struct RecordBatches<'l, 'a> {
    loader: &'l mut StreamingLoader<'a>,
    buffer: Vec<Record>,
}

impl<'l, 'a> RecordBatches<'l, 'a> {
    pub(crate) fn new(loader: &'l mut StreamingLoader<'a>, buffer: Vec<Record>) -> Self {
        Self { loader, buffer }
    }
}

impl Iterator for RecordBatches<'_, '_> {
    type Item = Result<Batch, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.loader.take_error() {
            return Some(Err(err));
        }
        if self.loader.is_at_end() || self.loader.is_failed() {
            return None;
        }

        let n = self.loader.fill(&mut self.buffer);
        if n == 0 {
            return self.loader.take_error().map(Err);
        }
        Some(Batch::from_records(&self.buffer[..n]))
    }
}
