//! A single labeled observation.

use std::fmt;

/// One labeled feature vector produced by the loader.
///
/// The feature capacity is fixed when the record is created and must match the
/// number of feature columns the loader was configured with. Records are owned
/// by the caller; the loader only overwrites slots it is handed.
///
/// Columns that a row did not provide are left as `f64::NAN`.
///
/// # Example
///
/// ```
/// use tabfeed::data::Record;
///
/// let mut record = Record::new(2);
/// assert_eq!(record.capacity(), 2);
/// assert_eq!(record.feature_count(), 0);
///
/// record.set_label(1.0);
/// record.features_mut().copy_from_slice(&[0.5, 0.25]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    label: f64,
    features: Box<[f64]>,
    feature_count: usize,
}

impl Record {
    /// Create an empty record with room for `dimension` features.
    pub fn new(dimension: usize) -> Self {
        Self {
            label: f64::NAN,
            features: vec![f64::NAN; dimension].into_boxed_slice(),
            feature_count: 0,
        }
    }

    /// Label (target) value.
    #[inline]
    pub fn label(&self) -> f64 {
        self.label
    }

    #[inline]
    pub fn set_label(&mut self, label: f64) {
        self.label = label;
    }

    /// Feature values of a finalized record.
    ///
    /// Empty until the loader has finalized the record.
    #[inline]
    pub fn features(&self) -> &[f64] {
        &self.features[..self.feature_count]
    }

    /// All feature slots regardless of finalization.
    #[inline]
    pub fn features_mut(&mut self) -> &mut [f64] {
        &mut self.features
    }

    /// Number of features written when the record was finalized.
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Fixed feature capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub(crate) fn set_feature(&mut self, index: usize, value: f64) {
        self.features[index] = value;
    }

    /// Mark the record complete with all feature slots populated.
    #[inline]
    pub(crate) fn finalize(&mut self) {
        self.feature_count = self.features.len();
    }

    /// Reset to missing values before the slot is reused.
    pub(crate) fn clear(&mut self) {
        self.label = f64::NAN;
        self.features.fill(f64::NAN);
        self.feature_count = 0;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y: {}, x:", self.label)?;
        for value in self.features() {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_unfinalized() {
        let record = Record::new(3);
        assert_eq!(record.capacity(), 3);
        assert_eq!(record.feature_count(), 0);
        assert!(record.features().is_empty());
        assert!(record.label().is_nan());
    }

    #[test]
    fn finalize_exposes_all_features() {
        let mut record = Record::new(2);
        record.set_label(9.0);
        record.set_feature(0, 1.5);
        record.set_feature(1, 2.5);
        record.finalize();

        assert_eq!(record.feature_count(), 2);
        assert_eq!(record.features(), &[1.5, 2.5]);
    }

    #[test]
    fn clear_resets_to_missing() {
        let mut record = Record::new(2);
        record.set_label(1.0);
        record.set_feature(1, 4.0);
        record.finalize();

        record.clear();
        assert_eq!(record.feature_count(), 0);
        assert!(record.label().is_nan());
        assert!(record.features_mut().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn display_lists_label_then_features() {
        let mut record = Record::new(2);
        record.set_label(9.0);
        record.set_feature(0, 1.5);
        record.set_feature(1, 2.5);
        record.finalize();

        assert_eq!(record.to_string(), "y: 9, x: 1.5 2.5");
    }
}
