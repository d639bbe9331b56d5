//! Testing utilities for tabfeed.
//!
//! Assertion helpers and CSV fixture generators shared by unit tests,
//! integration tests and benchmarks.
//!
//! ```
//! use tabfeed::assert_approx_eq;
//! use tabfeed::testing::{generate_csv, CsvFixture};
//!
//! let CsvFixture { text, rows } = generate_csv(4, 2, true);
//! assert!(text.starts_with("x0,x1,y\n"));
//! assert_eq!(rows.len(), 4);
//! assert_approx_eq!(rows[0].0, 0.5, 1e-12);
//! ```

use crate::data::Record;

/// Default tolerance for floating point comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use tabfeed::assert_approx_eq;
/// assert_approx_eq!(1.0, 1.0001, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// `(label, features)` of one expected record.
pub type ExpectedRow = (f64, Vec<f64>);

/// Generated CSV text with the records it should load into.
#[derive(Debug, Clone)]
pub struct CsvFixture {
    pub text: String,
    pub rows: Vec<ExpectedRow>,
}

impl CsvFixture {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Deterministic CSV with `n_features` feature columns followed by a label.
///
/// Values are exact in binary so parsed records compare equal bit for bit.
/// Feature `j` of row `i` is `i + j / 4`; the label is `i + 0.5`.
pub fn generate_csv(n_rows: usize, n_features: usize, header: bool) -> CsvFixture {
    let mut text = String::new();
    if header {
        for j in 0..n_features {
            text.push_str(&format!("x{},", j));
        }
        text.push_str("y\n");
    }

    let mut rows = Vec::with_capacity(n_rows);
    for i in 0..n_rows {
        let features: Vec<f64> = (0..n_features).map(|j| i as f64 + j as f64 * 0.25).collect();
        let label = i as f64 + 0.5;
        for x in &features {
            text.push_str(&format!("{},", x));
        }
        text.push_str(&format!("{}\n", label));
        rows.push((label, features));
    }
    CsvFixture { text, rows }
}

/// Compare two floats, treating two NaNs as equal.
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Assert that rows match exactly (NaN equals NaN).
///
/// # Panics
///
/// Panics on a length mismatch or the first differing row.
pub fn assert_rows_eq(actual: &[ExpectedRow], expected: &[ExpectedRow], context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: got {} records, expected {}",
        actual.len(),
        expected.len()
    );
    for (i, ((label, features), (want_label, want_features))) in actual.iter().zip(expected).enumerate() {
        let matches = same_value(*label, *want_label)
            && features.len() == want_features.len()
            && features.iter().zip(want_features).all(|(&a, &b)| same_value(a, b));
        assert!(
            matches,
            "{context}[{i}]: got y: {label}, x: {features:?}, expected y: {want_label}, x: {want_features:?}"
        );
    }
}

/// Assert that finalized records match expected rows exactly.
pub fn assert_records_eq(actual: &[Record], expected: &[ExpectedRow], context: &str) {
    assert_rows_eq(&to_rows(actual), expected, context);
}

/// Snapshot records as owned rows.
pub fn to_rows(records: &[Record]) -> Vec<ExpectedRow> {
    records
        .iter()
        .map(|r| (r.label(), r.features().to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_macro() {
        assert_approx_eq!(1.0, 1.0001, 0.001);
        assert_approx_eq!(-1.5, -1.5001, 0.001, "value {}", 3);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn approx_eq_fails() {
        assert_approx_eq!(1.0, 2.0, 0.1);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn approx_eq_rejects_nan() {
        assert_approx_eq!(f64::NAN, 1.0, 0.1);
    }

    #[test]
    fn generated_csv_layout() {
        let fixture = generate_csv(2, 3, false);
        assert_eq!(fixture.text, "0,0.25,0.5,0.5\n1,1.25,1.5,1.5\n");
        assert_eq!(fixture.rows[1], (1.5, vec![1.0, 1.25, 1.5]));
    }

    #[test]
    fn records_eq_with_nan() {
        let mut record = Record::new(2);
        record.set_label(1.0);
        record.set_feature(0, 2.0);
        record.finalize();
        assert_records_eq(&[record], &[(1.0, vec![2.0, f64::NAN])], "nan");
    }
}
