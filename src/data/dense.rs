//! Dense row-major matrix.
//!
//! Storage is a single contiguous buffer of `num_rows * num_cols` elements,
//! row 0 first. Element `(i, j)` lives at `i * num_cols + j`.

use std::iter::{Copied, Skip, StepBy};
use std::slice::Iter;

/// Errors from constructing a [`DenseMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Either dimension was zero.
    #[error("matrix dimensions must be non-zero, got {rows}x{cols}")]
    Shape { rows: usize, cols: usize },

    /// Flat data length does not match `rows * cols`.
    #[error("data length {actual} does not match dimensions (expected {expected})")]
    Length { expected: usize, actual: usize },
}

/// Dense row-major matrix.
///
/// Zero-sized matrices are not representable: every constructor rejects a
/// zero row or column count with [`MatrixError::Shape`]. There is no resizing.
///
/// # Example
///
/// ```
/// use tabfeed::data::DenseMatrix;
///
/// let m = DenseMatrix::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
/// assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
/// assert_eq!(m.get(0, 2), Some(&3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T = f64> {
    data: Box<[T]>,
    num_rows: usize,
    num_cols: usize,
}

/// Iterator over one column of a row-major matrix.
pub type ColumnIter<'a, T> = Copied<StepBy<Skip<Iter<'a, T>>>>;

fn check_shape(num_rows: usize, num_cols: usize) -> Result<usize, MatrixError> {
    if num_rows == 0 || num_cols == 0 {
        return Err(MatrixError::Shape {
            rows: num_rows,
            cols: num_cols,
        });
    }
    Ok(num_rows * num_cols)
}

// =============================================================================
// Constructors
// =============================================================================

impl<T> DenseMatrix<T> {
    /// Create a matrix from a Vec in row-major order, taking ownership.
    pub fn from_vec(data: Vec<T>, num_rows: usize, num_cols: usize) -> Result<Self, MatrixError> {
        let expected = check_shape(num_rows, num_cols)?;
        if data.len() != expected {
            return Err(MatrixError::Length {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: data.into_boxed_slice(),
            num_rows,
            num_cols,
        })
    }
}

impl<T: Copy> DenseMatrix<T> {
    /// Create a matrix by copying a row-major slice.
    pub fn from_slice(data: &[T], num_rows: usize, num_cols: usize) -> Result<Self, MatrixError> {
        Self::from_vec(data.to_vec(), num_rows, num_cols)
    }

    /// Stack equally sized rows into a matrix.
    ///
    /// Fails with [`MatrixError::Shape`] when there are no rows or the rows
    /// are empty, and [`MatrixError::Length`] when a row has a different width
    /// than the first.
    pub fn from_rows<'r, I>(rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = &'r [T]>,
        T: 'r,
    {
        let mut data = Vec::new();
        let mut num_rows = 0;
        let mut num_cols = 0;
        for row in rows {
            if num_rows == 0 {
                num_cols = row.len();
            } else if row.len() != num_cols {
                return Err(MatrixError::Length {
                    expected: num_cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
            num_rows += 1;
        }
        Self::from_vec(data, num_rows, num_cols)
    }
}

impl<T: Copy + Default> DenseMatrix<T> {
    /// Matrix filled with `T::default()`.
    pub fn zeros(num_rows: usize, num_cols: usize) -> Result<Self, MatrixError> {
        let len = check_shape(num_rows, num_cols)?;
        Self::from_vec(vec![T::default(); len], num_rows, num_cols)
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl<T> DenseMatrix<T> {
    /// Underlying row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        Some(row * self.num_cols + col)
    }

    /// Get element at (row, col).
    ///
    /// Returns `None` if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.index(row, col).map(|idx| &self.data[idx])
    }

    /// Get mutable element at (row, col).
    ///
    /// Returns `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        let idx = self.index(row, col)?;
        Some(&mut self.data[idx])
    }

    /// Contiguous slice for one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    #[inline]
    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    #[inline]
    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.num_cols)
    }
}

impl<T: Copy> DenseMatrix<T> {
    /// Set element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        match self.get_mut(row, col) {
            Some(slot) => *slot = value,
            None => panic!(
                "index ({}, {}) out of bounds for {}x{} matrix",
                row, col, self.num_rows, self.num_cols
            ),
        }
    }

    /// Strided iterator over one column.
    #[inline]
    pub fn col_iter(&self, col: usize) -> ColumnIter<'_, T> {
        debug_assert!(col < self.num_cols, "column {} out of bounds", col);
        self.data.iter().skip(col).step_by(self.num_cols).copied()
    }

    /// Overwrite one row from `values`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows` or `values.len() != num_cols`.
    pub fn set_row(&mut self, row: usize, values: &[T]) {
        self.row_slice_mut(row).copy_from_slice(values);
    }

    /// Overwrite one column from `values`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= num_cols` or `values.len() != num_rows`.
    pub fn set_col(&mut self, col: usize, values: &[T]) {
        assert!(col < self.num_cols, "column {} out of bounds", col);
        assert_eq!(
            values.len(),
            self.num_rows,
            "column length {} does not match {} rows",
            values.len(),
            self.num_rows
        );
        for (row, &value) in values.iter().enumerate() {
            self.data[row * self.num_cols + col] = value;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
