//! ndarray integration for [`DenseMatrix`].
//!
//! A `DenseMatrix` is row-major (C-order), so views are zero-copy with shape
//! `[num_rows, num_cols]`: rows are samples, columns are features.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::dense::{DenseMatrix, MatrixError};

/// Semantic axis constants.
pub mod axis {
    use ndarray::Axis;

    pub const ROWS: Axis = Axis(0);
    pub const COLS: Axis = Axis(1);
}

impl<T> DenseMatrix<T> {
    /// Zero-copy ndarray view of shape `[num_rows, num_cols]`.
    pub fn view(&self) -> ArrayView2<'_, T> {
        // Shape always matches the buffer length by construction.
        ArrayView2::from_shape((self.num_rows(), self.num_cols()), self.as_slice())
            .unwrap_or_else(|_| unreachable!("dense matrix shape is validated at construction"))
    }

    /// Zero-copy mutable ndarray view.
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        let shape = (self.num_rows(), self.num_cols());
        ArrayViewMut2::from_shape(shape, self.as_mut_slice())
            .unwrap_or_else(|_| unreachable!("dense matrix shape is validated at construction"))
    }
}

impl<T: Clone> From<&DenseMatrix<T>> for Array2<T> {
    fn from(matrix: &DenseMatrix<T>) -> Self {
        matrix.view().to_owned()
    }
}

impl<T: Clone> TryFrom<ArrayView2<'_, T>> for DenseMatrix<T> {
    type Error = MatrixError;

    /// Copy an array of any memory order into a row-major matrix.
    fn try_from(array: ArrayView2<'_, T>) -> Result<Self, Self::Error> {
        let (rows, cols) = array.dim();
        DenseMatrix::from_vec(array.iter().cloned().collect(), rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn view_matches_layout() {
        let matrix = DenseMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let view = matrix.view();

        assert_eq!(view.dim(), (2, 3));
        assert_eq!(view[[1, 0]], 4.0);
        assert_eq!(view.len_of(axis::COLS), 3);
        assert_eq!(view.len_of(axis::ROWS), 2);
    }

    #[test]
    fn view_mut_writes_through() {
        let mut matrix = DenseMatrix::<f64>::zeros(2, 2).unwrap();
        matrix.view_mut()[[0, 1]] = 3.0;
        assert_eq!(matrix.get(0, 1), Some(&3.0));
    }

    #[test]
    fn convert_from_fortran_order() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let transposed = a.t();
        let matrix = DenseMatrix::try_from(transposed).unwrap();
        assert_eq!(matrix.as_slice(), &[1.0, 3.0, 2.0, 4.0]);

        let back: Array2<f64> = (&matrix).into();
        assert_eq!(back, transposed.to_owned());
    }

    #[test]
    fn empty_array_rejected() {
        let a = Array2::<f64>::zeros((0, 3));
        assert!(matches!(
            DenseMatrix::try_from(a.view()),
            Err(MatrixError::Shape { rows: 0, cols: 3 })
        ));
    }
}
