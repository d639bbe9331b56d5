//! Data storage and loading.
//!
//! # Types
//!
//! - [`Record`]: one label plus a fixed-width feature vector
//! - [`DenseMatrix`]: row-major numeric storage
//! - [`io`]: the streaming loader that produces records
//!
//! # Missing Values
//!
//! Missing values are represented as `f64::NAN`: a mapped column that a row
//! leaves empty or does not reach is `NaN` in the resulting record.

mod dense;
pub mod io;
mod ndarray;
mod record;

pub use self::ndarray::axis;
pub use dense::{ColumnIter, DenseMatrix, MatrixError};
pub use record::Record;
