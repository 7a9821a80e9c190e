//! # smatrix: sparse matrix representations and structural transforms
//!
//! This library holds sparse matrices in two forms and converts between them:
//!
//! - **Triplet** ([`TripletMatrix`]): an unordered list of (row, column, value)
//!   entries, the natural form for assembling a matrix.
//! - **Compressed** ([`CompressedMatrix`]): entries grouped by a major axis and
//!   addressed through a start-pointer array, either row-major (CSR) or
//!   column-major (CSC).
//!
//! ## Algorithm Components
//!
//! 1. **Build**: counting pass, cumulative sum, stable fill pass. Linear in
//!    nnz plus the major extent.
//!
//! 2. **Transpose**: counting sort on the minor indices. Sorts the minor
//!    indices of every slot as a side effect.
//!
//! 3. **Direction switch**: one transpose followed by relabeling the axes,
//!    turning CSR storage into CSC storage of the same matrix and back.
//!
//! 4. **Selection**: gather of rows or columns by an explicit index list, with
//!    repeats and reordering allowed.
//!
//! ## Usage
//!
//! ```
//! use smatrix::{build, Direction, TripletMatrix};
//!
//! let triplet = TripletMatrix::new(
//!     vec![1, 1, 2, 3, 3],
//!     vec![1, 3, 1, 1, 3],
//!     vec![1.0, 1.0, 2.0, 3.0, 2.0],
//!     4,
//!     4,
//! )
//! .unwrap();
//!
//! let csr = build(&triplet, Direction::RowMajor);
//! assert_eq!(csr.start_ptr(), &[0, 0, 2, 3, 5]);
//! assert_eq!(csr.get(3, 1), 3.0);
//!
//! let picked = csr.select_rows(&[3, 2, 0]).unwrap();
//! assert_eq!(picked.shape(), (3, 4));
//!
//! let csc = csr.to_csc();
//! assert_eq!(csc.get(3, 3), 2.0);
//! ```

pub mod error;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{Axis, MalformedReason, Result, SparseError};
pub use matrix::{build, build_with, select_columns, select_rows, switch_direction, transpose};
pub use matrix::{BuildConfig, CompressedMatrix, Direction, DuplicatePolicy};
pub use matrix::{TripletBuilder, TripletMatrix};
pub use utils::{cumsum, from_sprs, to_dense, to_sprs};

/// Version information for the smatrix library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
