//! Row and column gather over compressed matrices

use crate::error::{Axis, Result};
use crate::matrix::config::Direction;
use crate::matrix::triplet::check_index;
use crate::matrix::CompressedMatrix;
use crate::utils::cumsum;
use num_traits::Num;
use tracing::debug;

impl<T: Copy + Num> CompressedMatrix<T> {
    /// Gathers the given rows, in request order
    ///
    /// Indices may repeat and appear in any order; each occurrence copies the
    /// row. The result is row-major; a column-major matrix is converted first.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for the first index not below `n_rows`.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        self.select(Axis::Row, indices)
    }

    /// Gathers the given columns, in request order; the result is column-major
    pub fn select_columns(&self, indices: &[usize]) -> Result<Self> {
        self.select(Axis::Column, indices)
    }

    /// Gathers major slots of `axis` after moving that axis to the major position
    pub fn select(&self, axis: Axis, indices: &[usize]) -> Result<Self> {
        let bound = self.axis_len(axis);
        for &idx in indices {
            check_index(axis, idx, bound)?;
        }

        let direction = Direction::with_major(axis);
        if self.direction() == direction {
            Ok(gather(self, indices))
        } else {
            Ok(gather(&self.to_direction(direction), indices))
        }
    }
}

/// Copies the requested major slots of `src` verbatim into a new matrix
///
/// Indices must already be checked against the major extent.
fn gather<T: Copy + Num>(src: &CompressedMatrix<T>, indices: &[usize]) -> CompressedMatrix<T> {
    let src_ptr = src.start_ptr();

    let mut counts: Vec<usize> = indices
        .iter()
        .map(|&r| src_ptr[r + 1] - src_ptr[r])
        .collect();
    let mut start_ptr = vec![0; indices.len() + 1];
    let nnz = cumsum(&mut start_ptr, &mut counts);

    let mut minor_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    for &r in indices {
        let range = src_ptr[r]..src_ptr[r + 1];
        minor_idx.extend_from_slice(&src.minor_idx()[range.clone()]);
        values.extend_from_slice(&src.values()[range]);
    }

    let major = src.direction().major_axis();
    let labels = src
        .axis_labels(major)
        .map(|labels| indices.iter().map(|&r| labels[r].clone()).collect::<Vec<_>>());
    let other = src.axis_labels(major.other()).map(<[String]>::to_vec);

    let (shape, labels) = match major {
        Axis::Row => ((indices.len(), src.n_cols()), (labels, other)),
        Axis::Column => ((src.n_rows(), indices.len()), (other, labels)),
    };

    debug!(
        axis = %major,
        selected = indices.len(),
        nnz,
        "gathered compressed slots"
    );

    CompressedMatrix::from_valid_parts(start_ptr, minor_idx, values, shape, labels, src.direction())
}

/// Gathers rows of `matrix`; see [`CompressedMatrix::select_rows`]
pub fn select_rows<T: Copy + Num>(
    matrix: &CompressedMatrix<T>,
    indices: &[usize],
) -> Result<CompressedMatrix<T>> {
    matrix.select_rows(indices)
}

/// Gathers columns of `matrix`; see [`CompressedMatrix::select_columns`]
pub fn select_columns<T: Copy + Num>(
    matrix: &CompressedMatrix<T>,
    indices: &[usize],
) -> Result<CompressedMatrix<T>> {
    matrix.select_columns(indices)
}
