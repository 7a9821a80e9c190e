//! Utilities for converting between our matrix format and external libraries

use crate::error::Result;
use crate::matrix::conversion::sum_duplicates;
use crate::matrix::{CompressedMatrix, Direction};
use ndarray::Array2;
use num_traits::Num;
use sprs::CsMat;

/// Converts a compressed matrix to sprs `CsMat`, keeping its direction
///
/// Labels are dropped. sprs requires sorted, duplicate-free minor indices in
/// every slot, so a matrix that does not already satisfy that is sorted by a
/// double transpose and its repeated coordinates are summed.
pub fn to_sprs<T>(matrix: &CompressedMatrix<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let sorted;
    let matrix = if has_sorted_slots(matrix) {
        matrix
    } else {
        sorted = sum_duplicates(matrix.transpose().transpose());
        &sorted
    };

    let shape = matrix.shape();
    let start_ptr = matrix.start_ptr().to_vec();
    let minor_idx = matrix.minor_idx().to_vec();
    let values = matrix.values().to_vec();

    match matrix.direction() {
        Direction::RowMajor => CsMat::new(shape, start_ptr, minor_idx, values),
        Direction::ColumnMajor => CsMat::new_csc(shape, start_ptr, minor_idx, values),
    }
}

/// Converts a sprs `CsMat` into an unlabeled compressed matrix
///
/// The storage direction of the sprs matrix is kept.
pub fn from_sprs<T>(matrix: CsMat<T>) -> Result<CompressedMatrix<T>>
where
    T: Copy + Num + Default,
{
    let (n_rows, n_cols) = matrix.shape();
    let direction = if matrix.is_csr() {
        Direction::RowMajor
    } else {
        Direction::ColumnMajor
    };
    let (indptr, indices, data) = matrix.into_raw_storage();

    CompressedMatrix::from_raw(indptr, indices, data, n_rows, n_cols, None, None, direction)
}

/// Materializes the matrix as a dense array; repeated coordinates are added
pub fn to_dense<T>(matrix: &CompressedMatrix<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::zeros(matrix.shape());
    for (row, col, &val) in matrix.iter() {
        dense[[row, col]] = dense[[row, col]] + val;
    }
    dense
}

fn has_sorted_slots<T>(matrix: &CompressedMatrix<T>) -> bool {
    matrix
        .start_ptr()
        .windows(2)
        .all(|w| matrix.minor_idx()[w[0]..w[1]].windows(2).all(|p| p[0] < p[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{build, TripletMatrix};

    fn unsorted_csr() -> CompressedMatrix<f64> {
        let triplet = TripletMatrix::new(
            vec![0, 0, 1, 2, 2],
            vec![2, 0, 1, 2, 0],
            vec![2.0, 1.0, 3.0, 5.0, 4.0],
            3,
            3,
        )
        .unwrap();
        build(&triplet, Direction::RowMajor)
    }

    #[test]
    fn test_csr_roundtrip() {
        let original = unsorted_csr();
        assert!(!has_sorted_slots(&original));

        let sprs_mat = to_sprs(&original);
        assert!(sprs_mat.is_csr());
        assert_eq!(sprs_mat.get(0, 2), Some(&2.0));
        assert_eq!(sprs_mat.get(1, 0), None);

        let roundtrip = from_sprs(sprs_mat).unwrap();
        assert_eq!(roundtrip.shape(), original.shape());
        assert_eq!(roundtrip.start_ptr(), original.start_ptr());
        for (row, col, &val) in original.iter() {
            assert_eq!(roundtrip.get(row, col), val);
        }
    }

    #[test]
    fn test_csc_roundtrip() {
        let csc = unsorted_csr().to_csc();
        let sprs_mat = to_sprs(&csc);
        assert!(sprs_mat.is_csc());

        let roundtrip = from_sprs(sprs_mat).unwrap();
        assert_eq!(roundtrip, csc);
    }

    #[test]
    fn test_duplicates_summed_for_sprs() {
        let triplet =
            TripletMatrix::new(vec![1, 0, 1], vec![0, 1, 0], vec![1.0, 2.0, 3.0], 2, 2).unwrap();
        let sprs_mat = to_sprs(&build(&triplet, Direction::RowMajor));

        assert_eq!(sprs_mat.nnz(), 2);
        assert_eq!(sprs_mat.get(1, 0), Some(&4.0));
    }

    #[test]
    fn test_to_dense() {
        let dense = to_dense(&unsorted_csr());
        assert_eq!(dense.shape(), &[3, 3]);
        assert_eq!(dense[[0, 0]], 1.0);
        assert_eq!(dense[[0, 2]], 2.0);
        assert_eq!(dense[[2, 0]], 4.0);
        assert_eq!(dense[[1, 0]], 0.0);
    }
}
