//! Compressed sparse matrix (CSR or CSC) representation

use std::fmt;

use crate::error::{Axis, MalformedReason, Result, SparseError};
use crate::matrix::config::Direction;
use crate::matrix::triplet::{check_index, check_labels, check_len, TripletMatrix};
use num_traits::Num;

/// A sparse matrix in compressed axis-major format
///
/// The compressed format stores a sparse matrix using three arrays:
/// - start_ptr: Array of size major_len + 1 containing indices into minor_idx and values arrays
/// - minor_idx: Array of size nnz containing the minor-axis index of each stored entry
/// - values: Array of size nnz containing the stored values
///
/// With [`Direction::RowMajor`] the major axis is rows (CSR) and `minor_idx`
/// holds column indices; with [`Direction::ColumnMajor`] it is columns (CSC)
/// and `minor_idx` holds row indices.
///
/// Minor indices inside one slot are kept in whatever order produced them.
/// Only [`CompressedMatrix::transpose`] sorts them.
#[derive(Clone, PartialEq)]
pub struct CompressedMatrix<T> {
    n_rows: usize,
    n_cols: usize,

    /// Slot pointers (size: major_len + 1)
    /// start_ptr[i] is the index in minor_idx and values where slot i starts
    start_ptr: Vec<usize>,

    minor_idx: Vec<usize>,
    values: Vec<T>,

    row_labels: Option<Vec<String>>,
    col_labels: Option<Vec<String>>,

    direction: Direction,
}

impl<T> CompressedMatrix<T>
where
    T: Copy + Num,
{
    /// Creates a compressed matrix from raw arrays, checking every invariant
    ///
    /// This is the entry point for callers that already hold compressed data.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if `minor_idx` and `values` differ in length or a
    ///   label sequence disagrees with its extent
    /// - `MalformedCompressed` if `start_ptr` has the wrong length, does not
    ///   start at zero, decreases, does not end at nnz, or a minor index is
    ///   outside the minor axis
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        start_ptr: Vec<usize>,
        minor_idx: Vec<usize>,
        values: Vec<T>,
        n_rows: usize,
        n_cols: usize,
        row_labels: Option<Vec<String>>,
        col_labels: Option<Vec<String>>,
        direction: Direction,
    ) -> Result<Self> {
        check_len("values length", minor_idx.len(), values.len())?;
        check_labels(Axis::Row, row_labels.as_deref(), n_rows)?;
        check_labels(Axis::Column, col_labels.as_deref(), n_cols)?;

        let (major_len, minor_len) = match direction {
            Direction::RowMajor => (n_rows, n_cols),
            Direction::ColumnMajor => (n_cols, n_rows),
        };
        validate_structure(&start_ptr, &minor_idx, major_len, minor_len)
            .map_err(SparseError::MalformedCompressed)?;

        Ok(Self {
            n_rows,
            n_cols,
            start_ptr,
            minor_idx,
            values,
            row_labels,
            col_labels,
            direction,
        })
    }

    /// Assembles a matrix from arrays produced by one of the kernel transforms
    pub(crate) fn from_valid_parts(
        start_ptr: Vec<usize>,
        minor_idx: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
        labels: (Option<Vec<String>>, Option<Vec<String>>),
        direction: Direction,
    ) -> Self {
        let matrix = Self {
            n_rows: shape.0,
            n_cols: shape.1,
            start_ptr,
            minor_idx,
            values,
            row_labels: labels.0,
            col_labels: labels.1,
            direction,
        };
        debug_assert_eq!(
            validate_structure(
                &matrix.start_ptr,
                &matrix.minor_idx,
                matrix.major_len(),
                matrix.minor_len()
            ),
            Ok(())
        );
        matrix
    }

    /// Creates an empty matrix with the given dimensions
    ///
    /// # Panics
    ///
    /// Panics if the major extent is `usize::MAX`, since the pointer array
    /// would need one more slot than `usize` can count.
    pub fn zeros(n_rows: usize, n_cols: usize, direction: Direction) -> Self {
        let major_len = match direction {
            Direction::RowMajor => n_rows,
            Direction::ColumnMajor => n_cols,
        };
        let ptr_len = major_len.checked_add(1).unwrap_or_else(|| {
            panic!("major extent {} has no room for an end pointer", major_len)
        });

        Self {
            n_rows,
            n_cols,
            start_ptr: vec![0; ptr_len],
            minor_idx: Vec::new(),
            values: Vec::new(),
            row_labels: None,
            col_labels: None,
            direction,
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize, direction: Direction) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            start_ptr: (0..=n).collect(),
            minor_idx: (0..n).collect(),
            values: vec![T::one(); n],
            row_labels: None,
            col_labels: None,
            direction,
        }
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the stored entries of major slot i
    ///
    /// Each item is a tuple (minor_idx, value), in stored order.
    pub fn slot_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.major_len(), "Slot index out of bounds");

        let start = self.start_ptr[i];
        let end = self.start_ptr[i + 1];

        self.minor_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&minor, val)| (minor, val))
    }

    /// Number of stored entries in major slot i
    pub fn slot_len(&self, i: usize) -> usize {
        self.start_ptr[i + 1] - self.start_ptr[i]
    }

    /// Returns an iterator over `(row, col, value)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let row_major = self.is_row_major();
        (0..self.major_len()).flat_map(move |slot| {
            self.slot_iter(slot).map(move |(minor, val)| {
                if row_major {
                    (slot, minor, val)
                } else {
                    (minor, slot, val)
                }
            })
        })
    }

    /// Value at (row, col)
    ///
    /// Scans the major slot for the minor index and adds up every stored entry
    /// found there, so repeated coordinates kept by the build read back as
    /// their sum. Returns zero for coordinates with no stored entry.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.n_rows, "Row index {} out of bounds (n_rows = {})", row, self.n_rows);
        assert!(col < self.n_cols, "Column index {} out of bounds (n_cols = {})", col, self.n_cols);
        self.lookup(row, col)
    }

    /// Checked variant of [`CompressedMatrix::get`]
    pub fn try_get(&self, row: usize, col: usize) -> Result<T> {
        check_index(Axis::Row, row, self.n_rows)?;
        check_index(Axis::Column, col, self.n_cols)?;
        Ok(self.lookup(row, col))
    }

    fn lookup(&self, row: usize, col: usize) -> T {
        let (slot, minor) = match self.direction {
            Direction::RowMajor => (row, col),
            Direction::ColumnMajor => (col, row),
        };

        self.slot_iter(slot)
            .filter(|&(m, _)| m == minor)
            .fold(T::zero(), |acc, (_, &val)| acc + val)
    }

    /// Expands the matrix back into triplet form, in storage order
    pub fn to_triplet(&self) -> TripletMatrix<T> {
        let nnz = self.nnz();
        let mut row_idx = Vec::with_capacity(nnz);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for (row, col, &val) in self.iter() {
            row_idx.push(row);
            col_idx.push(col);
            values.push(val);
        }

        TripletMatrix::from_valid_parts(
            row_idx,
            col_idx,
            values,
            self.shape(),
            self.row_labels.clone(),
            self.col_labels.clone(),
        )
    }
}

impl<T> CompressedMatrix<T> {
    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Slot boundaries, one past the major extent long
    pub fn start_ptr(&self) -> &[usize] {
        &self.start_ptr
    }

    /// Minor index of every stored entry, slot by slot
    pub fn minor_idx(&self) -> &[usize] {
        &self.minor_idx
    }

    /// Stored values, parallel to `minor_idx`
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Row labels, if any
    pub fn row_labels(&self) -> Option<&[String]> {
        self.row_labels.as_deref()
    }

    /// Column labels, if any
    pub fn col_labels(&self) -> Option<&[String]> {
        self.col_labels.as_deref()
    }

    /// Major axis of the storage
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True for CSR, false for CSC
    pub fn is_row_major(&self) -> bool {
        self.direction.is_row_major()
    }

    /// Extent of the axis entries are grouped by
    pub fn major_len(&self) -> usize {
        self.axis_len(self.direction.major_axis())
    }

    /// Extent of the axis recorded per entry
    pub fn minor_len(&self) -> usize {
        self.axis_len(self.direction.minor_axis())
    }

    pub fn axis_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.n_rows,
            Axis::Column => self.n_cols,
        }
    }

    pub fn axis_labels(&self, axis: Axis) -> Option<&[String]> {
        match axis {
            Axis::Row => self.row_labels(),
            Axis::Column => self.col_labels(),
        }
    }

    /// Consumes the matrix, returning `(start_ptr, minor_idx, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.start_ptr, self.minor_idx, self.values)
    }

    /// Reinterprets the stored arrays along the other major axis
    ///
    /// Swaps extents and labels and flips the direction without touching the
    /// arrays. Applied to the output of a transpose this yields the original
    /// logical matrix stored in the opposite direction.
    pub(crate) fn swap_axes(self) -> Self {
        Self {
            n_rows: self.n_cols,
            n_cols: self.n_rows,
            row_labels: self.col_labels,
            col_labels: self.row_labels,
            direction: self.direction.flip(),
            ..self
        }
    }
}

fn validate_structure(
    start_ptr: &[usize],
    minor_idx: &[usize],
    major_len: usize,
    minor_len: usize,
) -> std::result::Result<(), MalformedReason> {
    if major_len.checked_add(1) != Some(start_ptr.len()) {
        return Err(MalformedReason::StartPtrLength {
            len: start_ptr.len(),
            expected: major_len.saturating_add(1),
        });
    }
    if start_ptr[0] != 0 {
        return Err(MalformedReason::StartPtrOrigin { first: start_ptr[0] });
    }
    for (idx, pair) in start_ptr.windows(2).enumerate() {
        if pair[0] > pair[1] {
            return Err(MalformedReason::StartPtrDecreasing {
                idx,
                curr: pair[0],
                next: pair[1],
            });
        }
    }
    let last = start_ptr[major_len];
    if last != minor_idx.len() {
        return Err(MalformedReason::StartPtrEnd {
            last,
            nnz: minor_idx.len(),
        });
    }
    if let Some((pos, &index)) = minor_idx.iter().enumerate().find(|&(_, &m)| m >= minor_len) {
        return Err(MalformedReason::MinorIndexOutOfBounds {
            pos,
            index,
            bound: minor_len,
        });
    }
    Ok(())
}

impl<T: fmt::Debug> fmt::Debug for CompressedMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, slot_name) = match self.direction {
            Direction::RowMajor => ("CSR", "row"),
            Direction::ColumnMajor => ("CSC", "col"),
        };

        writeln!(f, "CompressedMatrix ({}) {{", name)?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.values.len())?;

        // Print a sample of the matrix content
        let major_len = self.start_ptr.len() - 1;
        let max_slots_to_print = 5.min(major_len);

        if max_slots_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_slots_to_print {
                match self.axis_labels(self.direction.major_axis()) {
                    Some(labels) => write!(f, "    {} {} ({}): ", slot_name, i, labels[i])?,
                    None => write!(f, "    {} {}: ", slot_name, i)?,
                }
                let start = self.start_ptr[i];
                let end = self.start_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.minor_idx[j], self.values[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if major_len > max_slots_to_print {
                writeln!(f, "    ... ({} more {}s)", major_len - max_slots_to_print, slot_name)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //    [1 2 0]
    //    [0 3 0]
    //    [4 0 5]
    fn sample_csr() -> CompressedMatrix<i32> {
        CompressedMatrix::from_raw(
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap()
    }

    #[test]
    fn test_new_matrix() {
        let matrix = sample_csr();

        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), 3);
        assert_eq!(matrix.nnz(), 5);
        assert!(matrix.is_row_major());
        assert_eq!(matrix.major_len(), 3);
    }

    #[test]
    fn test_slot_iter() {
        let matrix = sample_csr();

        let row0: Vec<_> = matrix.slot_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);

        let row1: Vec<_> = matrix.slot_iter(1).collect();
        assert_eq!(row1, vec![(1, &3)]);

        let row2: Vec<_> = matrix.slot_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }

    #[test]
    fn test_get_column_major() {
        let matrix = CompressedMatrix::from_raw(
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
            3,
            3,
            None,
            None,
            Direction::ColumnMajor,
        )
        .unwrap();

        assert_eq!(matrix.get(0, 1), 2);
        assert_eq!(matrix.get(2, 0), 4);
        assert_eq!(matrix.get(1, 0), 0);
        assert_eq!(
            matrix.try_get(3, 0),
            Err(SparseError::OutOfRange {
                axis: Axis::Row,
                index: 3,
                bound: 3,
            })
        );
    }

    #[test]
    fn test_get_sums_repeated_coordinates() {
        let matrix = CompressedMatrix::from_raw(
            vec![0, 3, 3],
            vec![1, 0, 1],
            vec![1.5, 2.0, 0.5],
            2,
            2,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap();

        assert_eq!(matrix.get(0, 1), 2.0);
        assert_eq!(matrix.get(0, 0), 2.0);
    }

    #[test]
    fn test_identity() {
        let identity = CompressedMatrix::<i32>::identity(3, Direction::RowMajor);

        assert_eq!(identity.nnz(), 3);
        assert_eq!(identity.start_ptr(), &[0, 1, 2, 3]);
        assert_eq!(identity.minor_idx(), &[0, 1, 2]);
        assert_eq!(identity.values(), &[1, 1, 1]);
    }

    #[test]
    fn test_iter_and_to_triplet() {
        let matrix = sample_csr();
        let entries: Vec<_> = matrix.iter().map(|(r, c, &v)| (r, c, v)).collect();
        assert_eq!(entries, vec![(0, 0, 1), (0, 1, 2), (1, 1, 3), (2, 0, 4), (2, 2, 5)]);

        let triplet = matrix.to_triplet();
        assert_eq!(triplet.row_idx(), &[0, 0, 1, 2, 2]);
        assert_eq!(triplet.col_idx(), &[0, 1, 1, 0, 2]);
        assert_eq!(triplet.values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_invalid_start_ptr_length() {
        let err = CompressedMatrix::from_raw(
            vec![0, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::MalformedCompressed(MalformedReason::StartPtrLength {
                len: 3,
                expected: 4,
            })
        );
    }

    #[test]
    fn test_decreasing_start_ptr() {
        let err = CompressedMatrix::from_raw(
            vec![0, 3, 2, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::MalformedCompressed(MalformedReason::StartPtrDecreasing {
                idx: 1,
                curr: 3,
                next: 2,
            })
        );
    }

    #[test]
    fn test_minor_index_out_of_bounds() {
        let err = CompressedMatrix::from_raw(
            vec![0, 1, 2],
            vec![0, 3],
            vec![1, 2],
            2,
            2,
            None,
            None,
            Direction::ColumnMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::MalformedCompressed(MalformedReason::MinorIndexOutOfBounds {
                pos: 1,
                index: 3,
                bound: 2,
            })
        );
    }

    #[test]
    fn test_start_ptr_not_at_zero() {
        let err = CompressedMatrix::from_raw(
            vec![1, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::MalformedCompressed(MalformedReason::StartPtrOrigin { first: 1 })
        );
    }

    #[test]
    fn test_start_ptr_end_not_nnz() {
        let err = CompressedMatrix::from_raw(
            vec![0, 2, 3, 4],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::MalformedCompressed(MalformedReason::StartPtrEnd { last: 4, nnz: 5 })
        );
    }

    #[test]
    fn test_start_ptr_length_with_huge_extent() {
        // usize::MAX rows cannot have a usize::MAX + 1 pointer array
        let err = CompressedMatrix::<f64>::from_raw(
            vec![],
            vec![],
            vec![],
            usize::MAX,
            1,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::MalformedCompressed(MalformedReason::StartPtrLength {
                len: 0,
                expected: usize::MAX,
            })
        );
    }

    #[test]
    fn test_label_length_mismatch() {
        let err = CompressedMatrix::from_raw(
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            Some(vec!["a".to_string(), "b".to_string()]),
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::DimensionMismatch {
                what: "row labels",
                expected: 3,
                found: 2,
            }
        );

        let err = CompressedMatrix::from_raw(
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
            3,
            3,
            None,
            Some(vec!["x".to_string(); 4]),
            Direction::RowMajor,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SparseError::DimensionMismatch {
                what: "column labels",
                expected: 3,
                found: 4,
            }
        );
    }

    #[test]
    fn test_zeros() {
        let csr = CompressedMatrix::<f64>::zeros(3, 5, Direction::RowMajor);
        assert_eq!(csr.shape(), (3, 5));
        assert_eq!(csr.nnz(), 0);
        assert_eq!(csr.start_ptr(), &[0, 0, 0, 0]);
        assert_eq!(csr.get(2, 4), 0.0);

        let csc = CompressedMatrix::<f64>::zeros(3, 5, Direction::ColumnMajor);
        assert_eq!(csc.shape(), (3, 5));
        assert_eq!(csc.nnz(), 0);
        assert!(!csc.is_row_major());
        assert_eq!(csc.start_ptr(), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(csc.major_len(), 5);
        assert_eq!(csc.slot_iter(4).count(), 0);
    }

    #[test]
    fn test_inconsistent_lengths() {
        let err = CompressedMatrix::from_raw(
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4], // Missing last element
            3,
            3,
            None,
            None,
            Direction::RowMajor,
        )
        .unwrap_err();

        assert!(matches!(err, SparseError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_debug_output() {
        let output = format!("{:?}", sample_csr());
        assert!(output.starts_with("CompressedMatrix (CSR) {"));
        assert!(output.contains("dimensions: 3 × 3"));
        assert!(output.contains("row 1: (1, 3)"));
    }
}
