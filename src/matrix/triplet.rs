//! Triplet (coordinate) sparse matrix representation

use crate::error::{Axis, Result, SparseError};
use num_traits::Num;

/// A sparse matrix stored as an unordered list of (row, column, value) entries
///
/// The triplet form is the natural input format: entries can be listed in any
/// order and the same coordinate may appear more than once. It is converted to
/// the compressed form with [`crate::build`].
///
/// Row and column labels are optional. When present they must have exactly
/// `n_rows` and `n_cols` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TripletMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    row_idx: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
    row_labels: Option<Vec<String>>,
    col_labels: Option<Vec<String>>,
}

impl<T> TripletMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an unlabeled triplet matrix
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the three sequences differ in length
    /// - `OutOfRange` if a coordinate is outside `n_rows` × `n_cols`
    pub fn new(
        row_idx: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
        n_rows: usize,
        n_cols: usize,
    ) -> Result<Self> {
        Self::from_parts(row_idx, col_idx, values, n_rows, n_cols, None, None)
    }

    /// Creates a triplet matrix with explicit extents and optional axis labels
    ///
    /// Extents are never derived from the labels: a label sequence whose length
    /// differs from its extent is rejected with `DimensionMismatch`.
    pub fn from_parts(
        row_idx: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
        n_rows: usize,
        n_cols: usize,
        row_labels: Option<Vec<String>>,
        col_labels: Option<Vec<String>>,
    ) -> Result<Self> {
        check_len("col_idx length", row_idx.len(), col_idx.len())?;
        check_len("values length", row_idx.len(), values.len())?;
        check_labels(Axis::Row, row_labels.as_deref(), n_rows)?;
        check_labels(Axis::Column, col_labels.as_deref(), n_cols)?;

        for (&row, &col) in row_idx.iter().zip(&col_idx) {
            check_index(Axis::Row, row, n_rows)?;
            check_index(Axis::Column, col, n_cols)?;
        }

        Ok(Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
            row_labels,
            col_labels,
        })
    }

    /// Assembles a matrix whose invariants the caller already upholds
    pub(crate) fn from_valid_parts(
        row_idx: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
        row_labels: Option<Vec<String>>,
        col_labels: Option<Vec<String>>,
    ) -> Self {
        debug_assert_eq!(row_idx.len(), values.len());
        debug_assert_eq!(col_idx.len(), values.len());
        Self {
            n_rows: shape.0,
            n_cols: shape.1,
            row_idx,
            col_idx,
            values,
            row_labels,
            col_labels,
        }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_idx: Vec::new(),
            col_idx: Vec::new(),
            values: Vec::new(),
            row_labels: None,
            col_labels: None,
        }
    }

    /// Returns the number of stored entries, counting repeated coordinates
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over `(row, col, value)` in stored order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.row_idx
            .iter()
            .zip(&self.col_idx)
            .zip(&self.values)
            .map(|((&row, &col), val)| (row, col, val))
    }
}

impl<T> TripletMatrix<T> {
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

    /// Row of each entry
    pub fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    /// Column of each entry
    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    /// Entry values in insertion order
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

    /// Coordinates along `axis`
    pub(crate) fn axis_idx(&self, axis: Axis) -> &[usize] {
        match axis {
            Axis::Row => &self.row_idx,
            Axis::Column => &self.col_idx,
        }
    }
}

/// Incrementally assembles a [`TripletMatrix`] one entry at a time
///
/// ```
/// use smatrix::TripletBuilder;
///
/// let mut builder = TripletBuilder::new(2, 3);
/// builder.push(0, 2, 1.5).unwrap();
/// builder.push(1, 0, -2.0).unwrap();
/// let triplet = builder.finish().unwrap();
/// assert_eq!(triplet.nnz(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TripletBuilder<T> {
    n_rows: usize,
    n_cols: usize,
    row_idx: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
    row_labels: Option<Vec<String>>,
    col_labels: Option<Vec<String>>,
}

impl<T> TripletBuilder<T>
where
    T: Copy + Num,
{
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self::with_capacity(n_rows, n_cols, 0)
    }

    /// Creates a builder with room for `nnz` entries
    pub fn with_capacity(n_rows: usize, n_cols: usize, nnz: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_idx: Vec::with_capacity(nnz),
            col_idx: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
            row_labels: None,
            col_labels: None,
        }
    }

    /// Attaches axis labels; their lengths are checked by [`TripletBuilder::finish`]
    pub fn with_labels(mut self, row_labels: Vec<String>, col_labels: Vec<String>) -> Self {
        self.row_labels = Some(row_labels);
        self.col_labels = Some(col_labels);
        self
    }

    /// Appends one entry, rejecting it if the coordinate is outside the extents
    pub fn push(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check_index(Axis::Row, row, self.n_rows)?;
        check_index(Axis::Column, col, self.n_cols)?;

        self.row_idx.push(row);
        self.col_idx.push(col);
        self.values.push(value);
        Ok(())
    }

    /// Number of entries pushed so far
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validates the labels and produces the immutable matrix
    pub fn finish(self) -> Result<TripletMatrix<T>> {
        TripletMatrix::from_parts(
            self.row_idx,
            self.col_idx,
            self.values,
            self.n_rows,
            self.n_cols,
            self.row_labels,
            self.col_labels,
        )
    }
}

pub(crate) fn check_index(axis: Axis, index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(SparseError::OutOfRange { axis, index, bound })
    }
}

pub(crate) fn check_labels(axis: Axis, labels: Option<&[String]>, extent: usize) -> Result<()> {
    match labels {
        Some(labels) if labels.len() != extent => Err(SparseError::DimensionMismatch {
            what: match axis {
                Axis::Row => "row labels",
                Axis::Column => "column labels",
            },
            expected: extent,
            found: labels.len(),
        }),
        _ => Ok(()),
    }
}

pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SparseError::DimensionMismatch {
            what,
            expected,
            found,
        })
    }
}
