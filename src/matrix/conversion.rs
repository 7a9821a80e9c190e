//! Conversion functions between matrix formats

use crate::error::{Result, SparseError};
use crate::matrix::config::{BuildConfig, Direction, DuplicatePolicy};
use crate::matrix::{CompressedMatrix, TripletMatrix};
use crate::utils::cumsum;
use num_traits::Num;
use tracing::{debug, trace};

impl<T: Copy + Num> CompressedMatrix<T> {
    /// Compresses a triplet matrix into CSR format
    ///
    /// Entries keep their source order within each row and repeated
    /// coordinates are all stored. Call [`CompressedMatrix::to_csc`] or use
    /// [`CompressedMatrix::from_triplet_with`] for CSC.
    pub fn from_triplet(triplet: &TripletMatrix<T>) -> Self {
        compress(triplet, Direction::RowMajor)
    }

    /// Compresses a triplet matrix with an explicit direction and duplicate policy
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` under [`DuplicatePolicy::Reject`] when two
    /// entries share a coordinate.
    pub fn from_triplet_with(triplet: &TripletMatrix<T>, config: &BuildConfig) -> Result<Self> {
        let matrix = compress(triplet, config.direction);

        match config.duplicates {
            DuplicatePolicy::Keep => Ok(matrix),
            DuplicatePolicy::Sum => Ok(sum_duplicates(matrix)),
            DuplicatePolicy::Reject => {
                reject_duplicates(&matrix)?;
                Ok(matrix)
            }
        }
    }

    /// Returns the transposed matrix
    ///
    /// The result has swapped extents and labels but keeps the direction
    /// flag, so the old major axis becomes the new minor axis. The counting
    /// sort also leaves the minor indices of every slot in ascending order.
    pub fn transpose(&self) -> Self {
        let nnz = self.nnz();
        let src_ptr = self.start_ptr();
        let src_idx = self.minor_idx();
        let src_values = self.values();

        // Slot counts of the result are occurrence counts of each minor index
        let mut w = vec![0; self.minor_len()];
        for &minor in src_idx {
            w[minor] += 1;
        }

        let mut start_ptr = vec![0; w.len() + 1];
        cumsum(&mut start_ptr, &mut w);

        let mut minor_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        for j in 0..self.major_len() {
            for p in src_ptr[j]..src_ptr[j + 1] {
                let slot = src_idx[p];
                let q = w[slot];
                w[slot] += 1;

                minor_idx[q] = j;
                values[q] = src_values[p];
            }
        }

        debug!(
            n_rows = self.n_cols(),
            n_cols = self.n_rows(),
            nnz,
            direction = ?self.direction(),
            "transposed compressed matrix"
        );

        CompressedMatrix::from_valid_parts(
            start_ptr,
            minor_idx,
            values,
            (self.n_cols(), self.n_rows()),
            (
                self.col_labels().map(<[String]>::to_vec),
                self.row_labels().map(<[String]>::to_vec),
            ),
            self.direction(),
        )
    }

    /// Returns the same logical matrix stored in the requested direction
    ///
    /// A matrix already in that direction is cloned. Otherwise this is one
    /// transpose pass followed by swapping the axes back.
    pub fn to_direction(&self, direction: Direction) -> Self {
        if direction == self.direction() {
            self.clone()
        } else {
            self.switched()
        }
    }

    /// Consuming form of [`CompressedMatrix::to_direction`]
    pub fn into_direction(self, direction: Direction) -> Self {
        if direction == self.direction() {
            self
        } else {
            self.switched()
        }
    }

    /// Returns the matrix in CSR format
    pub fn to_csr(&self) -> Self {
        self.to_direction(Direction::RowMajor)
    }

    /// Returns the matrix in CSC format
    pub fn to_csc(&self) -> Self {
        self.to_direction(Direction::ColumnMajor)
    }

    fn switched(&self) -> Self {
        debug!(from = ?self.direction(), to = ?self.direction().flip(), "switching direction");
        self.transpose().swap_axes()
    }
}

/// Compresses `triplet` along the major axis of `direction`
///
/// Counts entries per major slot, turns the counts into slot pointers and
/// write cursors with [`cumsum`], then places every entry at its slot's
/// cursor in source order.
fn compress<T: Copy + Num>(
    triplet: &TripletMatrix<T>,
    direction: Direction,
) -> CompressedMatrix<T> {
    let nnz = triplet.nnz();
    let major = triplet.axis_idx(direction.major_axis());
    let minor = triplet.axis_idx(direction.minor_axis());
    let major_len = match direction {
        Direction::RowMajor => triplet.n_rows(),
        Direction::ColumnMajor => triplet.n_cols(),
    };

    let mut w = vec![0; major_len];
    for &slot in major {
        w[slot] += 1;
    }

    let mut start_ptr = vec![0; major_len + 1];
    cumsum(&mut start_ptr, &mut w);

    let mut minor_idx = vec![0; nnz];
    let mut values = vec![T::zero(); nnz];

    for k in 0..nnz {
        let slot = major[k];
        let p = w[slot];
        w[slot] += 1;

        minor_idx[p] = minor[k];
        values[p] = triplet.values()[k];
    }

    debug!(
        n_rows = triplet.n_rows(),
        n_cols = triplet.n_cols(),
        nnz,
        ?direction,
        "compressed triplet matrix"
    );

    CompressedMatrix::from_valid_parts(
        start_ptr,
        minor_idx,
        values,
        triplet.shape(),
        (
            triplet.row_labels().map(<[String]>::to_vec),
            triplet.col_labels().map(<[String]>::to_vec),
        ),
        direction,
    )
}

/// Folds entries sharing a coordinate into their first occurrence
pub(crate) fn sum_duplicates<T: Copy + Num>(matrix: CompressedMatrix<T>) -> CompressedMatrix<T> {
    let shape = matrix.shape();
    let direction = matrix.direction();
    let minor_len = matrix.minor_len();
    let labels = (
        matrix.row_labels().map(<[String]>::to_vec),
        matrix.col_labels().map(<[String]>::to_vec),
    );
    let before = matrix.nnz();
    let (mut start_ptr, mut minor_idx, mut values) = matrix.into_raw_parts();

    // Position of the surviving entry for each minor index in the current slot
    let mut seen: Vec<Option<usize>> = vec![None; minor_len];
    let mut nz = 0;
    let mut start = 0;

    for j in 0..start_ptr.len() - 1 {
        let q = nz;
        let end = start_ptr[j + 1];

        for p in start..end {
            let m = minor_idx[p];
            match seen[m] {
                Some(pos) if pos >= q => {
                    let val = values[p];
                    values[pos] = values[pos] + val;
                }
                _ => {
                    seen[m] = Some(nz);
                    minor_idx[nz] = m;
                    values[nz] = values[p];
                    nz += 1;
                }
            }
        }

        start = end;
        start_ptr[j] = q;
    }
    let last = start_ptr.len() - 1;
    start_ptr[last] = nz;

    minor_idx.truncate(nz);
    values.truncate(nz);

    trace!(before, after = nz, "summed duplicate entries");

    CompressedMatrix::from_valid_parts(start_ptr, minor_idx, values, shape, labels, direction)
}

fn reject_duplicates<T: Copy + Num>(matrix: &CompressedMatrix<T>) -> Result<()> {
    let mut seen: Vec<Option<usize>> = vec![None; matrix.minor_len()];

    for j in 0..matrix.major_len() {
        for (m, _) in matrix.slot_iter(j) {
            if seen[m] == Some(j) {
                let (row, col) = match matrix.direction() {
                    Direction::RowMajor => (j, m),
                    Direction::ColumnMajor => (m, j),
                };
                return Err(SparseError::DuplicateEntry { row, col });
            }
            seen[m] = Some(j);
        }
    }

    Ok(())
}

/// Compresses a triplet matrix in the given direction, keeping every entry
pub fn build<T: Copy + Num>(
    triplet: &TripletMatrix<T>,
    direction: Direction,
) -> CompressedMatrix<T> {
    compress(triplet, direction)
}

/// Compresses a triplet matrix according to `config`
pub fn build_with<T: Copy + Num>(
    triplet: &TripletMatrix<T>,
    config: &BuildConfig,
) -> Result<CompressedMatrix<T>> {
    CompressedMatrix::from_triplet_with(triplet, config)
}

/// Returns the transpose of `matrix`; see [`CompressedMatrix::transpose`]
pub fn transpose<T: Copy + Num>(matrix: &CompressedMatrix<T>) -> CompressedMatrix<T> {
    matrix.transpose()
}

/// Returns `matrix` stored in `direction`; see [`CompressedMatrix::to_direction`]
pub fn switch_direction<T: Copy + Num>(
    matrix: &CompressedMatrix<T>,
    direction: Direction,
) -> CompressedMatrix<T> {
    matrix.to_direction(direction)
}
