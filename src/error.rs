//! Error types for sparse matrix construction and transforms

use std::fmt;
use thiserror::Error;

/// One of the two matrix axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// The other axis
    pub fn other(self) -> Self {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Why a directly supplied set of compressed arrays was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// `start_ptr` length is not major extent + 1
    StartPtrLength { len: usize, expected: usize },
    /// `start_ptr[0]` is not zero
    StartPtrOrigin { first: usize },
    /// `start_ptr` decreases between `idx` and `idx + 1`
    StartPtrDecreasing { idx: usize, curr: usize, next: usize },
    /// `start_ptr` does not end at nnz
    StartPtrEnd { last: usize, nnz: usize },
    /// A stored minor index lies outside the minor axis
    MinorIndexOutOfBounds { pos: usize, index: usize, bound: usize },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::StartPtrLength { len, expected } => {
                write!(f, "start_ptr has length {len}, expected {expected}")
            }
            MalformedReason::StartPtrOrigin { first } => {
                write!(f, "start_ptr[0] is {first}, expected 0")
            }
            MalformedReason::StartPtrDecreasing { idx, curr, next } => {
                write!(f, "start_ptr decreases at index {idx}: {curr} > {next}")
            }
            MalformedReason::StartPtrEnd { last, nnz } => {
                write!(f, "start_ptr ends at {last} but nnz is {nnz}")
            }
            MalformedReason::MinorIndexOutOfBounds { pos, index, bound } => {
                write!(f, "minor index {index} at position {pos} is not below {bound}")
            }
        }
    }
}

/// Errors raised by the sparse matrix kernel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseError {
    #[error("{axis} index {index} out of range (bound {bound})")]
    OutOfRange { axis: Axis, index: usize, bound: usize },

    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("malformed compressed matrix: {0}")]
    MalformedCompressed(MalformedReason),

    #[error("duplicate entry at ({row}, {col})")]
    DuplicateEntry { row: usize, col: usize },
}

/// Result type for sparse matrix operations
pub type Result<T> = std::result::Result<T, SparseError>;
