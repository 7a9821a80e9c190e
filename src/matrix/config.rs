//! Build configuration for compressed matrices

use crate::error::Axis;

/// Which axis a compressed matrix groups its entries by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Rows are the major axis (CSR)
    #[default]
    RowMajor,
    /// Columns are the major axis (CSC)
    ColumnMajor,
}

impl Direction {
    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            Direction::RowMajor => Direction::ColumnMajor,
            Direction::ColumnMajor => Direction::RowMajor,
        }
    }

    /// The axis entries are grouped by
    pub fn major_axis(self) -> Axis {
        match self {
            Direction::RowMajor => Axis::Row,
            Direction::ColumnMajor => Axis::Column,
        }
    }

    /// The axis recorded per stored entry
    pub fn minor_axis(self) -> Axis {
        self.major_axis().other()
    }

    /// The direction whose major axis is `axis`
    pub fn with_major(axis: Axis) -> Self {
        match axis {
            Axis::Row => Direction::RowMajor,
            Axis::Column => Direction::ColumnMajor,
        }
    }

    /// True for `RowMajor` (CSR)
    pub fn is_row_major(self) -> bool {
        matches!(self, Direction::RowMajor)
    }
}

/// What `build` does with triplet entries that share a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Store every entry in source order; lookups add them up
    #[default]
    Keep,
    /// Fold repeated coordinates into their first occurrence by addition
    Sum,
    /// Fail with `SparseError::DuplicateEntry`
    Reject,
}

/// Configuration for triplet to compressed conversion
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Target major axis
    pub direction: Direction,

    /// Handling of repeated coordinates
    pub duplicates: DuplicatePolicy,
}

impl BuildConfig {
    /// Create a config targeting a specific direction with default duplicate handling
    pub fn for_direction(direction: Direction) -> Self {
        Self {
            direction,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Replace the duplicate policy
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.direction, Direction::RowMajor);
        assert_eq!(config.duplicates, DuplicatePolicy::Keep);
    }

    #[test]
    fn test_direction_axes() {
        assert_eq!(Direction::RowMajor.major_axis(), Axis::Row);
        assert_eq!(Direction::RowMajor.minor_axis(), Axis::Column);
        assert_eq!(Direction::ColumnMajor.flip(), Direction::RowMajor);
        assert_eq!(Direction::with_major(Axis::Column), Direction::ColumnMajor);
        assert!(!Direction::ColumnMajor.is_row_major());
    }

    #[test]
    fn test_builder_style() {
        let config = BuildConfig::for_direction(Direction::ColumnMajor)
            .with_duplicates(DuplicatePolicy::Reject);
        assert_eq!(config.direction, Direction::ColumnMajor);
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
    }
}
