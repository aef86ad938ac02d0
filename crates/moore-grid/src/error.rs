//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// The side length exceeds [`StateGrid::MAX_SIZE`](crate::StateGrid::MAX_SIZE).
    DimensionTooLarge {
        /// The requested side length.
        size: u32,
        /// The largest accepted side length.
        max: u32,
    },
    /// Supplied cell data does not match `size * size`.
    LengthMismatch {
        /// Expected number of cells.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { size, max } => {
                write!(f, "grid size {size} exceeds maximum {max}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
        }
    }
}

impl std::error::Error for GridError {}
