//! Error types raised by the simulation core

use thiserror::Error;

/// Misuse of the grid or engine API.
///
/// None of these are recoverable inside the core; they are reported
/// synchronously to whoever made the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("invalid cell value {value}: only 0 (dead) and 1 (alive) are allowed")]
    InvalidCellValue { value: u8 },

    #[error("coordinates ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("max generations must be at least 1, got {0}")]
    InvalidMaxGenerations(usize),

    #[error("invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },
}

pub type LifeResult<T> = std::result::Result<T, LifeError>;
