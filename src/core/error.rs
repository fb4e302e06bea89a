//! Errors raised by the pure core: grid validation and index bounds.

use thiserror::Error;

/// Malformed grid input, or a lookup with nothing loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("got {names} dimension names but {values} value sequences")]
    LengthMismatch { names: usize, values: usize },

    #[error("dimension {position} has an empty name")]
    EmptyName { position: usize },

    #[error("duplicate dimension name '{0}'")]
    DuplicateName(String),

    #[error("grid size overflows usize")]
    TotalOverflow,

    #[error("matrix of {rows}x{cols} cannot hold {len} elements")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("record {position} has fields {got:?}, expected {expected:?}")]
    FieldMismatch {
        position: usize,
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error("no grid loaded")]
    NotLoaded,
}

/// A linear index outside `[0, total)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for grid of {total} records")]
pub struct IndexError {
    pub index: usize,
    pub total: usize,
}
