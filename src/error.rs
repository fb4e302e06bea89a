//! Crate-level error: everything a lookup can fail with.

use thiserror::Error;

use crate::core::{ConfigError, IndexError};
use crate::ports::SliceFailure;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Slice(#[from] SliceFailure),
}

pub type GridResult<T> = Result<T, GridError>;
