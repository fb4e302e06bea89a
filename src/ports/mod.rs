//! # Ports
//!
//! Trait contracts the core needs from its embedding host.
//!
//! Only one capability is required: slicing a column out of a sequence the
//! core cannot look inside (`Subscript`). Category and column count of
//! native sequences come from `ValueSeq` itself; for opaque sequences the
//! host reports the column count when building the `OpaqueSeq`.

use thiserror::Error;

use crate::core::{OpaqueSeq, Value};

/// Failure to slice one column out of a dimension
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceFailure {
    #[error("no subscript available for '{type_name}' values")]
    Unavailable { type_name: String },

    #[error("subscript of '{type_name}' at column {column} failed: {reason}")]
    Failed {
        type_name: String,
        /// 1-based column passed to the subscript
        column: usize,
        reason: String,
    },

    #[error("dimension '{dimension}' has {columns} columns, column {column} requested")]
    ColumnOutOfRange {
        dimension: String,
        column: usize,
        columns: usize,
    },
}

pub type SliceResult<T> = Result<T, SliceFailure>;

/// Generic "index a sequence by column" capability of the host
///
/// `column` is 1-based. The returned value must be independently owned:
/// sequences outlive every record built from them.
pub trait Subscript: Send + Sync {
    fn subscript(&self, seq: &OpaqueSeq, column: usize) -> SliceResult<Value>;
}

impl<F> Subscript for F
where
    F: Fn(&OpaqueSeq, usize) -> SliceResult<Value> + Send + Sync,
{
    fn subscript(&self, seq: &OpaqueSeq, column: usize) -> SliceResult<Value> {
        self(seq, column)
    }
}

/// A host with no subscript; every opaque slice fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl Subscript for Unsupported {
    fn subscript(&self, seq: &OpaqueSeq, _column: usize) -> SliceResult<Value> {
        Err(SliceFailure::Unavailable {
            type_name: seq.type_name().to_owned(),
        })
    }
}
