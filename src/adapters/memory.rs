//! # Memory Subscript Adapter
//!
//! Opaque sequences held in process as `Vec<Value>`: heterogeneous lists
//! whose elements share no common category, like a cell array.
//!
//! Good for:
//! - Testing
//! - Mixed-type sweep axes assembled in Rust

use crate::core::{OpaqueSeq, Value};
use crate::ports::{SliceFailure, SliceResult, Subscript};

/// Type name carried by sequences built with `MemorySubscript::list`
pub const LIST_TYPE: &str = "list";

/// Subscript over in-memory value lists
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySubscript;

impl MemorySubscript {
    /// Wrap a value list as an opaque sequence, one column per element
    pub fn list(values: Vec<Value>) -> OpaqueSeq {
        OpaqueSeq::new(LIST_TYPE, values.len(), values)
    }
}

impl Subscript for MemorySubscript {
    fn subscript(&self, seq: &OpaqueSeq, column: usize) -> SliceResult<Value> {
        let failed = |reason: &str| SliceFailure::Failed {
            type_name: seq.type_name().to_owned(),
            column,
            reason: reason.to_owned(),
        };

        let values = seq
            .downcast_ref::<Vec<Value>>()
            .ok_or_else(|| failed("not an in-memory value list"))?;

        column
            .checked_sub(1)
            .and_then(|i| values.get(i))
            .cloned()
            .ok_or_else(|| failed("column out of range"))
    }
}
