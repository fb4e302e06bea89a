//! # grid-records
//!
//! Flatten an N-dimensional parameter grid into an ordered list of labeled
//! records, one per point of the Cartesian product. The classic
//! "meshgrid to record list" step of a parameter sweep.
//!
//! ## Philosophy
//!
//! - **Index IS position** - record `k` is a pure function of `k` and the grid
//! - **Dimension 0 varies fastest** - column-major enumeration, always
//! - **Owned results** - every record is a fresh copy, grids are never borrowed out
//! - **Pure core, swappable adapters** - Hexagonal architecture
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       GRID-RECORDS                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure math, no I/O)                                   │
//! │    Matrix, Numeric, ValueSeq, Value, Record, GridSpec       │
//! │    Mixed-radix decomposition, GridConfig                    │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    Subscript                                                │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Subscript: Memory                                        │
//! │    API: Python bindings                                      │
//! │                                                              │
//! │  ENGINE (orchestration)                                      │
//! │    RecordBuilder, Session                                   │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use grid_records::{GridSpec, RecordBuilder, Value, ValueSeq};
//!
//! let spec = GridSpec::load(
//!     vec!["a", "b"],
//!     vec![ValueSeq::from(vec![10i64, 20]), ValueSeq::from(vec![100i64, 200, 300])],
//! )
//! .unwrap();
//!
//! let builder = RecordBuilder::new(spec);
//! assert_eq!(builder.total(), 6);
//!
//! // k = 2 -> coordinate (0, 1)
//! let record = builder.build_record(2).unwrap();
//! assert_eq!(record.get("a"), Some(&Value::from(10i64)));
//! assert_eq!(record.get("b"), Some(&Value::from(200i64)));
//!
//! // Lazily, in index order
//! for record in builder.build_all() {
//!     let _ = record.unwrap();
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure math, no I/O
/// Contains: values, sequences, records, GridSpec, radix math, config
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: Subscript trait, SliceFailure
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: memory, python submodules
pub mod adapters;

/// Engine - orchestration layer
/// Contains: RecordBuilder, Session
pub mod engine;

/// Crate-level error type
pub mod error;

// ============================================================================
// PYTHON BINDINGS (when enabled)
// ============================================================================

#[cfg(feature = "python")]
pub use adapters::python::*;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{
    Category, Coordinate, Dimension, GridSpec, Matrix, NumberClass, Numeric, NumericKind, OpaqueSeq,
    OpaqueValue, Record, RecordSeq, Value, ValueSeq,
};
pub use crate::core::config::{GridConfig, IndexPolicy};
pub use crate::core::error::{ConfigError, IndexError};
pub use crate::core::radix::{compose, decompose};

// Port traits
pub use crate::ports::{SliceFailure, SliceResult, Subscript, Unsupported};

// Adapters
pub use crate::adapters::MemorySubscript;

// Engine
pub use crate::engine::{RecordBuilder, Records, Session};

// Errors
pub use crate::error::{GridError, GridResult};
