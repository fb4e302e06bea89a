//! # Core
//!
//! Pure data and math, no I/O and no host knowledge:
//! - `value`: matrices, numeric sum type, single values
//! - `seq`: typed value sequences and their categories
//! - `record`: ordered name -> value records
//! - `grid`: dimensions and `GridSpec`
//! - `radix`: mixed-radix decomposition
//! - `config`: record-building configuration

pub mod config;
pub mod error;
pub mod grid;
pub mod radix;
pub mod record;
pub mod seq;
pub mod value;

pub use config::{GridConfig, IndexPolicy};
pub use error::{ConfigError, IndexError};
pub use grid::{Dimension, GridSpec};
pub use radix::Coordinate;
pub use record::Record;
pub use seq::{Category, OpaqueSeq, RecordSeq, ValueSeq};
pub use value::{Matrix, NumberClass, Numeric, NumericKind, OpaqueValue, Value};
