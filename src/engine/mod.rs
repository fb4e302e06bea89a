//! # Engine
//!
//! The orchestration layer that wires everything together.
//!
//! This is where:
//! - Linear indices are decomposed against a grid
//! - Each dimension is sliced, natively or through the Subscript port
//! - Records are assembled, one at a time or for the whole grid
//! - The current grid of a `Session` is loaded and replaced

mod builder;
mod extract;
mod session;

pub use builder::{RecordBuilder, Records};
pub use extract::extract;
pub use session::Session;
