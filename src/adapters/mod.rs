//! # Adapters
//!
//! Swappable implementations of port traits.
//!
//! This is where the hexagonal architecture meets reality:
//! - `MemorySubscript`: opaque sequences held in process as value lists
//! - Python bindings (when enabled), slicing Python objects with `__getitem__`
//!
//! Each adapter implements the Subscript port.
//! Adapters can be swapped without changing core logic.

pub mod memory;

#[cfg(feature = "python")]
pub mod python;

pub use memory::MemorySubscript;
