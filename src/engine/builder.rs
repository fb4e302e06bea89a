//! # Record Builder
//!
//! Turns linear indices into records over one immutable `GridSpec`.
//!
//! This struct wires together:
//! - The grid (dimensions and radices)
//! - Configuration (index policy)
//! - The host's subscript (Subscript port) for opaque dimensions

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::core::config::{GridConfig, IndexPolicy};
use crate::core::radix::{self, Coordinate};
use crate::core::{GridSpec, Record};
use crate::error::GridResult;
use crate::ports::{Subscript, Unsupported};

use super::extract::extract;

/// Builds records from a loaded grid
///
/// Cheap to share: the grid and subscript sit behind `Arc`s.
#[derive(Clone)]
pub struct RecordBuilder {
    /// The grid being enumerated
    spec: Arc<GridSpec>,

    /// Configuration
    config: GridConfig,

    /// Fallback slicing for opaque dimensions
    subscript: Arc<dyn Subscript>,
}

impl RecordBuilder {
    /// Create a builder with default config and no subscript
    ///
    /// Opaque dimensions fail to slice until `with_subscript` is used.
    pub fn new(spec: GridSpec) -> Self {
        Self::from_parts(Arc::new(spec), GridConfig::default(), Arc::new(Unsupported))
    }

    /// Create from already shared parts
    pub fn from_parts(spec: Arc<GridSpec>, config: GridConfig, subscript: Arc<dyn Subscript>) -> Self {
        Self {
            spec,
            config,
            subscript,
        }
    }

    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_subscript(mut self, subscript: impl Subscript + 'static) -> Self {
        self.subscript = Arc::new(subscript);
        self
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of records in the grid
    pub fn total(&self) -> usize {
        self.spec.total()
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Decompose `index` into per-dimension offsets, dimension 0 fastest
    pub fn coordinate(&self, index: usize) -> GridResult<Coordinate> {
        let policy = self.config.index_policy;
        let coordinate = radix::decompose(index, self.spec.sizes(), policy)?;

        if policy == IndexPolicy::Wrap && index >= self.spec.total() {
            tracing::warn!(index, total = self.spec.total(), "index wrapped past end of grid");
        }

        Ok(coordinate)
    }

    /// Build record `index`
    ///
    /// Fields follow dimension order. Any failing dimension fails the
    /// whole record.
    pub fn build_record(&self, index: usize) -> GridResult<Record> {
        let coordinate = self.coordinate(index)?;

        let mut record = Record::with_capacity(self.spec.ndims());
        for (dim, &column) in self.spec.dimensions().iter().zip(coordinate.as_slice()) {
            let value = extract(dim, column, self.subscript.as_ref())?;
            record.insert(dim.name(), value);
        }

        tracing::trace!(index, coordinate = ?coordinate.as_slice(), "record built");
        Ok(record)
    }

    /// Lazily build every record in index order
    ///
    /// Each call starts a fresh pass; nothing is cached between passes.
    pub fn build_all(&self) -> Records<'_> {
        Records {
            builder: self,
            next: 0,
            end: self.spec.total(),
        }
    }

    /// Build every record, stopping at the first failure
    pub fn collect_all(&self) -> GridResult<Vec<Record>> {
        self.build_all().collect()
    }
}

impl fmt::Debug for RecordBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordBuilder")
            .field("spec", &self.spec)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Iterator over all records of a grid, see `RecordBuilder::build_all`
pub struct Records<'a> {
    builder: &'a RecordBuilder,
    next: usize,
    end: usize,
}

impl Iterator for Records<'_> {
    type Item = GridResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.builder.build_record(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}
