//! # Session
//!
//! The load/lookup surface for callers that keep one "current" grid.
//!
//! The current grid is an `Arc<RecordBuilder>` behind a lock. Loading swaps
//! the pointer under the write lock; lookups clone the pointer under the
//! read lock and build outside it, so a lookup always sees exactly one grid
//! even while another thread replaces it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{ConfigError, GridConfig, GridSpec, Record, ValueSeq};
use crate::error::GridResult;
use crate::ports::{Subscript, Unsupported};

use super::builder::RecordBuilder;

/// Holder of the currently loaded grid
pub struct Session {
    /// Applied to every grid loaded into this session
    config: GridConfig,

    /// Shared by every grid loaded into this session
    subscript: Arc<dyn Subscript>,

    current: RwLock<Option<Arc<RecordBuilder>>>,
}

impl Session {
    /// An empty session with default config and no subscript
    pub fn new() -> Self {
        Self {
            config: GridConfig::default(),
            subscript: Arc::new(Unsupported),
            current: RwLock::new(None),
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

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    // ========================================================================
    // LOAD
    // ========================================================================

    /// Validate and install a new grid, releasing the previous one
    ///
    /// On a validation error the previously loaded grid stays current.
    pub fn load<N: Into<String>>(&self, names: Vec<N>, values: Vec<ValueSeq>) -> Result<(), ConfigError> {
        let spec = GridSpec::load(names, values)?;
        self.install(spec);
        Ok(())
    }

    /// Install an already validated grid, returning the builder now current
    ///
    /// The returned builder stays valid even if another load replaces it.
    pub fn install(&self, spec: GridSpec) -> Arc<RecordBuilder> {
        let (ndims, total) = (spec.ndims(), spec.total());
        let builder = Arc::new(RecordBuilder::from_parts(
            Arc::new(spec),
            self.config.clone(),
            Arc::clone(&self.subscript),
        ));

        let previous = self.current.write().replace(Arc::clone(&builder));

        tracing::debug!(dimensions = ndims, total, replaced = previous.is_some(), "grid loaded");
        builder
    }

    /// Release the current grid; returns whether one was loaded
    pub fn unload(&self) -> bool {
        let previous = self.current.write().take();
        if previous.is_some() {
            tracing::debug!("grid unloaded");
        }
        previous.is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// The current grid, shared
    pub fn snapshot(&self) -> GridResult<Arc<RecordBuilder>> {
        self.current
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| ConfigError::NotLoaded.into())
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Record `index` of the current grid
    pub fn lookup(&self, index: usize) -> GridResult<Record> {
        self.snapshot()?.build_record(index)
    }

    /// Every record of the current grid, in index order
    pub fn lookup_all(&self) -> GridResult<Vec<Record>> {
        self.snapshot()?.collect_all()
    }

    /// Load a grid and immediately look up one record of it
    ///
    /// The record always comes from the grid loaded here, even if another
    /// thread replaces it before the lookup runs.
    pub fn load_and_lookup<N: Into<String>>(
        &self,
        names: Vec<N>,
        values: Vec<ValueSeq>,
        index: usize,
    ) -> GridResult<Record> {
        let spec = GridSpec::load(names, values)?;
        self.install(spec).build_record(index)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
