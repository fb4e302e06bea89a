//! Record-building configuration.

/// What to do with a linear index at or past the end of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Reject with `IndexError`
    #[default]
    Strict,
    /// Reduce modulo each radix, so `k` behaves like `k % total`
    Wrap,
}

/// Configuration for a `RecordBuilder` or `Session`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Bounds handling for linear indices
    pub index_policy: IndexPolicy,
}

impl GridConfig {
    /// Strict bounds checking
    pub fn new() -> Self {
        Self {
            index_policy: IndexPolicy::Strict,
        }
    }

    /// Permissive bounds: out-of-range indices alias onto earlier records
    pub fn wrapping() -> Self {
        Self::new().with_index_policy(IndexPolicy::Wrap)
    }

    /// Set the index policy
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.index_policy == IndexPolicy::Strict
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert!(GridConfig::default().is_strict());
        assert_eq!(IndexPolicy::default(), IndexPolicy::Strict);
    }

    #[test]
    fn test_wrapping() {
        let config = GridConfig::wrapping();
        assert_eq!(config.index_policy, IndexPolicy::Wrap);
        assert!(!config.is_strict());
    }
}
