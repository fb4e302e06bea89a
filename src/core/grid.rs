//! # Grid
//!
//! Named dimensions and the immutable `GridSpec` they form.

use std::collections::HashSet;

use super::error::ConfigError;
use super::radix;
use super::seq::{Category, ValueSeq};

/// One named axis of the grid
#[derive(Debug, Clone)]
pub struct Dimension {
    name: String,
    values: ValueSeq,
}

impl Dimension {
    pub fn new(name: impl Into<String>, values: ValueSeq) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ValueSeq {
        &self.values
    }

    /// Number of selectable columns (the radix of this dimension)
    pub fn size(&self) -> usize {
        self.values.columns()
    }

    pub fn category(&self) -> Category {
        self.values.category()
    }
}

/// An ordered, validated set of dimensions
///
/// Enumeration runs with dimension 0 varying fastest.
#[derive(Debug, Clone)]
pub struct GridSpec {
    dimensions: Vec<Dimension>,
    sizes: Vec<usize>,
    total: usize,
}

impl GridSpec {
    /// Build from `(name, values)` pairs in declaration order
    ///
    /// Names must be non-empty and distinct, and the product of all sizes
    /// must fit in a `usize`. A dimension with no columns is allowed and
    /// makes the grid empty.
    pub fn new<I, N>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (N, ValueSeq)>,
        N: Into<String>,
    {
        let dimensions: Vec<Dimension> = pairs
            .into_iter()
            .map(|(name, values)| Dimension::new(name, values))
            .collect();

        let mut seen = HashSet::with_capacity(dimensions.len());
        for (position, dim) in dimensions.iter().enumerate() {
            if dim.name.is_empty() {
                return Err(ConfigError::EmptyName { position });
            }
            if !seen.insert(dim.name.as_str()) {
                return Err(ConfigError::DuplicateName(dim.name.clone()));
            }
        }

        let sizes: Vec<usize> = dimensions.iter().map(Dimension::size).collect();
        let total = radix::total(&sizes).ok_or(ConfigError::TotalOverflow)?;

        tracing::debug!(dimensions = dimensions.len(), total, "grid spec built");

        Ok(Self {
            dimensions,
            sizes,
            total,
        })
    }

    /// Build from parallel name and value lists
    pub fn load<N: Into<String>>(names: Vec<N>, values: Vec<ValueSeq>) -> Result<Self, ConfigError> {
        if names.len() != values.len() {
            return Err(ConfigError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        Self::new(names.into_iter().zip(values))
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, index: usize) -> Option<&Dimension> {
        self.dimensions.get(index)
    }

    /// Look a dimension up by name
    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(Dimension::name)
    }

    /// Per-dimension radices, in declaration order
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of grid points (records)
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn ndims(&self) -> usize {
        self.dimensions.len()
    }

    /// True when the grid has no points
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sizes_and_total() {
        let spec = GridSpec::load(
            vec!["a", "b"],
            vec![ValueSeq::from(vec![10.0, 20.0]), ValueSeq::from(vec![100.0, 200.0, 300.0])],
        )
        .unwrap();

        assert_eq!(spec.sizes(), &[2, 3]);
        assert_eq!(spec.total(), 6);
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(spec.get("b").unwrap().size(), 3);
    }

    #[test]
    fn test_load_length_mismatch() {
        let result = GridSpec::load(vec!["a", "b"], vec![ValueSeq::from(vec![1.0])]);

        match result {
            Err(ConfigError::LengthMismatch { names, values }) => {
                assert_eq!(names, 2);
                assert_eq!(values, 1);
            }
            other => panic!("Expected LengthMismatch error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = GridSpec::new([("a", ValueSeq::from("xy")), ("", ValueSeq::from("z"))]);
        assert!(matches!(result, Err(ConfigError::EmptyName { position: 1 })));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = GridSpec::new([("a", ValueSeq::from("xy")), ("a", ValueSeq::from("z"))]);
        assert_eq!(result.unwrap_err(), ConfigError::DuplicateName("a".into()));
    }

    #[test]
    fn test_zero_length_dimension_is_empty_grid() {
        let spec = GridSpec::new([
            ("a", ValueSeq::from(vec![1i32, 2])),
            ("b", ValueSeq::from(Vec::<i32>::new())),
        ])
        .unwrap();

        assert_eq!(spec.total(), 0);
        assert!(spec.is_empty());
    }

    #[test]
    fn test_overflowing_total_rejected() {
        use crate::core::seq::OpaqueSeq;

        let result = GridSpec::new([
            ("a", ValueSeq::Opaque(OpaqueSeq::new("huge", usize::MAX, ()))),
            ("b", ValueSeq::from(vec![1u8, 2])),
        ]);
        assert_eq!(result.unwrap_err(), ConfigError::TotalOverflow);
    }

    #[test]
    fn test_zero_dimension_wins_over_overflow() {
        use crate::core::seq::OpaqueSeq;

        let spec = GridSpec::new([
            ("a", ValueSeq::Opaque(OpaqueSeq::new("huge", usize::MAX, ()))),
            ("b", ValueSeq::from(vec![1u8, 2])),
            ("c", ValueSeq::from(Vec::<u8>::new())),
        ])
        .unwrap();

        assert_eq!(spec.total(), 0);
        assert!(spec.is_empty());
    }
}
