//! # Mixed-radix indexing
//!
//! A linear index `k` over dimensions of sizes `[s_0, .., s_{n-1}]` maps to
//! coordinates with dimension 0 varying fastest:
//!
//! ```text
//! c_i = k mod s_i
//! k   = k div s_i     (carried to dimension i + 1)
//! ```
//!
//! and back via `k = Σ c_i · Π_{j<i} s_j`.

use std::ops::Index;

use super::config::IndexPolicy;
use super::error::IndexError;

/// Per-dimension offsets of one grid point
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate(Vec<usize>);

impl Coordinate {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Linear index of this coordinate under `sizes`
    pub fn compose(&self, sizes: &[usize]) -> usize {
        compose(&self.0, sizes)
    }
}

impl Index<usize> for Coordinate {
    type Output = usize;

    fn index(&self, dim: usize) -> &usize {
        &self.0[dim]
    }
}

impl From<Vec<usize>> for Coordinate {
    fn from(offsets: Vec<usize>) -> Self {
        Coordinate(offsets)
    }
}

/// Product of all sizes, `None` on overflow. The empty product is 1.
///
/// A zero size makes the product 0 even when the other sizes overflow.
pub fn total(sizes: &[usize]) -> Option<usize> {
    if sizes.contains(&0) {
        return Some(0);
    }
    sizes.iter().try_fold(1usize, |acc, &size| acc.checked_mul(size))
}

/// Decompose `index` into a coordinate, dimension 0 fastest
///
/// Under `IndexPolicy::Wrap` an index past the end is reduced modulo each
/// radix in turn, which lands on `index % total`. An empty grid rejects
/// every index regardless of policy.
pub fn decompose(index: usize, sizes: &[usize], policy: IndexPolicy) -> Result<Coordinate, IndexError> {
    // `None` means no zero size and a product past usize::MAX, so every
    // index is in range and every radix is non-zero.
    match total(sizes) {
        Some(0) => return Err(IndexError { index, total: 0 }),
        Some(total) if index >= total && policy == IndexPolicy::Strict => {
            return Err(IndexError { index, total });
        }
        _ => {}
    }

    let mut rest = index;
    let offsets = sizes
        .iter()
        .map(|&size| {
            let c = rest % size;
            rest /= size;
            c
        })
        .collect();

    Ok(Coordinate(offsets))
}

/// Linear index of `offsets` under `sizes` (inverse of `decompose`)
pub fn compose(offsets: &[usize], sizes: &[usize]) -> usize {
    offsets
        .iter()
        .zip(sizes)
        .rev()
        .fold(0, |acc, (&c, &size)| acc * size + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_dimension_zero_fastest() {
        let sizes = [2, 3];
        let coords: Vec<Vec<usize>> = (0..6)
            .map(|k| decompose(k, &sizes, IndexPolicy::Strict).unwrap().into_vec())
            .collect();

        assert_eq!(
            coords,
            vec![
                vec![0, 0],
                vec![1, 0],
                vec![0, 1],
                vec![1, 1],
                vec![0, 2],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_total() {
        assert_eq!(total(&[2, 3, 4]), Some(24));
        assert_eq!(total(&[5, 0, 7]), Some(0));
        assert_eq!(total(&[]), Some(1));
        assert_eq!(total(&[usize::MAX, 2]), None);
        assert_eq!(total(&[usize::MAX, 2, 0]), Some(0));
    }

    #[test]
    fn test_zero_size_after_overflow_rejects_index() {
        for policy in [IndexPolicy::Strict, IndexPolicy::Wrap] {
            let err = decompose(0, &[usize::MAX, 2, 0], policy).unwrap_err();
            assert_eq!(err, IndexError { index: 0, total: 0 });
        }
    }

    #[test]
    fn test_overflowing_sizes_decompose() {
        let coord = decompose(usize::MAX, &[usize::MAX, 2], IndexPolicy::Strict).unwrap();
        assert_eq!(coord.into_vec(), vec![0, 1]);
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let err = decompose(6, &[2, 3], IndexPolicy::Strict).unwrap_err();
        assert_eq!(err, IndexError { index: 6, total: 6 });
    }

    #[test]
    fn test_wrap_aliases_modulo_total() {
        let sizes = [2, 3];
        for k in 6..30 {
            let wrapped = decompose(k, &sizes, IndexPolicy::Wrap).unwrap();
            let direct = decompose(k % 6, &sizes, IndexPolicy::Strict).unwrap();
            assert_eq!(wrapped, direct, "k = {}", k);
        }
    }

    #[test]
    fn test_empty_grid_rejects_every_index() {
        for policy in [IndexPolicy::Strict, IndexPolicy::Wrap] {
            let err = decompose(0, &[3, 0, 2], policy).unwrap_err();
            assert_eq!(err.total, 0);
        }
    }

    #[test]
    fn test_no_dimensions() {
        let coord = decompose(0, &[], IndexPolicy::Strict).unwrap();
        assert!(coord.is_empty());
        assert!(decompose(1, &[], IndexPolicy::Strict).is_err());
    }

    #[test]
    fn test_compose_roundtrip_random_grids() {
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let ndims = rng.gen_range(1..6);
            let sizes: Vec<usize> = (0..ndims).map(|_| rng.gen_range(1..8)).collect();
            let total = total(&sizes).unwrap();
            let k = rng.gen_range(0..total);

            let coord = decompose(k, &sizes, IndexPolicy::Strict).unwrap();
            for (c, size) in coord.as_slice().iter().zip(&sizes) {
                assert!(c < size);
            }
            assert_eq!(coord.compose(&sizes), k, "sizes = {:?}", sizes);
        }
    }
}
