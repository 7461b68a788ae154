// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-resource-type count vectors.

use std::fmt;
use std::ops::Index;

/// An ordered sequence of non-negative counts, one per resource type.
///
/// Used for the available pool, for request/release deltas, and as the
/// rows of the per-customer matrices. Comparisons are component-wise and
/// only meaningful between vectors of equal length; mismatched lengths
/// never compare as "fits".
///
/// # Examples
/// ```
/// use resource_model::ResourceVector;
///
/// let need = ResourceVector::from(vec![1, 2, 2]);
/// let work = ResourceVector::from(vec![3, 3, 2]);
/// assert!(need.fits_within(&work));
/// assert_eq!(work.checked_sub(&need).unwrap().as_slice(), &[2, 1, 0]);
/// assert_eq!(need.to_string(), "1 2 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ResourceVector {
    counts: Vec<u32>,
}

impl ResourceVector {
    /// Creates a vector from per-resource counts.
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// Creates an all-zero vector of the given width.
    pub fn zeros(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    /// Returns the number of resource types.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the vector has no resource types.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns `true` if every count is zero.
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Returns the counts as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// Returns the count for resource `j`, or `None` if out of bounds.
    pub fn get(&self, j: usize) -> Option<u32> {
        self.counts.get(j).copied()
    }

    /// Iterates over the counts in resource-type order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.counts.iter().copied()
    }

    /// Returns `true` if `self[j] <= bound[j]` for every resource `j`.
    pub fn fits_within(&self, bound: &ResourceVector) -> bool {
        self.len() == bound.len() && self.first_excess(bound).is_none()
    }

    /// Returns the first resource index where `self` exceeds `bound`.
    ///
    /// Only the overlapping prefix is compared.
    pub fn first_excess(&self, bound: &ResourceVector) -> Option<usize> {
        self.counts
            .iter()
            .zip(&bound.counts)
            .position(|(&mine, &limit)| mine > limit)
    }

    /// Component-wise sum, or `None` on width mismatch or overflow.
    pub fn checked_add(&self, other: &ResourceVector) -> Option<ResourceVector> {
        if self.len() != other.len() {
            return None;
        }
        self.counts
            .iter()
            .zip(&other.counts)
            .map(|(&a, &b)| a.checked_add(b))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    /// Component-wise difference, or `None` on width mismatch or if any
    /// component of `other` is larger.
    pub fn checked_sub(&self, other: &ResourceVector) -> Option<ResourceVector> {
        if self.len() != other.len() {
            return None;
        }
        self.counts
            .iter()
            .zip(&other.counts)
            .map(|(&a, &b)| a.checked_sub(b))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }
}

impl From<Vec<u32>> for ResourceVector {
    fn from(counts: Vec<u32>) -> Self {
        Self::new(counts)
    }
}

impl<const M: usize> From<[u32; M]> for ResourceVector {
    fn from(counts: [u32; M]) -> Self {
        Self::new(counts.to_vec())
    }
}

impl FromIterator<u32> for ResourceVector {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for ResourceVector {
    type Output = u32;

    fn index(&self, j: usize) -> &u32 {
        &self.counts[j]
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (j, count) in self.counts.iter().enumerate() {
            if j > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let v = ResourceVector::zeros(3);
        assert_eq!(v.len(), 3);
        assert!(v.is_zero());
        assert!(ResourceVector::zeros(0).is_empty());
    }

    #[test]
    fn test_fits_within() {
        let a = ResourceVector::from([1, 2, 2]);
        assert!(a.fits_within(&ResourceVector::from([1, 2, 2])));
        assert!(a.fits_within(&ResourceVector::from([3, 3, 2])));
        assert!(!a.fits_within(&ResourceVector::from([3, 1, 2])));
    }

    #[test]
    fn test_fits_within_width_mismatch() {
        let a = ResourceVector::from([0, 0]);
        assert!(!a.fits_within(&ResourceVector::from([5, 5, 5])));
    }

    #[test]
    fn test_first_excess() {
        let a = ResourceVector::from([1, 4, 5]);
        let bound = ResourceVector::from([2, 3, 1]);
        assert_eq!(a.first_excess(&bound), Some(1));
        assert_eq!(bound.first_excess(&ResourceVector::from([9, 9, 9])), None);
    }

    #[test]
    fn test_checked_add() {
        let a = ResourceVector::from([1, 2, 3]);
        let b = ResourceVector::from([4, 0, 1]);
        assert_eq!(a.checked_add(&b), Some(ResourceVector::from([5, 2, 4])));
        assert_eq!(a.checked_add(&ResourceVector::from([1, 1])), None);
        assert_eq!(
            ResourceVector::from([u32::MAX]).checked_add(&ResourceVector::from([1])),
            None
        );
    }

    #[test]
    fn test_checked_sub() {
        let a = ResourceVector::from([3, 3, 2]);
        assert_eq!(
            a.checked_sub(&ResourceVector::from([1, 0, 2])),
            Some(ResourceVector::from([2, 3, 0]))
        );
        assert_eq!(a.checked_sub(&ResourceVector::from([0, 4, 0])), None);
    }

    #[test]
    fn test_index_and_get() {
        let a = ResourceVector::from([7, 5, 3]);
        assert_eq!(a[0], 7);
        assert_eq!(a.get(2), Some(3));
        assert_eq!(a.get(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceVector::from([1, 0, 2]).to_string(), "1 0 2");
        assert_eq!(ResourceVector::zeros(0).to_string(), "");
    }

    #[test]
    fn test_serde_transparent() {
        let a = ResourceVector::from([1, 0, 2]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[1,0,2]");
        let back: ResourceVector = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
