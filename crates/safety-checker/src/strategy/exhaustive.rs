// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Brute-force safety check over every completion order.
//!
//! Enumerates permutations of the customers in lexicographic order and
//! replays each one against the available pool. The first order that
//! finishes everyone is the witness. If none does, the customers missing
//! from the longest feasible prefix are reported as blocked.
//!
//! # When to use
//! - As an oracle when testing [`crate::BankersScan`].
//! - For very small systems where the factorial cost is irrelevant.

use crate::strategy::{fits, reclaim, validate_dimensions, work_from, SafetyStrategy};
use crate::{SafeSequence, Safety, SafetyError};
use resource_model::{CustomerId, ResourceVector};

/// Default customer limit: 8! = 40 320 orders.
pub const DEFAULT_MAX_CUSTOMERS: usize = 8;

/// Exhaustive search over all `N!` completion orders.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSearch {
    max_customers: usize,
}

impl ExhaustiveSearch {
    /// Creates a search that refuses systems with more than `max_customers`.
    pub fn new(max_customers: usize) -> Self {
        Self { max_customers }
    }
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CUSTOMERS)
    }
}

impl SafetyStrategy for ExhaustiveSearch {
    fn name(&self) -> &str {
        "exhaustive"
    }

    fn check(
        &self,
        allocation: &[ResourceVector],
        need: &[ResourceVector],
        available: &ResourceVector,
    ) -> Result<Safety, SafetyError> {
        validate_dimensions(allocation, need, available)?;

        let customers = need.len();
        if customers > self.max_customers {
            return Err(SafetyError::TooManyCustomers {
                customers,
                limit: self.max_customers,
            });
        }

        let mut order: Vec<usize> = (0..customers).collect();
        let mut best_prefix: Vec<usize> = Vec::new();

        loop {
            let completed = feasible_prefix(&order, allocation, need, available);
            if completed == customers {
                return Ok(Safety::Safe {
                    sequence: SafeSequence::new(order.into_iter().map(CustomerId).collect()),
                });
            }
            if completed > best_prefix.len() {
                best_prefix = order[..completed].to_vec();
            }
            if !next_permutation(&mut order) {
                break;
            }
        }

        let blocked = (0..customers)
            .filter(|i| !best_prefix.contains(i))
            .map(CustomerId)
            .collect();
        Ok(Safety::Unsafe { blocked })
    }
}

/// Replays `order` and returns how many customers finish before the
/// first one whose need cannot be met.
fn feasible_prefix(
    order: &[usize],
    allocation: &[ResourceVector],
    need: &[ResourceVector],
    available: &ResourceVector,
) -> usize {
    let mut work = work_from(available);
    for (step, &i) in order.iter().enumerate() {
        if !fits(&need[i], &work) {
            return step;
        }
        reclaim(&mut work, &allocation[i]);
    }
    order.len()
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` untouched) when already at the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&k| items[k] < items[k + 1]) else {
        return false;
    };
    // A successor exists because items[pivot + 1] > items[pivot].
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&k| items[k] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BankersScan;

    fn rows(data: &[&[u32]]) -> Vec<ResourceVector> {
        data.iter().map(|r| ResourceVector::new(r.to_vec())).collect()
    }

    #[test]
    fn test_next_permutation_enumerates_all() {
        let mut items = vec![0, 1, 2];
        let mut seen = vec![items.clone()];
        while next_permutation(&mut items) {
            seen.push(items.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_next_permutation_trivial() {
        assert!(!next_permutation(&mut []));
        assert!(!next_permutation(&mut [0]));
    }

    #[test]
    fn test_textbook_matches_bankers_witness() {
        let allocation = rows(&[&[0, 1, 0], &[2, 0, 0], &[3, 0, 2], &[2, 1, 1], &[0, 0, 2]]);
        let need = rows(&[&[7, 4, 3], &[1, 2, 2], &[6, 0, 0], &[0, 1, 1], &[4, 3, 1]]);
        let available = ResourceVector::from([3, 3, 2]);

        let brute = ExhaustiveSearch::default().check(&allocation, &need, &available).unwrap();
        let scan = BankersScan::new().check(&allocation, &need, &available).unwrap();
        assert_eq!(brute, scan);
    }

    #[test]
    fn test_unsafe_blocked_set() {
        let allocation = rows(&[&[1], &[1], &[0]]);
        let need = rows(&[&[5], &[1], &[4]]);
        let available = ResourceVector::from([1]);

        let safety = ExhaustiveSearch::default().check(&allocation, &need, &available).unwrap();
        assert_eq!(
            safety,
            Safety::Unsafe {
                blocked: vec![CustomerId(0), CustomerId(2)]
            }
        );
    }

    #[test]
    fn test_too_many_customers() {
        let allocation = rows(&[&[0], &[0], &[0]]);
        let err = ExhaustiveSearch::new(2)
            .check(&allocation, &allocation, &ResourceVector::from([0]))
            .unwrap_err();
        assert_eq!(err, SafetyError::TooManyCustomers { customers: 3, limit: 2 });
    }
}
