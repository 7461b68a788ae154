// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property-based tests for the safety checkers.
//!
//! Small systems (N ≤ 4, M ≤ 3) are generated at random so the
//! exhaustive search can serve as ground truth for the scan.

use proptest::prelude::*;

use crate::{BankersScan, ExhaustiveSearch, SafetyStrategy};
use resource_model::{CustomerId, ResourceVector};

type Inputs = (Vec<ResourceVector>, Vec<ResourceVector>, ResourceVector);

fn row(width: usize, upper: u32) -> impl Strategy<Value = ResourceVector> {
    prop::collection::vec(0..upper, width).prop_map(ResourceVector::new)
}

/// Random (allocation, need, available) with consistent dimensions.
fn inputs() -> impl Strategy<Value = Inputs> {
    (1usize..=4, 1usize..=3).prop_flat_map(|(customers, resources)| {
        (
            prop::collection::vec(row(resources, 5), customers),
            prop::collection::vec(row(resources, 7), customers),
            row(resources, 7),
        )
    })
}

/// Replays `order` and checks that every need is met from `work`.
fn replay(order: &[CustomerId], (allocation, need, available): &Inputs) -> bool {
    let mut work: Vec<u64> = available.iter().map(u64::from).collect();
    for customer in order {
        let i = customer.index();
        if need[i].iter().zip(&work).any(|(n, &w)| u64::from(n) > w) {
            return false;
        }
        for (w, a) in work.iter_mut().zip(allocation[i].iter()) {
            *w += u64::from(a);
        }
    }
    true
}

proptest! {
    /// Property: a reported witness can actually be executed, and it
    /// names every customer exactly once.
    #[test]
    fn prop_witness_is_executable(input in inputs()) {
        let (allocation, need, available) = &input;
        let safety = BankersScan::new().check(allocation, need, available).unwrap();

        if let Some(sequence) = safety.sequence() {
            let mut ids: Vec<usize> = sequence.iter().map(CustomerId::index).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..need.len()).collect::<Vec<_>>());
            prop_assert!(replay(sequence.as_slice(), &input));
        }
    }

    /// Property: the scan is safe exactly when some completion order exists.
    #[test]
    fn prop_scan_agrees_with_brute_force(input in inputs()) {
        let (allocation, need, available) = &input;
        let scan = BankersScan::new().check(allocation, need, available).unwrap();
        let brute = ExhaustiveSearch::default().check(allocation, need, available).unwrap();

        prop_assert_eq!(scan.is_safe(), brute.is_safe());
        // Lowest-ID-first is also the lexicographically first valid order,
        // and both strategies agree on who is stuck.
        prop_assert_eq!(scan, brute);
    }

    /// Property: adding resources to the pool never turns safe into unsafe.
    #[test]
    fn prop_more_available_stays_safe(input in inputs(), extra in 0u32..4) {
        let (allocation, need, available) = &input;
        let before = BankersScan::new().check(allocation, need, available).unwrap();

        let richer: ResourceVector = available.iter().map(|a| a + extra).collect();
        let after = BankersScan::new().check(allocation, need, &richer).unwrap();

        prop_assert!(!before.is_safe() || after.is_safe());
    }

    /// Property: the check is deterministic.
    #[test]
    fn prop_check_is_deterministic(input in inputs()) {
        let (allocation, need, available) = &input;
        let first = BankersScan::new().check(allocation, need, available).unwrap();
        let second = BankersScan::new().check(allocation, need, available).unwrap();
        prop_assert_eq!(first, second);
    }
}
