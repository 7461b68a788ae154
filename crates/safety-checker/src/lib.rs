// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # safety-checker
//!
//! Decides whether an allocation state is **safe**: whether there is an
//! order in which every customer can be granted its remaining need,
//! finish, and hand back what it holds, without the pool ever running dry.
//!
//! # Strategies
//!
//! | Strategy | Cost | Witness |
//! |---|---|---|
//! | [`BankersScan`] | O(N² · M) | lowest-ID-first completion order |
//! | [`ExhaustiveSearch`] | O(N! · N · M), bounded N | lexicographically first valid order |
//!
//! Both return the same witness on every safe state: once a state is
//! safe, finishing *any* satisfiable customer keeps it safe, so the
//! lowest-ID-first greedy order is also the lexicographically smallest
//! valid one. The exhaustive search exists as an independent oracle and
//! for tiny systems where an auditable answer matters more than speed.
//!
//! # Trait-Based Extensibility
//!
//! The engine only sees [`SafetyStrategy`], so a different checker can be
//! plugged in without touching the request/release logic.
//!
//! # Example
//! ```
//! use resource_model::{CustomerId, ResourceVector};
//! use safety_checker::is_safe;
//!
//! let allocation = vec![ResourceVector::from([1, 0]), ResourceVector::from([0, 1])];
//! let need = vec![ResourceVector::from([1, 1]), ResourceVector::from([0, 0])];
//! let available = ResourceVector::from([1, 0]);
//!
//! let safety = is_safe(&allocation, &need, &available).unwrap();
//! assert_eq!(safety.sequence().unwrap().as_slice(), &[CustomerId(1), CustomerId(0)]);
//! ```

mod error;
mod safety;
pub mod strategy;

#[cfg(test)]
mod proptest_safety;

pub use error::SafetyError;
pub use safety::{SafeSequence, Safety};
pub use strategy::bankers::BankersScan;
pub use strategy::exhaustive::ExhaustiveSearch;
pub use strategy::SafetyStrategy;

use resource_model::ResourceVector;

/// Runs the Banker's Algorithm safety check.
///
/// Shorthand for [`BankersScan`]; see [`SafetyStrategy::check`].
pub fn is_safe(
    allocation: &[ResourceVector],
    need: &[ResourceVector],
    available: &ResourceVector,
) -> Result<Safety, SafetyError> {
    BankersScan::new().check(allocation, need, available)
}

/// Resolves a strategy by name.
///
/// Accepts `"bankers"` (alias `"banker"`) and `"exhaustive"` (alias
/// `"brute-force"`), case-insensitively.
pub fn create_strategy(name: &str) -> Result<Box<dyn SafetyStrategy>, SafetyError> {
    match name.trim().to_lowercase().as_str() {
        "bankers" | "banker" => Ok(Box::new(BankersScan::new())),
        "exhaustive" | "brute-force" => Ok(Box::new(ExhaustiveSearch::default())),
        other => Err(SafetyError::UnknownStrategy(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_strategy() {
        assert_eq!(create_strategy("bankers").unwrap().name(), "bankers");
        assert_eq!(create_strategy("Banker").unwrap().name(), "bankers");
        assert_eq!(create_strategy("exhaustive").unwrap().name(), "exhaustive");
        assert_eq!(create_strategy(" brute-force ").unwrap().name(), "exhaustive");
    }

    #[test]
    fn test_is_safe_two_customers() {
        let allocation = vec![ResourceVector::from([1, 0]), ResourceVector::from([0, 1])];
        let need = vec![ResourceVector::from([1, 1]), ResourceVector::from([0, 0])];

        let safety = is_safe(&allocation, &need, &ResourceVector::from([1, 0])).unwrap();
        let order: Vec<usize> = safety
            .sequence()
            .unwrap()
            .as_slice()
            .iter()
            .map(|c| c.index())
            .collect();
        assert_eq!(order, vec![1, 0]);

        // Customer 1 finishing only frees (0, 1); customer 0 still needs (1, 1).
        let safety = is_safe(&allocation, &need, &ResourceVector::from([0, 0])).unwrap();
        assert!(!safety.is_safe());
    }

    #[test]
    fn test_create_strategy_unknown() {
        let err = create_strategy("optimistic").err().unwrap();
        assert!(matches!(err, SafetyError::UnknownStrategy(name) if name == "optimistic"));
    }
}
