// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`SafetyStrategy`] trait and its implementations.

pub mod bankers;
pub mod exhaustive;

use crate::{Safety, SafetyError};
use resource_model::{ResourceVector, SystemState};

/// Trait for safety checkers.
///
/// Implementations are pure: they borrow their inputs immutably, perform
/// no I/O, and return the same verdict for the same inputs.
pub trait SafetyStrategy: Send + Sync {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Decides whether the given state is safe.
    ///
    /// `allocation` and `need` hold one row per customer; every row must
    /// be as wide as `available`.
    fn check(
        &self,
        allocation: &[ResourceVector],
        need: &[ResourceVector],
        available: &ResourceVector,
    ) -> Result<Safety, SafetyError>;

    /// Checks a validated [`SystemState`].
    fn check_state(&self, state: &SystemState) -> Result<Safety, SafetyError> {
        self.check(state.allocation_rows(), state.need_rows(), state.available())
    }
}

/// Rejects inputs whose shapes disagree.
pub(crate) fn validate_dimensions(
    allocation: &[ResourceVector],
    need: &[ResourceVector],
    available: &ResourceVector,
) -> Result<(), SafetyError> {
    if allocation.len() != need.len() {
        return Err(SafetyError::CustomerCountMismatch {
            allocation_rows: allocation.len(),
            need_rows: need.len(),
        });
    }

    let expected = available.len();
    for (matrix, rows) in [("allocation", allocation), ("need", need)] {
        if let Some(customer) = rows.iter().position(|row| row.len() != expected) {
            return Err(SafetyError::ResourceCountMismatch {
                matrix,
                customer,
                expected,
                actual: rows[customer].len(),
            });
        }
    }
    Ok(())
}

/// `need <= work`, component-wise. `work` is widened to `u64` so that
/// accumulating allocations can never overflow.
pub(crate) fn fits(need: &ResourceVector, work: &[u64]) -> bool {
    need.iter().zip(work).all(|(n, &w)| u64::from(n) <= w)
}

/// `work += allocation`, component-wise.
pub(crate) fn reclaim(work: &mut [u64], allocation: &ResourceVector) {
    for (w, a) in work.iter_mut().zip(allocation.iter()) {
        *w += u64::from(a);
    }
}

/// Copies `available` into a widened working vector.
pub(crate) fn work_from(available: &ResourceVector) -> Vec<u64> {
    available.iter().map(u64::from).collect()
}
