// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The allocation state: available pool plus per-customer rows.
//!
//! # Type-State Pattern
//!
//! ```text
//! SystemState<Unchecked>   — raw inputs, shapes not yet checked.
//!       │  .validate()
//!       ▼
//! SystemState<Validated>   — shapes verified, need derived, supply fixed.
//! ```
//!
//! Only a validated state exposes accessors and transitions, so the
//! engine can never be built on top of inconsistent inputs. Bounds are
//! checked once here instead of on every command.

use crate::{CustomerId, ResourceVector, StateError, StateSnapshot};
use std::fmt;
use std::marker::PhantomData;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: inputs collected but not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unchecked;

/// Marker: invariants hold; the state may be handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated;

/// Sealed trait for state markers.
pub trait StateMarker: fmt::Debug + Clone + PartialEq + Eq {}
impl StateMarker for Unchecked {}
impl StateMarker for Validated {}

// ── SystemState ────────────────────────────────────────────────────

/// Available resources and the `maximum` / `allocation` / `need` rows of
/// every customer.
///
/// `need` is never supplied by callers: it is derived as
/// `maximum - allocation` during validation and then moved in lock-step
/// with `allocation` by every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemState<S: StateMarker = Validated> {
    available: ResourceVector,
    maximum: Vec<ResourceVector>,
    allocation: Vec<ResourceVector>,
    /// Empty until validated.
    need: Vec<ResourceVector>,
    /// Empty until validated.
    total_supply: ResourceVector,
    _state: PhantomData<S>,
}

// ── Unchecked state ────────────────────────────────────────────────

impl SystemState<Unchecked> {
    /// Collects the available pool and the per-customer maxima.
    ///
    /// Every customer starts with a zero allocation unless
    /// [`with_allocation`](Self::with_allocation) supplies one.
    pub fn new(available: ResourceVector, maximum: Vec<ResourceVector>) -> Self {
        let allocation = maximum
            .iter()
            .map(|row| ResourceVector::zeros(row.len()))
            .collect();
        Self {
            available,
            maximum,
            allocation,
            need: Vec::new(),
            total_supply: ResourceVector::default(),
            _state: PhantomData,
        }
    }

    /// Replaces the initial allocation (one row per customer).
    ///
    /// `available` is interpreted as what remains *after* this allocation,
    /// so the total supply becomes `available + Σ allocation`.
    pub fn with_allocation(mut self, allocation: Vec<ResourceVector>) -> Self {
        self.allocation = allocation;
        self
    }

    /// Validates the inputs and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - At least one customer and one resource type.
    /// - Every maximum and allocation row has exactly `M` values.
    /// - The allocation has one row per customer.
    /// - No allocation exceeds its maximum.
    /// - The total supply of each resource fits in a `u32`.
    pub fn validate(self) -> Result<SystemState<Validated>, StateError> {
        let customers = self.maximum.len();
        let resources = self.available.len();

        if customers == 0 {
            return Err(StateError::NoCustomers);
        }
        if resources == 0 {
            return Err(StateError::NoResourceTypes);
        }

        check_widths("maximum", &self.maximum, resources)?;

        if self.allocation.len() != customers {
            return Err(StateError::CustomerCountMismatch {
                expected: customers,
                actual: self.allocation.len(),
            });
        }
        check_widths("allocation", &self.allocation, resources)?;

        let mut need = Vec::with_capacity(customers);
        for (i, (max, held)) in self.maximum.iter().zip(&self.allocation).enumerate() {
            if let Some(j) = held.first_excess(max) {
                return Err(StateError::AllocationExceedsMaximum {
                    customer: i,
                    resource: j,
                    allocated: held[j],
                    maximum: max[j],
                });
            }
            // Cannot fail: held <= max was checked above.
            need.push(max.checked_sub(held).unwrap_or_default());
        }

        let mut supply = Vec::with_capacity(resources);
        for j in 0..resources {
            let total = self
                .allocation
                .iter()
                .try_fold(self.available[j], |acc, row| acc.checked_add(row[j]))
                .ok_or(StateError::SupplyOverflow { resource: j })?;
            supply.push(total);
        }

        Ok(SystemState {
            available: self.available,
            maximum: self.maximum,
            allocation: self.allocation,
            need,
            total_supply: ResourceVector::new(supply),
            _state: PhantomData,
        })
    }
}

fn check_widths(
    matrix: &'static str,
    rows: &[ResourceVector],
    expected: usize,
) -> Result<(), StateError> {
    match rows.iter().position(|row| row.len() != expected) {
        Some(customer) => Err(StateError::ResourceCountMismatch {
            matrix,
            customer,
            expected,
            actual: rows[customer].len(),
        }),
        None => Ok(()),
    }
}

// ── Validated state ────────────────────────────────────────────────

impl SystemState<Validated> {
    /// Returns the number of customers (`N`).
    pub fn num_customers(&self) -> usize {
        self.maximum.len()
    }

    /// Returns the number of resource types (`M`).
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Returns `true` if `customer` lies in `[0, N)`.
    pub fn contains(&self, customer: CustomerId) -> bool {
        customer.index() < self.num_customers()
    }

    /// Iterates over every valid customer ID in increasing order.
    pub fn customers(&self) -> impl Iterator<Item = CustomerId> {
        (0..self.num_customers()).map(CustomerId)
    }

    /// Returns the currently available pool.
    pub fn available(&self) -> &ResourceVector {
        &self.available
    }

    /// Returns the fixed total supply (`available + Σ allocation`).
    pub fn total_supply(&self) -> &ResourceVector {
        &self.total_supply
    }

    /// Returns a customer's maximum demand.
    pub fn maximum(&self, customer: CustomerId) -> Option<&ResourceVector> {
        self.maximum.get(customer.index())
    }

    /// Returns a customer's current allocation.
    pub fn allocation(&self, customer: CustomerId) -> Option<&ResourceVector> {
        self.allocation.get(customer.index())
    }

    /// Returns a customer's remaining need.
    pub fn need(&self, customer: CustomerId) -> Option<&ResourceVector> {
        self.need.get(customer.index())
    }

    /// Returns every allocation row in customer order.
    pub fn allocation_rows(&self) -> &[ResourceVector] {
        &self.allocation
    }

    /// Returns every need row in customer order.
    pub fn need_rows(&self) -> &[ResourceVector] {
        &self.need
    }

    /// Returns every maximum row in customer order.
    pub fn maximum_rows(&self) -> &[ResourceVector] {
        &self.maximum
    }

    /// Moves `delta` from the available pool to `customer`.
    ///
    /// All three affected vectors are computed before any is written, so
    /// on error the state is untouched. No safety check is made here.
    pub fn grant(&mut self, customer: CustomerId, delta: &ResourceVector) -> Result<(), StateError> {
        let i = self.row_index(customer, delta)?;

        let available = self
            .available
            .checked_sub(delta)
            .ok_or_else(|| rejected(i, "delta exceeds available resources"))?;
        let need = self.need[i]
            .checked_sub(delta)
            .ok_or_else(|| rejected(i, "delta exceeds remaining need"))?;
        let allocation = self.allocation[i]
            .checked_add(delta)
            .ok_or_else(|| rejected(i, "allocation overflow"))?;

        self.available = available;
        self.need[i] = need;
        self.allocation[i] = allocation;
        Ok(())
    }

    /// Moves `delta` from `customer` back to the available pool.
    ///
    /// All-or-nothing, like [`grant`](Self::grant).
    pub fn release(
        &mut self,
        customer: CustomerId,
        delta: &ResourceVector,
    ) -> Result<(), StateError> {
        let i = self.row_index(customer, delta)?;

        let allocation = self.allocation[i]
            .checked_sub(delta)
            .ok_or_else(|| rejected(i, "delta exceeds current allocation"))?;
        let available = self
            .available
            .checked_add(delta)
            .ok_or_else(|| rejected(i, "available overflow"))?;
        let need = self.need[i]
            .checked_add(delta)
            .ok_or_else(|| rejected(i, "need overflow"))?;

        self.available = available;
        self.need[i] = need;
        self.allocation[i] = allocation;
        Ok(())
    }

    /// Re-derives the invariants from scratch.
    ///
    /// Transitions preserve them by construction; this exists for tests
    /// and debug assertions.
    pub fn check_invariants(&self) -> Result<(), StateError> {
        for (i, ((max, held), need)) in self
            .maximum
            .iter()
            .zip(&self.allocation)
            .zip(&self.need)
            .enumerate()
        {
            if held.checked_add(need).as_ref() != Some(max) {
                return Err(StateError::InvariantViolation(format!(
                    "customer {i}: allocation [{held}] + need [{need}] != maximum [{max}]"
                )));
            }
        }

        for j in 0..self.num_resources() {
            let held: u64 = self.allocation.iter().map(|row| u64::from(row[j])).sum();
            let total = held + u64::from(self.available[j]);
            if total != u64::from(self.total_supply[j]) {
                return Err(StateError::InvariantViolation(format!(
                    "resource {j}: available + allocated = {total}, supply = {}",
                    self.total_supply[j]
                )));
            }
        }
        Ok(())
    }

    /// Returns an immutable copy for reporting.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            maximum: self.maximum.clone(),
            allocation: self.allocation.clone(),
            need: self.need.clone(),
            available: self.available.clone(),
        }
    }

    /// Returns a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "State: {} customers, {} resource types, available [{}] of supply [{}]",
            self.num_customers(),
            self.num_resources(),
            self.available,
            self.total_supply,
        )
    }

    fn row_index(&self, customer: CustomerId, delta: &ResourceVector) -> Result<usize, StateError> {
        if !self.contains(customer) {
            return Err(rejected(
                customer.index(),
                &format!("unknown customer (have {})", self.num_customers()),
            ));
        }
        if delta.len() != self.num_resources() {
            return Err(rejected(
                customer.index(),
                &format!(
                    "delta has {} resource values, expected {}",
                    delta.len(),
                    self.num_resources()
                ),
            ));
        }
        Ok(customer.index())
    }
}

fn rejected(customer: usize, detail: &str) -> StateError {
    StateError::TransitionRejected {
        customer,
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rv(counts: &[u32]) -> ResourceVector {
        ResourceVector::new(counts.to_vec())
    }

    /// The classic five-customer, three-resource example.
    fn textbook() -> SystemState {
        SystemState::new(
            rv(&[3, 3, 2]),
            vec![
                rv(&[7, 5, 3]),
                rv(&[3, 2, 2]),
                rv(&[9, 0, 2]),
                rv(&[2, 2, 2]),
                rv(&[4, 3, 3]),
            ],
        )
        .with_allocation(vec![
            rv(&[0, 1, 0]),
            rv(&[2, 0, 0]),
            rv(&[3, 0, 2]),
            rv(&[2, 1, 1]),
            rv(&[0, 0, 2]),
        ])
        .validate()
        .unwrap()
    }

    #[test]
    fn test_validate_textbook() {
        let s = textbook();
        assert_eq!(s.num_customers(), 5);
        assert_eq!(s.num_resources(), 3);
        assert_eq!(s.total_supply(), &rv(&[10, 5, 7]));
        assert_eq!(s.need(CustomerId(0)), Some(&rv(&[7, 4, 3])));
        assert_eq!(s.need(CustomerId(4)), Some(&rv(&[4, 3, 1])));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_default_allocation_is_zero() {
        let s = SystemState::new(rv(&[10, 5]), vec![rv(&[4, 2]), rv(&[1, 1])])
            .validate()
            .unwrap();
        assert!(s.allocation_rows().iter().all(ResourceVector::is_zero));
        assert_eq!(s.need_rows(), s.maximum_rows());
        assert_eq!(s.total_supply(), s.available());
    }

    #[test]
    fn test_no_customers() {
        let err = SystemState::new(rv(&[1, 2]), vec![]).validate().unwrap_err();
        assert_eq!(err, StateError::NoCustomers);
    }

    #[test]
    fn test_no_resource_types() {
        let err = SystemState::new(rv(&[]), vec![rv(&[])]).validate().unwrap_err();
        assert_eq!(err, StateError::NoResourceTypes);
    }

    #[test]
    fn test_maximum_width_mismatch() {
        let err = SystemState::new(rv(&[1, 2, 3]), vec![rv(&[1, 2, 3]), rv(&[1, 2])])
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            StateError::ResourceCountMismatch {
                matrix: "maximum",
                customer: 1,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_allocation_row_count_mismatch() {
        let err = SystemState::new(rv(&[1]), vec![rv(&[1]), rv(&[1])])
            .with_allocation(vec![rv(&[0])])
            .validate()
            .unwrap_err();
        assert!(matches!(err, StateError::CustomerCountMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_allocation_exceeds_maximum() {
        let err = SystemState::new(rv(&[1, 1]), vec![rv(&[2, 2])])
            .with_allocation(vec![rv(&[1, 3])])
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            StateError::AllocationExceedsMaximum { customer: 0, resource: 1, allocated: 3, maximum: 2 }
        ));
    }

    #[test]
    fn test_supply_overflow() {
        let err = SystemState::new(rv(&[u32::MAX]), vec![rv(&[5])])
            .with_allocation(vec![rv(&[1])])
            .validate()
            .unwrap_err();
        assert_eq!(err, StateError::SupplyOverflow { resource: 0 });
    }

    #[test]
    fn test_grant_moves_resources() {
        let mut s = textbook();
        s.grant(CustomerId(1), &rv(&[1, 0, 2])).unwrap();
        assert_eq!(s.available(), &rv(&[2, 3, 0]));
        assert_eq!(s.allocation(CustomerId(1)), Some(&rv(&[3, 0, 2])));
        assert_eq!(s.need(CustomerId(1)), Some(&rv(&[0, 2, 0])));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_grant_failure_leaves_state_untouched() {
        let mut s = textbook();
        let before = s.clone();
        // Within available but above customer 3's need (0 1 1).
        assert!(s.grant(CustomerId(3), &rv(&[1, 0, 0])).is_err());
        assert_eq!(s, before);
        // Above available.
        assert!(s.grant(CustomerId(0), &rv(&[4, 0, 0])).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn test_release_moves_resources_back() {
        let mut s = textbook();
        s.release(CustomerId(2), &rv(&[3, 0, 2])).unwrap();
        assert_eq!(s.available(), &rv(&[6, 3, 4]));
        assert!(s.allocation(CustomerId(2)).unwrap().is_zero());
        assert_eq!(s.need(CustomerId(2)), Some(&rv(&[9, 0, 2])));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_release_above_allocation_rejected() {
        let mut s = textbook();
        let before = s.clone();
        let err = s.release(CustomerId(2), &rv(&[4, 0, 0])).unwrap_err();
        assert!(matches!(err, StateError::TransitionRejected { customer: 2, .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn test_transition_rejects_unknown_customer_and_bad_width() {
        let mut s = textbook();
        assert!(s.grant(CustomerId(5), &rv(&[0, 0, 0])).is_err());
        assert!(s.release(CustomerId(0), &rv(&[0, 0])).is_err());
    }

    #[test]
    fn test_snapshot_matches_state() {
        let s = textbook();
        let snap = s.snapshot();
        assert_eq!(snap.available, *s.available());
        assert_eq!(snap.need, s.need_rows());
        assert_eq!(snap.num_customers(), 5);
    }

    #[test]
    fn test_summary() {
        let summary = textbook().summary();
        assert!(summary.contains("5 customers"));
        assert!(summary.contains("available [3 3 2]"));
        assert!(summary.contains("supply [10 5 7]"));
    }
}
