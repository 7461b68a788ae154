// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for state construction and transitions.

/// Errors raised while validating or mutating a [`crate::SystemState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The state has no customers.
    #[error("customer count is zero")]
    NoCustomers,

    /// The available-resources vector is empty.
    #[error("resource type count is zero")]
    NoResourceTypes,

    /// A per-customer row has the wrong number of resource values.
    #[error("{matrix} row for customer {customer} has {actual} resource values, expected {expected}")]
    ResourceCountMismatch {
        matrix: &'static str,
        customer: usize,
        expected: usize,
        actual: usize,
    },

    /// The initial allocation has a different number of rows than there are customers.
    #[error("initial allocation has {actual} rows, expected one per customer ({expected})")]
    CustomerCountMismatch { expected: usize, actual: usize },

    /// A customer's initial allocation is above its declared maximum.
    #[error("customer {customer} holds {allocated} of resource {resource}, above its maximum of {maximum}")]
    AllocationExceedsMaximum {
        customer: usize,
        resource: usize,
        allocated: u32,
        maximum: u32,
    },

    /// The total supply of a resource does not fit in a `u32`.
    #[error("total supply of resource {resource} overflows")]
    SupplyOverflow { resource: usize },

    /// A grant or release could not be applied to the state.
    #[error("transition rejected for customer {customer}: {detail}")]
    TransitionRejected { customer: usize, detail: String },

    /// A validated state no longer satisfies its invariants.
    #[error("state invariant violated: {0}")]
    InvariantViolation(String),
}
