// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time copies of the allocation state.
//!
//! A [`StateSnapshot`] is what report writers consume: it owns its data,
//! so formatting can never observe a half-applied transition.

use crate::{CustomerId, ResourceVector};

/// An immutable copy of `(maximum, allocation, need, available)`.
///
/// Rows are in customer-ID order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateSnapshot {
    pub maximum: Vec<ResourceVector>,
    pub allocation: Vec<ResourceVector>,
    pub need: Vec<ResourceVector>,
    pub available: ResourceVector,
}

/// One customer's three rows, borrowed from a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CustomerRow<'a> {
    pub customer: CustomerId,
    pub maximum: &'a ResourceVector,
    pub allocation: &'a ResourceVector,
    pub need: &'a ResourceVector,
}

impl StateSnapshot {
    /// Returns the number of customers captured.
    pub fn num_customers(&self) -> usize {
        self.maximum.len()
    }

    /// Iterates over customers in ID order.
    pub fn rows(&self) -> impl Iterator<Item = CustomerRow<'_>> {
        self.maximum
            .iter()
            .zip(&self.allocation)
            .zip(&self.need)
            .enumerate()
            .map(|(i, ((maximum, allocation), need))| CustomerRow {
                customer: CustomerId(i),
                maximum,
                allocation,
                need,
            })
    }
}
