// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the safety checker.

/// Errors that prevent a safety verdict from being reached.
///
/// An *unsafe* state is not an error: it is reported as
/// [`crate::Safety::Unsafe`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SafetyError {
    /// The allocation and need matrices describe different customer counts.
    #[error("allocation has {allocation_rows} rows but need has {need_rows}")]
    CustomerCountMismatch {
        allocation_rows: usize,
        need_rows: usize,
    },

    /// A row's width differs from the available vector's.
    #[error("{matrix} row for customer {customer} has {actual} resource values, expected {expected}")]
    ResourceCountMismatch {
        matrix: &'static str,
        customer: usize,
        expected: usize,
        actual: usize,
    },

    /// The exhaustive search was asked to enumerate too many orders.
    #[error("exhaustive search supports at most {limit} customers, got {customers}")]
    TooManyCustomers { customers: usize, limit: usize },

    /// No strategy is registered under this name.
    #[error("unknown safety strategy '{0}'; expected 'bankers' or 'exhaustive'")]
    UnknownStrategy(String),
}
