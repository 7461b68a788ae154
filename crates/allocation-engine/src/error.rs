// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the allocation engine.
//!
//! Denials are not errors; see [`crate::Outcome::Denied`]. An error means
//! the command could not be evaluated at all. The state is unchanged in
//! every case.

/// Errors that can occur while evaluating a command.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The command references a customer outside `[0, N)`.
    #[error("invalid customer {customer}: expected an ID below {customers}")]
    InvalidCustomer { customer: usize, customers: usize },

    /// The command's resource vector has the wrong width.
    #[error("resource vector has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// State construction or a state transition failed.
    #[error("state error: {0}")]
    State(#[from] resource_model::StateError),

    /// The safety checker could not reach a verdict.
    #[error("safety check error: {0}")]
    Safety(#[from] safety_checker::SafetyError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
