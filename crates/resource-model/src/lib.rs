// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # resource-model
//!
//! The data model shared by every crate in the simulator:
//!
//! - [`ResourceVector`] — `M` non-negative counts, one per resource type.
//!   The index *is* the resource type; there are no names.
//! - [`CustomerId`] — a customer's position in `[0, N)`.
//! - [`SystemState`] — available resources plus the per-customer
//!   `maximum`, `allocation` and `need` rows, with a **type-state pattern**
//!   (`Unchecked` → `Validated`).
//! - [`StateSnapshot`] — an immutable copy of the state for reporting.
//!
//! # Invariants
//!
//! A `SystemState<Validated>` always satisfies, for every customer `i` and
//! resource `j`:
//!
//! ```text
//! allocation[i][j] + need[i][j] == maximum[i][j]
//! available[j] + Σ_i allocation[i][j] == total_supply[j]
//! ```
//!
//! `total_supply` is fixed at validation. The only mutators, [`grant`] and
//! [`release`], are all-or-nothing: they compute every new row before
//! writing any of them.
//!
//! [`grant`]: SystemState::grant
//! [`release`]: SystemState::release
//!
//! # Example
//! ```
//! use resource_model::{CustomerId, ResourceVector, SystemState};
//!
//! let state = SystemState::new(
//!     ResourceVector::from(vec![3, 3, 2]),
//!     vec![ResourceVector::from(vec![7, 5, 3]), ResourceVector::from(vec![3, 2, 2])],
//! )
//! .validate()
//! .unwrap();
//!
//! assert_eq!(state.num_customers(), 2);
//! assert_eq!(state.need(CustomerId(1)).unwrap().as_slice(), &[3, 2, 2]);
//! ```

mod customer;
mod error;
pub mod state;
mod snapshot;
mod vector;

pub use customer::CustomerId;
pub use error::StateError;
pub use snapshot::{CustomerRow, StateSnapshot};
pub use state::SystemState;
pub use vector::ResourceVector;
