// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Customer identity.

use std::fmt;

/// A customer's identity: its row index in every per-customer matrix.
///
/// Valid IDs lie in `[0, N)` where `N` is fixed when the state is
/// validated. Range checks happen where IDs enter the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CustomerId(pub usize);

impl CustomerId {
    /// Returns the row index for this customer.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for CustomerId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
