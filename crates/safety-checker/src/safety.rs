// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Safety verdicts and completion-order witnesses.

use resource_model::CustomerId;
use std::fmt;

/// An order in which every customer can finish.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SafeSequence(Vec<CustomerId>);

impl SafeSequence {
    pub fn new(order: Vec<CustomerId>) -> Self {
        Self(order)
    }

    pub fn as_slice(&self) -> &[CustomerId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for SafeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        for (k, customer) in self.0.iter().enumerate() {
            if k > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{customer}")?;
        }
        f.write_str(">")
    }
}

/// The outcome of a safety check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Safety {
    /// Every customer can finish; `sequence` is one valid order.
    Safe { sequence: SafeSequence },
    /// No complete order exists. `blocked` lists, in ID order, the
    /// customers that cannot finish whatever the others do.
    Unsafe { blocked: Vec<CustomerId> },
}

impl Safety {
    /// Returns `true` for [`Safety::Safe`].
    pub fn is_safe(&self) -> bool {
        matches!(self, Safety::Safe { .. })
    }

    /// Returns the witness sequence, if the state is safe.
    pub fn sequence(&self) -> Option<&SafeSequence> {
        match self {
            Safety::Safe { sequence } => Some(sequence),
            Safety::Unsafe { .. } => None,
        }
    }

    /// Consumes the verdict and returns the witness, if any.
    pub fn into_sequence(self) -> Option<SafeSequence> {
        match self {
            Safety::Safe { sequence } => Some(sequence),
            Safety::Unsafe { .. } => None,
        }
    }
}

impl fmt::Display for Safety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Safety::Safe { sequence } => write!(f, "safe, sequence {sequence}"),
            Safety::Unsafe { blocked } => {
                let ids: Vec<String> = blocked.iter().map(ToString::to_string).collect();
                write!(f, "unsafe, customers {} cannot finish", ids.join(", "))
            }
        }
    }
}
