// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The Banker's Algorithm safety scan (work/finish simulation).
//!
//! ```text
//! work     = available
//! finished = [false; N]
//! loop:
//!     i = lowest unfinished customer with need[i] <= work
//!     none  → stop
//!     some  → work += allocation[i]; finished[i] = true; push i
//! safe ⇔ every customer finished
//! ```
//!
//! After each completion the scan restarts from customer 0 rather than
//! continuing after `i`. That fixes the tie-break: among all customers
//! that are satisfiable at a given step, the lowest ID always goes first,
//! so the witness is deterministic. The verdict does not depend on the
//! tie-break, since `work` only grows.
//!
//! Cost is O(N² · M): at most N completions, each preceded by a scan of
//! at most N customers comparing M resources.

use crate::strategy::{fits, reclaim, validate_dimensions, work_from, SafetyStrategy};
use crate::{SafeSequence, Safety, SafetyError};
use resource_model::{CustomerId, ResourceVector};

/// Restart-from-lowest work/finish simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BankersScan;

impl BankersScan {
    pub fn new() -> Self {
        Self
    }
}

impl SafetyStrategy for BankersScan {
    fn name(&self) -> &str {
        "bankers"
    }

    fn check(
        &self,
        allocation: &[ResourceVector],
        need: &[ResourceVector],
        available: &ResourceVector,
    ) -> Result<Safety, SafetyError> {
        validate_dimensions(allocation, need, available)?;

        let customers = need.len();
        let mut work = work_from(available);
        let mut finished = vec![false; customers];
        let mut order = Vec::with_capacity(customers);

        while order.len() < customers {
            let next = (0..customers).find(|&i| !finished[i] && fits(&need[i], &work));
            let Some(i) = next else {
                break;
            };
            reclaim(&mut work, &allocation[i]);
            finished[i] = true;
            order.push(CustomerId(i));
            tracing::trace!(customer = i, ?work, "customer can finish");
        }

        if order.len() == customers {
            Ok(Safety::Safe {
                sequence: SafeSequence::new(order),
            })
        } else {
            let blocked: Vec<CustomerId> = (0..customers)
                .filter(|&i| !finished[i])
                .map(CustomerId)
                .collect();
            tracing::trace!(?blocked, "no remaining customer can finish");
            Ok(Safety::Unsafe { blocked })
        }
    }
}
