// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Decision statistics for run summaries.
//!
//! [`DecisionStats`] tracks how many commands the engine evaluated, how
//! each was decided, and how much time went into safety checks.

use crate::{Decision, DenialReason, Operation, Outcome};
use std::time::Duration;

/// Cumulative counters over the engine's lifetime.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DecisionStats {
    /// Total requests evaluated (granted or denied).
    pub requests: u64,
    /// Total releases evaluated (applied or denied).
    pub releases: u64,
    pub granted: u64,
    pub released: u64,
    pub denied_exceeds_need: u64,
    pub denied_insufficient: u64,
    pub denied_unsafe: u64,
    pub denied_exceeds_allocation: u64,
    /// Commands rejected before evaluation (bad customer ID or width).
    pub rejected: u64,
    /// Snapshots taken.
    pub dumps: u64,
    /// Safety checks run on candidate states.
    pub safety_checks: u64,
    /// Time spent inside safety checks.
    pub safety_check_duration: Duration,
}

impl DecisionStats {
    /// Returns the total number of denials across all reasons.
    pub fn denied(&self) -> u64 {
        self.denied_exceeds_need
            + self.denied_insufficient
            + self.denied_unsafe
            + self.denied_exceeds_allocation
    }

    /// Returns granted requests as a fraction of all requests in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` if no requests have been made.
    pub fn grant_ratio(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.granted as f64 / self.requests as f64
    }

    pub(crate) fn record_decision(&mut self, decision: &Decision) {
        match decision.operation {
            Operation::Request => self.requests += 1,
            Operation::Release => self.releases += 1,
        }
        match decision.outcome {
            Outcome::Granted => self.granted += 1,
            Outcome::Released => self.released += 1,
            Outcome::Denied(DenialReason::ExceedsNeed) => self.denied_exceeds_need += 1,
            Outcome::Denied(DenialReason::InsufficientAvailable) => self.denied_insufficient += 1,
            Outcome::Denied(DenialReason::UnsafeState) => self.denied_unsafe += 1,
            Outcome::Denied(DenialReason::ExceedsAllocation) => {
                self.denied_exceeds_allocation += 1
            }
        }
    }

    pub(crate) fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    pub(crate) fn record_dump(&mut self) {
        self.dumps += 1;
    }

    pub(crate) fn record_safety_check(&mut self, elapsed: Duration) {
        self.safety_checks += 1;
        self.safety_check_duration += elapsed;
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Decisions: {} requests ({} granted, {:.0}% grant rate), {} releases ({} applied), \
             {} denied (need {}, available {}, unsafe {}, allocation {}), {} rejected, \
             {} dumps, {} safety checks in {:.3}ms",
            self.requests,
            self.granted,
            self.grant_ratio() * 100.0,
            self.releases,
            self.released,
            self.denied(),
            self.denied_exceeds_need,
            self.denied_insufficient,
            self.denied_unsafe,
            self.denied_exceeds_allocation,
            self.rejected,
            self.dumps,
            self.safety_checks,
            self.safety_check_duration.as_secs_f64() * 1000.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_model::{CustomerId, ResourceVector};

    fn decision(operation: Operation, outcome: Outcome) -> Decision {
        Decision {
            operation,
            customer: CustomerId(0),
            delta: ResourceVector::from([1]),
            outcome,
            available: ResourceVector::from([0]),
            sequence: None,
        }
    }

    #[test]
    fn test_default() {
        let s = DecisionStats::default();
        assert_eq!(s.denied(), 0);
        assert_eq!(s.grant_ratio(), 0.0);
    }

    #[test]
    fn test_record_decisions() {
        let mut s = DecisionStats::default();
        s.record_decision(&decision(Operation::Request, Outcome::Granted));
        s.record_decision(&decision(
            Operation::Request,
            Outcome::Denied(DenialReason::UnsafeState),
        ));
        s.record_decision(&decision(Operation::Release, Outcome::Released));
        s.record_decision(&decision(
            Operation::Release,
            Outcome::Denied(DenialReason::ExceedsAllocation),
        ));

        assert_eq!(s.requests, 2);
        assert_eq!(s.releases, 2);
        assert_eq!(s.granted, 1);
        assert_eq!(s.released, 1);
        assert_eq!(s.denied(), 2);
        assert!((s.grant_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_safety_check_time_accumulates() {
        let mut s = DecisionStats::default();
        s.record_safety_check(Duration::from_micros(300));
        s.record_safety_check(Duration::from_micros(200));
        assert_eq!(s.safety_checks, 2);
        assert_eq!(s.safety_check_duration, Duration::from_micros(500));
    }

    #[test]
    fn test_summary() {
        let mut s = DecisionStats::default();
        s.record_decision(&decision(Operation::Request, Outcome::Granted));
        s.record_dump();
        s.record_rejection();
        let summary = s.summary();
        assert!(summary.contains("1 requests (1 granted, 100% grant rate)"));
        assert!(summary.contains("1 rejected"));
        assert!(summary.contains("1 dumps"));
    }
}
