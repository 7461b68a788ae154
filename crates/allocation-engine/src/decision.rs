// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Decision records: what the engine did with a request or release.

use resource_model::{CustomerId, ResourceVector};
use safety_checker::SafeSequence;
use std::fmt;

/// The kind of transition a decision refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Request,
    Release,
}

/// Why a request or release was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The request is larger than the customer's remaining need.
    ExceedsNeed,
    /// The request is larger than what is currently available.
    InsufficientAvailable,
    /// Granting the request would leave no safe completion order.
    UnsafeState,
    /// The release is larger than what the customer holds.
    ExceedsAllocation,
}

impl DenialReason {
    /// Returns a short human-readable description.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::ExceedsNeed => "exceeds maximum need",
            DenialReason::InsufficientAvailable => "insufficient available resources",
            DenialReason::UnsafeState => "would produce an unsafe state",
            DenialReason::ExceedsAllocation => "exceeds current allocation",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one request or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Granted,
    Released,
    Denied(DenialReason),
}

/// An audit record for one request or release.
///
/// The customer and delta are echoed back so the record stands on its
/// own in a report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Decision {
    pub operation: Operation,
    pub customer: CustomerId,
    pub delta: ResourceVector,
    pub outcome: Outcome,
    /// Available resources once the decision has taken effect.
    pub available: ResourceVector,
    /// The safe completion order that justified a grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SafeSequence>,
}

impl Decision {
    /// Returns `true` if the transition was applied.
    pub fn is_accepted(&self) -> bool {
        !matches!(self.outcome, Outcome::Denied(_))
    }

    /// Returns the denial reason, if denied.
    pub fn denial(&self) -> Option<DenialReason> {
        match self.outcome {
            Outcome::Denied(reason) => Some(reason),
            _ => None,
        }
    }

    /// Returns a human-readable account of the decision.
    pub fn reason(&self) -> String {
        let verb = match self.operation {
            Operation::Request => "request",
            Operation::Release => "release",
        };
        match self.outcome {
            Outcome::Granted => match &self.sequence {
                Some(sequence) => format!(
                    "{verb} [{}] by customer {} granted, safe sequence {sequence}",
                    self.delta, self.customer
                ),
                None => format!("{verb} [{}] by customer {} granted", self.delta, self.customer),
            },
            Outcome::Released => {
                format!("{verb} [{}] by customer {} applied", self.delta, self.customer)
            }
            Outcome::Denied(reason) => format!(
                "{verb} [{}] by customer {} denied: {reason}",
                self.delta, self.customer
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(operation: Operation, outcome: Outcome) -> Decision {
        Decision {
            operation,
            customer: CustomerId(2),
            delta: ResourceVector::from([1, 0, 2]),
            outcome,
            available: ResourceVector::from([2, 3, 0]),
            sequence: None,
        }
    }

    #[test]
    fn test_accepted() {
        assert!(decision(Operation::Request, Outcome::Granted).is_accepted());
        assert!(decision(Operation::Release, Outcome::Released).is_accepted());
        let denied = decision(Operation::Request, Outcome::Denied(DenialReason::UnsafeState));
        assert!(!denied.is_accepted());
        assert_eq!(denied.denial(), Some(DenialReason::UnsafeState));
    }

    #[test]
    fn test_reason_text() {
        let denied = decision(Operation::Request, Outcome::Denied(DenialReason::ExceedsNeed));
        assert_eq!(
            denied.reason(),
            "request [1 0 2] by customer 2 denied: exceeds maximum need"
        );

        let mut granted = decision(Operation::Request, Outcome::Granted);
        granted.sequence = Some(SafeSequence::new(vec![CustomerId(2), CustomerId(0)]));
        assert!(granted.reason().ends_with("granted, safe sequence <2, 0>"));

        let released = decision(Operation::Release, Outcome::Released);
        assert_eq!(released.reason(), "release [1 0 2] by customer 2 applied");
    }

    #[test]
    fn test_serialize() {
        let d = decision(
            Operation::Release,
            Outcome::Denied(DenialReason::ExceedsAllocation),
        );
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains(r#""outcome":{"status":"denied","reason":"exceeds_allocation"}"#));
        assert!(!json.contains("sequence"));
    }
}
