// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Commands consumed by the engine and the responses it produces.

use crate::Decision;
use resource_model::{CustomerId, ResourceVector, StateSnapshot};

/// One entry of the command stream.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Ask for `delta` more resources on behalf of `customer`.
    Request {
        customer: CustomerId,
        delta: ResourceVector,
    },
    /// Give `delta` resources back on behalf of `customer`.
    Release {
        customer: CustomerId,
        delta: ResourceVector,
    },
    /// Capture the whole state for reporting.
    Dump,
}

/// What the engine hands back for a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Decision(Decision),
    Snapshot(StateSnapshot),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tagged() {
        let rl = Command::Release {
            customer: CustomerId(1),
            delta: ResourceVector::from([0, 2]),
        };
        let json = serde_json::to_string(&rl).unwrap();
        assert_eq!(json, r#"{"op":"release","customer":1,"delta":[0,2]}"#);
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rl);

        let dump: Command = serde_json::from_str(r#"{"op":"dump"}"#).unwrap();
        assert_eq!(dump, Command::Dump);
    }
}
