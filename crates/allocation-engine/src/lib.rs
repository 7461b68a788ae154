// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # allocation-engine
//!
//! Owns the allocation state and decides every request and release.
//!
//! The engine takes:
//! - A validated `SystemState` from `resource-model`.
//! - A `SafetyStrategy` from `safety-checker`.
//!
//! and turns a sequential stream of [`Command`]s into [`Decision`]s.
//!
//! # Request Pipeline
//! ```text
//! request(customer, delta)
//!     │  delta <= need?        ── no ──► Denied(ExceedsNeed)
//!     │  delta <= available?   ── no ──► Denied(InsufficientAvailable)
//!     ▼
//! candidate = state.clone() + delta
//!     │  safety check(candidate)
//!     ├── safe   ──► state = candidate, Granted
//!     └── unsafe ──► candidate dropped, Denied(UnsafeState)
//! ```
//!
//! The live state is only ever replaced wholesale, so a denied request
//! can never leave a partial change behind. Releases skip the safety
//! check: giving resources back cannot make a safe state unsafe.
//!
//! # Concurrency
//! Mutating operations take `&mut self`; the borrow checker serializes
//! them. Callers that ingest commands from several sources must put the
//! engine behind a single lock.

mod command;
mod config;
mod decision;
mod engine;
mod error;
mod metrics;

pub use command::{Command, Response};
pub use config::{EngineConfig, MalformedPolicy};
pub use decision::{Decision, DenialReason, Operation, Outcome};
pub use engine::AllocationEngine;
pub use error::EngineError;
pub use metrics::DecisionStats;
