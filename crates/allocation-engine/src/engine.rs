// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The allocation engine: sole owner of the live [`SystemState`].

use crate::{
    Command, Decision, DecisionStats, DenialReason, EngineConfig, EngineError, Operation,
    Outcome, Response,
};
use resource_model::{CustomerId, ResourceVector, StateSnapshot, SystemState};
use safety_checker::{BankersScan, SafeSequence, Safety, SafetyStrategy};
use std::time::Instant;

/// Decides requests and releases against a validated state.
///
/// # Example
/// ```
/// use allocation_engine::{AllocationEngine, Outcome};
/// use resource_model::{CustomerId, ResourceVector, SystemState};
///
/// let state = SystemState::new(
///     ResourceVector::from([3, 3]),
///     vec![ResourceVector::from([2, 2]), ResourceVector::from([3, 1])],
/// )
/// .validate()
/// .unwrap();
///
/// let mut engine = AllocationEngine::new(state);
/// let decision = engine.request(CustomerId(0), ResourceVector::from([1, 1])).unwrap();
/// assert_eq!(decision.outcome, Outcome::Granted);
/// assert_eq!(engine.state().available(), &ResourceVector::from([2, 2]));
/// ```
pub struct AllocationEngine {
    state: SystemState,
    checker: Box<dyn SafetyStrategy>,
    stats: DecisionStats,
}

impl AllocationEngine {
    /// Creates an engine that uses the Banker's scan.
    pub fn new(state: SystemState) -> Self {
        Self::with_strategy(state, Box::new(BankersScan::new()))
    }

    /// Creates an engine with a specific safety checker.
    pub fn with_strategy(state: SystemState, checker: Box<dyn SafetyStrategy>) -> Self {
        tracing::info!(
            "engine created with {} customers, {} resource types, strategy '{}'",
            state.num_customers(),
            state.num_resources(),
            checker.name()
        );
        Self {
            state,
            checker,
            stats: DecisionStats::default(),
        }
    }

    /// Creates an engine with the checker named in `config`.
    pub fn from_config(config: &EngineConfig, state: SystemState) -> Result<Self, EngineError> {
        let checker = config.create_strategy()?;
        Ok(Self::with_strategy(state, checker))
    }

    /// Evaluates a request for `delta` more resources.
    ///
    /// Checks run in a fixed order: remaining need, then availability,
    /// then safety of the resulting state. The first failing check names
    /// the denial. A granted request carries the safe sequence that
    /// justified it.
    pub fn request(
        &mut self,
        customer: CustomerId,
        delta: ResourceVector,
    ) -> Result<Decision, EngineError> {
        self.validate_command(customer, &delta)?;
        let i = customer.index();

        let denial = if !delta.fits_within(&self.state.need_rows()[i]) {
            Some(DenialReason::ExceedsNeed)
        } else if !delta.fits_within(self.state.available()) {
            Some(DenialReason::InsufficientAvailable)
        } else {
            None
        };
        if let Some(reason) = denial {
            let outcome = Outcome::Denied(reason);
            return Ok(self.decide(Operation::Request, customer, delta, outcome, None));
        }

        let mut candidate = self.state.clone();
        candidate.grant(customer, &delta)?;

        let start = Instant::now();
        let verdict = self.checker.check_state(&candidate);
        self.stats.record_safety_check(start.elapsed());

        match verdict? {
            Safety::Safe { sequence } => {
                self.state = candidate;
                let sequence = Some(sequence);
                Ok(self.decide(Operation::Request, customer, delta, Outcome::Granted, sequence))
            }
            Safety::Unsafe { blocked } => {
                tracing::trace!(
                    "candidate for customer {customer} leaves {} customers blocked",
                    blocked.len()
                );
                Ok(self.decide(
                    Operation::Request,
                    customer,
                    delta,
                    Outcome::Denied(DenialReason::UnsafeState),
                    None,
                ))
            }
        }
    }

    /// Evaluates a release of `delta` resources.
    ///
    /// Giving resources back cannot turn a safe state unsafe, so no safety
    /// check runs.
    pub fn release(
        &mut self,
        customer: CustomerId,
        delta: ResourceVector,
    ) -> Result<Decision, EngineError> {
        self.validate_command(customer, &delta)?;
        let i = customer.index();

        if !delta.fits_within(&self.state.allocation_rows()[i]) {
            return Ok(self.decide(
                Operation::Release,
                customer,
                delta,
                Outcome::Denied(DenialReason::ExceedsAllocation),
                None,
            ));
        }

        self.state.release(customer, &delta)?;
        Ok(self.decide(Operation::Release, customer, delta, Outcome::Released, None))
    }

    /// Dispatches one command.
    pub fn apply(&mut self, command: Command) -> Result<Response, EngineError> {
        match command {
            Command::Request { customer, delta } => {
                self.request(customer, delta).map(Response::Decision)
            }
            Command::Release { customer, delta } => {
                self.release(customer, delta).map(Response::Decision)
            }
            Command::Dump => {
                self.stats.record_dump();
                Ok(Response::Snapshot(self.snapshot()))
            }
        }
    }

    /// Returns an immutable copy of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Runs the safety checker on the current state.
    pub fn check_safety(&self) -> Result<Safety, EngineError> {
        let safety = self.checker.check_state(&self.state)?;
        tracing::debug!("current state: {safety}");
        Ok(safety)
    }

    /// Returns the live state.
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Returns the decision counters.
    pub fn stats(&self) -> &DecisionStats {
        &self.stats
    }

    /// Returns the safety checker's name.
    pub fn strategy_name(&self) -> &str {
        self.checker.name()
    }

    /// Consumes the engine and returns its state.
    pub fn into_state(self) -> SystemState {
        self.state
    }

    fn validate_command(
        &mut self,
        customer: CustomerId,
        delta: &ResourceVector,
    ) -> Result<(), EngineError> {
        if !self.state.contains(customer) {
            self.stats.record_rejection();
            return Err(EngineError::InvalidCustomer {
                customer: customer.index(),
                customers: self.state.num_customers(),
            });
        }
        if delta.len() != self.state.num_resources() {
            self.stats.record_rejection();
            return Err(EngineError::DimensionMismatch {
                expected: self.state.num_resources(),
                actual: delta.len(),
            });
        }
        Ok(())
    }

    fn decide(
        &mut self,
        operation: Operation,
        customer: CustomerId,
        delta: ResourceVector,
        outcome: Outcome,
        sequence: Option<SafeSequence>,
    ) -> Decision {
        let decision = Decision {
            operation,
            customer,
            delta,
            outcome,
            available: self.state.available().clone(),
            sequence,
        };
        tracing::debug!("{}", decision.reason());
        self.stats.record_decision(&decision);
        decision
    }
}

impl std::fmt::Debug for AllocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationEngine")
            .field("state", &self.state)
            .field("checker", &self.checker.name())
            .field("stats", &self.stats)
            .finish()
    }
}
