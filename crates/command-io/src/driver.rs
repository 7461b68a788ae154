// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Feeds a command stream through the engine into a report.
//!
//! Commands are applied strictly in order, one report entry each. What
//! happens on a bad line depends on the [`MalformedPolicy`]:
//!
//! - `Abort` stops at the first bad line. Entries for earlier lines have
//!   already been written and flushed.
//! - `Skip` logs a warning, counts the line, and moves on.
//!
//! A line is bad when it does not parse, or when it parses but names an
//! unknown customer or carries the wrong number of counts for the engine.

use crate::commands::{CommandReader, NumberedCommand};
use crate::{DriverError, InputError, ReportWriter};
use allocation_engine::{AllocationEngine, DecisionStats, EngineError, MalformedPolicy};
use std::path::Path;

/// Totals for one stream run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Commands applied and reported.
    pub processed: usize,
    /// Bad lines passed over under [`MalformedPolicy::Skip`].
    pub skipped: usize,
    /// Engine counters at the end of the run.
    pub stats: DecisionStats,
}

impl RunSummary {
    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Run: {} commands processed, {} skipped\n{}",
            self.processed,
            self.skipped,
            self.stats.summary()
        )
    }
}

/// Applies every command to `engine` and writes each response to `sink`.
///
/// The sink is flushed before returning, on success and on error.
pub fn process_stream<I>(
    engine: &mut AllocationEngine,
    commands: I,
    sink: &mut dyn ReportWriter,
    policy: MalformedPolicy,
) -> Result<RunSummary, DriverError>
where
    I: IntoIterator<Item = Result<NumberedCommand, InputError>>,
{
    let mut summary = RunSummary::default();
    let result = drive(engine, commands, sink, policy, &mut summary);
    let flushed = sink.finish();
    result?;
    flushed?;

    summary.stats = engine.stats().clone();
    tracing::info!(
        "processed {} commands, skipped {}",
        summary.processed,
        summary.skipped
    );
    Ok(summary)
}

/// Opens `path` and runs it through [`process_stream`].
pub fn process_file(
    engine: &mut AllocationEngine,
    path: &Path,
    sink: &mut dyn ReportWriter,
    policy: MalformedPolicy,
) -> Result<RunSummary, DriverError> {
    let width = engine.state().num_resources();
    let reader = CommandReader::open(path, width).map_err(DriverError::Input)?;
    process_stream(engine, reader, sink, policy)
}

fn drive<I>(
    engine: &mut AllocationEngine,
    commands: I,
    sink: &mut dyn ReportWriter,
    policy: MalformedPolicy,
    summary: &mut RunSummary,
) -> Result<(), DriverError>
where
    I: IntoIterator<Item = Result<NumberedCommand, InputError>>,
{
    for item in commands {
        let (line, command) = match item {
            Ok(numbered) => numbered,
            Err(e @ InputError::MalformedCommand { .. }) => match policy {
                MalformedPolicy::Abort => return Err(DriverError::Malformed(e)),
                MalformedPolicy::Skip => {
                    tracing::warn!("skipping: {e}");
                    summary.skipped += 1;
                    continue;
                }
            },
            Err(e) => return Err(DriverError::Input(e)),
        };

        match engine.apply(command) {
            Ok(response) => {
                sink.write_response(&response)?;
                summary.processed += 1;
            }
            Err(
                source @ (EngineError::InvalidCustomer { .. }
                | EngineError::DimensionMismatch { .. }),
            ) if policy == MalformedPolicy::Skip => {
                tracing::warn!("skipping line {line}: {source}");
                summary.skipped += 1;
            }
            Err(source) => return Err(DriverError::Engine { line, source }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_commands;
    use crate::TextReport;
    use resource_model::{ResourceVector, SystemState};

    fn engine() -> AllocationEngine {
        let state = SystemState::new(
            ResourceVector::from([2, 2]),
            vec![ResourceVector::from([2, 1]), ResourceVector::from([1, 2])],
        )
        .validate()
        .unwrap();
        AllocationEngine::new(state)
    }

    fn run(
        text: &str,
        policy: MalformedPolicy,
    ) -> (Result<RunSummary, DriverError>, String) {
        let mut engine = engine();
        let mut sink = TextReport::new(Vec::new());
        let result = process_stream(&mut engine, parse_commands(text, 2), &mut sink, policy);
        (result, String::from_utf8(sink.into_inner()).unwrap())
    }

    #[test]
    fn test_process_all() {
        let (result, text) = run("RQ 0 1 1\nRL 0 1 0\n", MalformedPolicy::Abort);
        let summary = result.unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.stats.granted, 1);
        assert_eq!(summary.stats.released, 1);
        assert_eq!(
            text,
            "Allocate to customer 0 the resources 1 1 \n\
             Release from customer 0 the resources 1 0 \n"
        );
    }

    #[test]
    fn test_abort_keeps_earlier_output() {
        let (result, text) = run("RQ 0 1 1\nRQ 0 x 1\nRL 0 1 1\n", MalformedPolicy::Abort);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            DriverError::Malformed(InputError::MalformedCommand { line: 2, .. })
        ));
        assert_eq!(text, "Allocate to customer 0 the resources 1 1 \n");
    }

    #[test]
    fn test_skip_continues() {
        let (result, text) = run("RQ 0 1 1\nRQ 0 x 1\nRL 0 1 1\n", MalformedPolicy::Skip);
        let summary = result.unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_invalid_customer_follows_policy() {
        let (result, text) = run("RQ 5 1 1\n*\n", MalformedPolicy::Abort);
        assert!(matches!(
            result.unwrap_err(),
            DriverError::Engine {
                line: 1,
                source: EngineError::InvalidCustomer { customer: 5, .. }
            }
        ));
        assert!(text.is_empty());

        let (result, text) = run("RQ 5 1 1\n*\n", MalformedPolicy::Skip);
        let summary = result.unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.stats.rejected, 1);
        assert!(text.starts_with("MAXIMUM | ALLOCATION | NEED\n"));
    }

    #[test]
    fn test_summary_text() {
        let (result, _) = run("*\n", MalformedPolicy::Abort);
        let summary = result.unwrap();
        assert!(summary.summary().starts_with("Run: 1 commands processed, 0 skipped"));
    }
}
