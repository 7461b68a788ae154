// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Report writers.
//!
//! | Format | Layout |
//! |---|---|
//! | `text` | one line per decision, table per dump (`result.txt` layout) |
//! | `json` | one JSON object per line per response |

use crate::{DriverError, InputError};
use allocation_engine::{Decision, DenialReason, Outcome, Response};
use resource_model::{ResourceVector, StateSnapshot};
use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;

/// Default report filename.
pub const OUTPUT_FILE: &str = "result.txt";

/// Available report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(InputError::UnknownFormat(other.to_string())),
        }
    }
}

/// A destination for engine responses.
pub trait ReportWriter {
    /// Writes one response.
    fn write_response(&mut self, response: &Response) -> Result<(), DriverError>;

    /// Flushes buffered output.
    fn finish(&mut self) -> Result<(), DriverError>;
}

/// Creates a writer of the given format over `out`.
pub fn create_writer<'a, W: Write + 'a>(
    format: ReportFormat,
    out: W,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        ReportFormat::Text => Box::new(TextReport::new(out)),
        ReportFormat::Json => Box::new(JsonReport::new(out)),
    }
}

// ── Text ───────────────────────────────────────────────────────

/// Writes the plain-text report.
pub struct TextReport<W> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TextReport<W> {
    fn write_response(&mut self, response: &Response) -> Result<(), DriverError> {
        let text = match response {
            Response::Decision(decision) => format_decision(decision),
            Response::Snapshot(snapshot) => format_snapshot(snapshot),
        };
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DriverError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Renders each count followed by a single space: `"1 0 2 "`.
fn counts(v: &ResourceVector) -> String {
    v.iter().fold(String::new(), |mut s, n| {
        let _ = write!(s, "{n} ");
        s
    })
}

/// Renders one decision as a report line, newline included.
pub fn format_decision(d: &Decision) -> String {
    let i = d.customer;
    let v = counts(&d.delta);
    match d.outcome {
        Outcome::Granted => format!("Allocate to customer {i} the resources {v}\n"),
        Outcome::Released => format!("Release from customer {i} the resources {v}\n"),
        Outcome::Denied(DenialReason::ExceedsNeed) => format!(
            "The customer {i} request {v}was denied because exceed its maximum need\n"
        ),
        Outcome::Denied(DenialReason::InsufficientAvailable) => format!(
            "The resources {}are not enough to customer {i} request {v}\n",
            counts(&d.available)
        ),
        Outcome::Denied(DenialReason::UnsafeState) => format!(
            "The customer {i} request {v}was denied because result in an unsafe state\n"
        ),
        Outcome::Denied(DenialReason::ExceedsAllocation) => format!(
            "The customer {i} released {v}was denied because exceed its maximum allocation\n"
        ),
    }
}

/// Renders a dump: the per-customer table followed by the available line.
///
/// ```text
/// MAXIMUM | ALLOCATION | NEED
/// 7 5 3   | 0 1 0      | 7 4 3
/// AVAILABLE 3 3 2
/// ```
///
/// Every count in the need column and the available line is followed by
/// a space.
pub fn format_snapshot(snapshot: &StateSnapshot) -> String {
    let mut s = String::from("MAXIMUM | ALLOCATION | NEED\n");
    for row in snapshot.rows() {
        let _ = writeln!(
            s,
            "{}   | {}      | {}",
            row.maximum,
            row.allocation,
            counts(row.need)
        );
    }
    let _ = writeln!(s, "AVAILABLE {}", counts(&snapshot.available));
    s
}

// ── JSON lines ─────────────────────────────────────────────────

/// Writes one JSON object per line.
pub struct JsonReport<W> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for JsonReport<W> {
    fn write_response(&mut self, response: &Response) -> Result<(), DriverError> {
        serde_json::to_writer(&mut self.out, response)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DriverError> {
        self.out.flush()?;
        Ok(())
    }
}
