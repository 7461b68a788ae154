// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for input parsing and stream processing.

use allocation_engine::EngineError;
use resource_model::StateError;
use std::path::PathBuf;

/// Errors raised while reading customer, allocation, or command input.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// An input file could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A command stream failed mid-read.
    #[error("failed to read command stream: {0}")]
    Read(#[source] std::io::Error),

    /// A row of the customer or allocation file holds a non-numeric value.
    #[error("line {line}: {detail}")]
    Malformed { line: usize, detail: String },

    /// A row of the customer or allocation file has the wrong width.
    #[error("line {line}: expected {expected} resource counts, found {actual}")]
    ColumnMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A command line could not be parsed.
    #[error("malformed command on line {line}: {detail}")]
    MalformedCommand { line: usize, detail: String },

    /// The rows read do not form a valid initial state.
    #[error("invalid initial state: {0}")]
    State(#[from] StateError),

    /// The requested report format does not exist.
    #[error("unknown report format '{0}'; expected 'text' or 'json'")]
    UnknownFormat(String),
}

/// Errors that stop a command stream run.
///
/// Everything processed before the error has already been written to
/// the report.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A malformed command under [`MalformedPolicy::Abort`](allocation_engine::MalformedPolicy::Abort).
    #[error(transparent)]
    Malformed(InputError),

    /// The command stream itself could not be read.
    #[error(transparent)]
    Input(InputError),

    /// The engine could not evaluate the command on `line`.
    #[error("command on line {line} rejected: {source}")]
    Engine {
        line: usize,
        #[source]
        source: EngineError,
    },

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),

    /// A report entry could not be encoded as JSON.
    #[error("failed to encode report entry: {0}")]
    Encode(#[from] serde_json::Error),
}
