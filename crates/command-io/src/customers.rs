// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Readers for the customer maxima and initial allocation files.
//!
//! Both files share one layout: a row per customer, comma-separated
//! non-negative counts, one column per resource type.
//!
//! ```text
//! 7,5,3
//! 3,2,2
//! 9,0,2
//! ```

use crate::InputError;
use resource_model::state::Unchecked;
use resource_model::{ResourceVector, SystemState};
use std::path::Path;

/// Default maxima filename.
pub const CUSTOMERS_FILE: &str = "customer.txt";

/// Parses comma-separated rows, each exactly `width` counts wide.
///
/// Blank lines are skipped. Surrounding whitespace around each value is
/// ignored.
pub fn parse_rows(content: &str, width: usize) -> Result<Vec<ResourceVector>, InputError> {
    let mut rows = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let counts = text
            .split(',')
            .map(|field| {
                let field = field.trim();
                field.parse::<u32>().map_err(|_| InputError::Malformed {
                    line,
                    detail: format!("'{field}' is not a non-negative count"),
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        if counts.len() != width {
            return Err(InputError::ColumnMismatch {
                line,
                expected: width,
                actual: counts.len(),
            });
        }
        rows.push(ResourceVector::new(counts));
    }
    Ok(rows)
}

/// Reads rows from a file; see [`parse_rows`].
pub fn read_rows(path: &Path, width: usize) -> Result<Vec<ResourceVector>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_rows(&content, width)?;
    tracing::debug!("read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Builds an unvalidated state from in-memory inputs.
pub fn build_state(
    resources: &[u32],
    maximum: Vec<ResourceVector>,
    allocation: Option<Vec<ResourceVector>>,
) -> SystemState<Unchecked> {
    let state = SystemState::new(ResourceVector::from(resources.to_vec()), maximum);
    match allocation {
        Some(rows) => state.with_allocation(rows),
        None => state,
    }
}

/// Loads and validates the initial state.
///
/// `resources` holds the available count of each type; its length fixes
/// the number of resource types every file row must match. Without an
/// allocation file every customer starts holding nothing.
pub fn load_state(
    resources: &[u32],
    customers: &Path,
    allocation: Option<&Path>,
) -> Result<SystemState, InputError> {
    let width = resources.len();
    let maximum = read_rows(customers, width)?;
    let allocation = allocation.map(|path| read_rows(path, width)).transpose()?;

    let state = build_state(resources, maximum, allocation).validate()?;
    tracing::info!("{}", state.summary());
    Ok(state)
}
