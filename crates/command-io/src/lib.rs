// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # command-io
//!
//! File formats around the allocation engine:
//!
//! - [`customers`]: the maxima file (`customer.txt`) and the optional
//!   initial allocation file, both comma-separated.
//! - [`commands`]: the command stream (`RQ`, `RL`, `*`).
//! - [`report`]: the text report (`result.txt`) and a JSON-lines variant.
//! - [`driver`]: runs a command stream through an engine into a report.
//!
//! # Example
//! ```
//! use allocation_engine::{AllocationEngine, MalformedPolicy};
//! use command_io::{commands::parse_commands, customers, driver, TextReport};
//!
//! let maximum = customers::parse_rows("2,1\n1,2\n", 2).unwrap();
//! let state = customers::build_state(&[2, 2], maximum, None).validate().unwrap();
//! let mut engine = AllocationEngine::new(state);
//!
//! let mut report = TextReport::new(Vec::new());
//! let summary = driver::process_stream(
//!     &mut engine,
//!     parse_commands("RQ 0 1 1\n", 2),
//!     &mut report,
//!     MalformedPolicy::Abort,
//! )
//! .unwrap();
//!
//! assert_eq!(summary.processed, 1);
//! assert_eq!(
//!     String::from_utf8(report.into_inner()).unwrap(),
//!     "Allocate to customer 0 the resources 1 1 \n"
//! );
//! ```

pub mod commands;
pub mod customers;
pub mod driver;
mod error;
pub mod report;

pub use driver::RunSummary;
pub use error::{DriverError, InputError};
pub use report::{create_writer, JsonReport, ReportFormat, ReportWriter, TextReport};
