// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! resources = [10, 5, 7]
//! customers_file = "customer.txt"
//! commands_file = "commands.txt"
//! output_file = "result.txt"
//! allocation_file = "allocation.txt"
//! safety_strategy = "bankers"
//! on_malformed = "abort"
//! report_format = "text"
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use crate::EngineError;
use safety_checker::SafetyStrategy;
use std::path::{Path, PathBuf};

/// What to do with a command line that cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the run at the first malformed line.
    #[default]
    Abort,
    /// Log the line, count it, and carry on with the next one.
    Skip,
}

impl MalformedPolicy {
    /// Parses `"abort"` or `"skip"`, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(EngineError::Config(format!(
                "unknown malformed-command policy '{other}'; expected 'abort' or 'skip'"
            ))),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial count of each resource type. Usually given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<u32>>,
    /// Customer maxima, one comma-separated row per customer.
    pub customers_file: PathBuf,
    /// Command stream.
    pub commands_file: PathBuf,
    /// Report destination.
    pub output_file: PathBuf,
    /// Optional initial allocation, same layout as the maxima file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_file: Option<PathBuf>,
    /// Safety checker name: `"bankers"` or `"exhaustive"`.
    pub safety_strategy: String,
    /// Malformed command handling.
    pub on_malformed: MalformedPolicy,
    /// Report format: `"text"` or `"json"`.
    pub report_format: String,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str)
            .map_err(|e| EngineError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("TOML serialise error: {e}")))
    }

    /// Creates the safety checker named by this config.
    pub fn create_strategy(&self) -> Result<Box<dyn SafetyStrategy>, EngineError> {
        safety_checker::create_strategy(&self.safety_strategy)
            .map_err(|e| EngineError::Config(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resources: None,
            customers_file: PathBuf::from("customer.txt"),
            commands_file: PathBuf::from("commands.txt"),
            output_file: PathBuf::from("result.txt"),
            allocation_file: None,
            safety_strategy: "bankers".to_string(),
            on_malformed: MalformedPolicy::Abort,
            report_format: "text".to_string(),
        }
    }
}
