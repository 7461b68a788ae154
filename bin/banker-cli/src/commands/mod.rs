// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared setup.

pub mod check;
pub mod run;

use crate::StateArgs;
use allocation_engine::{AllocationEngine, EngineConfig};
use resource_model::SystemState;
use safety_checker::Safety;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `-v` / `-vv` / `-vvv` select INFO / DEBUG / TRACE; the default is WARN.
/// `RUST_LOG` overrides the flag when set. Logs go to stderr so reports
/// written to stdout stay clean.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the TOML config if one was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)?;
            tracing::info!("loaded config from '{}'", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Overrides config values with the flags that were actually given.
pub fn apply_state_args(config: &mut EngineConfig, args: StateArgs) {
    if !args.resources.is_empty() {
        config.resources = Some(args.resources);
    }
    if let Some(path) = args.customers {
        config.customers_file = path;
    }
    if args.allocation.is_some() {
        config.allocation_file = args.allocation;
    }
    if let Some(strategy) = args.strategy {
        config.safety_strategy = strategy;
    }
}

/// Reads the customer (and allocation) files into a validated state.
pub fn load_state(config: &EngineConfig) -> anyhow::Result<SystemState> {
    let resources = match config.resources.as_deref() {
        Some(resources) if !resources.is_empty() => resources,
        _ => anyhow::bail!(
            "no resource counts given; pass one count per resource type (e.g. `banker run 10 5 7`)"
        ),
    };

    let state = command_io::customers::load_state(
        resources,
        &config.customers_file,
        config.allocation_file.as_deref(),
    )
    .map_err(|e| {
        anyhow::anyhow!(
            "cannot initialize from '{}': {e}",
            config.customers_file.display()
        )
    })?;
    Ok(state)
}

/// Warns when the engine starts from a state with no safe sequence.
///
/// Every request is then denied as unsafe. Returns whether the state is safe.
pub fn warn_if_unsafe(engine: &AllocationEngine) -> anyhow::Result<bool> {
    match engine.check_safety()? {
        Safety::Safe { .. } => Ok(true),
        Safety::Unsafe { blocked } => {
            let ids: Vec<String> = blocked.iter().map(ToString::to_string).collect();
            tracing::warn!(
                "initial state is unsafe (blocked customers: {}); every request will be denied",
                ids.join(", ")
            );
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_model::ResourceVector;

    #[test]
    fn test_warn_if_unsafe() {
        // Customer 0 needs one more unit and none are left.
        let state = SystemState::new(ResourceVector::from([0]), vec![ResourceVector::from([1])])
            .validate()
            .unwrap();
        let engine = AllocationEngine::new(state);
        assert!(!warn_if_unsafe(&engine).unwrap());

        let state = SystemState::new(ResourceVector::from([1]), vec![ResourceVector::from([1])])
            .validate()
            .unwrap();
        assert!(warn_if_unsafe(&AllocationEngine::new(state)).unwrap());
    }

    #[test]
    fn test_load_state_requires_resources() {
        let err = load_state(&EngineConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no resource counts given"));
    }
}
