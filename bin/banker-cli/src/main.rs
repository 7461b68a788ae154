// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # banker
//!
//! Command-line interface for the Banker's Algorithm resource simulator.
//!
//! ## Usage
//! ```bash
//! # Replay commands.txt against customer.txt with 10, 5, 7 units available
//! banker run 10 5 7
//!
//! # Start from a partial allocation and keep going past bad lines
//! banker run 3 3 2 --allocation allocation.txt --on-malformed skip
//!
//! # Check whether a state is safe and print a safe sequence
//! banker check 3 3 2 --allocation allocation.txt
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "banker",
    about = "Deadlock-avoiding resource allocation simulator (Banker's Algorithm)",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file. Explicit flags take precedence.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Input flags shared by every subcommand that builds a state.
#[derive(clap::Args, Debug, Clone)]
struct StateArgs {
    /// Available count of each resource type, one argument per type.
    resources: Vec<u32>,

    /// Customer maxima file (comma-separated, one customer per line).
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Initial allocation file, same layout as the customer file.
    #[arg(short, long)]
    allocation: Option<PathBuf>,

    /// Safety checker: bankers, exhaustive.
    #[arg(short, long)]
    strategy: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a command file and write the decision report.
    Run {
        #[command(flatten)]
        state: StateArgs,

        /// Command file (RQ / RL / * lines).
        #[arg(long)]
        commands: Option<PathBuf>,

        /// Report file; "-" writes to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to do with malformed command lines: abort, skip.
        #[arg(long)]
        on_malformed: Option<String>,

        /// Report format: text, json.
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the initial state and whether it is safe.
    Check {
        #[command(flatten)]
        state: StateArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            state,
            commands: commands_file,
            output,
            on_malformed,
            format,
        } => {
            commands::apply_state_args(&mut config, state);
            if let Some(path) = commands_file {
                config.commands_file = path;
            }
            if let Some(path) = output {
                config.output_file = path;
            }
            if let Some(policy) = on_malformed {
                config.on_malformed = allocation_engine::MalformedPolicy::parse(&policy)?;
            }
            if let Some(format) = format {
                config.report_format = format;
            }
            commands::run::execute(config)
        }
        Commands::Check { state } => {
            commands::apply_state_args(&mut config, state);
            commands::check::execute(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "banker", "-vv", "run", "10", "5", "7", "--on-malformed", "skip", "-o", "-",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                state,
                on_malformed,
                output,
                ..
            } => {
                assert_eq!(state.resources, vec![10, 5, 7]);
                assert_eq!(on_malformed.as_deref(), Some("skip"));
                assert_eq!(output, Some(PathBuf::from("-")));
            }
            Commands::Check { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_negative_resource_rejected() {
        assert!(Cli::try_parse_from(["banker", "check", "3", "-1"]).is_err());
    }
}
