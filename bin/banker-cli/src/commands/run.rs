// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker run` command: replay a command file and write the report.
//!
//! ```text
//! customer.txt ─┐
//! allocation.txt┼─► SystemState ─► AllocationEngine ─► result.txt
//! commands.txt ─┘
//! ```

use allocation_engine::{AllocationEngine, EngineConfig};
use command_io::{create_writer, driver, ReportFormat, RunSummary};
use std::path::Path;

pub fn execute(config: EngineConfig) -> anyhow::Result<()> {
    let format: ReportFormat = config.report_format.parse()?;
    let to_stdout = config.output_file == Path::new("-");

    if !to_stdout {
        println!("╔══════════════════════════════════════════════════════╗");
        println!("║            banker · Command Stream Runner            ║");
        println!("╚══════════════════════════════════════════════════════╝");
        println!();
    }

    let state = super::load_state(&config)?;
    let mut engine = AllocationEngine::from_config(&config, state)?;
    super::warn_if_unsafe(&engine)?;

    let result = if to_stdout {
        let mut sink = create_writer(format, std::io::stdout().lock());
        driver::process_file(
            &mut engine,
            &config.commands_file,
            sink.as_mut(),
            config.on_malformed,
        )
    } else {
        let file = std::fs::File::create(&config.output_file).map_err(|e| {
            anyhow::anyhow!(
                "cannot open '{}' for writing: {e}",
                config.output_file.display()
            )
        })?;
        let mut sink = create_writer(format, std::io::BufWriter::new(file));
        driver::process_file(
            &mut engine,
            &config.commands_file,
            sink.as_mut(),
            config.on_malformed,
        )
    };

    let summary = result.map_err(|e| {
        anyhow::anyhow!(
            "processing '{}' stopped: {e}",
            config.commands_file.display()
        )
    })?;
    tracing::info!("{}", engine.state().summary());

    if !to_stdout {
        print_results(&config, &engine, &summary);
    }
    Ok(())
}

fn print_results(config: &EngineConfig, engine: &AllocationEngine, summary: &RunSummary) {
    // ── Inputs ─────────────────────────────────────────────────
    println!("  Customers:  {}", config.customers_file.display());
    if let Some(path) = &config.allocation_file {
        println!("  Allocation: {}", path.display());
    }
    println!("  Commands:   {}", config.commands_file.display());
    println!("  Strategy:   {}", engine.strategy_name());
    println!();

    // ── Outcome ────────────────────────────────────────────────
    for line in summary.summary().lines() {
        println!("  {line}");
    }
    println!("  Available:  {}", engine.state().available());
    println!();
    println!("  Report written to {}", config.output_file.display());
}
