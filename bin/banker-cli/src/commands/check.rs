// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker check` command: print a state and decide whether it is safe.

use allocation_engine::{AllocationEngine, EngineConfig};
use safety_checker::Safety;

pub fn execute(config: EngineConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              banker · Safety Inspector               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let state = super::load_state(&config)?;
    let engine = AllocationEngine::from_config(&config, state)?;

    println!("  {}", engine.state().summary());
    println!("  Strategy: {}", engine.strategy_name());
    println!();

    // ── State table ────────────────────────────────────────────
    let table = command_io::report::format_snapshot(&engine.snapshot());
    for line in table.lines() {
        println!("  {line}");
    }
    println!();

    // ── Verdict ────────────────────────────────────────────────
    match engine.check_safety()? {
        Safety::Safe { sequence } => {
            println!("  SAFE");
            println!("   Safe sequence: {sequence}");
        }
        Safety::Unsafe { blocked } => {
            let ids: Vec<String> = blocked.iter().map(ToString::to_string).collect();
            println!("  UNSAFE");
            println!("   No completion order exists; blocked customers: {}", ids.join(", "));
        }
    }
    println!();

    Ok(())
}
