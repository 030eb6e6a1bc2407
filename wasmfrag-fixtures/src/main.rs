// wasmfrag - wasmfrag-fixtures
// Module: Fixture CLI
//
// Copyright (c) 2025 The wasmfrag Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! wasmfrag-fixtures - generate and validate WebAssembly test fixtures
//!
//! Builds the panic fixture, checks it against the LEB128 test vectors, the
//! section scanner and the expected byte sequences, then prints it as a
//! TypeScript `Uint8Array` literal and a hexdump.
//!
//! Usage:
//!   wasmfrag-fixtures              # validation, TypeScript and hexdump
//!   wasmfrag-fixtures --validate   # validation only
//!   wasmfrag-fixtures --quiet      # failures only, exit status tells the rest
//!
//! Logging follows `RUST_LOG`; `RUST_LOG_FORMAT` selects `pretty` (default),
//! `compact` or `json`.

use std::{env, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wasmfrag_fixtures::{build_panic_module, render, validate_fixture, Report};

/// Generate and validate hand-encoded WebAssembly test fixtures
#[derive(Parser, Debug)]
#[command(name = "wasmfrag-fixtures", version, about)]
struct Args {
    /// Run validation only, skip TypeScript and hexdump output
    #[arg(short = 'v', long)]
    validate: bool,

    /// Suppress all output except errors (implies --validate)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    initialize_tracing();

    if args.no_color {
        colored::control::set_override(false);
    }
    let validate_only = args.validate || args.quiet;

    let fixture = build_panic_module().context("Failed to build the panic fixture")?;
    info!(bytes = fixture.bytes().len(), "built {}", fixture.name());

    let reports = validate_fixture(&fixture).context("Failed to scan the generated module")?;
    let ok = reports.iter().all(Report::passed);
    debug!(ok, reports = reports.len(), "validation finished");

    if !args.quiet {
        println!(
            "{} {}",
            "WASM Binary".bold(),
            format!("({} bytes)", fixture.bytes().len()).dimmed()
        );
    }
    for report in &reports {
        print_report(report, args.quiet);
    }

    if !validate_only {
        println!("\n{}", "=".repeat(60));
        println!("{}", render::typescript(fixture.bytes(), fixture.name()));
        println!();
        for line in render::hexdump_lines(fixture.bytes()) {
            println!(
                "{}  {} {}",
                format!("{:04x}", line.offset).dimmed(),
                line.hex.yellow(),
                line.ascii.cyan()
            );
        }
    }

    if !args.quiet {
        if ok {
            println!("\n{}", "All validations passed".bold().green());
        } else {
            println!("\n{}", "Some validations FAILED".bold().red());
        }
    }

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print a report as a table, or only its failures when quiet
fn print_report(report: &Report, quiet: bool) {
    if quiet {
        for check in report.failures() {
            eprintln!("{}: {} {} {}", report.title, check.name, check.detail, "FAIL".red());
        }
        return;
    }

    println!("\n{}", report.title.bold());
    for check in &report.checks {
        let status = if check.passed {
            "ok".green()
        } else {
            "FAIL".bold().red()
        };
        println!(
            "  {} {} {status}",
            format!("{:<24}", check.name).cyan(),
            format!("{:<40}", check.detail).yellow()
        );
    }
}

/// Initialize the tracing system for logging
///
/// Library crates log through the `log` facade; the subscriber forwards
/// those records as tracing events.
fn initialize_tracing() {
    let format = env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format.as_str() {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}
