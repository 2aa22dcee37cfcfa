// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Neurocodec CLI
//!
//! Command-line tool for continuous recording files.
//!
//! ## Usage
//!
//! ```sh
//! # Show file information
//! neurocodec inspect info ch1.continuous
//!
//! # Show the parsed leading header
//! neurocodec inspect header ch1.continuous
//!
//! # List recording segments
//! neurocodec inspect segments ch1.continuous
//!
//! # Dump sample values
//! neurocodec dump samples ch1.continuous --start 1 --count 20 --scaled
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DumpCmd, InspectCmd};
use common::Result;

/// Neurocodec - continuous recording toolkit
///
/// Read block-structured continuous recordings and print their contents as
/// raw ADC counts or physically-scaled values.
#[derive(Parser, Clone)]
#[command(name = "neurocodec")]
#[command(about = "Continuous recording reader for neural acquisition data", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect file contents (info, header, segments)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Dump decoded values (samples, timestamps)
    #[command(subcommand)]
    Dump(DumpCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Dump(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
