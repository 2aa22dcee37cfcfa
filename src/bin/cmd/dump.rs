// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dump command - print decoded sample and timestamp ranges.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::common::Result;
use neurocodec::ContinuousFile;

/// Shared range and decoding options.
#[derive(Args, Clone, Debug)]
pub struct DumpArgs {
    /// Input continuous recording
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// First 1-based sample index
    #[arg(long, default_value_t = 1)]
    start: u64,

    /// Number of values to print
    #[arg(long, default_value_t = 10)]
    count: u64,

    /// Print physically-scaled values (microvolts / seconds)
    #[arg(long)]
    scaled: bool,

    /// Skip tail marker verification (tolerates damaged block tails)
    #[arg(long)]
    no_verify: bool,
}

impl DumpArgs {
    fn end(&self) -> u64 {
        self.start.saturating_add(self.count).saturating_sub(1)
    }
}

/// Dump decoded values.
#[derive(Subcommand, Clone, Debug)]
pub enum DumpCmd {
    /// Print sample values
    Samples(DumpArgs),

    /// Print timestamps
    Timestamps(DumpArgs),
}

impl DumpCmd {
    pub fn run(self) -> Result<()> {
        match self {
            DumpCmd::Samples(args) => cmd_samples(args),
            DumpCmd::Timestamps(args) => cmd_timestamps(args),
        }
    }
}

/// Cmd: Print samples
fn cmd_samples(args: DumpArgs) -> Result<()> {
    let file = ContinuousFile::open(&args.input)?;
    let end = args.end();

    if args.scaled {
        let mut view = file.scaled_samples();
        if args.no_verify {
            view = view.without_marker_check();
        }
        for i in args.start..=end.min(view.len()) {
            println!("{i}\t{:.6}", view.get(i)?);
        }
    } else {
        let mut view = file.raw_samples();
        if args.no_verify {
            view = view.without_marker_check();
        }
        for i in args.start..=end.min(view.len()) {
            println!("{i}\t{}", view.get(i)?);
        }
    }

    Ok(())
}

/// Cmd: Print timestamps
fn cmd_timestamps(args: DumpArgs) -> Result<()> {
    let file = ContinuousFile::open(&args.input)?;
    let end = args.end();

    if args.scaled {
        let mut view = file.scaled_timestamps();
        if args.no_verify {
            view = view.without_marker_check();
        }
        for i in args.start..=end.min(view.len()) {
            println!("{i}\t{:.6}", view.get(i)?);
        }
    } else {
        let mut view = file.raw_timestamps();
        if args.no_verify {
            view = view.without_marker_check();
        }
        for i in args.start..=end.min(view.len()) {
            println!("{i}\t{}", view.get(i)?);
        }
    }

    Ok(())
}
