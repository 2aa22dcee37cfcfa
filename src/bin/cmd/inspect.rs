// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show file information, header fields, segments.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_duration, Result};
use neurocodec::ContinuousFile;

/// Inspect file contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show basic file information and derived counts
    Info {
        /// Input continuous recording
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the parsed leading header
    Header {
        /// Input continuous recording
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List recording segments and their sample ranges
    Segments {
        /// Input continuous recording
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { input, json } => cmd_info(input, json),
            InspectCmd::Header { input } => cmd_header(input),
            InspectCmd::Segments { input } => cmd_segments(input),
        }
    }
}

/// Cmd: Show file info
fn cmd_info(input: PathBuf, json: bool) -> Result<()> {
    let file = ContinuousFile::open(&input)?;
    let info = file.info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("=== {} ===", input.display());
    println!("File size: {} bytes", info.file_size);
    println!("Header: {} bytes", info.header_bytes);
    println!("Blocks: {}", info.block_count);
    println!("Samples: {}", info.sample_count);
    println!("Sample rate: {} Hz", info.sample_rate);
    println!("Scale: {} uV/count", info.bit_volts);
    println!("Duration: {}", format_duration(info.duration_secs));

    Ok(())
}

/// Cmd: Show the leading header
fn cmd_header(input: PathBuf) -> Result<()> {
    let file = ContinuousFile::open(&input)?;
    let header = file.header();

    println!("=== Header of {} ===", input.display());
    if let Some(format) = &header.format {
        println!("format: {format}");
    }
    if let Some(version) = &header.version {
        println!("version: {version}");
    }
    if let Some(channel) = &header.channel {
        println!("channel: {channel}");
    }
    println!("header_bytes: {}", header.header_bytes);
    println!("bitVolts: {}", header.bit_volts);
    println!("sampleRate: {}", header.sample_rate);
    for (key, value) in &header.extra {
        println!("{key}: {value}");
    }

    Ok(())
}

/// Cmd: List recording segments
fn cmd_segments(input: PathBuf) -> Result<()> {
    let file = ContinuousFile::open(&input)?;
    let samples_per_block = neurocodec::format::constants::SAMPLES_PER_BLOCK as u64;
    let mut numbers = file.recording_numbers();

    println!("=== Segments in {} ===", input.display());

    // Recording numbers change only at block boundaries, so one probe per
    // block is enough.
    let mut current: Option<(u16, u64)> = None;
    for block in 0..file.block_count() {
        let first_index = block * samples_per_block + 1;
        let number = numbers.get(first_index)?;
        match current {
            Some((active, start)) if active != number => {
                println!("segment {active}: samples {start}..={}", first_index - 1);
                current = Some((number, first_index));
            }
            Some(_) => {}
            None => current = Some((number, first_index)),
        }
    }
    if let Some((active, start)) = current {
        println!("segment {active}: samples {start}..={}", file.sample_count());
    } else {
        println!("(empty recording)");
    }

    Ok(())
}
