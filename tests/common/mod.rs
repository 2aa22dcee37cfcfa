// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! Synthesizes continuous recording fixtures in memory: a 1024-byte text
//! header followed by whole blocks with deterministic sample values, plus
//! knobs for corruption and truncation.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use neurocodec::format::constants::{
    BLOCK_BYTES, BLOCK_HEADER_BYTES, BLOCK_MARKER, FILE_HEADER_BYTES, SAMPLES_PER_BLOCK,
};

pub const TEST_BIT_VOLTS: f64 = 0.195;
pub const TEST_SAMPLE_RATE: f64 = 30000.0;

/// Deterministic sample value for a 0-based global sample index.
pub fn sample_value(global: u64) -> i16 {
    ((global * 37 + 11) % 4096) as i16 - 2048
}

/// The fixed-size text header region.
pub fn header_region() -> Vec<u8> {
    let text = format!(
        "header.format = 'Continuous Recording';\n\
         header.version = 0.4;\n\
         header.header_bytes = 1024;\n\
         header.bitVolts = {TEST_BIT_VOLTS};\n\
         header.sampleRate = {TEST_SAMPLE_RATE};\n\
         header.channel = 'CH1';\n"
    );
    let mut raw = text.into_bytes();
    raw.resize(FILE_HEADER_BYTES, b' ');
    raw
}

/// Encode one 2070-byte block.
pub fn encode_block(timestamp: i64, recording_number: u16, samples: &[i16]) -> Vec<u8> {
    assert_eq!(samples.len(), SAMPLES_PER_BLOCK);
    let mut out = Vec::with_capacity(BLOCK_BYTES as usize);
    out.extend_from_slice(&timestamp.to_le_bytes());
    out.extend_from_slice(&(SAMPLES_PER_BLOCK as u16).to_le_bytes());
    out.extend_from_slice(&recording_number.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_be_bytes());
    }
    out.extend_from_slice(&BLOCK_MARKER);
    out
}

/// A whole recording: header plus `blocks` contiguous blocks with
/// deterministic samples, timestamps starting at 1, and per-block recording
/// numbers taken from `recording_numbers` (last entry repeats).
pub fn fixture_bytes(blocks: usize, recording_numbers: &[u16]) -> Vec<u8> {
    let mut out = header_region();
    for b in 0..blocks {
        let first = (b * SAMPLES_PER_BLOCK) as u64;
        let samples: Vec<i16> = (0..SAMPLES_PER_BLOCK)
            .map(|i| sample_value(first + i as u64))
            .collect();
        let number = recording_numbers
            .get(b)
            .or(recording_numbers.last())
            .copied()
            .unwrap_or(0);
        out.extend_from_slice(&encode_block(first as i64 + 1, number, &samples));
    }
    out
}

/// Single-segment recording.
pub fn simple_fixture(blocks: usize) -> Vec<u8> {
    fixture_bytes(blocks, &[0])
}

/// Byte offset of the tail marker of a 1-based block number.
pub fn marker_offset(block: u64) -> usize {
    FILE_HEADER_BYTES
        + ((block - 1) * BLOCK_BYTES) as usize
        + BLOCK_HEADER_BYTES
        + SAMPLES_PER_BLOCK * 2
}

/// Byte offset of the `sample_count` header field of a 1-based block number.
pub fn sample_count_offset(block: u64) -> usize {
    FILE_HEADER_BYTES + ((block - 1) * BLOCK_BYTES) as usize + 8
}

/// Write fixture bytes to a temp file; callers remove it when done.
pub fn write_fixture(bytes: &[u8], tag: &str) -> PathBuf {
    let path = PathBuf::from(format!(
        "/tmp/neurocodec_test_{tag}_{}.continuous",
        std::process::id()
    ));
    let mut file = File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    file.sync_all().unwrap();
    path
}
