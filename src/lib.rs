// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Neurocodec
//!
//! Reader for the block-structured continuous recording format written by
//! neural data acquisition instruments.
//!
//! A continuous file is a fixed-size text header followed by a flat run of
//! 2070-byte blocks, each carrying 1024 big-endian signed 16-bit samples plus
//! a small header (first-sample timestamp, sample count, recording number)
//! and a 10-byte tail marker. This library turns that flat file into
//! random-access, read-only sequences of decoded values:
//!
//! - **Block codec** in [`format::block`] - decodes and validates one block
//! - **File handle** in [`continuous::file`] - opens a recording and derives
//!   block/sample counts from the file size
//! - **Block cache** inside [`continuous`] - keeps one decoded block
//!   resident per view, reloading only on a miss
//! - **Typed views** in [`continuous::view`] - raw or physically-scaled
//!   projections (samples in ADC counts or microvolts, timestamps in sample
//!   indices or seconds, recording numbers, joint records)
//!
//! ## Example: Reading samples
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use neurocodec::ContinuousFile;
//!
//! let file = ContinuousFile::open("ch1.continuous")?;
//! let mut microvolts = file.scaled_samples();
//! for i in 1..=microvolts.len().min(10) {
//!     println!("sample {i}: {:.3} uV", microvolts.get(i)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Joint records over a damaged tail
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use neurocodec::ContinuousFile;
//!
//! let file = ContinuousFile::open_mmap("ch1.continuous")?;
//! // Tolerate a damaged tail marker by skipping verification.
//! let mut records = file.records().without_marker_check();
//! let first = records.get(1)?;
//! println!("t={} rec={}", first.timestamp, first.recording_number);
//! # Ok(())
//! # }
//! ```
//!
//! Indexing is 1-based throughout, matching the on-disk contract: sample 1
//! is the first sample of block 1 and is defined as time zero.

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{FormatError, Result};

// On-disk format: constants, block codec, file header
pub mod format;

// I/O types (mmap source, recording metadata)
pub mod io;

// Continuous recording access (file handle, block cache, typed views)
pub mod continuous;

pub use format::block::{BlockHeader, BlockOutcome, DataBlock};
pub use format::header::FileHeader;
pub use io::metadata::{RecordingInfo, SignalScale};
pub use io::source::MmapSource;

pub use continuous::file::ContinuousFile;
pub use continuous::view::{
    ChannelView, Projection, RawSamples, RawTimestamps, RecordingNumbers, Records, SampleRecord,
    ScaledRecords, ScaledSampleRecord, ScaledSamples, ScaledTimestamps,
};
