// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for continuous recordings.
//!
//! This module provides the byte-source and metadata types shared by the
//! continuous access layer: a memory-mapped source that speaks the same
//! `Read + Seek` boundary as plain files, and summary metadata for opened
//! recordings.

pub mod metadata;
pub mod source;

// Re-exports
pub use metadata::{RecordingInfo, SignalScale};
pub use source::MmapSource;
