// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Random access to continuous recordings.
//!
//! [`file`] owns the opened recording and its derived counts, the internal
//! block cache keeps one decoded block resident per view, and [`view`]
//! projects the cached block into the requested value representation.
//!
//! Data flow: index request -> typed view -> block cache (load on miss) ->
//! block codec (validate + decode) -> projection -> value.

pub(crate) mod cache;
pub mod file;
pub mod view;

pub use file::ContinuousFile;
pub use view::{
    ChannelView, Projection, RawSamples, RawTimestamps, RecordingNumbers, Records, SampleRecord,
    ScaledRecords, ScaledSampleRecord, ScaledSamples, ScaledTimestamps,
};
