// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed views over a continuous recording.
//!
//! A [`ChannelView`] is a fixed-length, read-only, randomly indexable
//! sequence over one recording. All view kinds share one generic structure;
//! what differs is the [`Projection`] that turns the cached block plus an
//! in-block offset into the requested output:
//!
//! - [`RawSamples`] / [`ScaledSamples`] - ADC counts, or microvolts via the
//!   header's `bitVolts` factor
//! - [`RawTimestamps`] / [`ScaledTimestamps`] - 1-based sample indices, or
//!   seconds with sample 1 at time zero
//! - [`RecordingNumbers`] - the block's recording-segment number, never
//!   scaled
//! - [`Records`] / [`ScaledRecords`] - joint records combining all three
//!
//! Indexing is 1-based. A view is read-only by construction (there are no
//! mutators) and non-reentrant: `get` borrows the view mutably because of
//! the single cache slot. Independent views over the same file each carry
//! their own slot.

use std::io::{Read, Seek};
use std::marker::PhantomData;

use crate::continuous::cache::BlockCache;
use crate::continuous::file::ContinuousFile;
use crate::core::{FormatError, Result};
use crate::format::block::DataBlock;
use crate::io::metadata::SignalScale;

/// Conversion rule from a cached block to one output value.
pub trait Projection {
    /// Value type produced by this view kind.
    type Output;

    /// Extract and convert the value at a 0-based `offset` into `block`.
    fn project(block: &DataBlock, offset: usize, scale: &SignalScale) -> Self::Output;
}

/// Raw ADC counts.
pub struct RawSamples;

impl Projection for RawSamples {
    type Output = i16;

    fn project(block: &DataBlock, offset: usize, _scale: &SignalScale) -> i16 {
        block.sample(offset)
    }
}

/// Samples scaled to microvolts.
pub struct ScaledSamples;

impl Projection for ScaledSamples {
    type Output = f64;

    fn project(block: &DataBlock, offset: usize, scale: &SignalScale) -> f64 {
        block.sample(offset) as f64 * scale.bit_volts
    }
}

/// Timestamps as 1-based sample indices.
pub struct RawTimestamps;

impl Projection for RawTimestamps {
    type Output = i64;

    fn project(block: &DataBlock, offset: usize, _scale: &SignalScale) -> i64 {
        block.header().timestamp + offset as i64
    }
}

/// Timestamps in seconds; sample 1 is time zero.
pub struct ScaledTimestamps;

impl Projection for ScaledTimestamps {
    type Output = f64;

    fn project(block: &DataBlock, offset: usize, scale: &SignalScale) -> f64 {
        let raw = block.header().timestamp + offset as i64;
        (raw - 1) as f64 / scale.sample_rate
    }
}

/// Recording-segment numbers.
pub struct RecordingNumbers;

impl Projection for RecordingNumbers {
    type Output = u16;

    fn project(block: &DataBlock, _offset: usize, _scale: &SignalScale) -> u16 {
        block.header().recording_number
    }
}

/// Joint raw record: one sample with its timestamp and recording number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRecord {
    /// Raw ADC count
    pub sample: i16,
    /// 1-based sample index
    pub timestamp: i64,
    /// Recording-segment number
    pub recording_number: u16,
}

/// Joint raw records.
pub struct Records;

impl Projection for Records {
    type Output = SampleRecord;

    fn project(block: &DataBlock, offset: usize, scale: &SignalScale) -> SampleRecord {
        SampleRecord {
            sample: RawSamples::project(block, offset, scale),
            timestamp: RawTimestamps::project(block, offset, scale),
            recording_number: RecordingNumbers::project(block, offset, scale),
        }
    }
}

/// Joint scaled record: microvolts and seconds, plus the recording number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSampleRecord {
    /// Sample in microvolts
    pub microvolts: f64,
    /// Time in seconds from sample 1
    pub seconds: f64,
    /// Recording-segment number, passthrough
    pub recording_number: u16,
}

/// Joint scaled records.
pub struct ScaledRecords;

impl Projection for ScaledRecords {
    type Output = ScaledSampleRecord;

    fn project(block: &DataBlock, offset: usize, scale: &SignalScale) -> ScaledSampleRecord {
        ScaledSampleRecord {
            microvolts: ScaledSamples::project(block, offset, scale),
            seconds: ScaledTimestamps::project(block, offset, scale),
            recording_number: RecordingNumbers::project(block, offset, scale),
        }
    }
}

/// A read-only, randomly indexable projection of a continuous recording.
pub struct ChannelView<'a, R, P: Projection> {
    file: &'a ContinuousFile<R>,
    cache: BlockCache,
    _kind: PhantomData<P>,
}

impl<'a, R: Read + Seek, P: Projection> ChannelView<'a, R, P> {
    pub(crate) fn new(file: &'a ContinuousFile<R>) -> Self {
        Self {
            file,
            cache: BlockCache::new(),
            _kind: PhantomData,
        }
    }

    /// Skip tail marker verification on block loads.
    ///
    /// Useful for recovering data from recordings with damaged tails; all
    /// other validation still applies.
    pub fn without_marker_check(mut self) -> Self {
        self.cache.set_verify(false);
        self
    }

    /// Number of samples in the recording.
    pub fn len(&self) -> u64 {
        self.file.sample_count()
    }

    /// True when the recording holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at the 1-based `index`.
    ///
    /// Indices outside `[1, len]` fail with a bounds error; they are a
    /// contract violation, not corruption. Re-reading the same index
    /// returns the same value.
    pub fn get(&mut self, index: u64) -> Result<P::Output> {
        if index == 0 || index > self.len() {
            return Err(FormatError::out_of_bounds(index, self.len()));
        }
        let offset = self.cache.load(self.file, index)?;
        Ok(P::project(self.cache.block(), offset, self.file.scale()))
    }

    /// Sequential iterator over all values, riding the cache (one decode
    /// per block).
    pub fn iter(&mut self) -> ViewIter<'_, 'a, R, P> {
        ViewIter {
            view: self,
            next: 1,
        }
    }
}

/// Iterator returned by [`ChannelView::iter`].
pub struct ViewIter<'v, 'a, R, P: Projection> {
    view: &'v mut ChannelView<'a, R, P>,
    next: u64,
}

impl<R: Read + Seek, P: Projection> Iterator for ViewIter<'_, '_, R, P> {
    type Item = Result<P::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.view.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.view.get(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.len().saturating_sub(self.next - 1) as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::constants::{BLOCK_MARKER, SAMPLES_PER_BLOCK};
    use std::io::Cursor;

    fn block_with(timestamp: i64, recording_number: u16, fill: i16) -> DataBlock {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&timestamp.to_le_bytes());
        bytes.extend_from_slice(&(SAMPLES_PER_BLOCK as u16).to_le_bytes());
        bytes.extend_from_slice(&recording_number.to_le_bytes());
        for _ in 0..SAMPLES_PER_BLOCK {
            bytes.extend_from_slice(&fill.to_be_bytes());
        }
        bytes.extend_from_slice(&BLOCK_MARKER);

        let mut block = DataBlock::new();
        block.read_from(&mut Cursor::new(bytes), 1, true).unwrap();
        block
    }

    const SCALE: SignalScale = SignalScale {
        bit_volts: 0.5,
        sample_rate: 1000.0,
    };

    #[test]
    fn test_sample_projections() {
        let block = block_with(1, 0, -200);
        assert_eq!(RawSamples::project(&block, 3, &SCALE), -200);
        assert_eq!(ScaledSamples::project(&block, 3, &SCALE), -100.0);
    }

    #[test]
    fn test_timestamp_projections() {
        let block = block_with(1, 0, 0);
        assert_eq!(RawTimestamps::project(&block, 0, &SCALE), 1);
        assert_eq!(ScaledTimestamps::project(&block, 0, &SCALE), 0.0);
        assert_eq!(ScaledTimestamps::project(&block, 10, &SCALE), 0.010);

        let later = block_with(1025, 0, 0);
        assert_eq!(RawTimestamps::project(&later, 0, &SCALE), 1025);
        assert_eq!(ScaledTimestamps::project(&later, 0, &SCALE), 1.024);
    }

    #[test]
    fn test_recording_number_is_passthrough() {
        let block = block_with(1, 7, 0);
        assert_eq!(RecordingNumbers::project(&block, 0, &SCALE), 7);
        assert_eq!(RecordingNumbers::project(&block, 1023, &SCALE), 7);
    }

    #[test]
    fn test_joint_projections_agree_with_parts() {
        let block = block_with(2049, 3, 40);
        let raw = Records::project(&block, 5, &SCALE);
        assert_eq!(raw.sample, 40);
        assert_eq!(raw.timestamp, 2054);
        assert_eq!(raw.recording_number, 3);

        let scaled = ScaledRecords::project(&block, 5, &SCALE);
        assert_eq!(scaled.microvolts, 20.0);
        assert_eq!(scaled.seconds, 2.053);
        assert_eq!(scaled.recording_number, 3);
    }
}
