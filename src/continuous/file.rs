// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Continuous file handle.
//!
//! [`ContinuousFile`] opens a recording, reads (or accepts) the leading
//! header once, and derives the block and sample counts from the file size.
//! The handle is immutable after construction and never re-derives counts.
//!
//! The byte source lives behind a mutex holding the reader together with
//! its last known position, so seek+read is one atomic unit. Multiple
//! independent views may share a handle; each view keeps its own cache
//! slot and only serializes at the source.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::continuous::view::{
    ChannelView, RawSamples, RawTimestamps, RecordingNumbers, Records, ScaledRecords,
    ScaledSamples, ScaledTimestamps,
};
use crate::core::{FormatError, Result};
use crate::format::constants::{BLOCK_BYTES, FILE_HEADER_BYTES, SAMPLES_PER_BLOCK};
use crate::format::header::FileHeader;
use crate::io::metadata::{RecordingInfo, SignalScale};
use crate::io::source::MmapSource;

/// Byte source plus its last known position.
///
/// `pos` is `None` whenever the actual stream position is unknown (after a
/// failed seek or read), which forces the next access to re-seek.
pub(crate) struct SourceState<R> {
    pub(crate) reader: R,
    pub(crate) pos: Option<u64>,
}

/// An opened continuous recording.
///
/// Holds the byte source, the leading header fields, and the counts derived
/// once at open time. Views are created through the `*_samples`,
/// `*_timestamps`, `recording_numbers`, and `records` constructors.
pub struct ContinuousFile<R> {
    source: Mutex<SourceState<R>>,
    header: FileHeader,
    scale: SignalScale,
    path: Option<String>,
    file_size: u64,
    block_count: u64,
    sample_count: u64,
}

// Manual impl: deriving would demand `R: Debug`, and byte sources need not
// be debuggable.
impl<R> fmt::Debug for ContinuousFile<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousFile")
            .field("path", &self.path)
            .field("file_size", &self.file_size)
            .field("header_bytes", &self.header.header_bytes)
            .field("block_count", &self.block_count)
            .field("sample_count", &self.sample_count)
            .finish_non_exhaustive()
    }
}

impl ContinuousFile<BufReader<File>> {
    /// Open a recording from a path with buffered file I/O.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)
            .map_err(|e| FormatError::io(format!("failed to open file: {e}")))?;
        let file_size = file
            .metadata()
            .map_err(|e| FormatError::io(format!("failed to get metadata: {e}")))?
            .len();
        Self::build(
            BufReader::new(file),
            file_size,
            Some(path_ref.to_string_lossy().into_owned()),
        )
    }
}

impl ContinuousFile<MmapSource> {
    /// Open a recording from a path via a read-only memory mapping.
    pub fn open_mmap<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let source = MmapSource::open(path_ref)?;
        let file_size = source.len();
        Self::build(
            source,
            file_size,
            Some(path_ref.to_string_lossy().into_owned()),
        )
    }
}

impl<R: Read + Seek> ContinuousFile<R> {
    /// Open a recording from any seekable byte source.
    ///
    /// The source must start at the leading header; its length is taken
    /// from a seek to the end.
    pub fn from_source(mut source: R) -> Result<Self> {
        let file_size = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        Self::build(source, file_size, None)
    }

    /// Open a recording whose header fields come from an external source
    /// (the settings tree of the acquisition software, typically) instead
    /// of the embedded text region.
    pub fn with_header(mut source: R, header: FileHeader) -> Result<Self> {
        let file_size = source.seek(SeekFrom::End(0))?;
        Self::finish(source, None, header, file_size, None)
    }

    fn build(mut source: R, file_size: u64, path: Option<String>) -> Result<Self> {
        let mut raw = vec![0u8; FILE_HEADER_BYTES];
        source.read_exact(&mut raw).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                FormatError::header(format!(
                    "file too small for a {FILE_HEADER_BYTES}-byte header ({file_size} bytes)"
                ))
            } else {
                e.into()
            }
        })?;
        let header = FileHeader::parse(&raw)?;
        Self::finish(source, Some(FILE_HEADER_BYTES as u64), header, file_size, path)
    }

    fn finish(
        source: R,
        pos: Option<u64>,
        header: FileHeader,
        file_size: u64,
        path: Option<String>,
    ) -> Result<Self> {
        if file_size < header.header_bytes {
            return Err(FormatError::header(format!(
                "file smaller than its {}-byte leading header ({file_size} bytes)",
                header.header_bytes
            )));
        }
        let data_bytes = file_size - header.header_bytes;
        let trailing = data_bytes % BLOCK_BYTES;
        if trailing != 0 {
            return Err(FormatError::size_mismatch(
                file_size,
                header.header_bytes,
                trailing,
            ));
        }
        let block_count = data_bytes / BLOCK_BYTES;
        let sample_count = block_count * SAMPLES_PER_BLOCK as u64;

        debug!(
            file_size,
            block_count, sample_count, "opened continuous recording"
        );

        Ok(Self {
            source: Mutex::new(SourceState {
                reader: source,
                pos,
            }),
            scale: header.scale(),
            header,
            path,
            file_size,
            block_count,
            sample_count,
        })
    }

    /// Leading header fields.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Conversion parameters for scaled projections.
    pub fn scale(&self) -> &SignalScale {
        &self.scale
    }

    /// Total file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Number of whole blocks in the data region.
    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    /// Total decoded sample count.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Path the recording was opened from, when known.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Summary metadata for this recording.
    pub fn info(&self) -> RecordingInfo {
        RecordingInfo {
            path: self.path.clone(),
            file_size: self.file_size,
            header_bytes: self.header.header_bytes,
            block_count: self.block_count,
            sample_count: self.sample_count,
            sample_rate: self.scale.sample_rate,
            bit_volts: self.scale.bit_volts,
            duration_secs: self.sample_count as f64 / self.scale.sample_rate,
        }
    }

    /// Byte position of a 1-based block number.
    pub(crate) fn block_position(&self, block: u64) -> u64 {
        self.header.header_bytes + (block - 1) * BLOCK_BYTES
    }

    pub(crate) fn lock_source(&self) -> Result<MutexGuard<'_, SourceState<R>>> {
        self.source
            .lock()
            .map_err(|_| FormatError::io("byte source mutex poisoned"))
    }

    /// Raw samples as signed ADC counts.
    pub fn raw_samples(&self) -> ChannelView<'_, R, RawSamples> {
        ChannelView::new(self)
    }

    /// Samples scaled to microvolts.
    pub fn scaled_samples(&self) -> ChannelView<'_, R, ScaledSamples> {
        ChannelView::new(self)
    }

    /// Timestamps as 1-based sample indices.
    pub fn raw_timestamps(&self) -> ChannelView<'_, R, RawTimestamps> {
        ChannelView::new(self)
    }

    /// Timestamps in seconds, with sample 1 at time zero.
    pub fn scaled_timestamps(&self) -> ChannelView<'_, R, ScaledTimestamps> {
        ChannelView::new(self)
    }

    /// Recording-segment numbers.
    pub fn recording_numbers(&self) -> ChannelView<'_, R, RecordingNumbers> {
        ChannelView::new(self)
    }

    /// Joint raw records: sample, timestamp, recording number.
    pub fn records(&self) -> ChannelView<'_, R, Records> {
        ChannelView::new(self)
    }

    /// Joint scaled records: microvolts, seconds, recording number.
    pub fn scaled_records(&self) -> ChannelView<'_, R, ScaledRecords> {
        ChannelView::new(self)
    }
}
