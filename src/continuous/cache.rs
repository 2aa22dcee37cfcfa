// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Lazy single-slot block cache.
//!
//! Each view owns one [`BlockCache`]: a single [`DataBlock`] slot plus the
//! number of the block it currently holds. A request inside the resident
//! block costs no I/O; a miss costs exactly one seek (skipped when the
//! source is already positioned there, which makes sequential scans
//! seek-free) and one decode.
//!
//! A failed load invalidates the slot and the tracked source position, so
//! stale data is never served and the next access starts from a clean
//! seek.

use std::io::{Read, Seek, SeekFrom};

use tracing::warn;

use crate::continuous::file::ContinuousFile;
use crate::core::{FormatError, Result};
use crate::format::block::{BlockOutcome, DataBlock};
use crate::format::constants::{BLOCK_BYTES, BLOCK_HEADER_BYTES, SAMPLES_PER_BLOCK};

/// One decoded block plus the bookkeeping to reuse it.
pub(crate) struct BlockCache {
    slot: DataBlock,
    /// 1-based number of the resident block; `None` before the first load
    /// and after any failed load
    current: Option<u64>,
    verify: bool,
}

impl BlockCache {
    pub(crate) fn new() -> Self {
        Self {
            slot: DataBlock::new(),
            current: None,
            verify: true,
        }
    }

    pub(crate) fn set_verify(&mut self, verify: bool) {
        self.verify = verify;
    }

    /// The resident block. Only meaningful after a successful `load`.
    pub(crate) fn block(&self) -> &DataBlock {
        &self.slot
    }

    /// Ensure the resident block covers the 1-based sample `index` and
    /// return the 0-based offset of that sample within the block.
    ///
    /// The caller must have bounds-checked `index` against the recording's
    /// sample count; the cache trusts the block number it derives.
    pub(crate) fn load<R: Read + Seek>(
        &mut self,
        file: &ContinuousFile<R>,
        index: u64,
    ) -> Result<usize> {
        let block_no = (index - 1) / SAMPLES_PER_BLOCK as u64 + 1;
        let offset = ((index - 1) % SAMPLES_PER_BLOCK as u64) as usize;

        if self.current == Some(block_no) {
            return Ok(offset);
        }

        let target = file.block_position(block_no);
        let mut source = file.lock_source()?;

        if source.pos != Some(target) {
            source.pos = None;
            source.reader.seek(SeekFrom::Start(target))?;
            source.pos = Some(target);
        }

        // The slot is overwritten in place; until the decode succeeds,
        // neither the slot nor the stream position can be trusted.
        self.current = None;
        source.pos = None;

        match self.slot.read_from(&mut source.reader, block_no, self.verify) {
            Ok(BlockOutcome::Loaded) => {
                source.pos = Some(target + BLOCK_BYTES);
                self.current = Some(block_no);
                Ok(offset)
            }
            Ok(BlockOutcome::EndOfStream) => {
                // The open-time size check promised this block exists, so
                // running out of bytes here means the file shrank.
                let err = FormatError::truncated(BLOCK_HEADER_BYTES, 0, block_no);
                warn!(block = block_no, error = %err, "block load failed");
                Err(err)
            }
            Err(err) => {
                warn!(block = block_no, error = %err, "block load failed");
                Err(err)
            }
        }
    }
}
