// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Block codec for the continuous recording format.
//!
//! [`DataBlock`] owns one block's worth of fixed buffers and is overwritten
//! in place on every load, so random access never allocates per block.
//! Decoding either produces a fully validated block or a definitive
//! failure; a partially decoded block is never treated as valid.
//!
//! End-of-stream handling distinguishes two cases:
//! - Zero header bytes available at a block boundary is the normal terminal
//!   condition ([`BlockOutcome::EndOfStream`]).
//! - A partial header, short body, or short tail marker is a hard failure.

use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::core::{FormatError, Result};
use crate::format::constants::{
    BLOCK_BODY_BYTES, BLOCK_HEADER_BYTES, BLOCK_MARKER, BLOCK_MARKER_BYTES, SAMPLES_PER_BLOCK,
};

/// Decoded per-block header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockHeader {
    /// 1-based index of the block's first sample within its recording
    pub timestamp: i64,
    /// Number of samples in the block; always [`SAMPLES_PER_BLOCK`] when valid
    pub sample_count: u16,
    /// Recording epoch this block belongs to; changes when recordings are
    /// concatenated into one file
    pub recording_number: u16,
}

/// Outcome of a block read at a position the caller believes to be a block
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// The slot now holds a fully decoded, validated block
    Loaded,
    /// The stream ended cleanly before any header byte was available
    EndOfStream,
}

/// One block's reusable decode buffers.
///
/// Allocated once per view and refilled in place by [`DataBlock::read_from`].
pub struct DataBlock {
    header: BlockHeader,
    body: [u8; BLOCK_BODY_BYTES],
    samples: [i16; SAMPLES_PER_BLOCK],
    marker: [u8; BLOCK_MARKER_BYTES],
}

impl DataBlock {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            header: BlockHeader::default(),
            body: [0u8; BLOCK_BODY_BYTES],
            samples: [0i16; SAMPLES_PER_BLOCK],
            marker: [0u8; BLOCK_MARKER_BYTES],
        }
    }

    /// Header of the most recently decoded block.
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Native-endian samples of the most recently decoded block.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Raw big-endian body bytes of the most recently decoded block.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Sample at a 0-based offset within the block.
    pub fn sample(&self, offset: usize) -> i16 {
        self.samples[offset]
    }

    /// Decode one block from `reader`, which must be positioned at a block
    /// boundary, overwriting this slot.
    ///
    /// `block` is the 1-based block number, used only for error context.
    /// When `verify` is false the tail marker bytes are consumed but not
    /// compared, which tolerates recordings with damaged tails.
    pub fn read_from<R: Read>(
        &mut self,
        reader: &mut R,
        block: u64,
        verify: bool,
    ) -> Result<BlockOutcome> {
        let mut raw_header = [0u8; BLOCK_HEADER_BYTES];
        let mut filled = 0;
        while filled < raw_header.len() {
            let n = reader.read(&mut raw_header[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            return Ok(BlockOutcome::EndOfStream);
        }
        if filled < raw_header.len() {
            return Err(FormatError::truncated(BLOCK_HEADER_BYTES, filled, block));
        }

        let mut fields = &raw_header[..];
        let timestamp = fields.read_i64::<LittleEndian>()?;
        let sample_count = fields.read_u16::<LittleEndian>()?;
        let recording_number = fields.read_u16::<LittleEndian>()?;

        if sample_count as usize != SAMPLES_PER_BLOCK {
            return Err(FormatError::corrupt_block(
                block,
                format!("sample count {sample_count}, expected {SAMPLES_PER_BLOCK}"),
            ));
        }

        reader.read_exact(&mut self.body).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                FormatError::corrupt_block(block, "short body read")
            } else {
                e.into()
            }
        })?;

        reader.read_exact(&mut self.marker).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                FormatError::corrupt_block(block, "short tail marker read")
            } else {
                e.into()
            }
        })?;

        if verify && self.marker != BLOCK_MARKER {
            return Err(FormatError::corrupt_block(
                block,
                format!("tail marker mismatch: {}", hex::encode(self.marker)),
            ));
        }

        self.header = BlockHeader {
            timestamp,
            sample_count,
            recording_number,
        };
        BigEndian::read_i16_into(&self.body, &mut self.samples);

        Ok(BlockOutcome::Loaded)
    }
}

impl Default for DataBlock {
    fn default() -> Self {
        Self::new()
    }
}
