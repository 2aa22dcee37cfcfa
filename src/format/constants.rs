// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Continuous recording format constants.
//!
//! This module contains the fixed block layout of the continuous format.
//! Every block is exactly [`BLOCK_BYTES`] long:
//!
//! | Field            | Size | Encoding                        |
//! |------------------|------|---------------------------------|
//! | timestamp        | 8    | signed 64-bit, little-endian    |
//! | sample_count     | 2    | unsigned 16-bit, little-endian  |
//! | recording_number | 2    | unsigned 16-bit, little-endian  |
//! | body             | 2048 | 1024 x signed 16-bit big-endian |
//! | tail marker      | 10   | [`BLOCK_MARKER`]                |
//!
//! Using a single source of truth for these values prevents bugs from
//! layout mismatches between the codec, the cache, and the file handle.

/// Samples carried by every block. The on-disk `sample_count` field must
/// always equal this; anything else marks the block unreadable.
pub const SAMPLES_PER_BLOCK: usize = 1024;

/// Size of the per-block header: timestamp + sample count + recording number.
pub const BLOCK_HEADER_BYTES: usize = 12;

/// Size of the sample body: [`SAMPLES_PER_BLOCK`] 16-bit samples.
pub const BLOCK_BODY_BYTES: usize = SAMPLES_PER_BLOCK * 2;

/// Size of the tail marker.
pub const BLOCK_MARKER_BYTES: usize = 10;

/// Total size of one block on disk.
pub const BLOCK_BYTES: u64 =
    (BLOCK_HEADER_BYTES + BLOCK_BODY_BYTES + BLOCK_MARKER_BYTES) as u64;

/// Tail marker closing every block. A mismatch means the block was read at
/// the wrong alignment or its tail was damaged.
pub const BLOCK_MARKER: [u8; BLOCK_MARKER_BYTES] =
    [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF];

/// Size of the leading text header at the start of every recording file.
pub const FILE_HEADER_BYTES: usize = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(BLOCK_BYTES, 2070);
        assert_eq!(BLOCK_BODY_BYTES, 2048);
    }

    #[test]
    fn test_marker_shape() {
        assert_eq!(BLOCK_MARKER.len(), BLOCK_MARKER_BYTES);
        assert_eq!(BLOCK_MARKER[0], 0x00);
        assert_eq!(BLOCK_MARKER[8], 0x08);
        assert_eq!(BLOCK_MARKER[9], 0xFF);
    }
}
