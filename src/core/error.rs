// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for continuous recording access.
//!
//! The taxonomy keeps the failure classes distinct:
//! - Truncation (stream ended inside a block that the file size promised)
//! - Block corruption (bad sample count, short body, tail marker mismatch)
//! - File-size mismatch at open time
//! - Bounds violations (contract errors, not corruption)
//! - Header parse failures and propagated I/O errors

use std::fmt;

/// Errors that can occur while opening or reading a continuous recording.
#[derive(Debug, Clone)]
pub enum FormatError {
    /// Stream ended mid-block after the block count was already committed
    Truncated {
        /// Bytes that were needed
        requested: usize,
        /// Bytes that were actually available
        available: usize,
        /// 1-based block number being read
        block: u64,
    },

    /// A block failed validation during decode
    CorruptBlock {
        /// 1-based block number that failed
        block: u64,
        /// What went wrong
        reason: String,
    },

    /// The data region is not a whole number of blocks
    SizeMismatch {
        /// Total file size in bytes
        file_size: u64,
        /// Leading header size in bytes
        header_bytes: u64,
        /// Leftover bytes after the last whole block
        trailing: u64,
    },

    /// Index outside the valid `[1, len]` range
    OutOfBounds {
        /// Requested 1-based index
        index: u64,
        /// Sample count of the recording
        len: u64,
    },

    /// Leading file header could not be parsed or validated
    Header {
        /// Error message
        message: String,
    },

    /// Underlying I/O failure
    Io {
        /// Error message
        message: String,
    },
}

impl FormatError {
    /// Create a truncation error.
    pub fn truncated(requested: usize, available: usize, block: u64) -> Self {
        FormatError::Truncated {
            requested,
            available,
            block,
        }
    }

    /// Create a block corruption error.
    pub fn corrupt_block(block: u64, reason: impl Into<String>) -> Self {
        FormatError::CorruptBlock {
            block,
            reason: reason.into(),
        }
    }

    /// Create a file-size mismatch error.
    pub fn size_mismatch(file_size: u64, header_bytes: u64, trailing: u64) -> Self {
        FormatError::SizeMismatch {
            file_size,
            header_bytes,
            trailing,
        }
    }

    /// Create a bounds violation error.
    pub fn out_of_bounds(index: u64, len: u64) -> Self {
        FormatError::OutOfBounds { index, len }
    }

    /// Create a header error.
    pub fn header(message: impl Into<String>) -> Self {
        FormatError::Header {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        FormatError::Io {
            message: message.into(),
        }
    }

    /// True for failures that indicate damaged or misaligned file contents.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            FormatError::Truncated { .. }
                | FormatError::CorruptBlock { .. }
                | FormatError::SizeMismatch { .. }
        )
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Truncated {
                requested,
                available,
                block,
            } => write!(
                f,
                "Truncated stream in block {block}: needed {requested} bytes, {available} available"
            ),
            FormatError::CorruptBlock { block, reason } => {
                write!(f, "Corrupt block {block}: {reason}")
            }
            FormatError::SizeMismatch {
                file_size,
                header_bytes,
                trailing,
            } => write!(
                f,
                "File size mismatch: {file_size} bytes with a {header_bytes}-byte header leaves {trailing} trailing bytes past the last whole block"
            ),
            FormatError::OutOfBounds { index, len } => {
                write!(f, "Index {index} out of bounds for recording of {len} samples")
            }
            FormatError::Header { message } => write!(f, "Invalid file header: {message}"),
            FormatError::Io { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for neurocodec operations.
pub type Result<T> = std::result::Result<T, FormatError>;
