// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Memory-mapped byte source.
//!
//! The continuous access layer works against any `Read + Seek` source.
//! [`MmapSource`] adapts a memory-mapped file to that boundary with an
//! owned cursor position, so mmap-backed and `File`-backed recordings share
//! one decode path while multi-gigabyte files avoid read syscalls.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::core::{FormatError, Result};

/// A memory-mapped file exposed as a seekable byte source.
pub struct MmapSource {
    mmap: memmap2::Mmap,
    pos: u64,
}

impl MmapSource {
    /// Map a file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| FormatError::io(format!("failed to open file: {e}")))?;
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| FormatError::io(format!("failed to mmap file: {e}")))?;
        Ok(Self { mmap, pos: 0 })
    }

    /// Total mapped length in bytes.
    pub fn len(&self) -> u64 {
        self.mmap.len() as u64
    }

    /// True when the mapped file is empty.
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl Read for MmapSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.mmap.len() as u64;
        let start = self.pos.min(len) as usize;
        let n = (len as usize - start).min(buf.len());
        buf[..n].copy_from_slice(&self.mmap[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for MmapSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(offset) => (self.mmap.len() as u64).checked_add_signed(offset),
            SeekFrom::Current(offset) => self.pos.checked_add_signed(offset),
        };
        match target {
            Some(target) => {
                self.pos = target;
                Ok(target)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn with_temp_mapping(contents: &[u8], check: impl FnOnce(MmapSource)) {
        let path = format!(
            "/tmp/neurocodec_mmap_source_{}_{contents_len}.bin",
            std::process::id(),
            contents_len = contents.len()
        );
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        file.sync_all().unwrap();

        check(MmapSource::open(&path).unwrap());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_and_seek() {
        with_temp_mapping(b"0123456789", |mut source| {
            assert_eq!(source.len(), 10);

            let mut buf = [0u8; 4];
            source.read_exact(&mut buf).unwrap();
            assert_eq!(&buf, b"0123");

            source.seek(SeekFrom::Start(8)).unwrap();
            let mut rest = Vec::new();
            source.read_to_end(&mut rest).unwrap();
            assert_eq!(rest, b"89");

            source.seek(SeekFrom::End(-3)).unwrap();
            let mut buf = [0u8; 3];
            source.read_exact(&mut buf).unwrap();
            assert_eq!(&buf, b"789");
        });
    }

    #[test]
    fn test_read_past_end_is_zero() {
        with_temp_mapping(b"abc", |mut source| {
            source.seek(SeekFrom::Start(100)).unwrap();
            let mut buf = [0u8; 4];
            assert_eq!(source.read(&mut buf).unwrap(), 0);
        });
    }

    #[test]
    fn test_seek_before_start_rejected() {
        with_temp_mapping(b"abc", |mut source| {
            assert!(source.seek(SeekFrom::Current(-1)).is_err());
            assert!(source.seek(SeekFrom::End(-4)).is_err());
        });
    }

    #[test]
    fn test_seek_to_extreme_start_offset() {
        with_temp_mapping(b"abc", |mut source| {
            // Positions past i64::MAX must not wrap into a rejection.
            let pos = source.seek(SeekFrom::Start(u64::MAX)).unwrap();
            assert_eq!(pos, u64::MAX);

            let mut buf = [0u8; 1];
            assert_eq!(source.read(&mut buf).unwrap(), 0);

            // But overflowing past u64::MAX is an error.
            assert!(source.seek(SeekFrom::Current(1)).is_err());
        });
    }
}
