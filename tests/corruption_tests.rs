// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tests for corruption and truncation detection.
//!
//! Run with: cargo test --test corruption_tests

mod common;

use std::io::Cursor;

use common::{marker_offset, sample_count_offset, sample_value, simple_fixture};
use neurocodec::{ContinuousFile, FormatError};

#[test]
fn test_truncated_file_rejected_at_open() {
    let mut bytes = simple_fixture(3);
    bytes.truncate(bytes.len() - 5);

    let err = ContinuousFile::from_source(Cursor::new(bytes)).unwrap_err();
    match err {
        FormatError::SizeMismatch {
            file_size,
            header_bytes,
            trailing,
        } => {
            assert_eq!(file_size, 7229);
            assert_eq!(header_bytes, 1024);
            assert_eq!(trailing, 2065);
        }
        other => panic!("expected SizeMismatch, got {other:?}"),
    }
}

#[test]
fn test_trailing_garbage_rejected_at_open() {
    let mut bytes = simple_fixture(2);
    bytes.push(0xAB);

    let err = ContinuousFile::from_source(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        FormatError::SizeMismatch { trailing: 1, .. }
    ));
}

#[test]
fn test_file_smaller_than_header_rejected() {
    let bytes = vec![b' '; 100];
    let err = ContinuousFile::from_source(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, FormatError::Header { .. }));
}

#[test]
fn test_any_marker_byte_flip_is_detected() {
    for position in 0..10 {
        let mut bytes = simple_fixture(2);
        let offset = marker_offset(2) + position;
        bytes[offset] ^= 0x40;

        let file = ContinuousFile::from_source(Cursor::new(bytes)).unwrap();
        let mut raw = file.raw_samples();

        // Block 1 is intact.
        assert_eq!(raw.get(1).unwrap(), sample_value(0));

        let err = raw.get(1025).unwrap_err();
        match err {
            FormatError::CorruptBlock { block, reason } => {
                assert_eq!(block, 2, "marker byte {position}");
                assert!(reason.contains("tail marker mismatch"));
            }
            other => panic!("expected CorruptBlock, got {other:?}"),
        }
    }
}

#[test]
fn test_marker_damage_tolerated_without_verification() {
    let mut bytes = simple_fixture(2);
    let offset = marker_offset(2);
    bytes[offset] ^= 0xFF;

    let file = ContinuousFile::from_source(Cursor::new(bytes)).unwrap();
    let mut raw = file.raw_samples().without_marker_check();

    assert_eq!(raw.get(1025).unwrap(), sample_value(1024));
    assert_eq!(raw.get(2048).unwrap(), sample_value(2047));
}

#[test]
fn test_bad_sample_count_fails_even_without_verification() {
    let mut bytes = simple_fixture(2);
    let offset = sample_count_offset(2);
    bytes[offset..offset + 2].copy_from_slice(&1000u16.to_le_bytes());

    let file = ContinuousFile::from_source(Cursor::new(bytes)).unwrap();
    let mut raw = file.raw_samples().without_marker_check();

    let err = raw.get(1025).unwrap_err();
    match err {
        FormatError::CorruptBlock { block: 2, reason } => {
            assert!(reason.contains("sample count 1000"));
        }
        other => panic!("expected CorruptBlock, got {other:?}"),
    }
}

#[test]
fn test_failed_load_does_not_poison_later_reads() {
    let mut bytes = simple_fixture(3);
    let offset = marker_offset(2);
    bytes[offset] ^= 0x01;

    let file = ContinuousFile::from_source(Cursor::new(bytes)).unwrap();
    let mut raw = file.raw_samples();

    assert!(raw.get(1025).is_err());
    // The slot was invalidated; other blocks still decode correctly.
    assert_eq!(raw.get(1).unwrap(), sample_value(0));
    assert_eq!(raw.get(2049).unwrap(), sample_value(2048));
    // And the damaged block still fails on retry rather than serving
    // stale bytes.
    assert!(raw.get(1026).is_err());
}

#[test]
fn test_corruption_errors_are_classified() {
    let mut bytes = simple_fixture(1);
    bytes[marker_offset(1)] ^= 0x01;

    let file = ContinuousFile::from_source(Cursor::new(bytes)).unwrap();
    let err = file.raw_samples().get(1).unwrap_err();
    assert!(err.is_corruption());
}
