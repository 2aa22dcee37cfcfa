// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Summary metadata for opened recordings.

use serde::Serialize;

/// Conversion parameters handed to scaled projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalScale {
    /// Microvolts per raw ADC count
    pub bit_volts: f64,
    /// Sampling rate in Hz
    pub sample_rate: f64,
}

/// Summary of an opened continuous recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingInfo {
    /// Path the recording was opened from, when known
    pub path: Option<String>,
    /// Total file size in bytes
    pub file_size: u64,
    /// Leading header size in bytes
    pub header_bytes: u64,
    /// Number of whole blocks in the data region
    pub block_count: u64,
    /// Total decoded sample count
    pub sample_count: u64,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Microvolts per raw ADC count
    pub bit_volts: f64,
    /// Recording duration in seconds
    pub duration_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_serializes_to_json() {
        let info = RecordingInfo {
            path: Some("/data/ch1.continuous".to_string()),
            file_size: 7234,
            header_bytes: 1024,
            block_count: 3,
            sample_count: 3072,
            sample_rate: 30000.0,
            bit_volts: 0.195,
            duration_secs: 3072.0 / 30000.0,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"block_count\":3"));
        assert!(json.contains("\"sample_count\":3072"));
    }
}
