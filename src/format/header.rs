// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Leading file header of a continuous recording.
//!
//! The first [`FILE_HEADER_BYTES`](crate::format::constants::FILE_HEADER_BYTES)
//! bytes of a recording are a text region of `header.<key> = <value>` lines,
//! padded to the fixed size. The fields the reader depends on are the header
//! size itself, the voltage scale factor (`bitVolts`, microvolts per ADC
//! count), and the sampling rate in Hz. Everything else is preserved as-is
//! for callers that want it.
//!
//! A [`FileHeader`] can also be built directly, for recordings whose scale
//! and rate come from an external settings source instead of the embedded
//! text region.

use std::collections::BTreeMap;

use crate::core::{FormatError, Result};
use crate::format::constants::FILE_HEADER_BYTES;
use crate::io::metadata::SignalScale;

/// Parsed leading header of a continuous recording.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    /// Size of the leading header region in bytes
    pub header_bytes: u64,
    /// Microvolts per raw ADC count
    pub bit_volts: f64,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Format name string, if present
    pub format: Option<String>,
    /// Format version string, if present
    pub version: Option<String>,
    /// Channel name, if present
    pub channel: Option<String>,
    /// Remaining header keys, preserved verbatim
    pub extra: BTreeMap<String, String>,
}

impl FileHeader {
    /// Build a header from externally supplied scale and rate.
    ///
    /// The header size defaults to the format's fixed 1024 bytes.
    pub fn new(bit_volts: f64, sample_rate: f64) -> Self {
        Self {
            header_bytes: FILE_HEADER_BYTES as u64,
            bit_volts,
            sample_rate,
            format: None,
            version: None,
            channel: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the header size in bytes.
    pub fn with_header_bytes(mut self, header_bytes: u64) -> Self {
        self.header_bytes = header_bytes;
        self
    }

    /// Set the channel name.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Conversion parameters for scaled projections.
    pub fn scale(&self) -> SignalScale {
        SignalScale {
            bit_volts: self.bit_volts,
            sample_rate: self.sample_rate,
        }
    }

    /// Parse the leading header region of a recording.
    ///
    /// `raw` must be the full fixed-size header region. Lines that do not
    /// look like `header.<key> = <value>` are ignored; values may be quoted
    /// and may end with `;` or `,`.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(raw);
        let mut fields: BTreeMap<String, String> = BTreeMap::new();

        for line in text.split(['\n', '\r']) {
            let line = line.trim().trim_end_matches([';', ',']).trim();
            let Some(rest) = line.strip_prefix("header.") else {
                continue;
            };
            let Some((key, value)) = rest.split_once('=') else {
                continue;
            };
            let key = key.trim().to_string();
            let value = value
                .trim()
                .trim_matches(['\'', '"'])
                .trim()
                .to_string();
            fields.insert(key, value);
        }

        let header_bytes = match fields.remove("header_bytes") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| FormatError::header(format!("bad header_bytes value '{v}'")))?,
            None => FILE_HEADER_BYTES as u64,
        };
        if header_bytes != FILE_HEADER_BYTES as u64 {
            return Err(FormatError::header(format!(
                "unsupported header size {header_bytes}, expected {FILE_HEADER_BYTES}"
            )));
        }

        let bit_volts = Self::take_f64(&mut fields, "bitVolts")?
            .ok_or_else(|| FormatError::header("missing bitVolts"))?;
        let sample_rate = Self::take_f64(&mut fields, "sampleRate")?
            .ok_or_else(|| FormatError::header("missing sampleRate"))?;
        if sample_rate <= 0.0 {
            return Err(FormatError::header(format!(
                "non-positive sampleRate {sample_rate}"
            )));
        }

        Ok(Self {
            header_bytes,
            bit_volts,
            sample_rate,
            format: fields.remove("format"),
            version: fields.remove("version"),
            channel: fields.remove("channel"),
            extra: fields,
        })
    }

    fn take_f64(fields: &mut BTreeMap<String, String>, key: &str) -> Result<Option<f64>> {
        match fields.remove(key) {
            Some(v) => v
                .parse::<f64>()
                .map(Some)
                .map_err(|_| FormatError::header(format!("bad {key} value '{v}'"))),
            None => Ok(None),
        }
    }
}
