// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! On-disk format definitions.
//!
//! This module owns the bit-exact contract of the continuous recording
//! format: the fixed block layout and tail marker in [`constants`], the
//! block codec in [`block`], and the leading text header in [`header`].

pub mod block;
pub mod constants;
pub mod header;

pub use block::{BlockHeader, BlockOutcome, DataBlock};
pub use header::FileHeader;
