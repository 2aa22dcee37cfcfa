// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI command implementations.

pub mod dump;
pub mod inspect;

pub use dump::DumpCmd;
pub use inspect::InspectCmd;
