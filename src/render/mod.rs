// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conversion of finished build contexts into `.docx` and `.xlsx` payloads.
//!
//! Both renderers are pure: they read a session's accumulated state and return the packaged
//! bytes. Writing to disk is left to the save operations.

pub mod document;
pub mod workbook;

pub use document::{render_document, SaveOptions};
pub use workbook::render_workbook;

/// Parses `RRGGBB` (with or without `#`), falling back to black.
pub(crate) fn hex_to_rgb(hex: &str) -> u32 {
    u32::from_str_radix(hex.trim().trim_start_matches('#'), 16)
        .map(|rgb| rgb & 0x00FF_FFFF)
        .unwrap_or(0)
}
