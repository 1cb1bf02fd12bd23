// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Office MCP: an MCP server that lets an agent build Word documents and Excel workbooks one
//! call at a time.
//!
//! A `*_create` tool opens a session held in memory, `*_add_*` tools append to it, and `*_save`
//! renders the file, writes it, and closes the session. Abandoned sessions are swept lazily on
//! the next create of the same kind.

pub mod config;
pub mod diagram;
pub mod error;
pub mod mcp;
pub mod model;
pub mod ops;
pub mod paths;
pub mod render;
pub mod store;
pub mod theme;
pub mod validate;
