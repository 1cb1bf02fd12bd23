// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Tools are listed from a closed catalogue and dispatched by name. Every call, including
//! unknown tools, invalid arguments and handler panics, answers with a JSON envelope rather than
//! a protocol error.

mod catalog;
mod server;
mod types;

pub use catalog::{tools, ToolName};
pub use server::OfficeMcp;
pub use types::Envelope;
