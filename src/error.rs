// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Failure taxonomy for tool calls.
//!
//! Every variant is recoverable from the caller's point of view: the dispatcher turns it into a
//! `{success: false, message}` envelope using the `Display` text below.

use std::io;
use std::path::Path;

use crate::diagram::RenderError;
use crate::store::SessionNotFound;
use crate::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("parameter validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    SessionNotFound(#[from] SessionNotFound),
    #[error("sheet {sheet} does not exist")]
    SheetNotFound { sheet: String },
    #[error("sheet {sheet} already exists")]
    SheetExists { sheet: String },
    #[error("invalid range {range}: {reason}")]
    InvalidRange { range: String, reason: String },
    #[error("diagram render failed: {0}")]
    DiagramRender(#[from] RenderError),
    #[error("failed to build {kind}: {message}")]
    Encode { kind: &'static str, message: String },
    #[error("failed to write {path}: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn filesystem(path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn encode(kind: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            kind,
            message: err.to_string(),
        }
    }

    /// Stable machine-readable category, included in failure envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::Validation(_) => "validation",
            Self::SessionNotFound(_) => "not_found",
            Self::SheetNotFound { .. } => "sheet_not_found",
            Self::SheetExists { .. } => "sheet_exists",
            Self::InvalidRange { .. } => "invalid_range",
            Self::DiagramRender(_) => "diagram_render",
            Self::Encode { .. } => "encode",
            Self::Filesystem { .. } => "filesystem",
            Self::Internal(_) => "internal",
        }
    }
}
