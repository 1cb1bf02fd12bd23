// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session-mutating operations behind every tool.
//!
//! Each operation takes its validated parameter type, looks the session up (or creates it), and
//! returns an [`Outcome`] or a [`ToolError`]. Nothing here deals with raw arguments or the wire
//! envelope; that is the dispatcher's job.

mod excel;
mod word;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::diagram::DiagramRenderer;
use crate::error::ToolError;
use crate::paths::write_output;
use crate::store::{DocumentStore, WorkbookStore};
use crate::theme::{Theme, ThemeCatalog};

/// Result of a successful operation: a human-readable message plus operation-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub message: String,
    pub extra: Map<String, Value>,
}

impl Outcome {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }
}

/// Both session stores plus the collaborators operations need.
///
/// One value per server instance; nothing is process-global.
pub struct Office {
    documents: DocumentStore,
    workbooks: WorkbookStore,
    themes: ThemeCatalog,
    diagrams: Arc<dyn DiagramRenderer>,
}

impl Office {
    pub fn new(themes: ThemeCatalog, diagrams: Arc<dyn DiagramRenderer>, ttl: Duration) -> Self {
        Self {
            documents: DocumentStore::new(ttl),
            workbooks: WorkbookStore::new(ttl),
            themes,
            diagrams,
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn workbooks(&self) -> &WorkbookStore {
        &self.workbooks
    }

    pub fn themes(&self) -> &ThemeCatalog {
        &self.themes
    }

    fn theme(&self, name: &str) -> Arc<Theme> {
        self.themes.resolve(name)
    }
}

/// Writes a rendered payload off the async worker.
async fn persist(path: &Path, bytes: Vec<u8>) -> Result<(), ToolError> {
    let target: PathBuf = path.to_path_buf();
    let written = tokio::task::spawn_blocking(move || write_output(&target, &bytes)).await;
    match written {
        Ok(result) => result.map_err(|err| ToolError::filesystem(path, err)),
        Err(err) => Err(ToolError::Internal(format!("file write task failed: {err}"))),
    }
}

/// Note appended to create messages when a non-blank template was requested.
fn template_note(template: Option<&str>, kind: &str) -> Option<String> {
    match template {
        None | Some("blank") => None,
        Some(name) => Some(format!(
            "template {name} is not implemented yet, started from a blank {kind}"
        )),
    }
}
