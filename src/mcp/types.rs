// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ToolError;
use crate::ops::Outcome;

/// The `{success, message, ...}` object every tool call answers with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    pub fn success(outcome: Outcome) -> Self {
        Self {
            success: true,
            message: outcome.message,
            code: None,
            extra: outcome.extra,
        }
    }

    pub fn failure(err: &ToolError) -> Self {
        let mut extra = Map::new();
        if let ToolError::Validation(validation) = err {
            let errors = validation
                .errors()
                .iter()
                .map(|field| json!({ "path": field.path, "reason": field.reason }))
                .collect();
            extra.insert("errors".to_owned(), Value::Array(errors));
        }
        Self {
            success: false,
            message: err.to_string(),
            code: Some(err.code()),
            extra,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|err| {
            format!(r#"{{"success": false, "message": "failed to encode result: {err}"}}"#)
        })
    }
}
