// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;
use rstest::{fixture, rstest};
use serde_json::{json, Value};

use super::*;
use crate::diagram::testing::StubRenderer;
use crate::diagram::{DiagramRenderer, RenderError};
use crate::store::DEFAULT_SESSION_TTL;
use crate::theme::ThemeCatalog;

struct PanickingRenderer;

#[async_trait]
impl DiagramRenderer for PanickingRenderer {
    async fn render(&self, _source: &str) -> Result<Vec<u8>, RenderError> {
        panic!("renderer exploded");
    }
}

fn server_with(renderer: Arc<dyn DiagramRenderer>) -> OfficeMcp {
    let themes = ThemeCatalog::builtin().expect("builtin themes");
    OfficeMcp::new(Office::new(themes, renderer, DEFAULT_SESSION_TTL))
}

#[fixture]
fn server() -> OfficeMcp {
    server_with(Arc::new(StubRenderer::new(64, 32)))
}

fn args(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

async fn call(server: &OfficeMcp, name: &str, arguments: Value) -> Value {
    let envelope = server.call(name, args(arguments)).await;
    serde_json::from_str(&envelope.to_json()).expect("envelope is json")
}

fn message(envelope: &Value) -> &str {
    envelope["message"].as_str().expect("message")
}

#[rstest]
#[tokio::test]
async fn unknown_tool_is_a_structured_failure(server: OfficeMcp) {
    let envelope = call(&server, "word_delete", json!({})).await;

    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["code"], "unknown_tool");
    assert_eq!(message(&envelope), "unknown tool: word_delete");
}

#[rstest]
#[case("word_create", json!({ "title": "T" }), "outputPath")]
#[case("excel_create", json!({ "title": "T", "outputPath": "../t.xlsx" }), "outputPath")]
#[case("word_add_heading", json!({ "docId": "word_1_abc", "text": "H", "level": 9 }), "level")]
#[case("excel_add_formula", json!({ "workbookId": "x", "sheetName": "S", "cell": "c10", "formula": "1" }), "cell")]
#[tokio::test]
async fn invalid_arguments_never_reach_the_session(
    server: OfficeMcp,
    #[case] tool: &str,
    #[case] arguments: Value,
    #[case] field: &str,
) {
    let envelope = call(&server, tool, arguments).await;

    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["code"], "validation");
    assert!(message(&envelope).starts_with("parameter validation failed: "));
    let errors = envelope["errors"].as_array().expect("field errors");
    assert!(errors.iter().any(|e| e["path"] == field), "{envelope}");
}

#[rstest]
#[tokio::test]
async fn calls_on_missing_sessions_name_the_handle(server: OfficeMcp) {
    let envelope = call(&server, "excel_save", json!({ "workbookId": "excel_0_nothing" })).await;

    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["code"], "not_found");
    assert_eq!(message(&envelope), "workbook excel_0_nothing does not exist");
}

#[rstest]
#[tokio::test]
async fn create_returns_a_well_formed_handle(server: OfficeMcp) {
    let pattern = regex::Regex::new(r"^word_\d+_[0-9a-z]{7}$").expect("regex");
    let mut seen = std::collections::HashSet::new();

    for i in 0..120 {
        let envelope = call(
            &server,
            "word_create",
            json!({ "title": format!("Doc {i}"), "outputPath": "/tmp/doc.docx" }),
        )
        .await;
        let id = envelope["docId"].as_str().expect("docId").to_owned();
        assert!(pattern.is_match(&id), "{id}");
        assert!(seen.insert(id));
    }
}

#[tokio::test]
async fn handler_panics_become_internal_failures() {
    let server = server_with(Arc::new(PanickingRenderer));
    let created = call(
        &server,
        "word_create",
        json!({ "title": "T", "outputPath": "/tmp/t.docx" }),
    )
    .await;
    let id = created["docId"].as_str().expect("docId").to_owned();

    let envelope = call(
        &server,
        "word_add_diagram",
        json!({ "docId": id, "mermaid": "graph TD; A-->B" }),
    )
    .await;

    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["code"], "internal");
    assert_eq!(message(&envelope), "internal error: renderer exploded");

    let list = call(&server, "word_add_list", json!({ "docId": id, "items": ["still here"] })).await;
    assert_eq!(list["success"], true);
}

#[rstest]
fn server_info_enables_tools(server: OfficeMcp) {
    let info = server.get_info();

    assert!(info.capabilities.tools.is_some());
    assert!(info
        .instructions
        .as_deref()
        .is_some_and(|text| text.contains("word_create")));
}

#[rstest]
#[tokio::test]
async fn tool_requests_answer_with_a_single_text_envelope(server: OfficeMcp) {
    let request: CallToolRequestParams = serde_json::from_value(json!({
        "name": "word_add_heading",
        "arguments": { "docId": "word_1_missing", "text": "H", "level": 1 },
    }))
    .expect("request params");

    let result = serde_json::to_value(server.answer(request).await).expect("result json");
    let content = result["content"].as_array().expect("content blocks");
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");

    let envelope: Value =
        serde_json::from_str(content[0]["text"].as_str().expect("text")).expect("envelope json");
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["code"], "not_found");
    assert_eq!(message(&envelope), "document word_1_missing does not exist");
}
