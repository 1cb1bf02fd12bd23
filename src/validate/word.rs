// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Args, Choice, ScalarValue, Validate, ValidationError};
use crate::model::{ParagraphStyle, TableStyle};
use crate::paths::OutputKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentTheme {
    Government,
    Academic,
    Software,
    Business,
    Alibaba,
    Tencent,
    Bytedance,
    Minimal,
    #[default]
    Default,
}

impl Choice for DocumentTheme {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("government", Self::Government),
        ("academic", Self::Academic),
        ("software", Self::Software),
        ("business", Self::Business),
        ("alibaba", Self::Alibaba),
        ("tencent", Self::Tencent),
        ("bytedance", Self::Bytedance),
        ("minimal", Self::Minimal),
        ("default", Self::Default),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentTemplate {
    TechDoc,
    WeeklyReport,
    MonthlyReport,
    Prd,
    MeetingNotes,
    Blank,
}

impl Choice for DocumentTemplate {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("tech-doc", Self::TechDoc),
        ("weekly-report", Self::WeeklyReport),
        ("monthly-report", Self::MonthlyReport),
        ("prd", Self::Prd),
        ("meeting-notes", Self::MeetingNotes),
        ("blank", Self::Blank),
    ];
}

/// Colour preamble applied to Mermaid sources before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiagramTheme {
    Professional,
    Fresh,
    Business,
    Tech,
    Warm,
    #[default]
    Default,
}

impl Choice for DiagramTheme {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("professional", Self::Professional),
        ("fresh", Self::Fresh),
        ("business", Self::Business),
        ("tech", Self::Tech),
        ("warm", Self::Warm),
        ("default", Self::Default),
    ];
}

fn default_diagram_width() -> f64 {
    15.0
}

/// Start a new Word document session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordCreateParams {
    /// Document title.
    #[schemars(length(min = 1))]
    pub title: String,
    /// Where `word_save` writes the file. Must end in `.docx` and may not contain `..`.
    #[schemars(length(min = 1))]
    pub output_path: String,
    /// Starting template; only `blank` content is generated today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<DocumentTemplate>,
    /// Visual theme; `default` is the business theme.
    #[serde(default)]
    pub theme: DocumentTheme,
    /// Document author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Validate for WordCreateParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            title: args.non_empty_text("title"),
            output_path: args.output_path("outputPath", OutputKind::Document),
            template: args.optional_choice("template"),
            theme: args.choice_or("theme", DocumentTheme::Default),
            author: args.optional_text("author"),
        };
        args.finish(params)
    }
}

/// Append a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordAddHeadingParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// Heading text.
    #[schemars(length(min = 1))]
    pub text: String,
    /// Heading level, 1 (top) to 6.
    #[schemars(range(min = 1, max = 6))]
    pub level: u8,
    /// Prefix hierarchical numbers such as `1.2`.
    #[serde(default)]
    pub numbering: bool,
}

impl Validate for WordAddHeadingParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            doc_id: args.identifier("docId"),
            text: args.non_empty_text("text"),
            level: u8::try_from(args.integer_between("level", 1, 6)).unwrap_or(1),
            numbering: args.flag("numbering", false),
        };
        args.finish(params)
    }
}

/// Append a paragraph, optionally as a quote or call-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordAddParagraphParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// Paragraph text.
    pub text: String,
    #[serde(default)]
    pub style: ParagraphStyle,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Validate for WordAddParagraphParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            doc_id: args.identifier("docId"),
            text: args.text("text"),
            style: args.choice_or("style", ParagraphStyle::Normal),
            bold: args.flag("bold", false),
            italic: args.flag("italic", false),
        };
        args.finish(params)
    }
}

/// Append a table with a header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordAddTableParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// Column headers.
    #[schemars(length(min = 1))]
    pub headers: Vec<String>,
    /// Data rows; cells may be strings, numbers, booleans or null.
    pub rows: Vec<Vec<ScalarValue>>,
    #[serde(default)]
    pub style: TableStyle,
}

impl Validate for WordAddTableParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            doc_id: args.identifier("docId"),
            headers: args.string_list("headers", true),
            rows: args.rows("rows"),
            style: args.choice_or("style", TableStyle::Professional),
        };
        args.finish(params)
    }
}

/// Append a bulleted or numbered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordAddListParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// List items, in order.
    #[schemars(length(min = 1))]
    pub items: Vec<String>,
    /// Number the items instead of using bullets.
    #[serde(default)]
    pub ordered: bool,
}

impl Validate for WordAddListParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            doc_id: args.identifier("docId"),
            items: args.string_list("items", true),
            ordered: args.flag("ordered", false),
        };
        args.finish(params)
    }
}

/// Append a code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordAddCodeParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// Source code; line breaks are preserved.
    pub code: String,
    /// Language label shown above the block.
    #[serde(default)]
    pub language: String,
}

impl Validate for WordAddCodeParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            doc_id: args.identifier("docId"),
            code: args.text("code"),
            language: args.text_or("language", "").trim().to_owned(),
        };
        args.finish(params)
    }
}

/// Render a Mermaid diagram and append it as an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordAddDiagramParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// Mermaid source.
    #[schemars(length(min = 1))]
    pub mermaid: String,
    /// Caption placed under the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Display width in centimetres; height follows the aspect ratio.
    #[serde(default = "default_diagram_width")]
    pub width: f64,
    #[serde(default)]
    pub theme: DiagramTheme,
}

impl Validate for WordAddDiagramParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let mermaid = args.non_empty_text("mermaid");
        if !mermaid.is_empty() && mermaid.trim().is_empty() {
            args.report("mermaid", "must not be blank");
        }
        let params = Self {
            doc_id: args.identifier("docId"),
            mermaid,
            caption: args
                .optional_text("caption")
                .filter(|caption| !caption.trim().is_empty()),
            width: args.positive_number_or("width", default_diagram_width()),
            theme: args.choice_or("theme", DiagramTheme::Default),
        };
        args.finish(params)
    }
}

/// Render the document to its output path and end the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordSaveParams {
    /// Handle returned by `word_create`.
    pub doc_id: String,
    /// Add a centred page number to the footer.
    #[serde(default)]
    pub add_page_numbers: bool,
    /// Header text on every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_header: Option<String>,
    /// Footer text on every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_footer: Option<String>,
}

impl Validate for WordSaveParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            doc_id: args.identifier("docId"),
            add_page_numbers: args.flag("addPageNumbers", false),
            add_header: args.optional_text("addHeader"),
            add_footer: args.optional_text("addFooter"),
        };
        args.finish(params)
    }
}
