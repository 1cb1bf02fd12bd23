// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Args, Choice, ScalarValue, Validate, ValidationError};
use crate::model::{column_letter_to_number, CellAddress, ChartKind, TableStyle, MAX_COLUMN};
use crate::paths::OutputKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkbookTheme {
    Alibaba,
    Tencent,
    Bytedance,
    #[default]
    Default,
}

impl Choice for WorkbookTheme {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("alibaba", Self::Alibaba),
        ("tencent", Self::Tencent),
        ("bytedance", Self::Bytedance),
        ("default", Self::Default),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WorkbookTemplate {
    DataReport,
    ProjectTracker,
    Budget,
    Blank,
}

impl Choice for WorkbookTemplate {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("data-report", Self::DataReport),
        ("project-tracker", Self::ProjectTracker),
        ("budget", Self::Budget),
        ("blank", Self::Blank),
    ];
}

fn default_start_cell() -> String {
    "A1".to_owned()
}

fn default_chart_position() -> String {
    "F2".to_owned()
}

/// Start a new Excel workbook session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelCreateParams {
    /// Workbook title, stored in the document properties.
    #[schemars(length(min = 1))]
    pub title: String,
    /// Where `excel_save` writes the file. Must end in `.xlsx` and may not contain `..`.
    #[schemars(length(min = 1))]
    pub output_path: String,
    /// Starting template; only `blank` content is generated today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<WorkbookTemplate>,
    /// Visual theme; `default` is the business theme.
    #[serde(default)]
    pub theme: WorkbookTheme,
}

impl Validate for ExcelCreateParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            title: args.non_empty_text("title"),
            output_path: args.output_path("outputPath", OutputKind::Workbook),
            template: args.optional_choice("template"),
            theme: args.choice_or("theme", WorkbookTheme::Default),
        };
        args.finish(params)
    }
}

/// Add an empty worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelAddSheetParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
    /// Worksheet name; must be unique within the workbook.
    #[schemars(length(min = 1, max = 31))]
    pub sheet_name: String,
    /// Tab colour as 6-digit hex, with or without `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<String>,
}

impl Validate for ExcelAddSheetParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let workbook_id = args.identifier("workbookId");
        let sheet_name = sheet_name(&mut args);
        let tab_color = args
            .optional_text("tabColor")
            .and_then(|raw| match normalize_hex_color(&raw) {
                Some(color) => Some(color),
                None => {
                    args.report("tabColor", "must be a 6-digit hex colour such as FF6A00");
                    None
                }
            });
        args.finish(Self {
            workbook_id,
            sheet_name,
            tab_color,
        })
    }
}

/// Write a header row and data rows, auto-creating the sheet when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelWriteDataParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
    /// Target worksheet.
    pub sheet_name: String,
    /// Column headers.
    #[schemars(length(min = 1))]
    pub headers: Vec<String>,
    /// Data rows; numbers and booleans keep their type, `null` leaves the cell blank.
    pub rows: Vec<Vec<ScalarValue>>,
    /// Top-left cell of the header row, such as `A1`.
    #[serde(default = "default_start_cell")]
    pub start_cell: String,
    /// Add an autofilter over the written range.
    #[serde(default)]
    pub auto_filter: bool,
    /// Freeze every row down to the header.
    #[serde(default)]
    pub freeze_header: bool,
    #[serde(default)]
    pub style: TableStyle,
    #[serde(skip)]
    pub start: CellAddress,
}

impl Validate for ExcelWriteDataParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let workbook_id = args.identifier("workbookId");
        let sheet_name = sheet_name(&mut args);
        let headers = args.string_list("headers", true);
        let rows = args.rows("rows");
        let start = args.cell_or("startCell", CellAddress::ORIGIN);
        let params = Self {
            workbook_id,
            sheet_name,
            headers,
            rows,
            start_cell: start.to_string(),
            auto_filter: args.flag("autoFilter", false),
            freeze_header: args.flag("freezeHeader", false),
            style: args.choice_or("style", TableStyle::Professional),
            start,
        };
        args.finish(params)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartSeriesInput {
    /// Series name shown in the legend.
    pub name: String,
    /// One value per category.
    pub values: Vec<f64>,
}

/// Write a chart data table and insert a native chart over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelAddChartParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
    /// Target worksheet; must already exist.
    pub sheet_name: String,
    pub chart_type: ChartKind,
    /// Chart title, also written above the data table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Category labels.
    #[schemars(length(min = 1))]
    pub categories: Vec<String>,
    /// Data series.
    #[schemars(length(min = 1))]
    pub series: Vec<ChartSeriesInput>,
    /// Top-left cell of the data table, such as `F2`.
    #[serde(default = "default_chart_position")]
    pub position: String,
    #[serde(skip)]
    pub anchor: CellAddress,
}

impl Validate for ExcelAddChartParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let workbook_id = args.identifier("workbookId");
        let sheet_name = sheet_name(&mut args);
        let chart_type = args.choice("chartType");
        let title = args.optional_text("title");
        let categories = args.string_list("categories", true);
        let series = chart_series(&mut args);
        let anchor = args.cell_or("position", CellAddress::new(2, 6));
        args.finish(Self {
            workbook_id,
            sheet_name,
            chart_type,
            title,
            categories,
            series,
            position: anchor.to_string(),
            anchor,
        })
    }
}

fn chart_series(args: &mut Args<'_>) -> Vec<ChartSeriesInput> {
    let items = args.array("series", true);
    let mut series = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            args.report(format!("series.{i}"), "must be an object");
            continue;
        };
        let name = match object.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => {
                args.report(format!("series.{i}.name"), "must be a string");
                String::new()
            }
            None => {
                args.report(format!("series.{i}.name"), "is required");
                String::new()
            }
        };
        let values = match object.get("values").and_then(Value::as_array) {
            Some(values) => values
                .iter()
                .enumerate()
                .filter_map(|(j, value)| {
                    let number = value.as_f64();
                    if number.is_none() {
                        args.report(format!("series.{i}.values.{j}"), "must be a number");
                    }
                    number
                })
                .collect(),
            None => {
                args.report(format!("series.{i}.values"), "must be an array of numbers");
                Vec::new()
            }
        };
        series.push(ChartSeriesInput { name, values });
    }
    series
}

/// Write a formula into one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelAddFormulaParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
    /// Target worksheet; must already exist.
    pub sheet_name: String,
    /// Target cell such as `C10` (uppercase letters then row number).
    pub cell: String,
    /// Formula, with or without the leading `=`.
    #[schemars(length(min = 1))]
    pub formula: String,
    #[serde(skip)]
    pub at: CellAddress,
}

impl Validate for ExcelAddFormulaParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let workbook_id = args.identifier("workbookId");
        let sheet_name = sheet_name(&mut args);
        let at = args.cell("cell");
        let formula = args.non_empty_text("formula");
        let body = formula.trim().trim_start_matches('=').trim().to_owned();
        if !formula.is_empty() && body.is_empty() {
            args.report("formula", "must contain an expression");
        }
        args.finish(Self {
            workbook_id,
            sheet_name,
            cell: at.to_string(),
            formula: body,
            at,
        })
    }
}

/// Set column widths by letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelSetColumnWidthParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
    /// Target worksheet; must already exist.
    pub sheet_name: String,
    /// Column letter to width in characters, e.g. `{"A": 20, "B": 12.5}`.
    pub columns: BTreeMap<String, f64>,
    #[serde(skip)]
    pub widths: Vec<(u32, f64)>,
}

impl Validate for ExcelSetColumnWidthParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let workbook_id = args.identifier("workbookId");
        let sheet_name = sheet_name(&mut args);
        let mut columns = BTreeMap::new();
        let mut widths = Vec::new();
        if let Some(object) = args.object("columns") {
            for (letter, width) in object {
                let path = format!("columns.{letter}");
                let key = letter.trim().to_ascii_uppercase();
                let col = column_letter_to_number(&key).filter(|col| *col <= MAX_COLUMN);
                if col.is_none() {
                    args.report(path.clone(), "must be a column letter such as A or AB");
                }
                let width = match width.as_f64() {
                    Some(w) if w > 0.0 && w.is_finite() => Some(w),
                    _ => {
                        args.report(path, "must be a positive number");
                        None
                    }
                };
                if let (Some(col), Some(width)) = (col, width) {
                    columns.insert(key, width);
                    widths.push((col, width));
                }
            }
        }
        args.finish(Self {
            workbook_id,
            sheet_name,
            columns,
            widths,
        })
    }
}

/// Merge a rectangular range such as `A1:D1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelMergeCellsParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
    /// Target worksheet; must already exist.
    pub sheet_name: String,
    /// Range in `A1:B2` form.
    #[schemars(length(min = 1))]
    pub range: String,
}

impl Validate for ExcelMergeCellsParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            workbook_id: args.identifier("workbookId"),
            sheet_name: sheet_name(&mut args),
            range: args.identifier("range").to_ascii_uppercase(),
        };
        args.finish(params)
    }
}

/// Render the workbook to its output path and end the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExcelSaveParams {
    /// Handle returned by `excel_create`.
    pub workbook_id: String,
}

impl Validate for ExcelSaveParams {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError> {
        let mut args = Args::new(raw);
        let params = Self {
            workbook_id: args.identifier("workbookId"),
        };
        args.finish(params)
    }
}

/// Excel caps sheet names at 31 characters and forbids a handful of characters.
fn sheet_name(args: &mut Args<'_>) -> String {
    let name = args.identifier("sheetName");
    if name.chars().count() > 31 {
        args.report("sheetName", "must be at most 31 characters");
    }
    if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
        args.report("sheetName", "must not contain any of [ ] : * ? / \\");
    }
    name
}

/// Accepts `RRGGBB` or `#RRGGBB` and returns uppercase `RRGGBB`.
fn normalize_hex_color(raw: &str) -> Option<String> {
    let hex = raw.trim().trim_start_matches('#');
    (hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .then(|| hex.to_ascii_uppercase())
}
