// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Request validation.
//!
//! Every tool has a parameter type produced only by [`Validate::validate`]. Validation walks
//! the raw argument object once, collecting one [`FieldError`] per offending field, and fills
//! in every documented default, so handlers never see partially-checked or defaulted input.

use std::fmt;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{CellAddress, ChartKind, ParagraphStyle, TableStyle};
use crate::paths::{validate_output_path, OutputKind};

pub mod excel;
pub mod word;

pub use excel::{
    ChartSeriesInput, ExcelAddChartParams, ExcelAddFormulaParams, ExcelAddSheetParams,
    ExcelCreateParams, ExcelMergeCellsParams, ExcelSaveParams, ExcelSetColumnWidthParams,
    ExcelWriteDataParams, WorkbookTemplate, WorkbookTheme,
};
pub use word::{
    DiagramTheme, DocumentTemplate, DocumentTheme, WordAddCodeParams, WordAddDiagramParams,
    WordAddHeadingParams, WordAddListParams, WordAddParagraphParams, WordAddTableParams,
    WordCreateParams, WordSaveParams,
};

/// A normalized parameter type built from raw tool arguments.
pub trait Validate: Sized {
    fn validate(raw: &JsonObject) -> Result<Self, ValidationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// All field violations found in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn mentions(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A closed set of wire names.
pub trait Choice: Copy + PartialEq + 'static {
    const VARIANTS: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| *value)
    }

    fn name(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, value)| *value == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }
}

impl Choice for ParagraphStyle {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("normal", Self::Normal),
        ("quote", Self::Quote),
        ("note", Self::Note),
        ("warning", Self::Warning),
        ("tip", Self::Tip),
    ];
}

impl Choice for TableStyle {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("striped", Self::Striped),
        ("bordered", Self::Bordered),
        ("minimal", Self::Minimal),
        ("professional", Self::Professional),
    ];
}

impl Choice for ChartKind {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("bar", Self::Bar),
        ("column", Self::Column),
        ("line", Self::Line),
        ("pie", Self::Pie),
        ("doughnut", Self::Doughnut),
        ("area", Self::Area),
    ];
}

/// A JSON scalar supplied as table or sheet data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays and objects are kept and written as their JSON text.
    Json(Value),
}

impl ScalarValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Json(other.clone()),
        }
    }

    /// Text shown when the value lands in a document table cell.
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Json(v) => v.to_string(),
        }
    }
}

/// Field-by-field reader over raw tool arguments.
///
/// Getters for required fields return a placeholder when the field is invalid; the violation is
/// recorded and [`Args::finish`] refuses to hand out the built value, so placeholders never
/// escape.
pub struct Args<'a> {
    raw: &'a JsonObject,
    errors: Vec<FieldError>,
}

impl<'a> Args<'a> {
    pub fn new(raw: &'a JsonObject) -> Self {
        Self {
            raw,
            errors: Vec::new(),
        }
    }

    pub fn report(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// `null` counts as absent.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.raw.get(field).filter(|value| !value.is_null())
    }

    fn required(&mut self, field: &str) -> Option<&'a Value> {
        let value = self.get(field);
        if value.is_none() {
            self.report(field, "is required");
        }
        value
    }

    fn string_at(&mut self, path: &str, value: &'a Value) -> Option<&'a str> {
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.report(path, "must be a string");
                None
            }
        }
    }

    /// Required handle or name: trimmed, non-empty.
    pub fn identifier(&mut self, field: &str) -> String {
        let Some(value) = self.required(field) else {
            return String::new();
        };
        let Some(s) = self.string_at(field, value) else {
            return String::new();
        };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            self.report(field, "must not be empty");
        }
        trimmed.to_owned()
    }

    /// Required string that must contain something.
    pub fn non_empty_text(&mut self, field: &str) -> String {
        let text = self.text(field);
        if self.get(field).is_some_and(Value::is_string) && text.is_empty() {
            self.report(field, "must not be empty");
        }
        text
    }

    /// Required string; the empty string is allowed.
    pub fn text(&mut self, field: &str) -> String {
        let Some(value) = self.required(field) else {
            return String::new();
        };
        self.string_at(field, value).unwrap_or_default().to_owned()
    }

    pub fn text_or(&mut self, field: &str, default: &str) -> String {
        self.optional_text(field)
            .unwrap_or_else(|| default.to_owned())
    }

    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        let value = self.get(field)?;
        self.string_at(field, value).map(ToOwned::to_owned)
    }

    pub fn flag(&mut self, field: &str, default: bool) -> bool {
        match self.get(field) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.report(field, "must be a boolean");
                default
            }
        }
    }

    pub fn choice<T: Choice>(&mut self, field: &str) -> T {
        let placeholder = T::VARIANTS[0].1;
        match self.required(field) {
            Some(value) => self.choice_at(field, value).unwrap_or(placeholder),
            None => placeholder,
        }
    }

    pub fn choice_or<T: Choice>(&mut self, field: &str, default: T) -> T {
        self.optional_choice(field).unwrap_or(default)
    }

    pub fn optional_choice<T: Choice>(&mut self, field: &str) -> Option<T> {
        let value = self.get(field)?;
        self.choice_at(field, value)
    }

    fn choice_at<T: Choice>(&mut self, path: &str, value: &'a Value) -> Option<T> {
        let parsed = value.as_str().and_then(T::from_name);
        if parsed.is_none() {
            let names: Vec<&str> = T::VARIANTS.iter().map(|(name, _)| *name).collect();
            self.report(path, format!("must be one of: {}", names.join(", ")));
        }
        parsed
    }

    pub fn integer_between(&mut self, field: &str, min: i64, max: i64) -> i64 {
        let Some(value) = self.required(field) else {
            return min;
        };
        match value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }) {
            Some(n) if (min..=max).contains(&n) => n,
            _ => {
                self.report(field, format!("must be an integer between {min} and {max}"));
                min
            }
        }
    }

    pub fn positive_number_or(&mut self, field: &str, default: f64) -> f64 {
        match self.get(field) {
            None => default,
            Some(value) => self.positive_number_at(field, value).unwrap_or(default),
        }
    }

    fn positive_number_at(&mut self, path: &str, value: &Value) -> Option<f64> {
        match value.as_f64() {
            Some(n) if n > 0.0 && n.is_finite() => Some(n),
            _ => {
                self.report(path, "must be a positive number");
                None
            }
        }
    }

    /// Required A1-style reference (`[A-Z]+[0-9]+`) inside the worksheet grid.
    pub fn cell(&mut self, field: &str) -> CellAddress {
        let Some(value) = self.required(field) else {
            return CellAddress::ORIGIN;
        };
        self.cell_at(field, value)
    }

    pub fn cell_or(&mut self, field: &str, default: CellAddress) -> CellAddress {
        match self.get(field) {
            None => default,
            Some(value) => self.cell_at(field, value),
        }
    }

    fn cell_at(&mut self, path: &str, value: &'a Value) -> CellAddress {
        let Some(raw) = self.string_at(path, value) else {
            return CellAddress::ORIGIN;
        };
        match raw.parse::<CellAddress>() {
            Ok(cell) if cell.within_grid() => cell,
            Ok(_) => {
                self.report(path, "is outside the worksheet grid");
                CellAddress::ORIGIN
            }
            Err(_) => {
                self.report(path, "must be a cell reference such as A1");
                CellAddress::ORIGIN
            }
        }
    }

    /// Required array; reports a violation and yields nothing when the field is not an array.
    pub fn array(&mut self, field: &str, non_empty: bool) -> &'a [Value] {
        let Some(value) = self.required(field) else {
            return &[];
        };
        let Some(items) = value.as_array() else {
            self.report(field, "must be an array");
            return &[];
        };
        if non_empty && items.is_empty() {
            self.report(field, "must contain at least one item");
        }
        items
    }

    pub fn string_list(&mut self, field: &str, non_empty: bool) -> Vec<String> {
        let items = self.array(field, non_empty);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.string_at(&format!("{field}.{i}"), item)
                    .unwrap_or_default()
                    .to_owned()
            })
            .collect()
    }

    /// Required array of arrays of scalars.
    pub fn rows(&mut self, field: &str) -> Vec<Vec<ScalarValue>> {
        let rows = self.array(field, false);
        rows.iter()
            .enumerate()
            .map(|(i, row)| match row.as_array() {
                Some(cells) => cells.iter().map(ScalarValue::from_json).collect(),
                None => {
                    self.report(format!("{field}.{i}"), "must be an array");
                    Vec::new()
                }
            })
            .collect()
    }

    pub fn object(&mut self, field: &str) -> Option<&'a JsonObject> {
        let value = self.required(field)?;
        let object = value.as_object();
        if object.is_none() {
            self.report(field, "must be an object");
        }
        object
    }

    /// Checks an output path and reports violations against `field`.
    pub fn output_path(&mut self, field: &str, kind: OutputKind) -> String {
        let path = self.non_empty_text(field);
        if !path.is_empty() {
            if let Err(violation) = validate_output_path(&path, kind) {
                self.report(field, violation.to_string());
            }
        }
        path
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}
