// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named style bundles applied when documents and workbooks are rendered.
//!
//! The catalogue is data, not code: the built-in set ships as JSON embedded in the binary and
//! an alternative file can be supplied at startup. Lookups never fail; unknown names resolve
//! to the catalogue's default theme.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

const BUILTIN_THEMES: &str = include_str!("themes.json");

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to read theme file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theme catalogue: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("default theme {0:?} is not defined in the catalogue")]
    MissingDefault(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Page margins in twips (1 cm = 567 twips).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub margin_top: i32,
    pub margin_bottom: i32,
    pub margin_left: i32,
    pub margin_right: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontSet {
    pub title: String,
    pub heading: String,
    pub body: String,
    pub code: String,
}

/// Font sizes are half-points, spacing is points.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStyle {
    pub font: String,
    pub color: String,
    pub font_size: usize,
    pub bold: bool,
    pub alignment: Alignment,
    pub space_before: u32,
    pub space_after: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphFormat {
    /// First-line indent measured in characters of the body font.
    pub first_line_indent: u32,
    pub space_before: u32,
    pub space_after: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyStyle {
    pub font: String,
    pub color: String,
    pub font_size: usize,
    pub format: ParagraphFormat,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStyle {
    pub header_bg: String,
    pub header_color: String,
    pub header_font: String,
    pub header_font_size: usize,
    pub header_bold: bool,
    pub body_font: String,
    pub body_font_size: usize,
    pub striped_bg: String,
    pub border_color: String,
    pub border_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStyle {
    pub border_left: String,
    pub border_width: usize,
    pub background: String,
    pub font: String,
    pub font_size: usize,
    pub italic: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStyle {
    pub background: String,
    pub font: String,
    pub font_size: usize,
    pub border_color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStyle {
    pub font: String,
    pub font_size: usize,
    /// Left indent in twips.
    pub indent: i32,
    /// Space after each item in points.
    pub spacing: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStyles {
    pub fonts: FontSet,
    pub heading1: HeadingStyle,
    pub heading2: HeadingStyle,
    pub heading3: HeadingStyle,
    pub paragraph: BodyStyle,
    pub table: TableStyle,
    pub quote: QuoteStyle,
    pub code: CodeStyle,
    pub list: ListStyle,
}

impl WordStyles {
    /// Levels deeper than 3 share the level-3 style.
    pub fn heading(&self, level: u8) -> &HeadingStyle {
        match level {
            1 => &self.heading1,
            2 => &self.heading2,
            _ => &self.heading3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelHeaderStyle {
    pub fill: String,
    pub font_color: String,
    pub font: String,
    pub font_size: f64,
    pub bold: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelDataStyle {
    pub fill: String,
    pub font: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExcelFill {
    pub fill: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExcelBorder {
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelStyles {
    pub header_row: ExcelHeaderStyle,
    pub data_row: ExcelDataStyle,
    pub alternate_row: ExcelFill,
    pub border: ExcelBorder,
    pub chart_colors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub page_layout: PageLayout,
    pub word: WordStyles,
    pub excel: ExcelStyles,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    default: String,
    themes: Vec<Theme>,
}

/// Read-only theme lookup shared by every session.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: BTreeMap<String, Arc<Theme>>,
    default: Arc<Theme>,
}

impl ThemeCatalog {
    pub fn builtin() -> Result<Self, ThemeError> {
        Self::from_json(BUILTIN_THEMES)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        let themes: BTreeMap<String, Arc<Theme>> = file
            .themes
            .into_iter()
            .map(|theme| (theme.name.clone(), Arc::new(theme)))
            .collect();
        let default = themes
            .get(&file.default)
            .cloned()
            .ok_or(ThemeError::MissingDefault(file.default))?;
        Ok(Self { themes, default })
    }

    /// Resolves a theme by name; `default` and unknown names map to the default theme.
    pub fn resolve(&self, name: &str) -> Arc<Theme> {
        self.themes
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    pub fn default_theme(&self) -> &Arc<Theme> {
        &self.default
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}
