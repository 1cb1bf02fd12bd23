// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::cell::{CellAddress, CellRange};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Formula text without the leading `=`.
    Formula(String),
    Blank,
}

/// Visual attributes of one cell. Colours are 6-digit RGB hex without `#`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub bold: bool,
    pub centered: bool,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<String>,
    pub fill: Option<String>,
    pub border_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub format: CellFormat,
}

impl Cell {
    pub fn plain(value: CellValue) -> Self {
        Self {
            value,
            format: CellFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Column,
    Line,
    Pie,
    Doughnut,
    Area,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeriesRef {
    pub name: CellAddress,
    pub values: CellRange,
}

/// A native chart anchored on the sheet, referencing a data table already written to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub anchor: CellAddress,
    pub categories: CellRange,
    pub series: Vec<ChartSeriesRef>,
    pub colors: Vec<String>,
}

/// Sparse cell grid plus sheet-level layout state.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    tab_color: Option<String>,
    cells: BTreeMap<CellAddress, Cell>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    merges: Vec<CellRange>,
    autofilter: Option<CellRange>,
    frozen_rows: Option<u32>,
    charts: Vec<ChartSpec>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tab_color: None,
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            merges: Vec::new(),
            autofilter: None,
            frozen_rows: None,
            charts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tab_color(&self) -> Option<&str> {
        self.tab_color.as_deref()
    }

    pub fn set_tab_color(&mut self, color: Option<String>) {
        self.tab_color = color;
    }

    /// Last writer wins per coordinate.
    pub fn set_cell(&mut self, at: CellAddress, cell: Cell) {
        self.cells.insert(at, cell);
    }

    pub fn cell(&self, at: CellAddress) -> Option<&Cell> {
        self.cells.get(&at)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        self.cells.iter().map(|(at, cell)| (*at, cell))
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.column_widths.iter().map(|(col, w)| (*col, *w))
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row_heights.iter().map(|(row, h)| (*row, *h))
    }

    pub fn overlapping_merge(&self, range: &CellRange) -> Option<&CellRange> {
        self.merges.iter().find(|merged| merged.overlaps(range))
    }

    pub fn add_merge(&mut self, range: CellRange) {
        self.merges.push(range);
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    pub fn set_autofilter(&mut self, range: CellRange) {
        self.autofilter = Some(range);
    }

    pub fn autofilter(&self) -> Option<&CellRange> {
        self.autofilter.as_ref()
    }

    pub fn freeze_rows(&mut self, rows: u32) {
        self.frozen_rows = Some(rows);
    }

    pub fn frozen_rows(&self) -> Option<u32> {
        self.frozen_rows
    }

    pub fn add_chart(&mut self, chart: ChartSpec) {
        self.charts.push(chart);
    }

    pub fn charts(&self) -> &[ChartSpec] {
        &self.charts
    }
}

/// In-memory state of one workbook session. Sheets keep their creation order.
#[derive(Debug, Clone)]
pub struct WorkbookContext {
    title: String,
    output_path: PathBuf,
    theme: Arc<Theme>,
    sheets: Vec<Sheet>,
}

impl WorkbookContext {
    pub fn new(title: impl Into<String>, output_path: impl Into<PathBuf>, theme: Arc<Theme>) -> Self {
        Self {
            title: title.into(),
            output_path: output_path.into(),
            theme,
            sheets: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }

    /// Appends a new sheet; returns `None` when the name is already taken.
    pub fn add_sheet(&mut self, name: &str) -> Option<&mut Sheet> {
        if self.sheet(name).is_some() {
            return None;
        }
        self.sheets.push(Sheet::new(name));
        self.sheets.last_mut()
    }

    /// Returns the named sheet, creating it at the end when missing.
    pub fn ensure_sheet(&mut self, name: &str) -> &mut Sheet {
        let idx = match self.sheets.iter().position(|sheet| sheet.name == name) {
            Some(idx) => idx,
            None => {
                self.sheets.push(Sheet::new(name));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx]
    }
}
