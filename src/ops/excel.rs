// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, info, warn};

use super::{persist, template_note, Office, Outcome};
use crate::error::ToolError;
use crate::model::{
    Cell, CellAddress, CellFormat, CellRange, CellValue, ChartSeriesRef, ChartSpec, Sheet,
    TableStyle, WorkbookContext, MAX_ROW,
};
use crate::render::render_workbook;
use crate::theme::ExcelStyles;
use crate::validate::{
    Choice, ExcelAddChartParams, ExcelAddFormulaParams, ExcelAddSheetParams, ExcelCreateParams,
    ExcelMergeCellsParams, ExcelSaveParams, ExcelSetColumnWidthParams, ExcelWriteDataParams,
    ScalarValue,
};

const HEADER_ROW_HEIGHT: f64 = 25.0;
const DATA_COLUMN_WIDTH: f64 = 15.0;
const CHART_TITLE_SIZE: f64 = 14.0;
/// Columns left empty between a chart's data table and the chart itself.
const CHART_GAP: u32 = 2;

fn header_format(styles: &ExcelStyles, bordered: bool) -> CellFormat {
    let header = &styles.header_row;
    CellFormat {
        bold: header.bold,
        centered: true,
        font_name: Some(header.font.clone()),
        font_size: Some(header.font_size),
        font_color: Some(header.font_color.clone()),
        fill: Some(header.fill.clone()),
        border_color: bordered.then(|| styles.border.color.clone()),
    }
}

fn body_format(styles: &ExcelStyles, bordered: bool) -> CellFormat {
    CellFormat {
        font_name: Some(styles.data_row.font.clone()),
        font_size: Some(styles.data_row.font_size),
        border_color: bordered.then(|| styles.border.color.clone()),
        ..CellFormat::default()
    }
}

fn cell_value(value: &ScalarValue) -> CellValue {
    match value {
        ScalarValue::Null => CellValue::Blank,
        ScalarValue::Bool(b) => CellValue::Bool(*b),
        ScalarValue::Number(n) => CellValue::Number(*n),
        ScalarValue::Text(s) => CellValue::Text(s.clone()),
        ScalarValue::Json(v) => CellValue::Text(v.to_string()),
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(MAX_ROW)
}

fn sheet_mut<'a>(wb: &'a mut WorkbookContext, name: &str) -> Result<&'a mut Sheet, ToolError> {
    wb.sheet_mut(name).ok_or_else(|| ToolError::SheetNotFound {
        sheet: name.to_owned(),
    })
}

fn outside_grid(range: CellRange) -> ToolError {
    ToolError::InvalidRange {
        range: range.to_string(),
        reason: "extends past the worksheet grid".to_owned(),
    }
}

impl Office {
    pub async fn excel_create(&self, params: ExcelCreateParams) -> Result<Outcome, ToolError> {
        let theme = self.theme(params.theme.name());
        let display_name = theme.display_name.clone();
        let context = WorkbookContext::new(params.title.clone(), params.output_path.clone(), theme);
        let handle = self.workbooks.create(context).await;
        info!(workbook_id = %handle, title = %params.title, path = %params.output_path, "workbook created");

        let mut message = format!(
            "workbook \"{}\" created with theme {display_name}",
            params.title
        );
        if let Some(note) = template_note(params.template.map(Choice::name), "workbook") {
            message.push_str("; ");
            message.push_str(&note);
        }
        Ok(Outcome::new(message).with("workbookId", handle.into_string()))
    }

    pub async fn excel_add_sheet(&self, params: ExcelAddSheetParams) -> Result<Outcome, ToolError> {
        let mut wb = self.workbooks.lock(&params.workbook_id).await?;
        let sheet = wb
            .add_sheet(&params.sheet_name)
            .ok_or_else(|| ToolError::SheetExists {
                sheet: params.sheet_name.clone(),
            })?;
        sheet.set_tab_color(params.tab_color);
        debug!(workbook_id = %params.workbook_id, sheet = %params.sheet_name, "sheet added");
        Ok(Outcome::new(format!("added sheet {}", params.sheet_name)))
    }

    /// Writes a themed header row plus data rows, creating the sheet when it is missing.
    pub async fn excel_write_data(
        &self,
        params: ExcelWriteDataParams,
    ) -> Result<Outcome, ToolError> {
        let mut wb = self.workbooks.lock(&params.workbook_id).await?;
        let start = params.start;
        let width = params
            .rows
            .iter()
            .map(Vec::len)
            .chain([params.headers.len()])
            .max()
            .unwrap_or(1);
        let range = CellRange::new(
            start,
            start.offset(count(params.rows.len()), count(width).saturating_sub(1)),
        );
        if !range.end.within_grid() {
            return Err(outside_grid(range));
        }

        let bordered = params.style != TableStyle::Minimal;
        let header = header_format(&wb.theme().excel, bordered);
        let body = body_format(&wb.theme().excel, bordered);
        let stripe = (params.style == TableStyle::Striped).then(|| CellFormat {
            fill: Some(wb.theme().excel.alternate_row.fill.clone()),
            ..body.clone()
        });

        let sheet = wb.ensure_sheet(&params.sheet_name);
        for (c, title) in params.headers.iter().enumerate() {
            sheet.set_cell(
                start.offset(0, count(c)),
                Cell {
                    value: CellValue::Text(title.clone()),
                    format: header.clone(),
                },
            );
            sheet.set_column_width(start.col + count(c), DATA_COLUMN_WIDTH);
        }
        sheet.set_row_height(start.row, HEADER_ROW_HEIGHT);
        for (r, row) in params.rows.iter().enumerate() {
            let format = match &stripe {
                Some(stripe) if r % 2 == 1 => stripe,
                _ => &body,
            };
            for (c, value) in row.iter().enumerate() {
                sheet.set_cell(
                    start.offset(count(r) + 1, count(c)),
                    Cell {
                        value: cell_value(value),
                        format: format.clone(),
                    },
                );
            }
        }
        if params.freeze_header {
            sheet.freeze_rows(start.row);
        }
        if params.auto_filter {
            sheet.set_autofilter(range);
        }

        debug!(
            workbook_id = %params.workbook_id,
            sheet = %params.sheet_name,
            range = %range,
            "data written"
        );
        Ok(Outcome::new(format!(
            "wrote {} rows to {} at {range}",
            params.rows.len(),
            params.sheet_name
        ))
        .with("range", range.to_string()))
    }

    /// Writes the chart's data table at `position` and places a native chart to its right.
    pub async fn excel_add_chart(&self, params: ExcelAddChartParams) -> Result<Outcome, ToolError> {
        let mut wb = self.workbooks.lock(&params.workbook_id).await?;
        let anchor = params.anchor;
        // The title, when present, takes the anchor row; one blank row precedes the header.
        let header_row = anchor.row + if params.title.is_some() { 2 } else { 1 };
        let series_count = count(params.series.len());
        let table = CellRange::new(
            CellAddress::new(header_row, anchor.col),
            CellAddress::new(
                header_row + count(params.categories.len()),
                anchor.col + series_count,
            ),
        );
        let chart_at = CellAddress::new(anchor.row, table.end.col + CHART_GAP + 1);
        if !table.end.within_grid() || !chart_at.within_grid() {
            return Err(outside_grid(table));
        }

        let header = header_format(&wb.theme().excel, true);
        let body = body_format(&wb.theme().excel, true);
        let colors = wb.theme().excel.chart_colors.clone();
        let sheet = sheet_mut(&mut wb, &params.sheet_name)?;

        if let Some(title) = &params.title {
            sheet.set_cell(
                anchor,
                Cell {
                    value: CellValue::Text(title.clone()),
                    format: CellFormat {
                        bold: true,
                        font_size: Some(CHART_TITLE_SIZE),
                        ..CellFormat::default()
                    },
                },
            );
        }
        let labels = std::iter::once("Category").chain(params.series.iter().map(|s| s.name.as_str()));
        for (c, label) in labels.enumerate() {
            sheet.set_cell(
                CellAddress::new(header_row, anchor.col + count(c)),
                Cell {
                    value: CellValue::Text(label.to_owned()),
                    format: header.clone(),
                },
            );
        }
        for (r, category) in params.categories.iter().enumerate() {
            let row = header_row + 1 + count(r);
            sheet.set_cell(
                CellAddress::new(row, anchor.col),
                Cell {
                    value: CellValue::Text(category.clone()),
                    format: body.clone(),
                },
            );
            for (c, series) in params.series.iter().enumerate() {
                let value = series
                    .values
                    .get(r)
                    .map_or(CellValue::Blank, |v| CellValue::Number(*v));
                sheet.set_cell(
                    CellAddress::new(row, anchor.col + 1 + count(c)),
                    Cell {
                        value,
                        format: body.clone(),
                    },
                );
            }
        }

        let first = header_row + 1;
        let last = table.end.row;
        sheet.add_chart(ChartSpec {
            kind: params.chart_type,
            title: params.title.clone(),
            anchor: chart_at,
            categories: CellRange::new(
                CellAddress::new(first, anchor.col),
                CellAddress::new(last, anchor.col),
            ),
            series: (0..series_count)
                .map(|i| {
                    let col = anchor.col + 1 + i;
                    ChartSeriesRef {
                        name: CellAddress::new(header_row, col),
                        values: CellRange::new(
                            CellAddress::new(first, col),
                            CellAddress::new(last, col),
                        ),
                    }
                })
                .collect(),
            colors,
        });

        let kind = params.chart_type.name();
        debug!(workbook_id = %params.workbook_id, sheet = %params.sheet_name, kind, "chart added");
        Ok(Outcome::new(format!(
            "added {kind} chart with {} series to {}",
            params.series.len(),
            params.sheet_name
        ))
        .with("dataRange", table.to_string()))
    }

    pub async fn excel_add_formula(
        &self,
        params: ExcelAddFormulaParams,
    ) -> Result<Outcome, ToolError> {
        let mut wb = self.workbooks.lock(&params.workbook_id).await?;
        let sheet = sheet_mut(&mut wb, &params.sheet_name)?;
        let format = sheet
            .cell(params.at)
            .map(|cell| cell.format.clone())
            .unwrap_or_default();
        sheet.set_cell(
            params.at,
            Cell {
                value: CellValue::Formula(params.formula.clone()),
                format,
            },
        );
        debug!(workbook_id = %params.workbook_id, cell = %params.at, "formula added");
        Ok(Outcome::new(format!(
            "added formula ={} to {}",
            params.formula, params.at
        )))
    }

    pub async fn excel_set_column_width(
        &self,
        params: ExcelSetColumnWidthParams,
    ) -> Result<Outcome, ToolError> {
        let mut wb = self.workbooks.lock(&params.workbook_id).await?;
        let sheet = sheet_mut(&mut wb, &params.sheet_name)?;
        for &(col, width) in &params.widths {
            sheet.set_column_width(col, width);
        }
        debug!(workbook_id = %params.workbook_id, columns = params.widths.len(), "column widths set");
        Ok(Outcome::new(format!(
            "set {} column widths on {}",
            params.widths.len(),
            params.sheet_name
        )))
    }

    pub async fn excel_merge_cells(
        &self,
        params: ExcelMergeCellsParams,
    ) -> Result<Outcome, ToolError> {
        let invalid = |reason: &str| ToolError::InvalidRange {
            range: params.range.clone(),
            reason: reason.to_owned(),
        };
        let range: CellRange = params
            .range
            .parse()
            .map_err(|_| invalid("expected a range such as A1:D1"))?;
        if range.is_single_cell() {
            return Err(invalid("a merge needs at least two cells"));
        }
        if !range.end.within_grid() {
            return Err(outside_grid(range));
        }

        let mut wb = self.workbooks.lock(&params.workbook_id).await?;
        let sheet = sheet_mut(&mut wb, &params.sheet_name)?;
        if let Some(existing) = sheet.overlapping_merge(&range) {
            return Err(invalid(&format!("overlaps merged range {existing}")));
        }
        sheet.add_merge(range);
        debug!(workbook_id = %params.workbook_id, range = %range, "cells merged");
        Ok(Outcome::new(format!("merged {range} on {}", params.sheet_name)))
    }

    /// Renders and writes the workbook, then ends the session. On any failure the session is
    /// kept so the caller can retry.
    pub async fn excel_save(&self, params: ExcelSaveParams) -> Result<Outcome, ToolError> {
        let wb = self.workbooks.lock(&params.workbook_id).await?;
        let path = wb.output_path().to_path_buf();
        let saved = match render_workbook(&wb) {
            Ok(bytes) => persist(&path, bytes).await,
            Err(err) => Err(err),
        };
        if let Err(err) = saved {
            warn!(workbook_id = %params.workbook_id, path = %path.display(), error = %err, "workbook save failed");
            return Err(err);
        }

        let sheets = wb.sheets().len();
        self.workbooks.remove(wb).await;
        info!(workbook_id = %params.workbook_id, path = %path.display(), sheets, "workbook saved");
        Ok(Outcome::new(format!("workbook saved to {}", path.display()))
            .with("path", path.display().to_string()))
    }
}
