// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `.xlsx` rendering.
//!
//! The model is 1-based; `rust_xlsxwriter` is 0-based, so every coordinate is shifted here and
//! nowhere else. Layout (widths, heights, merges) is applied before cells are written so a merge
//! never overwrites a value.

use rust_xlsxwriter::{
    Chart, ChartFormat, ChartPoint, ChartSolidFill, ChartType, Color, DocProperties, Format,
    FormatAlign, FormatBorder, FormatPattern, Formula, Workbook, Worksheet, XlsxError,
};

use super::hex_to_rgb;
use crate::error::ToolError;
use crate::model::{CellAddress, CellFormat, CellRange, CellValue, ChartKind, ChartSpec, Sheet, WorkbookContext};

/// Packages every sheet in creation order. A workbook without sheets gets one empty sheet.
pub fn render_workbook(wb: &WorkbookContext) -> Result<Vec<u8>, ToolError> {
    build(wb).map_err(|err| ToolError::encode("workbook", err))
}

fn build(wb: &WorkbookContext) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let properties = DocProperties::new()
        .set_title(wb.title())
        .set_author("Office MCP");
    workbook.set_properties(&properties);

    if wb.sheets().is_empty() {
        workbook.add_worksheet();
    }
    for sheet in wb.sheets() {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    workbook.save_to_buffer()
}

fn row(n: u32) -> u32 {
    n.saturating_sub(1)
}

fn col(n: u32) -> u16 {
    u16::try_from(n.saturating_sub(1)).unwrap_or(u16::MAX)
}

fn color(hex: &str) -> Color {
    Color::RGB(hex_to_rgb(hex))
}

fn format(cell: &CellFormat) -> Format {
    let mut format = Format::new();
    if cell.bold {
        format = format.set_bold();
    }
    if cell.centered {
        format = format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
    }
    if let Some(name) = cell.font_name.as_deref() {
        format = format.set_font_name(name);
    }
    if let Some(size) = cell.font_size {
        format = format.set_font_size(size);
    }
    if let Some(hex) = cell.font_color.as_deref() {
        format = format.set_font_color(color(hex));
    }
    if let Some(hex) = cell.fill.as_deref() {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(color(hex));
    }
    if let Some(hex) = cell.border_color.as_deref() {
        format = format
            .set_border(FormatBorder::Thin)
            .set_border_color(color(hex));
    }
    format
}

fn write_sheet(ws: &mut Worksheet, sheet: &Sheet) -> Result<(), XlsxError> {
    ws.set_name(sheet.name())?;
    if let Some(hex) = sheet.tab_color() {
        ws.set_tab_color(color(hex));
    }
    for (n, width) in sheet.column_widths() {
        ws.set_column_width(col(n), width)?;
    }
    for (n, height) in sheet.row_heights() {
        ws.set_row_height(row(n), height)?;
    }
    let plain = Format::new();
    for range in sheet.merges() {
        ws.merge_range(
            row(range.start.row),
            col(range.start.col),
            row(range.end.row),
            col(range.end.col),
            "",
            &plain,
        )?;
    }

    for (at, cell) in sheet.cells() {
        let (r, c) = (row(at.row), col(at.col));
        let fmt = format(&cell.format);
        match &cell.value {
            CellValue::Text(text) => ws.write_string_with_format(r, c, text, &fmt)?,
            CellValue::Number(number) => ws.write_number_with_format(r, c, *number, &fmt)?,
            CellValue::Bool(value) => ws.write_boolean_with_format(r, c, *value, &fmt)?,
            CellValue::Formula(body) => {
                ws.write_formula_with_format(r, c, Formula::new(format!("={body}")), &fmt)?
            }
            CellValue::Blank => ws.write_blank(r, c, &fmt)?,
        };
    }

    if let Some(rows) = sheet.frozen_rows() {
        ws.set_freeze_panes(rows, 0)?;
    }
    if let Some(range) = sheet.autofilter() {
        ws.autofilter(
            row(range.start.row),
            col(range.start.col),
            row(range.end.row),
            col(range.end.col),
        )?;
    }
    for spec in sheet.charts() {
        let chart = chart(sheet.name(), spec);
        ws.insert_chart(row(spec.anchor.row), col(spec.anchor.col), &chart)?;
    }
    Ok(())
}

fn chart_type(kind: ChartKind) -> ChartType {
    match kind {
        ChartKind::Bar => ChartType::Bar,
        ChartKind::Column => ChartType::Column,
        ChartKind::Line => ChartType::Line,
        ChartKind::Pie => ChartType::Pie,
        ChartKind::Doughnut => ChartType::Doughnut,
        ChartKind::Area => ChartType::Area,
    }
}

fn range_tuple<'a>(sheet: &'a str, range: &CellRange) -> (&'a str, u32, u16, u32, u16) {
    (
        sheet,
        row(range.start.row),
        col(range.start.col),
        row(range.end.row),
        col(range.end.col),
    )
}

fn cell_tuple(sheet: &str, at: CellAddress) -> (&str, u32, u16) {
    (sheet, row(at.row), col(at.col))
}

fn chart(sheet: &str, spec: &ChartSpec) -> Chart {
    let mut chart = Chart::new(chart_type(spec.kind));
    if let Some(title) = spec.title.as_deref() {
        chart.title().set_name(title);
    }
    let per_point = matches!(spec.kind, ChartKind::Pie | ChartKind::Doughnut);
    let categories = spec.categories.end.row - spec.categories.start.row + 1;

    for (index, series) in spec.series.iter().enumerate() {
        let added = chart
            .add_series()
            .set_categories(range_tuple(sheet, &spec.categories))
            .set_values(range_tuple(sheet, &series.values))
            .set_name(cell_tuple(sheet, series.name));
        if spec.colors.is_empty() {
            continue;
        }
        if per_point {
            let points: Vec<ChartPoint> = (0..categories as usize)
                .map(|i| {
                    let hex = &spec.colors[i % spec.colors.len()];
                    ChartPoint::new().set_format(
                        ChartFormat::new().set_solid_fill(ChartSolidFill::new().set_color(color(hex))),
                    )
                })
                .collect();
            added.set_points(&points);
        } else {
            let hex = &spec.colors[index % spec.colors.len()];
            added.set_format(
                ChartFormat::new().set_solid_fill(ChartSolidFill::new().set_color(color(hex))),
            );
        }
    }
    chart
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::{cell_tuple, col, range_tuple, render_workbook, row};
    use crate::model::{
        Cell, CellAddress, CellFormat, CellRange, CellValue, ChartKind, ChartSeriesRef, ChartSpec,
        WorkbookContext,
    };
    use crate::theme::ThemeCatalog;

    #[fixture]
    fn workbook() -> WorkbookContext {
        let theme = ThemeCatalog::builtin().expect("themes").resolve("alibaba");
        WorkbookContext::new("Sales", "/tmp/sales.xlsx", Arc::clone(&theme))
    }

    #[test]
    fn coordinates_shift_to_zero_based() {
        assert_eq!((row(1), col(1)), (0, 0));
        assert_eq!((row(10), col(28)), (9, 27));
    }

    #[test]
    fn chart_references_point_at_the_named_sheet() {
        let range = CellRange::new(CellAddress::new(3, 2), CellAddress::new(7, 4));
        let sheet = String::from("Q1 Sales");

        assert_eq!(range_tuple(&sheet, &range), ("Q1 Sales", 2, 1, 6, 3));
        assert_eq!(cell_tuple(&sheet, CellAddress::new(2, 5)), ("Q1 Sales", 1, 4));
    }

    #[rstest]
    fn workbook_without_sheets_still_renders(workbook: WorkbookContext) {
        let bytes = render_workbook(&workbook).expect("render");
        assert!(bytes.starts_with(b"PK"));
    }

    #[rstest]
    fn populated_sheet_renders(mut workbook: WorkbookContext) {
        let sheet = workbook.ensure_sheet("Q1 Sales");
        sheet.set_tab_color(Some("FF6A00".to_owned()));
        sheet.set_cell(
            CellAddress::new(1, 1),
            Cell {
                value: CellValue::Text("Region".to_owned()),
                format: CellFormat {
                    bold: true,
                    centered: true,
                    font_name: Some("Arial".to_owned()),
                    font_size: Some(11.0),
                    font_color: Some("FFFFFF".to_owned()),
                    fill: Some("FF6A00".to_owned()),
                    border_color: Some("D9D9D9".to_owned()),
                },
            },
        );
        sheet.set_cell(CellAddress::new(1, 2), Cell::plain(CellValue::Text("Total".to_owned())));
        sheet.set_cell(CellAddress::new(2, 1), Cell::plain(CellValue::Text("North".to_owned())));
        sheet.set_cell(CellAddress::new(2, 2), Cell::plain(CellValue::Number(12.5)));
        sheet.set_cell(CellAddress::new(3, 1), Cell::plain(CellValue::Bool(true)));
        sheet.set_cell(CellAddress::new(3, 2), Cell::plain(CellValue::Blank));
        sheet.set_cell(
            CellAddress::new(4, 2),
            Cell::plain(CellValue::Formula("SUM(B2:B3)".to_owned())),
        );
        sheet.set_column_width(1, 20.0);
        sheet.set_row_height(1, 25.0);
        sheet.add_merge(CellRange::new(CellAddress::new(6, 1), CellAddress::new(6, 4)));
        sheet.freeze_rows(1);
        sheet.set_autofilter(CellRange::new(CellAddress::new(1, 1), CellAddress::new(3, 2)));
        for kind in [ChartKind::Column, ChartKind::Pie] {
            sheet.add_chart(ChartSpec {
                kind,
                title: Some("Totals".to_owned()),
                anchor: CellAddress::new(2, 6),
                categories: CellRange::new(CellAddress::new(2, 1), CellAddress::new(3, 1)),
                series: vec![ChartSeriesRef {
                    name: CellAddress::new(1, 2),
                    values: CellRange::new(CellAddress::new(2, 2), CellAddress::new(3, 2)),
                }],
                colors: vec!["FF6A00".to_owned(), "1677FF".to_owned()],
            });
        }
        workbook.ensure_sheet("Empty");

        let bytes = render_workbook(&workbook).expect("render");
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1024);
    }
}
