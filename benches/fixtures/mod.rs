// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Shared deterministic benchmark fixtures (no RNG).

use std::sync::Arc;

use office_mcp::model::{
    Block, Cell, CellAddress, CellFormat, CellValue, CodeBlock, DocumentContext, HeadingBlock,
    ListBlock, ParagraphBlock, ParagraphStyle, TableBlock, TableStyle, WorkbookContext,
};
use office_mcp::theme::{Theme, ThemeCatalog};

fn theme(name: &str) -> Arc<Theme> {
    ThemeCatalog::builtin().expect("builtin themes").resolve(name)
}

pub mod document {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        LongReport,
        TableHeavy,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::LongReport => "long_report",
                Self::TableHeavy => "table_heavy",
            }
        }

        /// (sections, paragraphs per section, table rows per section)
        const fn params(self) -> (usize, usize, usize) {
            match self {
                Self::Small => (3, 2, 3),
                Self::LongReport => (40, 8, 5),
                Self::TableHeavy => (10, 1, 200),
            }
        }
    }

    pub fn fixture(case: Case) -> DocumentContext {
        let (sections, paragraphs, rows) = case.params();
        let mut doc = DocumentContext::new("Bench", None, "bench.docx", theme("software"));
        for s in 0..sections {
            doc.push(Block::Heading(HeadingBlock {
                level: 1 + (s % 3) as u8,
                text: format!("Section {s}"),
                numbered: true,
            }));
            for p in 0..paragraphs {
                let style = match p % 5 {
                    0 => ParagraphStyle::Normal,
                    1 => ParagraphStyle::Quote,
                    2 => ParagraphStyle::Note,
                    3 => ParagraphStyle::Warning,
                    _ => ParagraphStyle::Tip,
                };
                doc.push(Block::Paragraph(ParagraphBlock {
                    text: format!("Paragraph {p} of section {s}. ").repeat(6),
                    style,
                    bold: p % 4 == 0,
                    italic: p % 3 == 0,
                }));
            }
            doc.push(Block::Table(TableBlock {
                headers: vec!["Id".to_owned(), "Name".to_owned(), "Value".to_owned()],
                rows: (0..rows)
                    .map(|r| vec![r.to_string(), format!("row {r}"), format!("{}", r * 7)])
                    .collect(),
                style: if s % 2 == 0 {
                    TableStyle::Striped
                } else {
                    TableStyle::Professional
                },
            }));
            doc.push(Block::List(ListBlock {
                items: (0..5).map(|i| format!("item {i}")).collect(),
                ordered: s % 2 == 1,
            }));
            doc.push(Block::Code(CodeBlock {
                code: "fn main() {\n    println!(\"hi\");\n}".to_owned(),
                language: "rust".to_owned(),
            }));
        }
        doc
    }
}

pub mod workbook {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Wide,
        Tall,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Wide => "wide",
                Self::Tall => "tall",
            }
        }

        /// (sheets, rows, columns)
        const fn params(self) -> (usize, u32, u32) {
            match self {
                Self::Small => (1, 20, 5),
                Self::Wide => (2, 200, 60),
                Self::Tall => (1, 10_000, 8),
            }
        }
    }

    pub fn fixture(case: Case) -> WorkbookContext {
        let (sheets, rows, cols) = case.params();
        let mut wb = WorkbookContext::new("Bench", "bench.xlsx", theme("alibaba"));
        let header = CellFormat {
            bold: true,
            centered: true,
            fill: Some("fff7e6".to_owned()),
            border_color: Some("ffe7ba".to_owned()),
            ..CellFormat::default()
        };
        for s in 0..sheets {
            let sheet = wb.ensure_sheet(&format!("Sheet{s}"));
            for c in 1..=cols {
                sheet.set_cell(
                    CellAddress::new(1, c),
                    Cell {
                        value: CellValue::Text(format!("col {c}")),
                        format: header.clone(),
                    },
                );
                sheet.set_column_width(c, 15.0);
            }
            for r in 2..=rows {
                for c in 1..=cols {
                    let value = if c == 1 {
                        CellValue::Text(format!("row {r}"))
                    } else {
                        CellValue::Number(f64::from(r * c))
                    };
                    sheet.set_cell(CellAddress::new(r, c), Cell::plain(value));
                }
            }
            sheet.freeze_rows(1);
        }
        wb
    }
}
