// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `.docx` rendering: one exhaustive match over the block sequence.
//!
//! Sizes follow Word's units: run sizes are half-points, spacing and indents are twips
//! (1 pt = 20 twips), image extents are EMU.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, Docx, Footer, Header, LineSpacing, PageMargin, PageNum, Paragraph,
    Pic, Run, RunFonts, Shading, SpecialIndentType, Style, StyleType, Table, TableBorder,
    TableBorderPosition, TableCell, TableCellBorder, TableCellBorderPosition, TableRow, WidthType,
};

use crate::diagram::EMU_PER_PX;
use crate::error::ToolError;
use crate::model::{
    Block, CodeBlock, DocumentContext, HeadingBlock, HeadingCounter, ImageBlock, ListBlock,
    ParagraphBlock, ParagraphStyle, TableBlock, TableStyle,
};
use crate::theme::{Alignment, Theme};

/// Full table width in fiftieths of a percent.
const FULL_WIDTH_PCT: usize = 5000;
const NOTE_FILL: &str = "E6F7FF";
const WARNING_FILL: &str = "FFF7E6";
const MUTED_COLOR: &str = "888888";
const MUTED_SIZE: usize = 18;
const CAPTION_COLOR: &str = "666666";
const CAPTION_SIZE: usize = 21;
const QUOTE_INDENT: i32 = 720;
const DEFAULT_CREATOR: &str = "Office MCP Server";

/// Page furniture requested at save time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub page_numbers: bool,
    pub header: Option<String>,
    pub footer: Option<String>,
}

/// Packages the document's blocks, in order, with the theme's page layout.
pub fn render_document(doc: &DocumentContext, options: &SaveOptions) -> Result<Vec<u8>, ToolError> {
    let theme = doc.theme();
    let layout = &theme.page_layout;
    let mut docx = Docx::new().page_margin(
        PageMargin::new()
            .top(layout.margin_top)
            .bottom(layout.margin_bottom)
            .left(layout.margin_left)
            .right(layout.margin_right),
    );
    for (name, value) in document_properties(doc) {
        docx = docx.custom_property(name, value);
    }
    for level in 1..=6u8 {
        docx = docx.add_style(
            Style::new(format!("Heading{level}"), StyleType::Paragraph)
                .name(format!("Heading {level}")),
        );
    }

    let mut headings = HeadingCounter::default();
    for block in doc.blocks() {
        docx = match block {
            Block::Heading(heading) => docx.add_paragraph(heading_paragraph(heading, theme, &mut headings)),
            Block::Paragraph(paragraph) if paragraph.style == ParagraphStyle::Normal => {
                docx.add_paragraph(body_paragraph(paragraph, theme))
            }
            Block::Paragraph(paragraph) => docx.add_table(callout(paragraph, theme)),
            Block::Table(table) => docx.add_table(data_table(table, theme)).add_paragraph(Paragraph::new()),
            Block::List(list) => list_paragraphs(list, theme)
                .into_iter()
                .fold(docx, Docx::add_paragraph),
            Block::Code(code) => {
                if !code.language.is_empty() {
                    docx = docx.add_paragraph(code_label(code, theme));
                }
                docx.add_table(code_table(code, theme)).add_paragraph(Paragraph::new())
            }
            Block::Image(image) => image_paragraphs(image, theme)
                .into_iter()
                .fold(docx, Docx::add_paragraph),
        };
    }

    if let Some(text) = options.header.as_deref() {
        docx = docx.header(
            Header::new().add_paragraph(
                Paragraph::new()
                    .add_run(muted_run(text))
                    .align(AlignmentType::Right),
            ),
        );
    }
    if let Some(paragraph) = footer_paragraph(options) {
        docx = docx.footer(Footer::new().add_paragraph(paragraph));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|err| ToolError::encode("document", err))?;
    Ok(buffer.into_inner())
}

/// Title and creator stored with the package.
fn document_properties(doc: &DocumentContext) -> [(&'static str, String); 2] {
    [
        ("title", doc.title().to_owned()),
        ("creator", doc.author().unwrap_or(DEFAULT_CREATOR).to_owned()),
    ]
}

/// Footer text and the page number share one centred line: `text  |  Page N`.
fn footer_paragraph(options: &SaveOptions) -> Option<Paragraph> {
    if !options.page_numbers && options.footer.is_none() {
        return None;
    }
    let mut paragraph = Paragraph::new().align(AlignmentType::Center);
    if let Some(text) = options.footer.as_deref() {
        paragraph = paragraph.add_run(muted_run(text));
    }
    if options.page_numbers {
        let label = if options.footer.is_some() { "  |  Page " } else { "Page " };
        paragraph = paragraph.add_run(muted_run(label)).add_page_num(PageNum::new());
    }
    Some(paragraph)
}

fn fonts(name: &str) -> RunFonts {
    RunFonts::new().ascii(name).hi_ansi(name).east_asia(name)
}

fn alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
    }
}

/// Points to twips.
fn twips(points: u32) -> u32 {
    points * 20
}

/// First-line indent of `chars` characters at `font_size` half-points, in twips.
fn first_line_indent(chars: u32, font_size: usize) -> i32 {
    i32::try_from(chars as usize * font_size * 10).unwrap_or(i32::MAX)
}

fn muted_run(text: &str) -> Run {
    Run::new()
        .add_text(text)
        .size(MUTED_SIZE)
        .color(MUTED_COLOR)
}

fn heading_paragraph(block: &HeadingBlock, theme: &Theme, counter: &mut HeadingCounter) -> Paragraph {
    let style = theme.word.heading(block.level);
    let number = counter.advance(block.level);
    let text = if block.numbered {
        format!("{number} {}", block.text)
    } else {
        block.text.clone()
    };

    let mut run = Run::new()
        .add_text(text)
        .size(style.font_size)
        .color(style.color.as_str())
        .fonts(fonts(&style.font));
    if style.bold {
        run = run.bold();
    }
    Paragraph::new()
        .add_run(run)
        .style(&format!("Heading{}", block.level))
        .align(alignment(style.alignment))
        .line_spacing(
            LineSpacing::new()
                .before(twips(style.space_before))
                .after(twips(style.space_after)),
        )
}

fn body_paragraph(block: &ParagraphBlock, theme: &Theme) -> Paragraph {
    let body = &theme.word.paragraph;
    let format = &body.format;
    let mut run = Run::new()
        .add_text(block.text.as_str())
        .size(body.font_size)
        .color(body.color.as_str())
        .fonts(fonts(&body.font));
    if block.bold {
        run = run.bold();
    }
    if block.italic {
        run = run.italic();
    }

    let mut paragraph = Paragraph::new().add_run(run).line_spacing(
        LineSpacing::new()
            .before(twips(format.space_before))
            .after(twips(format.space_after)),
    );
    if format.first_line_indent > 0 {
        paragraph = paragraph.indent(
            None,
            Some(SpecialIndentType::FirstLine(first_line_indent(
                format.first_line_indent,
                body.font_size,
            ))),
            None,
            None,
        );
    }
    paragraph
}

/// Quote, note, warning and tip paragraphs become a shaded single-cell table.
fn callout(block: &ParagraphBlock, theme: &Theme) -> Table {
    let body = &theme.word.paragraph;
    let quote = &theme.word.quote;
    let is_quote = block.style == ParagraphStyle::Quote;

    let (font, size) = if is_quote {
        (quote.font.as_str(), quote.font_size)
    } else {
        (body.font.as_str(), body.font_size)
    };
    let mut run = Run::new()
        .add_text(block.text.as_str())
        .size(size)
        .color(body.color.as_str())
        .fonts(fonts(font));
    if block.bold {
        run = run.bold();
    }
    if block.italic || (is_quote && quote.italic) {
        run = run.italic();
    }

    let mut paragraph = Paragraph::new().add_run(run).line_spacing(
        LineSpacing::new()
            .before(twips(body.format.space_before))
            .after(twips(body.format.space_after)),
    );
    if is_quote {
        paragraph = paragraph.indent(Some(QUOTE_INDENT), None, None, None);
    }

    let fill = match block.style {
        ParagraphStyle::Quote => quote.background.as_str(),
        ParagraphStyle::Warning => WARNING_FILL,
        ParagraphStyle::Note | ParagraphStyle::Tip | ParagraphStyle::Normal => NOTE_FILL,
    };
    let mut cell = TableCell::new()
        .add_paragraph(paragraph)
        .shading(Shading::new().fill(fill))
        .width(FULL_WIDTH_PCT, WidthType::Pct);
    if is_quote {
        cell = cell.set_border(
            TableCellBorder::new(TableCellBorderPosition::Left)
                .size(quote.border_width * 8)
                .color(quote.border_left.as_str())
                .border_type(BorderType::Single),
        );
    }

    Table::new(vec![TableRow::new(vec![cell])])
        .width(FULL_WIDTH_PCT, WidthType::Pct)
        .clear_all_border()
}

fn with_borders(table: Table, color: &str, size: usize) -> Table {
    [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ]
    .into_iter()
    .fold(table, |table, position| {
        table.set_border(
            TableBorder::new(position)
                .size(size)
                .color(color)
                .border_type(BorderType::Single),
        )
    })
}

fn data_table(block: &TableBlock, theme: &Theme) -> Table {
    let style = &theme.word.table;
    let columns = block.headers.len().max(1);
    let cell_width = FULL_WIDTH_PCT / columns;

    let header_cells = block
        .headers
        .iter()
        .map(|header| {
            let mut run = Run::new()
                .add_text(header.as_str())
                .size(style.header_font_size)
                .color(style.header_color.as_str())
                .fonts(fonts(&style.header_font));
            if style.header_bold {
                run = run.bold();
            }
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(run).align(AlignmentType::Center))
                .shading(Shading::new().fill(style.header_bg.as_str()))
                .width(cell_width, WidthType::Pct)
        })
        .collect();

    let mut rows = vec![TableRow::new(header_cells)];
    for (index, row) in block.rows.iter().enumerate() {
        let striped = block.style == TableStyle::Striped && index % 2 == 1;
        let cells = (0..columns)
            .map(|col| {
                let text = row.get(col).map(String::as_str).unwrap_or("");
                let run = Run::new()
                    .add_text(text)
                    .size(style.body_font_size)
                    .fonts(fonts(&style.body_font));
                let cell = TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(run))
                    .width(cell_width, WidthType::Pct);
                if striped {
                    cell.shading(Shading::new().fill(style.striped_bg.as_str()))
                } else {
                    cell
                }
            })
            .collect();
        rows.push(TableRow::new(cells));
    }

    let table = Table::new(rows).width(FULL_WIDTH_PCT, WidthType::Pct);
    match block.style {
        TableStyle::Minimal => table.clear_all_border(),
        TableStyle::Striped | TableStyle::Bordered | TableStyle::Professional => {
            with_borders(table, &style.border_color, style.border_width * 4)
        }
    }
}

fn list_paragraphs(block: &ListBlock, theme: &Theme) -> Vec<Paragraph> {
    let style = &theme.word.list;
    block
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let text = if block.ordered {
                format!("{}. {item}", index + 1)
            } else {
                format!("\u{2022} {item}")
            };
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(text)
                        .size(style.font_size)
                        .fonts(fonts(&style.font)),
                )
                .indent(Some(style.indent), None, None, None)
                .line_spacing(LineSpacing::new().after(twips(style.spacing)))
        })
        .collect()
}

fn code_label(block: &CodeBlock, theme: &Theme) -> Paragraph {
    Paragraph::new()
        .add_run(
            Run::new()
                .add_text(block.language.as_str())
                .size(MUTED_SIZE)
                .color(MUTED_COLOR)
                .fonts(fonts(&theme.word.code.font)),
        )
        .line_spacing(LineSpacing::new().after(0))
}

/// One paragraph per source line inside a shaded cell; blank lines keep a space so they survive.
fn code_table(block: &CodeBlock, theme: &Theme) -> Table {
    let style = &theme.word.code;
    let mut lines: Vec<&str> = block.code.lines().collect();
    if lines.is_empty() {
        lines.push("");
    }

    let cell = lines.into_iter().fold(
        TableCell::new()
            .shading(Shading::new().fill(style.background.as_str()))
            .width(FULL_WIDTH_PCT, WidthType::Pct)
            .set_border(
                TableCellBorder::new(TableCellBorderPosition::Left)
                    .size(4)
                    .color(style.border_color.as_str())
                    .border_type(BorderType::Single),
            ),
        |cell, line| {
            let text = if line.is_empty() { " " } else { line };
            cell.add_paragraph(
                Paragraph::new()
                    .add_run(
                        Run::new()
                            .add_text(text)
                            .size(style.font_size)
                            .fonts(fonts(&style.font)),
                    )
                    .line_spacing(LineSpacing::new().after(0)),
            )
        },
    );

    Table::new(vec![TableRow::new(vec![cell])])
        .width(FULL_WIDTH_PCT, WidthType::Pct)
        .clear_all_border()
}

fn image_paragraphs(block: &ImageBlock, theme: &Theme) -> Vec<Paragraph> {
    let pic = Pic::new_with_dimensions(block.png.clone(), block.pixel_width, block.pixel_height)
        .size(
            block.display_width.saturating_mul(EMU_PER_PX),
            block.display_height.saturating_mul(EMU_PER_PX),
        );
    let mut paragraphs = vec![Paragraph::new()
        .add_run(Run::new().add_image(pic))
        .align(AlignmentType::Center)
        .line_spacing(LineSpacing::new().before(200).after(100))];

    if let Some(caption) = block.caption.as_deref() {
        paragraphs.push(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(caption)
                        .size(CAPTION_SIZE)
                        .color(CAPTION_COLOR)
                        .fonts(fonts(&theme.word.fonts.body)),
                )
                .align(AlignmentType::Center)
                .line_spacing(LineSpacing::new().after(200)),
        );
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use docx_rs::BuildXML;

    use super::{
        document_properties, first_line_indent, footer_paragraph, render_document, SaveOptions,
    };
    use crate::diagram::testing::png;
    use crate::model::{
        Block, CodeBlock, DocumentContext, HeadingBlock, ImageBlock, ListBlock, ParagraphBlock,
        ParagraphStyle, TableBlock, TableStyle,
    };
    use crate::theme::ThemeCatalog;

    #[fixture]
    fn doc() -> DocumentContext {
        let theme = ThemeCatalog::builtin().expect("themes").resolve("software");
        DocumentContext::new("Design", Some("Ada".to_owned()), "/tmp/design.docx", Arc::clone(&theme))
    }

    fn paragraph(text: &str, style: ParagraphStyle) -> Block {
        Block::Paragraph(ParagraphBlock {
            text: text.to_owned(),
            style,
            bold: false,
            italic: false,
        })
    }

    #[test]
    fn indent_scales_with_font_size() {
        assert_eq!(first_line_indent(2, 24), 480);
        assert_eq!(first_line_indent(0, 32), 0);
    }

    #[rstest]
    fn empty_document_is_a_zip_package(doc: DocumentContext) {
        let bytes = render_document(&doc, &SaveOptions::default()).expect("render");
        assert!(bytes.starts_with(b"PK"));
    }

    #[rstest]
    fn every_block_kind_renders(mut doc: DocumentContext) {
        doc.push(Block::Heading(HeadingBlock {
            level: 1,
            text: "Overview".to_owned(),
            numbered: true,
        }));
        doc.push(Block::Heading(HeadingBlock {
            level: 5,
            text: "Detail".to_owned(),
            numbered: false,
        }));
        for style in [
            ParagraphStyle::Normal,
            ParagraphStyle::Quote,
            ParagraphStyle::Note,
            ParagraphStyle::Warning,
            ParagraphStyle::Tip,
        ] {
            doc.push(paragraph("Body text", style));
        }
        for style in [TableStyle::Striped, TableStyle::Minimal] {
            doc.push(Block::Table(TableBlock {
                headers: vec!["A".to_owned(), "B".to_owned()],
                rows: vec![
                    vec!["1".to_owned()],
                    vec!["2".to_owned(), "3".to_owned(), "extra".to_owned()],
                ],
                style,
            }));
        }
        doc.push(Block::List(ListBlock {
            items: vec!["one".to_owned(), "two".to_owned()],
            ordered: true,
        }));
        doc.push(Block::Code(CodeBlock {
            code: "fn main() {\n\n    println!(\"hi\");\n}".to_owned(),
            language: "rust".to_owned(),
        }));
        doc.push(Block::Code(CodeBlock {
            code: String::new(),
            language: String::new(),
        }));
        doc.push(Block::Image(ImageBlock {
            png: png(64, 32),
            pixel_width: 64,
            pixel_height: 32,
            display_width: 567,
            display_height: 284,
            caption: Some("Figure 1".to_owned()),
        }));

        let options = SaveOptions {
            page_numbers: true,
            header: Some("Internal".to_owned()),
            footer: Some("Design review".to_owned()),
        };
        let bytes = render_document(&doc, &options).expect("render");

        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1024);
    }

    #[rstest]
    fn page_numbers_alone_produce_a_footer(doc: DocumentContext) {
        let options = SaveOptions {
            page_numbers: true,
            ..SaveOptions::default()
        };
        let bytes = render_document(&doc, &options).expect("render");
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn footer_is_omitted_without_text_or_page_numbers() {
        assert!(footer_paragraph(&SaveOptions::default()).is_none());
    }

    #[test]
    fn footer_text_and_page_number_share_one_centred_paragraph() {
        let options = SaveOptions {
            page_numbers: true,
            footer: Some("Design review".to_owned()),
            ..SaveOptions::default()
        };
        let paragraph = footer_paragraph(&options).expect("footer paragraph");
        let xml = String::from_utf8(paragraph.build()).expect("utf8 xml");

        assert!(xml.contains("Design review"), "{xml}");
        assert!(xml.contains("  |  Page "), "{xml}");
        assert!(xml.contains("PAGE"), "{xml}");
        assert!(xml.contains("center"), "{xml}");
    }

    #[rstest]
    fn title_and_author_are_stored_as_properties(doc: DocumentContext) {
        assert_eq!(
            document_properties(&doc),
            [("title", "Design".to_owned()), ("creator", "Ada".to_owned())]
        );
    }

    #[test]
    fn creator_defaults_when_no_author_was_given() {
        let theme = ThemeCatalog::builtin().expect("themes").resolve("default");
        let doc = DocumentContext::new("Notes", None, "/tmp/notes.docx", theme);
        let [_, (_, creator)] = document_properties(&doc);
        assert_eq!(creator, "Office MCP Server");
    }
}
