// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphStyle {
    #[default]
    Normal,
    Quote,
    Note,
    Warning,
    Tip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    Striped,
    Bordered,
    Minimal,
    #[default]
    Professional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingBlock {
    pub level: u8,
    pub text: String,
    pub numbered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphBlock {
    pub text: String,
    pub style: ParagraphStyle,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub items: Vec<String>,
    pub ordered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
}

/// A rendered raster image plus the display size it should occupy on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub png: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub caption: Option<String>,
}

/// One unit of document content, appended in call order and rendered once at save.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(HeadingBlock),
    Paragraph(ParagraphBlock),
    Table(TableBlock),
    List(ListBlock),
    Code(CodeBlock),
    Image(ImageBlock),
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Heading(_) => "heading",
            Self::Paragraph(_) => "paragraph",
            Self::Table(_) => "table",
            Self::List(_) => "list",
            Self::Code(_) => "code",
            Self::Image(_) => "image",
        }
    }
}

/// In-memory state of one document session.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    title: String,
    author: Option<String>,
    output_path: PathBuf,
    theme: Arc<Theme>,
    blocks: Vec<Block>,
}

impl DocumentContext {
    pub fn new(
        title: impl Into<String>,
        author: Option<String>,
        output_path: impl Into<PathBuf>,
        theme: Arc<Theme>,
    ) -> Self {
        Self {
            title: title.into(),
            author,
            output_path: output_path.into(),
            theme,
            blocks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// Hierarchical heading counters (`1.`, `1.2`, `1.2.1`, ...).
///
/// Every heading advances the counter of its level and resets the deeper ones, whether or not it
/// is itself numbered, so numbers always reflect the document outline.
#[derive(Debug, Default, Clone)]
pub struct HeadingCounter {
    counters: [u32; 6],
}

impl HeadingCounter {
    pub fn advance(&mut self, level: u8) -> String {
        let idx = usize::from(level.clamp(1, 6)) - 1;
        self.counters[idx] += 1;
        for deeper in &mut self.counters[idx + 1..] {
            *deeper = 0;
        }
        if idx == 0 {
            return format!("{}.", self.counters[0]);
        }
        self.counters[..=idx]
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::HeadingCounter;

    #[test]
    fn heading_counter_tracks_the_outline() {
        let mut counter = HeadingCounter::default();
        assert_eq!(counter.advance(1), "1.");
        assert_eq!(counter.advance(2), "1.1");
        assert_eq!(counter.advance(2), "1.2");
        assert_eq!(counter.advance(3), "1.2.1");
        assert_eq!(counter.advance(1), "2.");
        assert_eq!(counter.advance(2), "2.1");
    }

    #[test]
    fn skipped_levels_count_from_zero() {
        let mut counter = HeadingCounter::default();
        assert_eq!(counter.advance(2), "0.1");
        assert_eq!(counter.advance(1), "1.");
        assert_eq!(counter.advance(3), "1.0.1");
    }
}
