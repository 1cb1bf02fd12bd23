// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, info, warn};

use super::{persist, template_note, Office, Outcome};
use crate::diagram::render_image;
use crate::error::ToolError;
use crate::model::{
    Block, CodeBlock, DocumentContext, HeadingBlock, ListBlock, ParagraphBlock, TableBlock,
};
use crate::render::{render_document, SaveOptions};
use crate::validate::{
    Choice, WordAddCodeParams, WordAddDiagramParams, WordAddHeadingParams, WordAddListParams,
    WordAddParagraphParams, WordAddTableParams, WordCreateParams, WordSaveParams,
};

impl Office {
    pub async fn word_create(&self, params: WordCreateParams) -> Result<Outcome, ToolError> {
        let theme = self.theme(params.theme.name());
        let display_name = theme.display_name.clone();
        let context = DocumentContext::new(
            params.title.clone(),
            params.author,
            params.output_path.clone(),
            theme,
        );
        let handle = self.documents.create(context).await;
        info!(doc_id = %handle, title = %params.title, path = %params.output_path, "document created");

        let mut message = format!(
            "document \"{}\" created with theme {display_name}",
            params.title
        );
        if let Some(note) = template_note(params.template.map(Choice::name), "document") {
            message.push_str("; ");
            message.push_str(&note);
        }
        Ok(Outcome::new(message).with("docId", handle.into_string()))
    }

    pub async fn word_add_heading(&self, params: WordAddHeadingParams) -> Result<Outcome, ToolError> {
        let mut doc = self.documents.lock(&params.doc_id).await?;
        doc.push(Block::Heading(HeadingBlock {
            level: params.level,
            text: params.text.clone(),
            numbered: params.numbering,
        }));
        debug!(doc_id = %params.doc_id, level = params.level, "heading added");
        Ok(Outcome::new(format!(
            "added level {} heading: {}",
            params.level, params.text
        )))
    }

    pub async fn word_add_paragraph(
        &self,
        params: WordAddParagraphParams,
    ) -> Result<Outcome, ToolError> {
        let mut doc = self.documents.lock(&params.doc_id).await?;
        let style = params.style;
        doc.push(Block::Paragraph(ParagraphBlock {
            text: params.text,
            style,
            bold: params.bold,
            italic: params.italic,
        }));
        debug!(doc_id = %params.doc_id, style = style.name(), "paragraph added");
        Ok(Outcome::new(format!("added {} paragraph", style.name())))
    }

    pub async fn word_add_table(&self, params: WordAddTableParams) -> Result<Outcome, ToolError> {
        let mut doc = self.documents.lock(&params.doc_id).await?;
        let (columns, rows) = (params.headers.len(), params.rows.len());
        let rows_text: Vec<Vec<String>> = params
            .rows
            .iter()
            .map(|row| row.iter().map(|value| value.display_text()).collect())
            .collect();
        doc.push(Block::Table(TableBlock {
            headers: params.headers,
            rows: rows_text,
            style: params.style,
        }));
        debug!(doc_id = %params.doc_id, columns, rows, "table added");
        Ok(Outcome::new(format!(
            "added table with {columns} columns and {rows} rows"
        )))
    }

    pub async fn word_add_list(&self, params: WordAddListParams) -> Result<Outcome, ToolError> {
        let mut doc = self.documents.lock(&params.doc_id).await?;
        let count = params.items.len();
        let kind = if params.ordered { "numbered" } else { "bulleted" };
        doc.push(Block::List(ListBlock {
            items: params.items,
            ordered: params.ordered,
        }));
        debug!(doc_id = %params.doc_id, count, kind, "list added");
        Ok(Outcome::new(format!("added {kind} list with {count} items")))
    }

    pub async fn word_add_code(&self, params: WordAddCodeParams) -> Result<Outcome, ToolError> {
        let mut doc = self.documents.lock(&params.doc_id).await?;
        let message = if params.language.is_empty() {
            "added code block".to_owned()
        } else {
            format!("added {} code block", params.language)
        };
        doc.push(Block::Code(CodeBlock {
            code: params.code,
            language: params.language,
        }));
        debug!(doc_id = %params.doc_id, "code block added");
        Ok(Outcome::new(message))
    }

    /// Renders the diagram while holding the session, so the image lands exactly where the call
    /// arrived in the block sequence. A render failure leaves the document untouched.
    pub async fn word_add_diagram(
        &self,
        params: WordAddDiagramParams,
    ) -> Result<Outcome, ToolError> {
        let mut doc = self.documents.lock(&params.doc_id).await?;
        let image = render_image(
            self.diagrams.as_ref(),
            &params.mermaid,
            params.theme,
            params.width,
            params.caption,
        )
        .await
        .map_err(|err| {
            warn!(doc_id = %params.doc_id, error = %err, "diagram render failed");
            ToolError::DiagramRender(err)
        })?;

        let (width, height) = (image.pixel_width, image.pixel_height);
        doc.push(Block::Image(image));
        debug!(doc_id = %params.doc_id, width, height, "diagram added");
        Ok(Outcome::new(format!("added diagram ({width}x{height} px)"))
            .with("width", width)
            .with("height", height))
    }

    /// Renders and writes the document, then ends the session. On any failure the session is
    /// kept so the caller can retry.
    pub async fn word_save(&self, params: WordSaveParams) -> Result<Outcome, ToolError> {
        let doc = self.documents.lock(&params.doc_id).await?;
        let options = SaveOptions {
            page_numbers: params.add_page_numbers,
            header: params.add_header,
            footer: params.add_footer,
        };
        let path = doc.output_path().to_path_buf();
        let saved = match render_document(&doc, &options) {
            Ok(bytes) => persist(&path, bytes).await,
            Err(err) => Err(err),
        };
        if let Err(err) = saved {
            warn!(doc_id = %params.doc_id, path = %path.display(), error = %err, "document save failed");
            return Err(err);
        }

        let blocks = doc.blocks().len();
        self.documents.remove(doc).await;
        info!(doc_id = %params.doc_id, path = %path.display(), blocks, "document saved");
        Ok(Outcome::new(format!("document saved to {}", path.display()))
            .with("path", path.display().to_string()))
    }
}
