// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The closed set of tools and their advertised metadata.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde_json::Value;

use crate::validate::{
    ExcelAddChartParams, ExcelAddFormulaParams, ExcelAddSheetParams, ExcelCreateParams,
    ExcelMergeCellsParams, ExcelSaveParams, ExcelSetColumnWidthParams, ExcelWriteDataParams,
    WordAddCodeParams, WordAddDiagramParams, WordAddHeadingParams, WordAddListParams,
    WordAddParagraphParams, WordAddTableParams, WordCreateParams, WordSaveParams,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    WordCreate,
    WordAddHeading,
    WordAddParagraph,
    WordAddTable,
    WordAddList,
    WordAddCode,
    WordAddDiagram,
    WordSave,
    ExcelCreate,
    ExcelAddSheet,
    ExcelWriteData,
    ExcelAddChart,
    ExcelAddFormula,
    ExcelSetColumnWidth,
    ExcelMergeCells,
    ExcelSave,
}

impl ToolName {
    pub const ALL: [Self; 16] = [
        Self::WordCreate,
        Self::WordAddHeading,
        Self::WordAddParagraph,
        Self::WordAddTable,
        Self::WordAddList,
        Self::WordAddCode,
        Self::WordAddDiagram,
        Self::WordSave,
        Self::ExcelCreate,
        Self::ExcelAddSheet,
        Self::ExcelWriteData,
        Self::ExcelAddChart,
        Self::ExcelAddFormula,
        Self::ExcelSetColumnWidth,
        Self::ExcelMergeCells,
        Self::ExcelSave,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WordCreate => "word_create",
            Self::WordAddHeading => "word_add_heading",
            Self::WordAddParagraph => "word_add_paragraph",
            Self::WordAddTable => "word_add_table",
            Self::WordAddList => "word_add_list",
            Self::WordAddCode => "word_add_code",
            Self::WordAddDiagram => "word_add_diagram",
            Self::WordSave => "word_save",
            Self::ExcelCreate => "excel_create",
            Self::ExcelAddSheet => "excel_add_sheet",
            Self::ExcelWriteData => "excel_write_data",
            Self::ExcelAddChart => "excel_add_chart",
            Self::ExcelAddFormula => "excel_add_formula",
            Self::ExcelSetColumnWidth => "excel_set_column_width",
            Self::ExcelMergeCells => "excel_merge_cells",
            Self::ExcelSave => "excel_save",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::WordCreate => {
                "Start a new Word document. Returns a docId that every other word_* tool needs. \
                 Nothing is written to disk until word_save."
            }
            Self::WordAddHeading => "Append a heading (level 1-6), optionally numbered like 1.2.",
            Self::WordAddParagraph => {
                "Append a paragraph. Styles quote, note, warning and tip render as call-out boxes."
            }
            Self::WordAddTable => "Append a table with a header row and themed styling.",
            Self::WordAddList => "Append a bulleted or numbered list.",
            Self::WordAddCode => "Append a code block in a monospace font with preserved lines.",
            Self::WordAddDiagram => {
                "Render Mermaid source to an image and append it, scaled to the requested width. \
                 A render failure leaves the document unchanged."
            }
            Self::WordSave => {
                "Write the document to its output path and end the session. Optional page numbers, \
                 header and footer."
            }
            Self::ExcelCreate => {
                "Start a new Excel workbook. Returns a workbookId that every other excel_* tool \
                 needs. Nothing is written to disk until excel_save."
            }
            Self::ExcelAddSheet => "Add an empty worksheet with an optional tab colour.",
            Self::ExcelWriteData => {
                "Write a themed header row and data rows at startCell, creating the sheet when \
                 missing. Optional autofilter and frozen header."
            }
            Self::ExcelAddChart => {
                "Write a chart data table at position and insert a native chart beside it. The \
                 sheet must exist."
            }
            Self::ExcelAddFormula => "Write a formula into one cell. The sheet must exist.",
            Self::ExcelSetColumnWidth => "Set column widths by column letter. The sheet must exist.",
            Self::ExcelMergeCells => "Merge a rectangular range such as A1:D1. The sheet must exist.",
            Self::ExcelSave => "Write the workbook to its output path and end the session.",
        }
    }

    pub fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Self::WordCreate => schema::<WordCreateParams>(),
            Self::WordAddHeading => schema::<WordAddHeadingParams>(),
            Self::WordAddParagraph => schema::<WordAddParagraphParams>(),
            Self::WordAddTable => schema::<WordAddTableParams>(),
            Self::WordAddList => schema::<WordAddListParams>(),
            Self::WordAddCode => schema::<WordAddCodeParams>(),
            Self::WordAddDiagram => schema::<WordAddDiagramParams>(),
            Self::WordSave => schema::<WordSaveParams>(),
            Self::ExcelCreate => schema::<ExcelCreateParams>(),
            Self::ExcelAddSheet => schema::<ExcelAddSheetParams>(),
            Self::ExcelWriteData => schema::<ExcelWriteDataParams>(),
            Self::ExcelAddChart => schema::<ExcelAddChartParams>(),
            Self::ExcelAddFormula => schema::<ExcelAddFormulaParams>(),
            Self::ExcelSetColumnWidth => schema::<ExcelSetColumnWidthParams>(),
            Self::ExcelMergeCells => schema::<ExcelMergeCellsParams>(),
            Self::ExcelSave => schema::<ExcelSaveParams>(),
        }
    }

    pub fn tool(self) -> Tool {
        Tool::new(self.as_str(), self.description(), self.input_schema())
    }
}

fn schema<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(object)) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Every tool, in catalogue order.
pub fn tools() -> Vec<Tool> {
    ToolName::ALL.into_iter().map(ToolName::tool).collect()
}
