// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::any::Any;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use tracing::{debug, error, warn};

use crate::error::ToolError;
use crate::ops::{Office, Outcome};
use crate::validate::{
    ExcelAddChartParams, ExcelAddFormulaParams, ExcelAddSheetParams, ExcelCreateParams,
    ExcelMergeCellsParams, ExcelSaveParams, ExcelSetColumnWidthParams, ExcelWriteDataParams,
    Validate, WordAddCodeParams, WordAddDiagramParams, WordAddHeadingParams, WordAddListParams,
    WordAddParagraphParams, WordAddTableParams, WordCreateParams, WordSaveParams,
};

use super::catalog::{tools, ToolName};
use super::types::Envelope;

const INSTRUCTIONS: &str = "Office document server. Build a Word document with word_create, \
    then word_add_* calls, then word_save; build an Excel workbook with excel_create, then \
    excel_* calls, then excel_save. Every call answers with JSON {success, message, ...}; \
    read success before continuing. Unsaved sessions expire after 30 minutes of age.";

#[derive(Clone)]
pub struct OfficeMcp {
    office: Arc<Office>,
}

impl OfficeMcp {
    pub fn new(office: Office) -> Self {
        Self {
            office: Arc::new(office),
        }
    }

    pub fn office(&self) -> &Office {
        &self.office
    }

    /// Runs one tool call to completion and always produces an envelope.
    ///
    /// The call runs on its own task so a panic inside a handler surfaces as an `internal`
    /// failure instead of tearing down the connection.
    pub async fn call(&self, name: &str, arguments: JsonObject) -> Envelope {
        let Some(tool) = ToolName::from_name(name) else {
            warn!(tool = name, "unknown tool");
            return Envelope::failure(&ToolError::UnknownTool(name.to_owned()));
        };

        let office = Arc::clone(&self.office);
        let task = tokio::spawn(async move { dispatch(&office, tool, &arguments).await });
        let result = match task.await {
            Ok(result) => result,
            Err(err) => {
                let reason = if err.is_panic() {
                    panic_message(err.into_panic())
                } else {
                    err.to_string()
                };
                error!(tool = tool.as_str(), reason = %reason, "tool call aborted");
                Err(ToolError::Internal(reason))
            }
        };

        match result {
            Ok(outcome) => Envelope::success(outcome),
            Err(err) => {
                debug!(tool = tool.as_str(), code = err.code(), error = %err, "tool call failed");
                Envelope::failure(&err)
            }
        }
    }

    /// Wraps the envelope for one `tools/call` request as a single text block. Failures are
    /// reported inside the envelope, never as protocol errors.
    pub async fn answer(&self, request: CallToolRequestParams) -> CallToolResult {
        let arguments = request.arguments.unwrap_or_default();
        let envelope = self.call(&request.name, arguments).await;
        CallToolResult::success(vec![Content::text(envelope.to_json())])
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }
}

async fn dispatch(
    office: &Office,
    tool: ToolName,
    args: &JsonObject,
) -> Result<Outcome, ToolError> {
    match tool {
        ToolName::WordCreate => office.word_create(WordCreateParams::validate(args)?).await,
        ToolName::WordAddHeading => {
            office.word_add_heading(WordAddHeadingParams::validate(args)?).await
        }
        ToolName::WordAddParagraph => {
            office.word_add_paragraph(WordAddParagraphParams::validate(args)?).await
        }
        ToolName::WordAddTable => office.word_add_table(WordAddTableParams::validate(args)?).await,
        ToolName::WordAddList => office.word_add_list(WordAddListParams::validate(args)?).await,
        ToolName::WordAddCode => office.word_add_code(WordAddCodeParams::validate(args)?).await,
        ToolName::WordAddDiagram => {
            office.word_add_diagram(WordAddDiagramParams::validate(args)?).await
        }
        ToolName::WordSave => office.word_save(WordSaveParams::validate(args)?).await,
        ToolName::ExcelCreate => office.excel_create(ExcelCreateParams::validate(args)?).await,
        ToolName::ExcelAddSheet => {
            office.excel_add_sheet(ExcelAddSheetParams::validate(args)?).await
        }
        ToolName::ExcelWriteData => {
            office.excel_write_data(ExcelWriteDataParams::validate(args)?).await
        }
        ToolName::ExcelAddChart => {
            office.excel_add_chart(ExcelAddChartParams::validate(args)?).await
        }
        ToolName::ExcelAddFormula => {
            office.excel_add_formula(ExcelAddFormulaParams::validate(args)?).await
        }
        ToolName::ExcelSetColumnWidth => {
            office.excel_set_column_width(ExcelSetColumnWidthParams::validate(args)?).await
        }
        ToolName::ExcelMergeCells => {
            office.excel_merge_cells(ExcelMergeCellsParams::validate(args)?).await
        }
        ToolName::ExcelSave => office.excel_save(ExcelSaveParams::validate(args)?).await,
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool handler panicked".to_owned()
    }
}

impl ServerHandler for OfficeMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.answer(request).await)
    }
}

#[cfg(test)]
mod tests;
