// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model for document and workbook sessions.
//!
//! Document sessions accumulate an ordered list of content blocks; workbook sessions accumulate
//! sparse per-sheet cell grids. Neither depends on the file-format libraries: conversion to
//! `.docx`/`.xlsx` happens only in `render`.

pub mod cell;
pub mod document;
pub mod ids;
pub mod workbook;

pub use cell::{
    column_letter_to_number, column_number_to_letter, parse_cell_address, CellAddress, CellRange,
    ParseCellError, MAX_COLUMN, MAX_ROW,
};
pub use document::{
    Block, CodeBlock, DocumentContext, HeadingBlock, HeadingCounter, ImageBlock, ListBlock,
    ParagraphBlock, ParagraphStyle, TableBlock, TableStyle,
};
pub use ids::{DocumentHandle, DocumentKind, Handle, HandleKind, WorkbookHandle, WorkbookKind};
pub use workbook::{
    Cell, CellFormat, CellValue, ChartKind, ChartSeriesRef, ChartSpec, Sheet, WorkbookContext,
};
