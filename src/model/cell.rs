// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// Largest column addressable in a worksheet (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;
/// Largest row addressable in a worksheet.
pub const MAX_ROW: u32 = 1_048_576;

/// Converts column letters to a 1-based column number (`A` = 1, `Z` = 26, `AA` = 27).
///
/// Returns `None` for empty input, non-letters, or values that overflow.
pub fn column_letter_to_number(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.bytes().try_fold(0u32, |acc, b| {
        let b = b.to_ascii_uppercase();
        if !b.is_ascii_uppercase() {
            return None;
        }
        acc.checked_mul(26)?.checked_add(u32::from(b - b'A' + 1))
    })
}

/// Converts a 1-based column number to its letters (bijective base 26).
///
/// Column `0` has no letters and yields an empty string.
pub fn column_number_to_letter(mut num: u32) -> String {
    let mut out = Vec::new();
    while num > 0 {
        let rem = (num - 1) % 26;
        out.push(b'A' + rem as u8);
        num = (num - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// A 1-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const ORIGIN: Self = Self { row: 1, col: 1 };

    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, rows: u32, cols: u32) -> Self {
        Self {
            row: self.row + rows,
            col: self.col + cols,
        }
    }

    pub fn within_grid(self) -> bool {
        (1..=MAX_ROW).contains(&self.row) && (1..=MAX_COLUMN).contains(&self.col)
    }
}

impl Default for CellAddress {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_number_to_letter(self.col), self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellError {
    input: String,
}

impl fmt::Display for ParseCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell reference: {}", self.input)
    }
}

impl std::error::Error for ParseCellError {}

impl FromStr for CellAddress {
    type Err = ParseCellError;

    /// Strict parse: uppercase letters followed by a row number of at least 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellError {
            input: s.to_owned(),
        };
        let split = s
            .bytes()
            .position(|b| !b.is_ascii_uppercase())
            .ok_or_else(err)?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let col = column_letter_to_number(letters).ok_or_else(err)?;
        let row: u32 = digits.parse().map_err(|_| err())?;
        if row == 0 {
            return Err(err());
        }
        Ok(Self { row, col })
    }
}

/// Parses an A1-style reference, falling back to `A1` when the input is malformed.
pub fn parse_cell_address(cell: &str) -> CellAddress {
    cell.parse().unwrap_or(CellAddress::ORIGIN)
}

/// Rectangular range with inclusive corners, normalised so `start` is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, cell: CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }

    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && other.start.row <= self.end.row
            && self.start.col <= other.end.col
            && other.start.col <= self.end.col
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for CellRange {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s.split_once(':').ok_or_else(|| ParseCellError {
            input: s.to_owned(),
        })?;
        let start: CellAddress = a.trim().parse()?;
        let end: CellAddress = b.trim().parse()?;
        Ok(Self::new(start, end))
    }
}
