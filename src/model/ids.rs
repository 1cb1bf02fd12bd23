// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

const HANDLE_SUFFIX_LEN: usize = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Marker for the kind of session a handle refers to.
pub trait HandleKind {
    /// Prefix of generated handles (`word_...`, `excel_...`).
    const PREFIX: &'static str;
    /// Human label used in messages (`document`, `workbook`).
    const LABEL: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {}

impl HandleKind for DocumentKind {
    const PREFIX: &'static str = "word";
    const LABEL: &'static str = "document";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkbookKind {}

impl HandleKind for WorkbookKind {
    const PREFIX: &'static str = "excel";
    const LABEL: &'static str = "workbook";
}

/// Opaque session handle returned by the create tools.
///
/// Handles are `<prefix>_<unix millis>_<7 base36 chars>`. Clients echo them back verbatim, so
/// any string coming off the wire can be wrapped with [`Handle::from_raw`]; a handle that was
/// never issued simply fails the store lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle<K> {
    value: String,
    _marker: PhantomData<fn() -> K>,
}

impl<K: HandleKind> Handle<K> {
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self::from_raw(format!("{}_{millis}_{}", K::PREFIX, random_suffix()))
    }
}

impl<K> Handle<K> {
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<K> fmt::Display for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K> AsRef<str> for Handle<K> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<K> Borrow<str> for Handle<K> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

pub type DocumentHandle = Handle<DocumentKind>;
pub type WorkbookHandle = Handle<WorkbookKind>;

fn random_suffix() -> String {
    (0..HANDLE_SUFFIX_LEN)
        .map(|_| char::from(BASE36[fastrand::usize(..BASE36.len())]))
        .collect()
}
