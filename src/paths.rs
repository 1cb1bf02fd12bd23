// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output path checks and file writing for the save operations.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Which kind of file an output path must name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Document,
    Workbook,
}

impl OutputKind {
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Document => &[".docx"],
            Self::Workbook => &[".xlsx"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathViolation {
    #[error("path must not contain \"..\" segments")]
    Traversal,
    #[error("file extension must be {allowed}, found: {found}")]
    Extension { allowed: String, found: String },
}

/// Lexically checks an output path: no `..` may survive normalisation and the extension must
/// match `kind` (case-insensitive). Never touches the filesystem.
pub fn validate_output_path(output_path: &str, kind: OutputKind) -> Result<(), PathViolation> {
    let normalized = normalize_lexically(Path::new(output_path));
    if normalized
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(PathViolation::Traversal);
    }

    let extension = normalized
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()));
    let allowed = kind.allowed_extensions();
    match extension {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        found => Err(PathViolation::Extension {
            allowed: allowed.join(" or "),
            found: found.unwrap_or_else(|| "none".to_owned()),
        }),
    }
}

/// Resolves `.` and `..` without consulting the filesystem. A `..` that would climb above the
/// start of a relative path is kept; above a root it is dropped.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Writes `bytes` to `path`, creating missing parent directories first.
///
/// The payload lands in a temporary sibling that is renamed over the target, so a failed write
/// never leaves a truncated file behind.
pub fn write_output(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?;
    let (tmp_path, mut file) = create_temp_sibling(&parent, &file_name.to_string_lossy())?;

    let written = file
        .write_all(bytes)
        .and_then(|()| file.flush())
        .and_then(|()| fs::rename(&tmp_path, path));
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn create_temp_sibling(dir: &Path, file_name: &str) -> io::Result<(PathBuf, File)> {
    let pid = std::process::id();
    for _ in 0..16 {
        let candidate = dir.join(format!(".{file_name}.{pid}.{:08x}.tmp", fastrand::u32(..)));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        "could not allocate a temporary output file",
    ))
}
