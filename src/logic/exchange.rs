// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Moving templates between a repository and `.fara` files on disk.
//!
//! Responsibilities:
//! - Derive download file names from template names.
//! - Export a stored template as a package file.
//! - Import a package file as a new stored template (nothing is stored on failure).
//! - Inspect a package file without importing it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::logic::codec::{PackageCodec, PackageSummary};
use crate::logic::container::Container;
use crate::models::template::TemplateRecord;
use crate::repository::TemplateRepository;
use crate::utils::sanitize_component;

/// File extension of template packages.
pub const PACKAGE_EXTENSION: &str = "fara";

/// Suggest a download file name for a template.
///
/// Lowercases the name, replaces each run of whitespace with a single `_`
/// and appends `.fara`. Falls back to `fara_template.fara` for an empty name.
pub fn suggested_package_name(name: &str) -> String {
    let mut base = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                base.push('_');
            }
            in_whitespace = true;
        } else {
            base.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }

    let final_base = if base.is_empty() { "fara_template" } else { &base };
    format!("{final_base}.{PACKAGE_EXTENSION}")
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Write package bytes to `output`, creating parent directories if missing.
pub fn write_package(output: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    fs::write(output, bytes).with_context(|| format!("Failed to write package file {:?}", output))
}

/// Encode the stored template `id` and write it as a package file.
///
/// When `target` is an existing directory the file is named after the
/// template (see [`suggested_package_name`]), sanitized so it stays inside
/// that directory. Otherwise `target` is the output path and receives the
/// `.fara` extension if it lacks one.
///
/// Returns the path written.
pub fn export_template<R, C>(
    repo: &R,
    codec: &PackageCodec<C>,
    id: &str,
    target: &Path,
) -> Result<PathBuf>
where
    R: TemplateRepository + ?Sized,
    C: Container,
{
    let record = repo
        .get(id)
        .with_context(|| format!("Failed to load template {id}"))?;
    let bytes = codec
        .encode(&record)
        .with_context(|| format!("Failed to compile template {:?}", record.name))?;

    let output = if target.is_dir() {
        target.join(sanitize_component(&suggested_package_name(&record.name)))
    } else {
        ensure_extension(target.to_path_buf(), PACKAGE_EXTENSION)
    };
    write_package(&output, &bytes)?;

    tracing::info!(
        template = %record.name,
        path = %output.display(),
        "exported template package"
    );
    Ok(output)
}

/// Decode the package at `path` and store it as a new template.
///
/// The repository is only touched after the package decoded completely.
pub fn import_template<R, C>(
    repo: &mut R,
    codec: &PackageCodec<C>,
    path: &Path,
) -> Result<TemplateRecord>
where
    R: TemplateRepository + ?Sized,
    C: Container,
{
    let bytes = fs::read(path).with_context(|| format!("Failed to read package file {:?}", path))?;
    let record = codec.decode(&bytes).with_context(|| {
        format!(
            "Failed to read .fara package {:?}. It may be corrupted or from an incompatible version.",
            path
        )
    })?;

    repo.insert(record.clone())
        .with_context(|| format!("Failed to store imported template {:?}", record.name))?;

    tracing::info!(template = %record.name, id = %record.id, "imported template package");
    Ok(record)
}

/// Summarize the package at `path` without importing it.
pub fn inspect_package<C: Container>(codec: &PackageCodec<C>, path: &Path) -> Result<PackageSummary> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read package file {:?}", path))?;
    codec
        .inspect(&bytes)
        .with_context(|| format!("Failed to inspect package {:?}", path))
}
