// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Template package codec: turns a [`TemplateRecord`] into `.fara` bytes and back.
//!
//! Encode validates the record, writes the manifest, transforms the content
//! payload and packs both entries. Decode reverses those steps and always
//! mints a fresh record id. Both are all-or-nothing: an error leaves no output.

use time::OffsetDateTime;

use crate::config::CodecConfig;
use crate::error::{PackageError, PackageResult};
use crate::logic::container::{
    Container, LOGIC_ENTRY, MANIFEST_ENTRY, PackageEntries, ZipContainer, open_with,
};
use crate::models::manifest::{PACKAGE_FORMAT, PackageManifest};
use crate::models::template::{TemplateRecord, new_template_id};
use crate::utils::hash_bytes;

/// Encoder/decoder bound to one transform key and one container framing.
///
/// Holds no mutable state, so a single codec can serve concurrent callers.
#[derive(Clone, Debug)]
pub struct PackageCodec<C = ZipContainer> {
    config: CodecConfig,
    container: C,
}

/// Read-only view of a package, produced without creating a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageSummary {
    pub manifest: PackageManifest,
    /// Every entry name in the archive, sorted.
    pub entries: Vec<String>,
    /// Size of the transformed payload entry.
    pub payload_bytes: usize,
    /// Lowercase hex SHA-256 of the whole package.
    pub sha256: String,
}

impl PackageCodec<ZipContainer> {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            container: ZipContainer,
        }
    }
}

impl Default for PackageCodec<ZipContainer> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl<C: Container> PackageCodec<C> {
    /// Use a different archive framing.
    pub fn with_container(config: CodecConfig, container: C) -> Self {
        Self { config, container }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `record` into package bytes.
    ///
    /// # Errors
    ///
    /// - [`PackageError::EmptyField`] when `name` or `content` is empty.
    /// - [`PackageError::ArchiveWrite`] if the archive writer fails.
    pub fn encode(&self, record: &TemplateRecord) -> PackageResult<Vec<u8>> {
        record.validate()?;

        let manifest = PackageManifest::from_record(record, unix_millis_now());
        let manifest_json = manifest.to_json()?;
        let payload = self.config.key.apply(record.content.as_bytes());

        let mut entries = PackageEntries::new();
        entries.insert(MANIFEST_ENTRY.to_string(), manifest_json.into_bytes());
        entries.insert(LOGIC_ENTRY.to_string(), payload);

        let bytes = self.container.build(&entries)?;
        tracing::debug!(
            template = %record.name,
            size = bytes.len(),
            "encoded template package"
        );
        Ok(bytes)
    }

    /// Decode package bytes into a new record with a freshly generated id.
    ///
    /// # Errors
    ///
    /// - Container errors ([`PackageError::InvalidPackage`],
    ///   [`PackageError::MissingEntry`], [`PackageError::EntryTooLarge`]).
    /// - Manifest errors ([`PackageError::MalformedManifest`],
    ///   [`PackageError::MissingField`]).
    /// - [`PackageError::UnsupportedFormat`] for a foreign format tag.
    /// - [`PackageError::CorruptPayload`] when the payload is not UTF-8 after
    ///   the transform (wrong key or damaged transfer).
    /// - [`PackageError::EmptyField`] when the package carries an empty
    ///   name or content.
    pub fn decode(&self, bytes: &[u8]) -> PackageResult<TemplateRecord> {
        let (manifest, mut entries) = self.unpack(bytes)?;

        let payload = entries
            .remove(LOGIC_ENTRY)
            .ok_or_else(|| PackageError::MissingEntry(LOGIC_ENTRY.to_string()))?;
        let content =
            String::from_utf8(self.config.key.apply(&payload)).map_err(PackageError::CorruptPayload)?;

        let record = TemplateRecord {
            id: new_template_id(),
            name: manifest.name,
            description: manifest.description,
            version: manifest.version,
            author: manifest.author,
            tags: manifest.tags,
            content,
        };
        record.validate()?;

        tracing::debug!(template = %record.name, id = %record.id, "decoded template package");
        Ok(record)
    }

    /// Describe a package without decoding its payload.
    pub fn inspect(&self, bytes: &[u8]) -> PackageResult<PackageSummary> {
        let (manifest, entries) = self.unpack(bytes)?;
        let payload_bytes = entries.get(LOGIC_ENTRY).map_or(0, Vec::len);

        Ok(PackageSummary {
            manifest,
            entries: entries.into_keys().collect(),
            payload_bytes,
            sha256: hash_bytes(bytes),
        })
    }

    /// Open the container, parse the manifest and check the format tag.
    fn unpack(&self, bytes: &[u8]) -> PackageResult<(PackageManifest, PackageEntries)> {
        let entries = open_with(&self.container, bytes)?;

        let manifest_bytes = entries
            .get(MANIFEST_ENTRY)
            .ok_or_else(|| PackageError::MissingEntry(MANIFEST_ENTRY.to_string()))?;
        let manifest_text =
            std::str::from_utf8(manifest_bytes).map_err(|_| PackageError::MalformedManifest(None))?;
        let manifest = PackageManifest::parse(manifest_text)?;

        if manifest.format != PACKAGE_FORMAT {
            return Err(PackageError::UnsupportedFormat(manifest.format));
        }

        Ok((manifest, entries))
    }
}

/// Encode with the default configuration.
pub fn encode(record: &TemplateRecord) -> PackageResult<Vec<u8>> {
    PackageCodec::<ZipContainer>::default().encode(record)
}

/// Decode with the default configuration.
pub fn decode(bytes: &[u8]) -> PackageResult<TemplateRecord> {
    PackageCodec::<ZipContainer>::default().decode(bytes)
}

fn unix_millis_now() -> i64 {
    millis_from_nanos(OffsetDateTime::now_utc().unix_timestamp_nanos())
}

fn millis_from_nanos(nanos: i128) -> i64 {
    i64::try_from(nanos / 1_000_000).unwrap_or(if nanos < 0 { i64::MIN } else { i64::MAX })
}
