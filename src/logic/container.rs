// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Package container framing.
//!
//! Responsibilities:
//! - Pack named entries into a single archive byte sequence.
//! - Unpack an archive and check that the required entries are present.
//! - Keep the archive library behind the two-operation [`Container`] trait.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use zip::{CompressionMethod, ZipArchive, write::FileOptions};

use crate::error::{PackageError, PackageResult};

/// Entry holding the serialized manifest.
pub const MANIFEST_ENTRY: &str = "manifest.json";
/// Entry holding the transformed content payload.
pub const LOGIC_ENTRY: &str = "audit.logic";
/// Entries every package must carry, in the order they are reported missing.
pub const REQUIRED_ENTRIES: [&str; 2] = [MANIFEST_ENTRY, LOGIC_ENTRY];

/// Largest uncompressed entry accepted when opening a container (16 MiB).
pub const MAX_ENTRY_BYTES: u64 = 16 * 1024 * 1024;

/// Entry name to raw bytes.
pub type PackageEntries = BTreeMap<String, Vec<u8>>;

/// Archive framing used for packages.
///
/// Implementations only need to round-trip entry names and bytes exactly;
/// the on-disk layout is theirs to choose.
pub trait Container {
    /// Pack `entries` into one byte sequence.
    fn build(&self, entries: &PackageEntries) -> PackageResult<Vec<u8>>;

    /// Unpack every file entry from `bytes`.
    fn open(&self, bytes: &[u8]) -> PackageResult<PackageEntries>;
}

/// ZIP framing with deflate compression, compatible with common archive tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipContainer;

impl Container for ZipContainer {
    fn build(&self, entries: &PackageEntries) -> PackageResult<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in entries {
            zip.start_file(name.as_str(), options)
                .map_err(PackageError::ArchiveWrite)?;
            zip.write_all(data)?;
        }

        let cursor = zip.finish().map_err(PackageError::ArchiveWrite)?;
        Ok(cursor.into_inner())
    }

    fn open(&self, bytes: &[u8]) -> PackageResult<PackageEntries> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(PackageError::InvalidPackage)?;

        let mut entries = PackageEntries::new();
        for idx in 0..archive.len() {
            let mut file = archive
                .by_index(idx)
                .map_err(PackageError::InvalidPackage)?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            if file.size() > MAX_ENTRY_BYTES {
                return Err(PackageError::EntryTooLarge(name));
            }

            // Declared sizes can lie; cap the actual read as well.
            let mut data = Vec::new();
            (&mut file)
                .take(MAX_ENTRY_BYTES + 1)
                .read_to_end(&mut data)
                .map_err(|err| PackageError::InvalidPackage(err.into()))?;
            if data.len() as u64 > MAX_ENTRY_BYTES {
                return Err(PackageError::EntryTooLarge(name));
            }

            entries.insert(name, data);
        }

        Ok(entries)
    }
}

/// Pack `entries` with the default ZIP framing.
pub fn build_container(entries: &PackageEntries) -> PackageResult<Vec<u8>> {
    ZipContainer.build(entries)
}

/// Unpack `bytes` with the default ZIP framing and require both package entries.
pub fn open_container(bytes: &[u8]) -> PackageResult<PackageEntries> {
    open_with(&ZipContainer, bytes)
}

/// Unpack `bytes` with `container` and require both package entries.
///
/// Extra entries are returned untouched; callers ignore what they do not know.
pub fn open_with<C: Container + ?Sized>(container: &C, bytes: &[u8]) -> PackageResult<PackageEntries> {
    let entries = container.open(bytes)?;
    if let Some(missing) = REQUIRED_ENTRIES
        .iter()
        .find(|name| !entries.contains_key(**name))
    {
        return Err(PackageError::MissingEntry((*missing).to_string()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::{CompressionMethod, write::FileOptions};

    use super::{
        Container, LOGIC_ENTRY, MANIFEST_ENTRY, PackageEntries, ZipContainer, build_container,
        open_container,
    };
    use crate::error::{ErrorKind, PackageError};

    fn entries(items: &[(&str, &[u8])]) -> PackageEntries {
        items
            .iter()
            .map(|(name, data)| (name.to_string(), data.to_vec()))
            .collect()
    }

    #[test]
    fn open_returns_exactly_the_built_entries() {
        let input = entries(&[
            (MANIFEST_ENTRY, br#"{"name":"x"}"#),
            (LOGIC_ENTRY, &[0, 255, 7, 0, 13, 10]),
        ]);

        let bytes = build_container(&input).unwrap();
        let output = open_container(&bytes).unwrap();

        assert_eq!(output, input);
    }

    #[test]
    fn empty_entries_survive_round_trip() {
        let input = entries(&[(MANIFEST_ENTRY, b""), (LOGIC_ENTRY, b"")]);
        let output = open_container(&build_container(&input).unwrap()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn open_keeps_unknown_entries_without_failing() {
        let input = entries(&[
            (MANIFEST_ENTRY, b"{}"),
            (LOGIC_ENTRY, b"abc"),
            ("sidecar/thumbnail.png", b"png"),
        ]);

        let output = open_container(&build_container(&input).unwrap()).unwrap();
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn open_skips_directory_entries() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Stored);
        zip.add_directory("extras/", options).unwrap();
        zip.start_file(MANIFEST_ENTRY, options).unwrap();
        zip.write_all(b"{}").unwrap();
        zip.start_file(LOGIC_ENTRY, options).unwrap();
        zip.write_all(b"x").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let output = open_container(&bytes).unwrap();
        assert_eq!(output.keys().collect::<Vec<_>>(), vec![LOGIC_ENTRY, MANIFEST_ENTRY]);
    }

    #[test]
    fn open_reports_missing_logic_entry() {
        let bytes = build_container(&entries(&[(MANIFEST_ENTRY, b"{}")])).unwrap();
        let err = open_container(&bytes).unwrap_err();

        assert!(matches!(&err, PackageError::MissingEntry(name) if name == LOGIC_ENTRY));
        assert_eq!(err.to_string(), "missing entry: audit.logic");
    }

    #[test]
    fn open_reports_manifest_first_when_both_missing() {
        let bytes = build_container(&PackageEntries::new()).unwrap();
        let err = open_container(&bytes).unwrap_err();
        assert_eq!(err.entry(), Some(MANIFEST_ENTRY));
    }

    #[test]
    fn open_rejects_non_archive_input() {
        for input in [&b""[..], b"plain text", b"PK\x03\x04truncated"] {
            let err = ZipContainer.open(input).unwrap_err();
            assert!(matches!(err, PackageError::InvalidPackage(_)));
            assert_eq!(err.to_string(), "invalid package");
            assert_eq!(err.kind(), ErrorKind::Format);
        }
    }
}
