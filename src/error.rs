// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error taxonomy for the package codec.
//!
//! Every variant carries the offending field or entry name as data so callers
//! can build user-facing messages by matching instead of parsing strings.

use thiserror::Error;

/// Result alias for codec operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Coarse error category used by callers to decide how to surface a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required record or manifest field is missing or empty.
    Validation,
    /// Container or manifest bytes are structurally invalid.
    Format,
    /// Internal misconfiguration, such as an empty transform key.
    Configuration,
    /// File access or archive writer failure.
    Io,
}

/// Errors raised while encoding, decoding, or configuring packages.
#[derive(Debug, Error)]
pub enum PackageError {
    /// A required field was present but empty.
    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),

    /// A required manifest field was absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The input is not a readable archive.
    #[error("invalid package")]
    InvalidPackage(#[source] zip::result::ZipError),

    /// A required archive entry is absent.
    #[error("missing entry: {0}")]
    MissingEntry(String),

    /// An archive entry exceeds the decode size limit.
    #[error("entry too large: {0}")]
    EntryTooLarge(String),

    /// The manifest entry is not well-formed JSON of the expected shape.
    #[error("malformed manifest")]
    MalformedManifest(#[source] Option<serde_json::Error>),

    /// The manifest declares a container format this build does not read.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The payload did not decode to UTF-8 after the byte transform.
    #[error("corrupt payload")]
    CorruptPayload(#[source] std::string::FromUtf8Error),

    /// The transform key is empty.
    #[error("configuration error: transform key must not be empty")]
    EmptyKey,

    /// Any other invalid configuration value.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Writing the archive failed.
    #[error("failed to write package archive")]
    ArchiveWrite(#[source] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackageError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyField(_) | Self::MissingField(_) => ErrorKind::Validation,
            Self::InvalidPackage(_)
            | Self::MissingEntry(_)
            | Self::EntryTooLarge(_)
            | Self::MalformedManifest(_)
            | Self::UnsupportedFormat(_)
            | Self::CorruptPayload(_) => ErrorKind::Format,
            Self::EmptyKey | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::ArchiveWrite(_) | Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Name of the record or manifest field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyField(field) | Self::MissingField(field) => Some(field),
            _ => None,
        }
    }

    /// Name of the archive entry this error refers to, if any.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::MissingEntry(name) | Self::EntryTooLarge(name) => Some(name),
            _ => None,
        }
    }
}
