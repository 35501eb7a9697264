// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Codec for `.fara` audit template packages.
//!
//! A package is a zip archive with two entries: `manifest.json` (plain
//! metadata) and `audit.logic` (the template body, XOR-transformed with a
//! cycled key). [`PackageCodec`] turns a [`TemplateRecord`] into package
//! bytes and back; [`repository`] stores records and [`logic::exchange`]
//! moves them between a store and files on disk.
//!
//! ```
//! use farapack::{TemplateDraft, decode, encode};
//!
//! let record = TemplateDraft::new("MFA Check", "steps: []").into_record("local".into());
//! let bytes = encode(&record).unwrap();
//! let restored = decode(&bytes).unwrap();
//!
//! assert_eq!(restored.content, record.content);
//! assert_ne!(restored.id, record.id);
//! ```

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod repository;
pub mod utils;

pub use config::CodecConfig;
pub use error::{ErrorKind, PackageError, PackageResult};
pub use logic::codec::{PackageCodec, PackageSummary, decode, encode};
pub use logic::transform::{DEFAULT_TRANSFORM_KEY, TransformKey};
pub use models::manifest::{PACKAGE_FORMAT, PackageManifest};
pub use models::template::{TemplateDraft, TemplateRecord};
