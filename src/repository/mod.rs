// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Template storage abstraction.
//!
//! The codec never touches storage; callers fetch records from a
//! [`TemplateRepository`] to encode them and insert what decode returns.
//! Two backends ship with the crate:
//!
//! - [`MemoryRepository`]: ordered in-memory list, for tests and embedding.
//! - [`JsonFileRepository`]: the whole list persisted as one JSON document.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::template::{TemplateDraft, TemplateRecord, new_template_id};

pub mod json_file;
pub mod memory;
pub mod seed;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use seed::default_templates;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised by template stores.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    DuplicateId(String),

    #[error("Failed to access template store {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template store {path:?} is not valid JSON")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyed store of template records.
pub trait TemplateRepository {
    /// All records in display order.
    fn list(&self) -> RepositoryResult<Vec<TemplateRecord>>;

    fn get(&self, id: &str) -> RepositoryResult<TemplateRecord>;

    /// Store `record` under its own id and return that id.
    fn insert(&mut self, record: TemplateRecord) -> RepositoryResult<String>;

    /// Replace the record stored under `id`. The stored copy keeps `id`
    /// whatever `record.id` says.
    fn update(&mut self, id: &str, record: TemplateRecord) -> RepositoryResult<()>;

    fn delete(&mut self, id: &str) -> RepositoryResult<()>;

    /// Apply creation defaults to `draft`, mint an id and insert it.
    fn create(&mut self, draft: TemplateDraft) -> RepositoryResult<TemplateRecord> {
        let record = draft.into_record(new_template_id());
        self.insert(record.clone())?;
        Ok(record)
    }
}
