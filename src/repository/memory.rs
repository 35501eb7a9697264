// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-memory template store. Nothing is persisted.

use super::{RepositoryError, RepositoryResult, TemplateRepository, default_templates};
use crate::models::template::TemplateRecord;

/// Ordered in-memory store; insertion order is display order.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    records: Vec<TemplateRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-existing records as given.
    pub fn with_records(records: Vec<TemplateRecord>) -> Self {
        Self { records }
    }

    /// Store holding the built-in templates.
    pub fn seeded() -> Self {
        Self::with_records(default_templates())
    }

    pub fn records(&self) -> &[TemplateRecord] {
        &self.records
    }

    /// Drop every record and restore the built-in templates.
    pub fn reset_to_defaults(&mut self) {
        self.records = default_templates();
    }

    fn position(&self, id: &str) -> RepositoryResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

impl TemplateRepository for MemoryRepository {
    fn list(&self) -> RepositoryResult<Vec<TemplateRecord>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> RepositoryResult<TemplateRecord> {
        let idx = self.position(id)?;
        Ok(self.records[idx].clone())
    }

    fn insert(&mut self, record: TemplateRecord) -> RepositoryResult<String> {
        if self.records.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::DuplicateId(record.id));
        }
        let id = record.id.clone();
        self.records.push(record);
        Ok(id)
    }

    fn update(&mut self, id: &str, mut record: TemplateRecord) -> RepositoryResult<()> {
        let idx = self.position(id)?;
        record.id = id.to_string();
        self.records[idx] = record;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RepositoryResult<()> {
        let idx = self.position(id)?;
        self.records.remove(idx);
        Ok(())
    }
}
