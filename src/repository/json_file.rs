// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! JSON-file template store.
//!
//! The whole record list lives in one pretty-printed JSON array. A missing
//! file is created with the built-in templates. Every mutation is written
//! through before it becomes visible; a failed write leaves both the file
//! and the in-memory state unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use super::{MemoryRepository, RepositoryError, RepositoryResult, TemplateRepository};
use crate::models::template::TemplateRecord;

/// File-backed store persisting every change immediately.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    inner: MemoryRepository,
}

impl JsonFileRepository {
    /// Open the store at `path`, seeding it with the built-in templates if the
    /// file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();

        if !path.exists() {
            let repo = Self {
                path,
                inner: MemoryRepository::seeded(),
            };
            repo.persist(repo.inner.records())?;
            tracing::info!(path = %repo.path.display(), "created template store with defaults");
            return Ok(repo);
        }

        let raw = fs::read(&path).map_err(|source| RepositoryError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<TemplateRecord> =
            serde_json::from_slice(&raw).map_err(|source| RepositoryError::Serialization {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), count = records.len(), "loaded template store");
        Ok(Self {
            path,
            inner: MemoryRepository::with_records(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored list with the built-in templates.
    pub fn reset_to_defaults(&mut self) -> RepositoryResult<()> {
        self.apply(|repo| {
            repo.reset_to_defaults();
            Ok(())
        })?;
        tracing::info!(path = %self.path.display(), "template store reset to defaults");
        Ok(())
    }

    /// Run `change` against a copy of the state, persist it, then commit.
    fn apply<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryRepository) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut next = self.inner.clone();
        let out = change(&mut next)?;
        self.persist(next.records())?;
        self.inner = next;
        Ok(out)
    }

    /// Write `records` to a sibling temp file and rename it over the store.
    fn persist(&self, records: &[TemplateRecord]) -> RepositoryResult<()> {
        let io_err = |source: std::io::Error| RepositoryError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(records).map_err(|source| {
            RepositoryError::Serialization {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl TemplateRepository for JsonFileRepository {
    fn list(&self) -> RepositoryResult<Vec<TemplateRecord>> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> RepositoryResult<TemplateRecord> {
        self.inner.get(id)
    }

    fn insert(&mut self, record: TemplateRecord) -> RepositoryResult<String> {
        let id = self.apply(|repo| repo.insert(record))?;
        tracing::info!(%id, "template stored");
        Ok(id)
    }

    fn update(&mut self, id: &str, record: TemplateRecord) -> RepositoryResult<()> {
        self.apply(|repo| repo.update(id, record))?;
        tracing::info!(%id, "template updated");
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RepositoryResult<()> {
        self.apply(|repo| repo.delete(id))?;
        tracing::info!(%id, "template deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::JsonFileRepository;
    use crate::models::template::TemplateDraft;
    use crate::repository::{RepositoryError, TemplateRepository};

    #[test]
    fn open_seeds_missing_store_and_writes_it() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("fara-templates.json");

        let repo = JsonFileRepository::open(&path).unwrap();

        assert_eq!(repo.list().unwrap().len(), 3);
        assert!(path.exists());
        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 3);
    }

    #[test]
    fn mutations_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");

        let created = {
            let mut repo = JsonFileRepository::open(&path).unwrap();
            repo.delete("pim-audit").unwrap();
            let created = repo
                .create(TemplateDraft::new("Custom", "steps: []").with_tags(["b", "a"]))
                .unwrap();
            let mut edited = created.clone();
            edited.description = "edited".into();
            repo.update(&created.id, edited).unwrap();
            created
        };

        let reopened = JsonFileRepository::open(&path).unwrap();
        let records = reopened.list().unwrap();
        assert_eq!(records.len(), 3);
        assert!(matches!(
            reopened.get("pim-audit"),
            Err(RepositoryError::NotFound(_))
        ));
        let stored = reopened.get(&created.id).unwrap();
        assert_eq!(stored.description, "edited");
        assert_eq!(stored.tags, vec!["b", "a"]);
    }

    #[test]
    fn failed_mutation_leaves_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        let mut repo = JsonFileRepository::open(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let err = repo.delete("does-not-exist").unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn reset_restores_defaults_on_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        let mut repo = JsonFileRepository::open(&path).unwrap();
        repo.delete("mfa-audit").unwrap();

        repo.reset_to_defaults().unwrap();

        let reopened = JsonFileRepository::open(&path).unwrap();
        assert!(reopened.get("mfa-audit").is_ok());
        assert_eq!(reopened.list().unwrap().len(), 3);
    }

    #[test]
    fn open_rejects_corrupt_store() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, b"{ not a list").unwrap();

        let err = JsonFileRepository::open(&path).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization { .. }));
    }
}
