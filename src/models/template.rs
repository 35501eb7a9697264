// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Template record domain model and creation defaults (storage-agnostic).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PackageError, PackageResult};

/// Version assigned to drafts created without one.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Author assigned to drafts created without one.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// One audit workflow template as held by a repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Repository-local identifier; never carried inside a package.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form version string.
    pub version: String,
    pub author: String,
    /// Ordered tags, kept exactly as entered.
    pub tags: Vec<String>,
    /// Workflow body. Treated as opaque text.
    pub content: String,
}

impl TemplateRecord {
    /// Check the fields a package cannot be built without.
    ///
    /// `name` is checked before `content`.
    pub fn validate(&self) -> PackageResult<()> {
        if self.name.is_empty() {
            return Err(PackageError::EmptyField("name"));
        }
        if self.content.is_empty() {
            return Err(PackageError::EmptyField("content"));
        }
        Ok(())
    }
}

/// Mint a fresh repository identifier.
pub fn new_template_id() -> String {
    format!("template-{}", Uuid::new_v4())
}

/// User-supplied input for a new template, before repository defaults apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content: String,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Apply creation defaults and assign `id`.
    ///
    /// Blank version/author strings count as absent, matching what an
    /// empty form field produces.
    pub fn into_record(self, id: String) -> TemplateRecord {
        TemplateRecord {
            id,
            name: self.name,
            description: self.description,
            version: non_blank(self.version).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            author: non_blank(self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            tags: self.tags.unwrap_or_default(),
            content: self.content,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
