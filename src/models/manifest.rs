// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Package manifest: the metadata view of a template written as `manifest.json`.
//! Parsing does not touch the container or the payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{PackageError, PackageResult};
use crate::models::template::TemplateRecord;

/// Structural version tag written into every manifest.
pub const PACKAGE_FORMAT: &str = "FARA-BINARY-v1";

/// Fields that must be present for a manifest to parse, in reporting order.
/// `exportedAt` is advisory and may be absent.
const REQUIRED_FIELDS: [&str; 6] = ["name", "description", "version", "author", "tags", "format"];

/// Manifest fields as they appear on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: Vec<String>,
    pub format: String,
    /// Unix timestamp in milliseconds; informational only.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub exported_at: i64,
}

/// Read `exportedAt` from any JSON number or `null` (as 0).
///
/// Floats are rounded; out-of-range values saturate. Non-numbers stay errors.
fn lenient_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(0);
    };

    let millis = number
        .as_i64()
        .or_else(|| number.as_u64().map(|_| i64::MAX))
        // `as` saturates for floats.
        .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        .unwrap_or(0);
    Ok(millis)
}

impl PackageManifest {
    /// Build a manifest for `record`, stamping the current format tag.
    pub fn from_record(record: &TemplateRecord, exported_at: i64) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            version: record.version.clone(),
            author: record.author.clone(),
            tags: record.tags.clone(),
            format: PACKAGE_FORMAT.to_string(),
            exported_at,
        }
    }

    /// Serialize to pretty-printed JSON (two-space indent).
    pub fn to_json(&self) -> PackageResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| PackageError::MalformedManifest(Some(err)))
    }

    /// Parse manifest JSON.
    ///
    /// # Errors
    ///
    /// - [`PackageError::MalformedManifest`] when the text is not a JSON object
    ///   or a field has the wrong type.
    /// - [`PackageError::MissingField`] naming the first absent required field.
    ///
    /// Unknown fields are ignored so newer writers stay readable.
    pub fn parse(text: &str) -> PackageResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| PackageError::MalformedManifest(Some(err)))?;

        let Some(object) = value.as_object() else {
            return Err(PackageError::MalformedManifest(None));
        };

        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| !object.contains_key(**field))
        {
            return Err(PackageError::MissingField(*missing));
        }

        serde_json::from_value(value).map_err(|err| PackageError::MalformedManifest(Some(err)))
    }
}
