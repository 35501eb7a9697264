// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Codec configuration loaded from environment variables.

use std::env::{self, VarError};

use crate::error::{PackageError, PackageResult};
use crate::logic::transform::TransformKey;

/// Environment variable overriding the payload transform key.
pub const TRANSFORM_KEY_VAR: &str = "FARA_TRANSFORM_KEY";

/// Settings shared by encode and decode.
///
/// Packages only decode with the key they were encoded with, so every
/// installation exchanging packages must agree on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Key for the payload byte transform.
    pub key: TransformKey,
}

impl CodecConfig {
    pub fn with_key(key: TransformKey) -> Self {
        Self { key }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                 |
    /// |----------------------|-------------------------|
    /// | `FARA_TRANSFORM_KEY` | `FARA_PROPRIETARY_v1`   |
    ///
    /// # Errors
    ///
    /// An empty or non-UTF-8 `FARA_TRANSFORM_KEY` is a configuration error.
    pub fn from_env() -> PackageResult<Self> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> PackageResult<Self> {
        let key = match lookup(TRANSFORM_KEY_VAR) {
            Ok(value) => TransformKey::new(value.into_bytes())?,
            Err(VarError::NotPresent) => TransformKey::default(),
            Err(VarError::NotUnicode(_)) => {
                return Err(PackageError::InvalidConfig(format!(
                    "{TRANSFORM_KEY_VAR} must be valid UTF-8"
                )));
            }
        };
        Ok(Self { key })
    }
}
