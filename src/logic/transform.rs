// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Keyed XOR byte transform used to obfuscate package payloads.
//!
//! The transform is its own inverse: applying it twice with the same key
//! yields the original bytes. It only makes payloads look like binary data
//! and offers no confidentiality to anyone holding the key.

use std::fmt;

use crate::error::{PackageError, PackageResult};

/// Key shipped with the software and used when no other key is configured.
pub const DEFAULT_TRANSFORM_KEY: &[u8] = b"FARA_PROPRIETARY_v1";

/// XOR `bytes` against `key`, cycling the key.
///
/// # Errors
///
/// Returns [`PackageError::EmptyKey`] when `key` is empty.
pub fn transform(bytes: &[u8], key: &[u8]) -> PackageResult<Vec<u8>> {
    if key.is_empty() {
        return Err(PackageError::EmptyKey);
    }
    Ok(xor_cycle(bytes, key))
}

fn xor_cycle(bytes: &[u8], key: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect()
}

/// Non-empty transform key.
#[derive(Clone, PartialEq, Eq)]
pub struct TransformKey(Vec<u8>);

impl TransformKey {
    /// Wrap `key`, rejecting an empty sequence.
    pub fn new(key: impl Into<Vec<u8>>) -> PackageResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(PackageError::EmptyKey);
        }
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Apply the transform. Infallible because the key is known non-empty.
    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        xor_cycle(bytes, &self.0)
    }
}

impl Default for TransformKey {
    fn default() -> Self {
        Self(DEFAULT_TRANSFORM_KEY.to_vec())
    }
}

// Keep key material out of logs.
impl fmt::Debug for TransformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformKey")
            .field("len", &self.0.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_TRANSFORM_KEY, TransformKey, transform};
    use crate::error::{ErrorKind, PackageError};

    #[test]
    fn transform_twice_restores_input() {
        let input = b"name: MFA Posture Check\nchecks: []\n".to_vec();
        let once = transform(&input, DEFAULT_TRANSFORM_KEY).unwrap();
        assert_ne!(once, input);
        let twice = transform(&once, DEFAULT_TRANSFORM_KEY).unwrap();
        assert_eq!(twice, input);
    }

    #[test]
    fn transform_of_empty_input_is_empty() {
        assert!(transform(&[], b"k").unwrap().is_empty());
    }

    #[test]
    fn transform_cycles_key() {
        let out = transform(&[0, 0, 0, 0, 0], &[1, 2]).unwrap();
        assert_eq!(out, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn transform_is_an_involution_for_every_byte_value() {
        let input: Vec<u8> = (0..=255).collect();
        for key in [&b"x"[..], &b"ab"[..], DEFAULT_TRANSFORM_KEY, &[0u8; 3][..]] {
            let once = transform(&input, key).unwrap();
            assert_eq!(transform(&once, key).unwrap(), input);
        }
    }

    #[test]
    fn transform_rejects_empty_key() {
        let err = transform(b"data", &[]).unwrap_err();
        assert!(matches!(err, PackageError::EmptyKey));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn transform_key_rejects_empty_and_matches_free_function() {
        assert!(matches!(
            TransformKey::new(Vec::new()),
            Err(PackageError::EmptyKey)
        ));

        let key = TransformKey::new("secret").unwrap();
        assert_eq!(
            key.apply(b"payload"),
            transform(b"payload", b"secret").unwrap()
        );
    }

    #[test]
    fn transform_key_debug_hides_material() {
        let rendered = format!("{:?}", TransformKey::default());
        assert!(!rendered.contains("FARA"));
        assert!(rendered.contains("len"));
    }
}
