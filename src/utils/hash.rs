// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Package digest helper.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 of `bytes` and return its lowercase hex digest.
///
/// Packages carry no integrity field of their own, so this digest is what
/// users compare out of band to confirm two files are identical.
///
/// # Examples
///
/// ```rust
/// let digest = farapack::utils::hash_bytes(b"abc");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::hash_bytes;

    #[test]
    fn hash_bytes_matches_known_vector() {
        assert_eq!(
            hash_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_bytes_of_empty_input_is_lowercase_hex() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
