//! crates/sc_io/src/hasher.rs
//!
//! SHA-256 digests, lowercase hex.
//! - `sha256_hex` hashes raw bytes.
//! - `sha256_canonical` hashes the canonical JSON of a serializable value, so
//!   key order and whitespace in the source file do not change the digest.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256 as Sha256Hasher};

use sc_core::Sha256;

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256Hasher::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of `value`.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> IoResult<Sha256> {
    let bytes = to_canonical_bytes(value)?;
    sha256_hex(&bytes)
        .parse()
        .map_err(|e| IoError::Hash(format!("digest shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_digest_ignores_key_order() {
        let a = sha256_canonical(&json!({"name": "CDU", "seats": 14})).unwrap();
        let b = sha256_canonical(&json!({"seats": 14, "name": "CDU"})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }
}
