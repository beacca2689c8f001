//! SHA-256 identity of canonical text.
//!
//! ```text
//! identity = SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! The version is part of the preimage so that two builds with different
//! normalization behavior never report equal identities for the same file.
//! Reports compare the two identities to tell whether a PDF and a DOCX are
//! identical after normalization.

use sha2::{Digest, Sha256};

/// Compute the canonical identity hash for canonical text and version.
///
/// ```rust
/// use canonical::hash_canonical_bytes;
///
/// let v1 = hash_canonical_bytes(1, b"hello world");
/// let v2 = hash_canonical_bytes(2, b"hello world");
/// assert_ne!(v1, v2);
/// assert_eq!(v1, hash_canonical_bytes(1, b"hello world"));
/// ```
pub fn hash_canonical_bytes(canonical_version: u32, canonical_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_bytes);
    hex::encode(hasher.finalize())
}
