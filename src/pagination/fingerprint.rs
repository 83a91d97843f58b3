//! Query fingerprinting

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest
pub const FINGERPRINT_LEN: usize = 16;

/// Short digest binding a cursor to the exact query text that produced it
///
/// SHA-256 over the UTF-8 bytes, hex-encoded, truncated to
/// [`FINGERPRINT_LEN`] characters. Total over all strings.
pub fn fingerprint(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(FINGERPRINT_LEN);
    digest
}
