//! Art identifiers
//!
//! Ids are either derived from the art text or supplied by the user on import.
//! Both paths go through this module so they agree on format.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the content hash
pub const ID_LEN: usize = 8;

/// Derives the id of a piece of art: the first 8 hex characters of its SHA-256 hash
pub fn content_id(art: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(art.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..ID_LEN].to_string()
}

/// Returns true if `id` is made only of ASCII letters, digits and underscores
/// and contains at least one letter or digit
pub fn validate_id(id: &str) -> bool {
    id.chars().any(|c| c.is_ascii_alphanumeric())
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
