//! Refresh token digests.
//!
//! Only the SHA-256 digest of a refresh token is persisted. Presented tokens
//! are compared against the stored digest in constant time.

use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Compute the SHA-256 hex digest of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a presented refresh token against a stored digest.
///
/// Runs in time independent of where the digests first differ.
pub fn refresh_token_matches(token: &str, stored_hash: &str) -> bool {
    let presented = hash_refresh_token(token);
    presented.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}
