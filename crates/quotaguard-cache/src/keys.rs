//! Cache key normalization.

/// Normalize a user email into the snapshot cache key.
///
/// Sign-in flows hand over emails with inconsistent casing and stray
/// whitespace; every backend sees the same key for the same person.
pub fn snapshot_key(email: &str) -> String {
    email.trim().to_lowercase()
}
