//! Test helpers for generating unique test data
//!
//! ULID-suffixed values keep tests isolated when they share a persistent
//! database (e.g. the Postgres test profile).

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique participant username with the given prefix.
///
/// The result stays well under the 64 character username limit as long as
/// the prefix is short.
pub fn unique_username(prefix: &str) -> String {
    let short: String = prefix.chars().take(16).collect();
    unique_str(&short)
}
