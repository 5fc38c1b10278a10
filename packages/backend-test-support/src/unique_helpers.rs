//! Test helpers for generating unique test data
//!
//! Integration tests share one database per test binary, so names and user
//! ids are made unique per call.

use ulid::Ulid;
use uuid::Uuid;

/// Generate a unique string in the format `{prefix}-{ulid}`
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a fresh user id, used as the `sub` of test tokens
pub fn unique_user_id() -> Uuid {
    Uuid::new_v4()
}
