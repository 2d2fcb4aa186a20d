//! Shared helpers for league unit and integration tests.

pub mod logging;

use ulid::Ulid;

/// Unique name of the form `{prefix}-{ulid}`, for fixture rows that must not collide.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}
