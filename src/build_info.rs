//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Crate version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version banner, e.g. `0.1.0 (abc1234 2024-01-01)`.
pub fn version_string() -> String {
    format!("{} ({} {})", PKG_VERSION, BUILD_COMMIT, BUILD_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_contains_parts() {
        let version = version_string();
        assert!(version.starts_with(PKG_VERSION));
        assert!(version.contains(BUILD_COMMIT));
        assert!(version.contains(BUILD_DATE));
    }
}
