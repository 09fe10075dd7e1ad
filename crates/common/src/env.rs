//! Environment helpers
//!
//! Loads `.env` once so `RUST_LOG`, `CONFIG_PATH` and `ADMIN_API_BASE_URL`
//! are visible to the rest of the process.

use tracing::debug;

/// Load variables from a `.env` file in the working directory (or a parent).
/// Returns `true` when a file was found. A missing file is not an error.
pub fn load_dotenv() -> bool {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            true
        }
        Err(_) => false,
    }
}

/// Read a variable, treating empty or whitespace-only values as unset.
pub fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::non_empty_var;

    #[test]
    fn blank_values_are_treated_as_unset() {
        std::env::set_var("COMMON_ENV_TEST_BLANK", "   ");
        assert_eq!(non_empty_var("COMMON_ENV_TEST_BLANK"), None);
        std::env::set_var("COMMON_ENV_TEST_SET", " value ");
        assert_eq!(non_empty_var("COMMON_ENV_TEST_SET").as_deref(), Some("value"));
        assert_eq!(non_empty_var("COMMON_ENV_TEST_MISSING_KEY"), None);
    }
}
