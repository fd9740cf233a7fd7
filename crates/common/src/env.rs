//! Environment/runtime helpers

use std::path::PathBuf;

/// Load `.env` from the working directory or its parents, if present.
///
/// Must run before logging and config initialization so that `RUST_LOG`,
/// `DATABASE_URL` and `CONFIG_PATH` from the file take effect.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Read an environment variable, treating blank values as unset.
pub fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::non_empty_var;

    #[test]
    fn blank_vars_are_unset() {
        std::env::set_var("CONTACTS_COMMON_BLANK_VAR", "   ");
        assert_eq!(non_empty_var("CONTACTS_COMMON_BLANK_VAR"), None);
        std::env::set_var("CONTACTS_COMMON_BLANK_VAR", "x");
        assert_eq!(non_empty_var("CONTACTS_COMMON_BLANK_VAR").as_deref(), Some("x"));
        std::env::remove_var("CONTACTS_COMMON_BLANK_VAR");
    }
}
