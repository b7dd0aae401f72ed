//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

/// 現行のディレクトリURL環境変数
pub const DIRECTORY_URL_ENV: &str = "GET_BACKEND_SERVICES_URL";

/// 旧ディレクトリURL環境変数（非推奨）
pub const DEPRECATED_DIRECTORY_URL_ENV: &str = "BACKEND_SERVICES_URL";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning. Empty values are treated as unset.
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Some(val) = non_empty_var(new_name) {
        return Some(val);
    }
    if let Some(val) = non_empty_var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|val| !val.trim().is_empty())
}

/// ディレクトリURLを解決する
///
/// CLI引数（または`GET_BACKEND_SERVICES_URL`）を優先し、
/// なければ旧名の`BACKEND_SERVICES_URL`を参照する。
pub fn resolve_directory_url(explicit: Option<String>) -> Option<String> {
    explicit
        .filter(|url| !url.trim().is_empty())
        .or_else(|| get_env_with_fallback(DIRECTORY_URL_ENV, DEPRECATED_DIRECTORY_URL_ENV))
}
