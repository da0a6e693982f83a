//! Environment variable helpers for configuration loading.
//!
//! Responsibilities:
//! - Read single environment variables with empty/whitespace filtering.
//! - Snapshot the process environment as configuration entries.
//!
//! Does NOT handle:
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//! - Building the final mapping (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use serde_json::Value;

use crate::ConfigMap;
use crate::substitution::ProcessEnv;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(non_blank)
}

/// Usable process environment variables as string configuration values,
/// optionally restricted to names starting with `prefix`.
pub(crate) fn env_entries(prefix: Option<&str>) -> ConfigMap {
    ProcessEnv::capture()
        .iter()
        .filter(|(key, _)| prefix.is_none_or(|p| key.starts_with(p)))
        .filter_map(|(key, value)| {
            non_blank(value.to_string()).map(|v| (key.to_string(), Value::String(v)))
        })
        .collect()
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        // No trimming needed, return original to avoid allocation
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}
