//! File-backed configuration values.
//!
//! Responsibilities:
//! - Find `{NAME}_FILE` keys in a configuration mapping.
//! - Load each referenced file with the decoder selected by its suffix.
//! - Substitute `${NAME}` placeholders in the decoded data against the mapping.
//! - Store the result under `{NAME}`.
//!
//! Does NOT handle:
//! - Building the mapping from `.env` or the process environment (see `loader`).
//!
//! Invariants:
//! - An existing `{NAME}` always wins over `{NAME}_FILE`; the file is never opened.
//! - `*_FILE` keys are collected once, so targets added during the pass are not
//!   themselves treated as indirections.
//! - Keys are processed in mapping order; a later file may reference a value
//!   resolved from an earlier one.
//! - The first failure aborts the pass. Keys resolved before it stay in place.

use std::path::PathBuf;

use serde_json::Value;

use crate::ConfigMap;
use crate::constants::FILE_KEY_SUFFIX;
use crate::decoder::load_file;
use crate::error::ConfigError;
use crate::substitution::substitute;

/// Resolve every `{NAME}_FILE` key of `config` into a `{NAME}` key.
///
/// # Errors
///
/// Returns an error, leaving keys resolved so far in place, if:
/// - A `*_FILE` value is not a string (`ConfigError::InvalidFilePath`)
/// - The file suffix has no decoder (`ConfigError::UnsupportedFormat`)
/// - The file cannot be opened (`ConfigError::FileNotFound`)
/// - The file cannot be decoded (`ConfigError::Decode`)
pub fn resolve_file_keys(config: &mut ConfigMap) -> Result<(), ConfigError> {
    let file_keys: Vec<String> = config
        .keys()
        .filter(|key| key.ends_with(FILE_KEY_SUFFIX))
        .cloned()
        .collect();

    for file_key in file_keys {
        let target = target_key(&file_key);
        if config.contains_key(target) {
            tracing::debug!(
                file_key = %file_key,
                target_key = %target,
                "Target key already set; ignoring file indirection"
            );
            continue;
        }

        let path = file_path(&file_key, &config[&file_key])?;
        let (format, decoded) = load_file(&path)?;
        let value = substitute(&decoded, &*config);

        tracing::info!(
            target_key = %target,
            path = %path.display(),
            format = %format,
            "Loaded config value from file"
        );
        config.insert(target.to_string(), value);
    }

    Ok(())
}

/// `INDEXERS_FILE` -> `INDEXERS`.
fn target_key(file_key: &str) -> &str {
    &file_key[..file_key.len() - FILE_KEY_SUFFIX.len()]
}

fn file_path(file_key: &str, value: &Value) -> Result<PathBuf, ConfigError> {
    match value {
        Value::String(path) => Ok(PathBuf::from(path)),
        _ => Err(ConfigError::InvalidFilePath {
            key: file_key.to_string(),
        }),
    }
}
