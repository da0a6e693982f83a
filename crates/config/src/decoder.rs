//! Suffix-selected decoders for configuration files.
//!
//! Responsibilities:
//! - Map a file suffix to a structured-data format via a static table.
//! - Decode JSON and YAML into a common `serde_json::Value` tree.
//! - Open, read and decode a file in one scoped step (`load_file`).
//!
//! Does NOT handle:
//! - Placeholder substitution (see `substitution`).
//! - Deciding which files to load (see `resolver`).
//!
//! Invariants:
//! - Suffix lookup is case-sensitive and includes the leading dot.
//! - YAML tags are kept as data and never executed.
//! - YAML merge keys (`<<: *anchor`) are applied before conversion.
//! - Non-finite YAML floats (`.inf`, `.nan`) are rejected, never turned into `null`.
//! - Equivalent JSON and YAML documents decode to identical values.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::error::ConfigError;

/// Structured-data formats a configuration file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

/// Registered decoders, keyed by file suffix.
pub const DECODERS: &[(&str, Format)] = &[
    (".json", Format::Json),
    (".yml", Format::Yaml),
    (".yaml", Format::Yaml),
];

/// Errors produced by the underlying format decoders.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// The YAML document has no JSON-compatible representation
    /// (for example a mapping keyed by a sequence).
    #[error("YAML document cannot be represented as configuration data: {0}")]
    Incompatible(#[source] serde_json::Error),

    /// A float with no JSON representation (`.inf`, `-.inf`, `.nan`).
    #[error("YAML number {0} is not finite")]
    NonFinite(String),
}

impl Format {
    /// Look up the decoder registered for `suffix` (e.g. `".yml"`).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        DECODERS
            .iter()
            .find(|(registered, _)| *registered == suffix)
            .map(|(_, format)| *format)
    }

    /// Decode a full document from `reader`.
    pub fn decode<R: Read>(self, reader: R) -> Result<Value, DecodeError> {
        match self {
            Format::Json => serde_json::from_reader(reader).map_err(DecodeError::Json),
            Format::Yaml => {
                let mut document: serde_yaml::Value =
                    serde_yaml::from_reader(reader).map_err(DecodeError::Yaml)?;
                document.apply_merge().map_err(DecodeError::Yaml)?;
                reject_non_finite(&document)?;
                serde_json::to_value(document).map_err(DecodeError::Incompatible)
            }
        }
    }
}

fn reject_non_finite(value: &serde_yaml::Value) -> Result<(), DecodeError> {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Number(n) if n.is_nan() || n.is_infinite() => {
            Err(DecodeError::NonFinite(n.to_string()))
        }
        Yaml::Sequence(items) => items.iter().try_for_each(reject_non_finite),
        Yaml::Mapping(map) => map.iter().try_for_each(|(key, value)| {
            reject_non_finite(key)?;
            reject_non_finite(value)
        }),
        Yaml::Tagged(tagged) => reject_non_finite(&tagged.value),
        _ => Ok(()),
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

/// The suffix of the final path component, including the dot.
///
/// Returns an empty string when the file name has no extension.
pub fn file_suffix(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    }
}

/// Select a decoder for `path`, then open, read and decode it.
///
/// The file handle is dropped before returning on every path.
pub fn load_file(path: &Path) -> Result<(Format, Value), ConfigError> {
    let suffix = file_suffix(path);
    let format = Format::from_suffix(&suffix).ok_or_else(|| ConfigError::UnsupportedFormat {
        suffix,
        path: path.to_path_buf(),
    })?;

    let not_found = |source: io::Error| ConfigError::FileNotFound {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(not_found)?;
    // Directories open fine on Unix and only fail once read.
    if file.metadata().map_err(not_found)?.is_dir() {
        return Err(not_found(io::Error::from(io::ErrorKind::IsADirectory)));
    }

    let value = format
        .decode(BufReader::new(file))
        .map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((format, value))
}
