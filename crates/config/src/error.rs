//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//! - Carry enough context (paths, suffixes, key names) to diagnose a failure.
//!
//! Does NOT handle:
//! - Missing substitution variables. Those are logged and left literal
//!   (see `substitution`), never surfaced as errors.
//!
//! Invariants:
//! - Every file-related variant names the offending path.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::decoder::DecodeError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The referenced file has a suffix with no registered decoder.
    #[error("Cannot open a config file with suffix \"{suffix}\" ({path})")]
    UnsupportedFormat { suffix: String, path: PathBuf },

    /// The referenced file is missing or could not be opened.
    #[error("Config file \"{path}\" not found")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The referenced file was opened but its contents could not be decoded.
    #[error("Failed to decode config file at {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// A `*_FILE` key holds something other than a path string.
    #[error("Value of {key} must be a file path string")]
    InvalidFilePath { key: String },

    /// The resolved configuration could not be mapped onto the requested type.
    #[error("Failed to deserialize resolved configuration: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
