//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` layering the process environment
//!   and explicit values into one configuration mapping.
//! - Resolve `*_FILE` keys once the mapping is assembled.
//! - Optionally deserialize the result into a typed configuration struct.
//!
//! Does NOT handle:
//! - Decoding files or substituting placeholders (see `resolver.rs`).
//!
//! Invariants:
//! - The environment is captured at `build()`, not when `from_env()` is called.
//! - Explicit values override environment entries with the same key.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::env::{env_entries, env_var_or_none};
use crate::ConfigMap;
use crate::constants::{DOTENV_DISABLED_VAR, FILE_KEY_SUFFIX};
use crate::error::ConfigError;
use crate::resolver::resolve_file_keys;

/// Configuration loader that builds a mapping from environment variables and values.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    include_env: bool,
    env_prefix: Option<String>,
    values: ConfigMap,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            env_var_or_none(DOTENV_DISABLED_VAR).as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("Skipping .env loading ({DOTENV_DISABLED_VAR} is set)");
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Include the process environment as the base layer.
    ///
    /// Empty or whitespace-only variables are skipped and values are trimmed.
    ///
    /// Every `*_FILE` variable of the host becomes an indirection, including
    /// unrelated ones such as `SSL_CERT_FILE=/etc/ssl/cert.pem`, and `build()`
    /// fails on the first one without a decoder. Prefer
    /// [`ConfigLoader::from_env_with_prefix`] outside tightly controlled
    /// environments.
    pub fn from_env(mut self) -> Self {
        self.include_env = true;
        self
    }

    /// Include only environment variables whose name starts with `prefix`.
    ///
    /// Keys keep their full name; the prefix is not stripped.
    pub fn from_env_with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.include_env = true;
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Set a single configuration value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set several configuration values.
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Point `{name}_FILE` at `path`, so `{name}` is loaded from that file.
    pub fn with_file(self, name: &str, path: impl AsRef<Path>) -> Self {
        let key = format!("{name}{FILE_KEY_SUFFIX}");
        let path = path.as_ref().to_string_lossy().into_owned();
        self.with_value(key, path)
    }

    /// Assemble the mapping and resolve its `*_FILE` keys.
    ///
    /// # Errors
    ///
    /// Propagates the first error from file indirection resolution.
    pub fn build(self) -> Result<ConfigMap, ConfigError> {
        let mut config = if self.include_env {
            env_entries(self.env_prefix.as_deref())
        } else {
            ConfigMap::new()
        };
        config.extend(self.values);

        resolve_file_keys(&mut config)?;
        Ok(config)
    }

    /// Build the mapping and deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ConfigLoader::build`], or `ConfigError::Deserialize`
    /// if the resolved mapping does not fit `T`.
    pub fn build_into<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let config = self.build()?;
        serde_json::from_value(Value::Object(config.into_iter().collect()))
            .map_err(ConfigError::Deserialize)
    }
}
