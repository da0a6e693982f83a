//! Centralized constants for the envfile-config crate.
//!
//! This module contains the markers and variable names shared between the
//! substitution engine, the file resolver and the loader.

// =============================================================================
// File Indirection
// =============================================================================

/// Suffix marking a key whose value is the path of a file to load.
///
/// `INDEXERS_FILE` populates `INDEXERS`.
pub const FILE_KEY_SUFFIX: &str = "_FILE";

// =============================================================================
// Placeholder Syntax
// =============================================================================

/// Opening marker of a `${NAME}` placeholder.
pub const PLACEHOLDER_OPEN: &str = "${";

/// Closing marker of a `${NAME}` placeholder.
pub const PLACEHOLDER_CLOSE: char = '}';

// =============================================================================
// Environment
// =============================================================================

/// Setting this variable to `true` or `1` skips `.env` loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
