//! Configuration loader for `.env` files, environment variables and explicit values.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that assembles a configuration mapping.
//! - Run file indirection resolution on the assembled mapping.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Loading or decoding `*_FILE` targets directly (see `resolver.rs`).
//! - Placeholder substitution (see `substitution`).
//!
//! Invariants / Assumptions:
//! - Explicit values take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
