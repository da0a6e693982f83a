//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods for assembling a configuration mapping.
//! - Test `.env` loading and the `DOTENV_DISABLED` gate.
//! - Test environment variable layering and precedence.
//!
//! Does NOT handle:
//! - Decoder and substitution details (tested next to `decoder` and `substitution`).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
