//! File-backed configuration with `${NAME}` placeholder substitution.
//!
//! A configuration mapping may hold a value directly (`INDEXERS`) or point at a
//! file holding it (`INDEXERS_FILE=/etc/app/indexers.yml`). [`resolve_file_keys`]
//! loads such files with a decoder chosen by suffix (`.json`, `.yml`, `.yaml`),
//! substitutes `${NAME}` placeholders against the mapping, and stores the result
//! under the target key. [`ConfigLoader`] assembles the mapping from `.env`, the
//! process environment and explicit values before resolving it.
//!
//! ```rust,ignore
//! let config = ConfigLoader::new()
//!     .load_dotenv()?
//!     .from_env_with_prefix("APP_")
//!     .build()?;
//! let indexers = &config["APP_INDEXERS"];
//! ```

pub mod constants;
pub mod decoder;
mod error;
mod loader;
pub mod resolver;
pub mod substitution;

use std::collections::BTreeMap;

pub use decoder::{DecodeError, Format};
pub use error::ConfigError;
pub use loader::{ConfigLoader, env_var_or_none};
pub use resolver::resolve_file_keys;
pub use substitution::{ProcessEnv, SubstitutionSource, substitute, substitute_env, substitute_str};

/// A configuration mapping: string keys to structured values.
///
/// Ordered, so resolution visits `*_FILE` keys in a deterministic order.
pub type ConfigMap = BTreeMap<String, serde_json::Value>;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{
        Arc, Mutex, OnceLock,
        atomic::{AtomicU64, Ordering},
    };

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    /// Minimal in-test tracing subscriber to capture WARN messages without adding dependencies.
    #[derive(Clone, Default)]
    struct CapturingSubscriber {
        events: Arc<Mutex<Vec<String>>>,
        next_id: Arc<AtomicU64>,
    }

    impl CapturingSubscriber {
        fn take_messages(&self) -> Vec<String> {
            std::mem::take(&mut *self.events.lock().expect("lock poisoned"))
        }
    }

    #[derive(Default)]
    struct MessageVisitor {
        message: Option<String>,
    }

    impl tracing::field::Visit for MessageVisitor {
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.message = Some(value.to_string());
            }
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = Some(format!("{value:?}"));
            }
        }
    }

    impl tracing::Subscriber for CapturingSubscriber {
        fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
            *metadata.level() <= tracing::Level::WARN
        }

        fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            tracing::span::Id::from_u64(id)
        }

        fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            if let Some(msg) = visitor.message {
                self.events.lock().expect("lock poisoned").push(msg);
            }
        }

        fn enter(&self, _span: &tracing::span::Id) {}

        fn exit(&self, _span: &tracing::span::Id) {}

        fn register_callsite(
            &self,
            _metadata: &'static tracing::Metadata<'static>,
        ) -> tracing::subscriber::Interest {
            tracing::subscriber::Interest::sometimes()
        }
    }

    /// Run `f` with a thread-local subscriber and return the WARN (and above) messages it saw.
    pub fn capture_warn_messages<F: FnOnce()>(f: F) -> Vec<String> {
        let _guard = global_test_lock().lock().unwrap();

        let subscriber = CapturingSubscriber {
            events: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        };

        let dispatch = tracing::Dispatch::new(subscriber.clone());
        tracing::dispatcher::with_default(&dispatch, f);
        subscriber.take_messages()
    }
}
