//! Lookup sources for placeholder substitution.
//!
//! Responsibilities:
//! - Define the `SubstitutionSource` lookup contract.
//! - Implement it for the configuration mapping and plain string maps.
//! - Provide `ProcessEnv`, a snapshot of the process environment.
//!
//! Invariants:
//! - Lookups never mutate the source.
//! - Non-string values are rendered in their JSON form (`42`, `true`, `null`).

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;

/// A read-only mapping consulted when resolving `${NAME}` placeholders.
pub trait SubstitutionSource {
    /// Returns the string form of `name`, or `None` if it is not defined.
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// String form of a configuration value used as substitution text.
pub(crate) fn value_as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

impl SubstitutionSource for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(value_as_text)
    }
}

impl SubstitutionSource for serde_json::Map<String, Value> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(value_as_text)
    }
}

impl SubstitutionSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl<H: BuildHasher> SubstitutionSource for HashMap<String, String, H> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl<S: SubstitutionSource + ?Sized> SubstitutionSource for &S {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(name)
    }
}

/// Snapshot of the process environment.
///
/// Captured once at the call boundary so recursive substitution never reads
/// global state. Variables whose name or value is not valid UTF-8 are skipped.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, String>,
}

impl ProcessEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Whether no variables were captured.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over the captured variables in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl SubstitutionSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.vars.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    fn test_config_map_lookup_renders_non_strings_as_json() {
        let mut config = BTreeMap::new();
        config.insert("NAME".to_string(), json!("plain"));
        config.insert("PORT".to_string(), json!(8080));
        config.insert("DEBUG".to_string(), json!(true));
        config.insert("NOTHING".to_string(), Value::Null);
        config.insert("LIST".to_string(), json!(["a", 1]));

        assert_eq!(config.lookup("NAME").as_deref(), Some("plain"));
        assert_eq!(config.lookup("PORT").as_deref(), Some("8080"));
        assert_eq!(config.lookup("DEBUG").as_deref(), Some("true"));
        assert_eq!(config.lookup("NOTHING").as_deref(), Some("null"));
        assert_eq!(config.lookup("LIST").as_deref(), Some(r#"["a",1]"#));
        assert!(config.lookup("MISSING").is_none());
    }

    #[test]
    fn test_string_maps_lookup() {
        let hashed: HashMap<String, String> = [("A".to_string(), "1".to_string())].into();
        let ordered: BTreeMap<String, String> = [("B".to_string(), "2".to_string())].into();

        assert_eq!(hashed.lookup("A").as_deref(), Some("1"));
        assert_eq!(ordered.lookup("B").as_deref(), Some("2"));
        assert!(hashed.lookup("B").is_none());
    }

    #[test]
    #[serial]
    fn test_process_env_capture_sees_current_variables() {
        temp_env::with_vars([("_ENVFILE_TEST_CAPTURE", Some("captured"))], || {
            let env = ProcessEnv::capture();
            assert_eq!(env.lookup("_ENVFILE_TEST_CAPTURE").as_deref(), Some("captured"));
            assert!(!env.is_empty());
        });
    }

    #[test]
    #[serial]
    fn test_process_env_is_a_snapshot() {
        let env = temp_env::with_vars([("_ENVFILE_TEST_SNAPSHOT", Some("before"))], || {
            ProcessEnv::capture()
        });
        // The variable is gone from the process, but the snapshot keeps it.
        assert!(std::env::var("_ENVFILE_TEST_SNAPSHOT").is_err());
        assert_eq!(env.lookup("_ENVFILE_TEST_SNAPSHOT").as_deref(), Some("before"));
    }
}
