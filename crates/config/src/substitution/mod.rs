//! Recursive `${NAME}` placeholder substitution.
//!
//! Responsibilities:
//! - Replace `${NAME}` tokens in string leaves of a value tree.
//! - Recurse through arrays and objects, preserving shape, keys and order.
//! - Default to the process environment when no source is given.
//!
//! Does NOT handle:
//! - Expressions, defaults (`${A:-b}`) or nested placeholders.
//! - Substituting object keys.
//!
//! Invariants:
//! - A missing name is never an error: the token is kept verbatim, a warning is
//!   logged once per distinct name per string, and the remaining tokens are
//!   still resolved.
//! - Substituted text is not re-scanned.
//! - Malformed tokens are copied through unchanged.

mod source;

use std::borrow::Cow;

use serde_json::Value;

use crate::constants::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

pub use source::{ProcessEnv, SubstitutionSource};

/// Substitute placeholders throughout `value` using `source`.
///
/// Strings are scanned for `${NAME}` tokens, arrays and objects are rebuilt
/// with every element substituted, and any other value is returned as is.
pub fn substitute<S>(value: &Value, source: &S) -> Value
where
    S: SubstitutionSource + ?Sized,
{
    match value {
        Value::String(s) => Value::String(substitute_str(s, source).into_owned()),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute(v, source)).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), substitute(v, source)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Substitute placeholders throughout `value` using the process environment.
///
/// The environment is captured once per call.
pub fn substitute_env(value: &Value) -> Value {
    substitute(value, &ProcessEnv::capture())
}

/// Substitute the `${NAME}` tokens of a single string.
///
/// Returns the input unchanged (borrowed) when it contains no `${`.
pub fn substitute_str<'a, S>(input: &'a str, source: &S) -> Cow<'a, str>
where
    S: SubstitutionSource + ?Sized,
{
    if !input.contains(PLACEHOLDER_OPEN) {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut missing: Vec<&str> = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + PLACEHOLDER_OPEN.len()..];

        let Some(name) = placeholder_name(after_open) else {
            // Malformed token: keep the marker and carry on scanning after it.
            output.push_str(PLACEHOLDER_OPEN);
            rest = after_open;
            continue;
        };

        let token_end = start + PLACEHOLDER_OPEN.len() + name.len() + PLACEHOLDER_CLOSE.len_utf8();
        match source.lookup(name) {
            Some(replacement) => output.push_str(&replacement),
            None => {
                if !missing.contains(&name) {
                    tracing::warn!(variable = name, "Environment variable ${{{name}}} not found");
                    missing.push(name);
                }
                output.push_str(&rest[start..token_end]);
            }
        }
        rest = &rest[token_end..];
    }

    output.push_str(rest);
    Cow::Owned(output)
}

/// Extract `NAME` from the text following `${`, if it forms `NAME}`.
fn placeholder_name(after_open: &str) -> Option<&str> {
    let end = after_open.find(PLACEHOLDER_CLOSE)?;
    let name = &after_open[..end];
    is_identifier(name).then_some(name)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
