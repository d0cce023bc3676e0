#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tolerant nested JSON lookup helpers.
//!
//! The external APIs this pipeline talks to return inconsistently shaped
//! objects: keys come and go per record, sub-structures (like a state
//! legislator's `offices` array) may be absent entirely. These helpers walk
//! a key/index path through a [`serde_json::Value`] and return `None` on
//! any missing step instead of propagating a lookup error, so callers can
//! map absent data to absent-value markers field by field.

use serde_json::Value;

/// Walks `value` through `path` and returns the value at the end.
///
/// Each path step is an object key; when the current value is an array the
/// step is parsed as a zero-based index (e.g. `["offices", "0", "phone"]`).
/// Returns `None` if any step is missing, out of bounds, or applied to a
/// scalar.
#[must_use]
pub fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    let mut current = value;
    for step in path {
        current = match current {
            Value::Object(map) => map.get(*step)?,
            Value::Array(items) => items.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Looks up a string at `path`, returning an owned copy.
///
/// Returns `None` if the path is missing or the value is not a string.
/// JSON `null` also resolves to `None`.
#[must_use]
pub fn lookup_str(value: &Value, path: &[&str]) -> Option<String> {
    lookup(value, path)?.as_str().map(str::to_owned)
}

/// Looks up a float at `path`.
///
/// Accepts both JSON numbers and numeric strings, since geocoding
/// providers are not consistent about which they emit.
#[must_use]
pub fn lookup_f64(value: &Value, path: &[&str]) -> Option<f64> {
    match lookup(value, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Looks up a non-negative integer at `path`.
///
/// Accepts JSON numbers and numeric strings (the campaign-finance API
/// returns totals as strings, e.g. `"500"`).
#[must_use]
pub fn lookup_u64(value: &Value, path: &[&str]) -> Option<u64> {
    match lookup(value, path)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
