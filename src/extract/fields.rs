use std::path::Path;

use serde_json::{Map, Value};

use super::json_kind;

pub(super) const UNKNOWN: &str = "unknown";

/// 2^64, the first float past `u64::MAX`.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Path lookups over the root object of one measurement, with defaults.
pub(super) struct Fields<'doc> {
    path: &'doc Path,
    root: &'doc Map<String, Value>,
}

impl<'doc> Fields<'doc> {
    pub(super) const fn new(path: &'doc Path, root: &'doc Map<String, Value>) -> Self {
        Self { path, root }
    }

    /// Any JSON number; missing or non-numeric values give 0.
    pub(super) fn gauge(&self, keys: &[&str]) -> f64 {
        match self.lookup(keys) {
            None | Some(Value::Null) => 0.0,
            Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            Some(other) => self.wrong_type(keys, other, "a number", 0.0),
        }
    }

    /// Whole non-negative numbers that fit a `u64`, so `6250000.0` counts as
    /// `6250000`; fractions and negatives give 0.
    pub(super) fn counter(&self, keys: &[&str]) -> u64 {
        match self.lookup(keys) {
            None | Some(Value::Null) => 0,
            Some(value) => match whole_count(value) {
                Some(count) => count,
                None => self.wrong_type(keys, value, "a non-negative integer", 0),
            },
        }
    }

    pub(super) fn text(&self, keys: &[&str]) -> String {
        self.optional_text(keys)
            .unwrap_or_else(|| UNKNOWN.to_owned())
    }

    pub(super) fn optional_text(&self, keys: &[&str]) -> Option<String> {
        match self.lookup(keys) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => self.wrong_type(keys, other, "a string", None),
        }
    }

    /// Walks nested objects; a missing or non-object group ends the walk.
    fn lookup(&self, keys: &[&str]) -> Option<&'doc Value> {
        let (last, groups) = keys.split_last()?;
        let mut current = self.root;
        for group in groups {
            current = current.get(*group)?.as_object()?;
        }
        current.get(*last)
    }

    fn wrong_type<T>(&self, keys: &[&str], value: &Value, expected: &str, fallback: T) -> T {
        tracing::warn!(
            "{}: field '{}' is {} (expected {}); using the default",
            self.path.display(),
            keys.join("."),
            json_kind(value),
            expected
        );
        fallback
    }
}

fn whole_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    let float = value.as_f64()?;
    if !float.is_finite() || float < 0.0 || float >= U64_BOUND || float.fract() != 0.0 {
        return None;
    }
    Some(float as u64)
}
