//! Cache Key Module
//!
//! Derives deterministic fingerprints from a namespace and a set of named
//! parameters.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{CacheError, Result};

/// Number of digest bytes kept in a fingerprint (128 bits).
const FINGERPRINT_BYTES: usize = 16;

// == Cache Params ==
/// Named parameters identifying a cached query.
///
/// Parameter names are kept sorted, so insertion order never affects the
/// derived key. Values inside lists keep their order: callers that want
/// order-insensitive lists must sort them before adding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheParams {
    values: BTreeMap<String, Value>,
}

impl CacheParams {
    // == Constructor ==
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    // == Builder ==
    /// Adds a parameter, consuming and returning the set.
    ///
    /// # Errors
    /// `CacheError::InvalidParams` if `value` cannot be represented as JSON
    /// (for example a map with non-string keys).
    pub fn with<V: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &V) -> Result<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    // == Insert ==
    /// Adds or replaces a parameter in place.
    pub fn insert<V: Serialize + ?Sized>(&mut self, name: impl Into<String>, value: &V) -> Result<()> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| {
            CacheError::InvalidParams(format!("parameter '{}' is not serializable: {}", name, e))
        })?;
        self.values.insert(name, value);
        Ok(())
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // == Canonical Form ==
    /// Renders the parameters as compact JSON with object keys sorted at
    /// every nesting level.
    pub fn canonical_json(&self) -> String {
        let mut out = String::new();
        out.push('{');
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_json_string(&mut out, name);
            out.push(':');
            write_canonical(&mut out, value);
        }
        out.push('}');
        out
    }
}

impl From<serde_json::Map<String, Value>> for CacheParams {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

// == Key Derivation ==
/// Computes the fingerprint for `(namespace, params)`.
///
/// The digest input is `namespace + ":" + canonical_json(params)`; the
/// result is the first 128 bits of its SHA-256 as lowercase hex.
pub fn cache_key(namespace: &str, params: &CacheParams) -> String {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(params.canonical_json().as_bytes());
    hex::encode(&hasher.finalize()[..FINGERPRINT_BYTES])
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(&String, &Value)> = map.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (name, field)) in fields.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(out, name);
                out.push(':');
                write_canonical(out, field);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        // Scalars have a single compact rendering.
        scalar => {
            let _ = write!(out, "{}", scalar);
        }
    }
}

fn write_json_string(out: &mut String, s: &str) {
    let _ = write!(out, "{}", Value::String(s.to_owned()));
}
