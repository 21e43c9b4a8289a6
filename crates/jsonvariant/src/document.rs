//! Building documents from JSON text or from an existing `serde_json::Value`.
//!
//! Text is parsed with `serde_json`, then copied cell by cell into the arena:
//!
//! - `null` → `Undefined`
//! - numbers that fit `i64` → `Integer`, every other number → `Float`
//! - strings and object keys → owned copies
//!
//! # Example
//! ```
//! use jsonvariant::Arena;
//!
//! let arena = Arena::new();
//! let root = arena.parse(r#"{"sensor":"gps","data":[48.75,2.30]}"#).unwrap();
//! let object = root.get::<jsonvariant::JsonObject>();
//! assert_eq!(object.get("sensor").get::<&str>(), "gps");
//! assert_eq!(object.get("data").get::<jsonvariant::JsonArray>().len(), 2);
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use crate::arena::Arena;
use crate::error::{DocumentError, Result};
use crate::variant::Variant;

/// Default maximum depth of nested arrays/objects accepted by
/// [`Arena::parse`].
pub const DEFAULT_NESTING_LIMIT: usize = 10;

/// Options for [`Arena::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested arrays/objects. `0` accepts only scalars.
    pub nesting_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn nesting_limit(mut self, limit: usize) -> Self {
        self.nesting_limit = limit;
        self
    }
}

impl Arena {
    /// Parse `json` into a new root cell using the default [`ParseOptions`].
    pub fn parse(&self, json: &str) -> Result<Variant<'_>> {
        self.parse_with(json, ParseOptions::default())
    }

    /// Parse `json` into a new root cell.
    ///
    /// Returns an error if the input is not valid JSON or nests deeper than
    /// `options.nesting_limit`.
    pub fn parse_with(&self, json: &str, options: ParseOptions) -> Result<Variant<'_>> {
        let value: Value = serde_json::from_str(json)?;
        let limit = options.nesting_limit;
        if exceeds_depth(&value, limit) {
            warn!(limit, "rejecting document nested deeper than the limit");
            return Err(DocumentError::NestingLimitExceeded { limit });
        }
        let root = self.import(&value);
        debug!(
            input_len = json.len(),
            allocated_bytes = self.allocated_bytes(),
            "parsed document"
        );
        Ok(root)
    }

    /// Copy `value` into a new root cell.
    pub fn import(&self, value: &Value) -> Variant<'_> {
        let root = self.variant();
        write_value(root, value);
        root
    }
}

/// Whether `value` contains more than `remaining` levels of arrays/objects.
fn exceeds_depth(value: &Value, remaining: usize) -> bool {
    match value {
        Value::Array(items) => {
            remaining == 0 || items.iter().any(|c| exceeds_depth(c, remaining - 1))
        }
        Value::Object(map) => {
            remaining == 0 || map.values().any(|c| exceeds_depth(c, remaining - 1))
        }
        _ => false,
    }
}

/// Dispatch a JSON value to the matching cell write.
fn write_value(target: Variant<'_>, value: &Value) {
    match value {
        Value::Null => target.set(()),
        Value::Bool(b) => target.set(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => target.set(i),
            None => target.set(n.as_f64()),
        },
        Value::String(s) => target.set(s),
        Value::Array(items) => {
            let array = target.to_array();
            for item in items {
                write_value(array.add(()), item);
            }
        }
        Value::Object(map) => {
            let object = target.to_object();
            for (key, item) in map {
                write_value(object.insert(key, ()), item);
            }
        }
    }
}
