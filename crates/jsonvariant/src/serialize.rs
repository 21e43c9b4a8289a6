//! JSON rendering of a value tree through [`serde::Serialize`].
//!
//! [`Variant`], [`JsonArray`] and [`JsonObject`] implement `Serialize` by
//! [`Visitor`] dispatch, and [`to_json_string`] hands them to `serde_json`:
//!
//! - `Undefined` cells and unbound accessors serialize as unit (`null`)
//! - whole floats that fit an integer exactly serialize as integers
//!   (`42.0` → `42`, `-0` → `0`)
//! - `NaN` and infinities become `null` in `serde_json`
//! - containers nested deeper than [`MAX_RENDER_DEPTH`] fail with a
//!   serializer error, which also stops reference cycles

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::array::JsonArray;
use crate::error::{DocumentError, Result};
use crate::object::JsonObject;
use crate::variant::Variant;
use crate::visitor::Visitor;

/// Deepest container nesting that can be serialized.
pub const MAX_RENDER_DEPTH: usize = 128;

/// Largest magnitude below which every whole `f64` is an exact integer (2^53).
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Append the compact JSON text of `variant` to `out`.
pub fn write_json(variant: Variant<'_>, out: &mut String) -> Result<()> {
    out.push_str(&to_json_string(variant)?);
    Ok(())
}

/// Render `variant` as compact JSON text.
///
/// Fails only when containers nest deeper than [`MAX_RENDER_DEPTH`].
pub fn to_json_string(variant: Variant<'_>) -> Result<String> {
    serde_json::to_string(&variant).map_err(DocumentError::Serialize)
}

fn as_exact_integer(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT).then_some(value as i64)
}

/// Depth of the children of a container entered at `depth`.
fn enter<E: serde::ser::Error>(depth: usize) -> std::result::Result<usize, E> {
    if depth >= MAX_RENDER_DEPTH {
        return Err(E::custom(format_args!(
            "nesting depth exceeds {MAX_RENDER_DEPTH}"
        )));
    }
    Ok(depth + 1)
}

struct SerdeVisitor<S> {
    serializer: S,
    depth: usize,
}

impl<'a, S: Serializer> Visitor<'a> for SerdeVisitor<S> {
    type Output = std::result::Result<S::Ok, S::Error>;

    fn visit_null(self) -> Self::Output {
        self.serializer.serialize_unit()
    }

    fn visit_bool(self, value: bool) -> Self::Output {
        self.serializer.serialize_bool(value)
    }

    fn visit_i64(self, value: i64) -> Self::Output {
        self.serializer.serialize_i64(value)
    }

    fn visit_f64(self, value: f64) -> Self::Output {
        match as_exact_integer(value) {
            Some(n) => self.serializer.serialize_i64(n),
            None => self.serializer.serialize_f64(value),
        }
    }

    fn visit_str(self, value: &'a str) -> Self::Output {
        self.serializer.serialize_str(value)
    }

    fn visit_array(self, array: JsonArray<'a>) -> Self::Output {
        let depth = enter(self.depth)?;
        let mut seq = self.serializer.serialize_seq(Some(array.len()))?;
        for variant in array {
            seq.serialize_element(&Nested { variant, depth })?;
        }
        seq.end()
    }

    fn visit_object(self, object: JsonObject<'a>) -> Self::Output {
        let depth = enter(self.depth)?;
        let mut map = self.serializer.serialize_map(Some(object.len()))?;
        for (key, variant) in object {
            map.serialize_entry(key, &Nested { variant, depth })?;
        }
        map.end()
    }
}

/// A child value together with the depth it sits at.
struct Nested<'a> {
    variant: Variant<'a>,
    depth: usize,
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.variant.visit(SerdeVisitor {
            serializer,
            depth: self.depth,
        })
    }
}

impl Serialize for Variant<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.visit(SerdeVisitor {
            serializer,
            depth: 0,
        })
    }
}

impl Serialize for JsonArray<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_valid() {
            SerdeVisitor {
                serializer,
                depth: 0,
            }
            .visit_array(*self)
        } else {
            serializer.serialize_unit()
        }
    }
}

impl Serialize for JsonObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_valid() {
            SerdeVisitor {
                serializer,
                depth: 0,
            }
            .visit_object(*self)
        } else {
            serializer.serialize_unit()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Error;

    #[test]
    fn whole_floats_become_integers() {
        assert_eq!(as_exact_integer(42.0), Some(42));
        assert_eq!(as_exact_integer(-0.0), Some(0));
        assert_eq!(as_exact_integer(2.75), None);
        assert_eq!(as_exact_integer(1e21), None);
        assert_eq!(as_exact_integer(f64::NAN), None);
        assert_eq!(as_exact_integer(f64::INFINITY), None);
    }

    #[test]
    fn depth_guard() {
        assert_eq!(enter::<Error>(0).unwrap(), 1);
        assert_eq!(enter::<Error>(MAX_RENDER_DEPTH - 1).unwrap(), MAX_RENDER_DEPTH);
        assert!(enter::<Error>(MAX_RENDER_DEPTH).is_err());
    }

    #[test]
    fn unbound_renders_null() {
        assert_eq!(to_json_string(Variant::unbound()).unwrap(), "null");
    }
}
