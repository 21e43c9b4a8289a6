//! Compile-time selection of `set`/`get`/`is` behavior by the caller's type.
//!
//! Each supported type implements the trait for its category once:
//!
//! | Category | `set` writes      | `get` from a mismatched kind         | `is` matches      |
//! |----------|-------------------|--------------------------------------|-------------------|
//! | integers | `Integer` (`i64`) | float truncated, text parsed, 0      | `Integer`         |
//! | floats   | `Float` (`f64`)   | integer widened, text parsed, 0.0    | `Integer`/`Float` |
//! | `bool`   | `Boolean`         | nonzero number or numeric text       | `Boolean`         |
//! | `&str`   | linked `String`   | `""` (`None` for `Option<&str>`)     | `String`          |
//! | `String` | owned `String`    | JSON text of the value               | `String`          |
//! | arrays   | `Array` (shared)  | invalid handle                       | `Array`           |
//! | objects  | `Object` (shared) | invalid handle                       | `Object`          |

use serde_json::Value;
use tracing::{trace, warn};

use crate::arena::Arena;
use crate::array::JsonArray;
use crate::data::{Content, Tag, TaggedValue};
use crate::object::JsonObject;
use crate::serialize;
use crate::variant::Variant;

/// Types that can be written into a cell with [`Variant::set`].
pub trait IntoVariant<'a> {
    /// Write `self` into `cell`, copying owned text into `arena`.
    fn write_to(self, cell: &'a TaggedValue<'a>, arena: &'a Arena);
}

/// Types that can be read from a cell with [`Variant::get`].
pub trait FromVariant<'a>: Sized {
    /// Convert, returning the type's zero value when `variant` is unbound.
    fn from_variant(variant: Variant<'a>) -> Self;
}

/// Types whose kind can be tested with [`Variant::is`].
pub trait VariantType {
    fn matches(tag: Tag) -> bool;
}

macro_rules! impl_integer_conversions {
    ($($t:ty),*) => {
        $(
            impl<'a> IntoVariant<'a> for $t {
                fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
                    cell.set_integer(self);
                }
            }

            impl<'a> FromVariant<'a> for $t {
                fn from_variant(variant: Variant<'a>) -> Self {
                    variant.cell().map_or(0, TaggedValue::as_integer::<$t>)
                }
            }

            impl VariantType for $t {
                fn matches(tag: Tag) -> bool {
                    tag == Tag::Integer
                }
            }
        )*
    };
}

macro_rules! impl_float_conversions {
    ($($t:ty),*) => {
        $(
            impl<'a> IntoVariant<'a> for $t {
                fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
                    cell.set_float(self);
                }
            }

            impl<'a> FromVariant<'a> for $t {
                fn from_variant(variant: Variant<'a>) -> Self {
                    variant.cell().map_or(0.0, TaggedValue::as_float::<$t>)
                }
            }

            impl VariantType for $t {
                fn matches(tag: Tag) -> bool {
                    matches!(tag, Tag::Integer | Tag::Float)
                }
            }
        )*
    };
}

impl_integer_conversions!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_conversions!(f32, f64);

impl<'a> IntoVariant<'a> for bool {
    fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
        cell.set_bool(self);
    }
}

impl<'a> FromVariant<'a> for bool {
    fn from_variant(variant: Variant<'a>) -> Self {
        variant.cell().is_some_and(TaggedValue::as_bool)
    }
}

impl VariantType for bool {
    fn matches(tag: Tag) -> bool {
        tag == Tag::Boolean
    }
}

impl<'a> IntoVariant<'a> for &'a str {
    fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
        cell.set_linked_string(self);
    }
}

impl<'a> IntoVariant<'a> for String {
    fn write_to(self, cell: &'a TaggedValue<'a>, arena: &'a Arena) {
        cell.set_owned_string(arena.alloc_str(&self));
    }
}

impl<'a> IntoVariant<'a> for &String {
    fn write_to(self, cell: &'a TaggedValue<'a>, arena: &'a Arena) {
        cell.set_owned_string(arena.alloc_str(self));
    }
}

impl<'a> IntoVariant<'a> for Box<str> {
    fn write_to(self, cell: &'a TaggedValue<'a>, arena: &'a Arena) {
        cell.set_owned_string(arena.alloc_str(&self));
    }
}

impl<'a> FromVariant<'a> for Option<&'a str> {
    fn from_variant(variant: Variant<'a>) -> Self {
        variant.cell().and_then(TaggedValue::as_str)
    }
}

impl<'a> FromVariant<'a> for &'a str {
    fn from_variant(variant: Variant<'a>) -> Self {
        variant.get::<Option<&'a str>>().unwrap_or_default()
    }
}

impl<'a> FromVariant<'a> for String {
    /// Copies string cells; renders every other kind as JSON text, or returns
    /// an empty string when the tree nests too deeply to render.
    fn from_variant(variant: Variant<'a>) -> Self {
        if let Some(s) = variant.get::<Option<&str>>() {
            return s.to_owned();
        }
        trace!(
            tag = variant.tag().map_or("unbound", Tag::name),
            "materializing value as JSON text"
        );
        serialize::to_json_string(variant).unwrap_or_else(|err| {
            warn!(%err, "value cannot be rendered as JSON text");
            String::new()
        })
    }
}

impl VariantType for &str {
    fn matches(tag: Tag) -> bool {
        tag == Tag::String
    }
}

impl VariantType for Option<&str> {
    fn matches(tag: Tag) -> bool {
        tag == Tag::String
    }
}

impl VariantType for String {
    fn matches(tag: Tag) -> bool {
        tag == Tag::String
    }
}

impl<'a> IntoVariant<'a> for JsonArray<'a> {
    fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
        match self.data() {
            Some(data) => cell.set_array(data),
            None => cell.set_null(),
        }
    }
}

impl<'a> FromVariant<'a> for JsonArray<'a> {
    fn from_variant(variant: Variant<'a>) -> Self {
        match variant.cell().map(TaggedValue::content) {
            Some(Content::Array(data)) => JsonArray::from_data(data),
            _ => JsonArray::invalid(),
        }
    }
}

impl VariantType for JsonArray<'_> {
    fn matches(tag: Tag) -> bool {
        tag == Tag::Array
    }
}

impl<'a> IntoVariant<'a> for JsonObject<'a> {
    fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
        match self.data() {
            Some(data) => cell.set_object(data),
            None => cell.set_null(),
        }
    }
}

impl<'a> FromVariant<'a> for JsonObject<'a> {
    fn from_variant(variant: Variant<'a>) -> Self {
        match variant.cell().map(TaggedValue::content) {
            Some(Content::Object(data)) => JsonObject::from_data(data),
            _ => JsonObject::invalid(),
        }
    }
}

impl VariantType for JsonObject<'_> {
    fn matches(tag: Tag) -> bool {
        tag == Tag::Object
    }
}

impl<'a> IntoVariant<'a> for Variant<'a> {
    /// Copies the other cell's tag and payload; children are aliased, not cloned.
    fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
        cell.set_content(self.cell().map_or(Content::Undefined, TaggedValue::content));
    }
}

impl<'a> FromVariant<'a> for Variant<'a> {
    fn from_variant(variant: Variant<'a>) -> Self {
        variant
    }
}

impl<'a, T: IntoVariant<'a>> IntoVariant<'a> for Option<T> {
    fn write_to(self, cell: &'a TaggedValue<'a>, arena: &'a Arena) {
        match self {
            Some(value) => value.write_to(cell, arena),
            None => cell.set_null(),
        }
    }
}

impl<'a> IntoVariant<'a> for () {
    fn write_to(self, cell: &'a TaggedValue<'a>, _arena: &'a Arena) {
        cell.set_null();
    }
}

impl<'a> FromVariant<'a> for Value {
    /// Deep copy of the subtree; `Undefined` and non-finite floats become
    /// `null`, and so does a tree too deep to serialize.
    fn from_variant(variant: Variant<'a>) -> Self {
        serde_json::to_value(variant).unwrap_or_else(|err| {
            warn!(%err, "value cannot be copied into serde_json::Value");
            Value::Null
        })
    }
}
