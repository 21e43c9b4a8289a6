//! The storage cell: one JSON value of exactly one kind, mutated in place.

use std::cell::Cell;
use std::fmt;

use crate::array::{ArrayData, JsonArray};
use crate::number::{self, Float, Integer};
use crate::object::{JsonObject, ObjectData};
use crate::visitor::Visitor;

/// Kind discriminator of a [`TaggedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Undefined,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl Tag {
    /// Lowercase kind name, for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tag::Undefined => "undefined",
            Tag::Boolean => "boolean",
            Tag::Integer => "integer",
            Tag::Float => "float",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Object => "object",
        }
    }
}

/// Tag and payload of a cell.
///
/// The two string variants share [`Tag::String`]; they record whether the text
/// is borrowed from the caller (zero-copy) or was duplicated into the arena.
/// Array and object payloads are references into the arena, so copying a
/// `Content` aliases the same children.
#[derive(Clone, Copy)]
pub enum Content<'a> {
    Undefined,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    LinkedString(&'a str),
    OwnedString(&'a str),
    Array(&'a ArrayData<'a>),
    Object(&'a ObjectData<'a>),
}

impl Content<'_> {
    #[must_use]
    pub fn tag(&self) -> Tag {
        match self {
            Content::Undefined => Tag::Undefined,
            Content::Boolean(_) => Tag::Boolean,
            Content::Integer(_) => Tag::Integer,
            Content::Float(_) => Tag::Float,
            Content::LinkedString(_) | Content::OwnedString(_) => Tag::String,
            Content::Array(_) => Tag::Array,
            Content::Object(_) => Tag::Object,
        }
    }
}

impl fmt::Debug for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Undefined => f.write_str("Undefined"),
            Content::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Content::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Content::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Content::LinkedString(s) => f.debug_tuple("LinkedString").field(s).finish(),
            Content::OwnedString(s) => f.debug_tuple("OwnedString").field(s).finish(),
            Content::Array(a) => f.debug_tuple("Array").field(&a.len()).finish(),
            Content::Object(o) => f.debug_tuple("Object").field(&o.len()).finish(),
        }
    }
}

/// A single arena-allocated storage cell.
///
/// Cells are shared by reference between any number of accessors and are
/// written through [`Cell`], so every mutation is visible to every alias.
pub struct TaggedValue<'a> {
    content: Cell<Content<'a>>,
}

impl<'a> TaggedValue<'a> {
    pub(crate) fn undefined() -> Self {
        Self {
            content: Cell::new(Content::Undefined),
        }
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.content.get().tag()
    }

    #[inline]
    pub fn content(&self) -> Content<'a> {
        self.content.get()
    }

    /// Overwrite tag and payload verbatim.
    #[inline]
    pub fn set_content(&self, content: Content<'a>) {
        self.content.set(content);
    }

    pub fn set_null(&self) {
        self.set_content(Content::Undefined);
    }

    pub fn set_bool(&self, value: bool) {
        self.set_content(Content::Boolean(value));
    }

    pub fn set_integer<T: Integer>(&self, value: T) {
        self.set_content(Content::Integer(value.to_i64()));
    }

    pub fn set_float<T: Float>(&self, value: T) {
        self.set_content(Content::Float(value.to_f64()));
    }

    /// Store a caller-owned string without copying it.
    pub fn set_linked_string(&self, value: &'a str) {
        self.set_content(Content::LinkedString(value));
    }

    /// Store a string that has already been duplicated into the arena.
    pub fn set_owned_string(&self, value: &'a str) {
        self.set_content(Content::OwnedString(value));
    }

    pub fn set_array(&self, array: &'a ArrayData<'a>) {
        self.set_content(Content::Array(array));
    }

    pub fn set_object(&self, object: &'a ObjectData<'a>) {
        self.set_content(Content::Object(object));
    }

    /// Read as an integer; zero when the cell holds no number or numeric text.
    pub fn as_integer<T: Integer>(&self) -> T {
        match self.content() {
            Content::Boolean(b) => T::from_i64(i64::from(b)),
            Content::Integer(n) => T::from_i64(n),
            Content::Float(n) => T::from_f64(n),
            Content::LinkedString(s) | Content::OwnedString(s) => {
                T::from_i64(number::parse_integer(s))
            }
            Content::Undefined | Content::Array(_) | Content::Object(_) => T::from_i64(0),
        }
    }

    /// Read as a float; zero when the cell holds no number or numeric text.
    pub fn as_float<T: Float>(&self) -> T {
        match self.content() {
            Content::Boolean(b) => T::from_i64(i64::from(b)),
            Content::Integer(n) => T::from_i64(n),
            Content::Float(n) => T::from_f64(n),
            Content::LinkedString(s) | Content::OwnedString(s) => {
                T::from_f64(number::parse_float(s))
            }
            Content::Undefined | Content::Array(_) | Content::Object(_) => T::from_f64(0.0),
        }
    }

    /// Truthiness: booleans as stored, numbers when nonzero, text when its
    /// leading integer is nonzero.
    pub fn as_bool(&self) -> bool {
        match self.content() {
            Content::Boolean(b) => b,
            Content::Integer(n) => n != 0,
            Content::Float(n) => n != 0.0,
            Content::LinkedString(s) | Content::OwnedString(s) => number::parse_integer(s) != 0,
            Content::Undefined | Content::Array(_) | Content::Object(_) => false,
        }
    }

    /// The text of a string cell; `None` for every other kind.
    pub fn as_str(&self) -> Option<&'a str> {
        match self.content() {
            Content::LinkedString(s) | Content::OwnedString(s) => Some(s),
            _ => None,
        }
    }

    /// Invoke exactly one visitor method, selected by this cell's tag.
    pub fn visit<V: Visitor<'a>>(&self, visitor: V) -> V::Output {
        match self.content() {
            Content::Undefined => visitor.visit_null(),
            Content::Boolean(b) => visitor.visit_bool(b),
            Content::Integer(n) => visitor.visit_i64(n),
            Content::Float(n) => visitor.visit_f64(n),
            Content::LinkedString(s) | Content::OwnedString(s) => visitor.visit_str(s),
            Content::Array(a) => visitor.visit_array(JsonArray::from_data(a)),
            Content::Object(o) => visitor.visit_object(JsonObject::from_data(o)),
        }
    }
}

impl fmt::Debug for TaggedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TaggedValue").field(&self.content()).finish()
    }
}
