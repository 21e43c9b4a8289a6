//! The uniform accessor over a single cell.
//!
//! A [`Variant`] is either *unbound* (refers to nothing) or bound to one
//! [`TaggedValue`] in an [`Arena`]. It is `Copy`, never owns the cell, and every
//! operation is total:
//!
//! - [`Variant::set`] on an unbound accessor is ignored.
//! - [`Variant::get`] on an unbound accessor returns the zero value of the
//!   requested type, and mismatched kinds are coerced by fixed rules.
//! - [`Variant::is`] on an unbound accessor is always `false`.
//!
//! The requested type selects the conversion at compile time through the
//! [`IntoVariant`], [`FromVariant`] and [`VariantType`] traits.

use std::fmt;

use crate::arena::Arena;
use crate::array::JsonArray;
use crate::convert::{FromVariant, IntoVariant, VariantType};
use crate::data::{Tag, TaggedValue};
use crate::object::JsonObject;
use crate::serialize;
use crate::visitor::Visitor;

/// Non-owning, possibly unbound handle to one JSON value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Variant<'a> {
    binding: Option<Binding<'a>>,
}

#[derive(Debug, Clone, Copy)]
struct Binding<'a> {
    arena: &'a Arena,
    cell: &'a TaggedValue<'a>,
}

impl<'a> Variant<'a> {
    /// An accessor referring to no cell.
    #[must_use]
    pub const fn unbound() -> Self {
        Self { binding: None }
    }

    /// Bind to `cell`. `arena` receives copies of owned strings written
    /// through this accessor.
    #[must_use]
    pub fn new(arena: &'a Arena, cell: &'a TaggedValue<'a>) -> Self {
        Self {
            binding: Some(Binding { arena, cell }),
        }
    }

    /// The referenced cell, if bound.
    #[must_use]
    pub fn cell(&self) -> Option<&'a TaggedValue<'a>> {
        self.binding.map(|b| b.cell)
    }

    /// Tag of the referenced cell, `None` when unbound.
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        self.cell().map(TaggedValue::tag)
    }

    /// Write `value` into the referenced cell. Does nothing when unbound.
    ///
    /// `&'a str` is stored without copying; `String`, `&String` and `Box<str>`
    /// are duplicated into the arena. Arrays, objects and other variants are
    /// stored by reference, so the children become shared.
    pub fn set<T: IntoVariant<'a>>(&self, value: T) {
        if let Some(Binding { arena, cell }) = self.binding {
            value.write_to(cell, arena);
        }
    }

    /// Read the value as `T`, coerced by the rules of `T`'s [`FromVariant`]
    /// implementation. Never fails.
    ///
    /// Requesting a `String` from a cell that does not hold a string renders
    /// the whole subtree as JSON, which costs time proportional to its size.
    /// A subtree too deep to render yields an empty string.
    #[must_use]
    pub fn get<T: FromVariant<'a>>(&self) -> T {
        T::from_variant(*self)
    }

    /// Whether the referenced cell holds a value of `T`'s kind.
    #[must_use]
    pub fn is<T: VariantType>(&self) -> bool {
        self.tag().is_some_and(T::matches)
    }

    /// `true` when unbound or bound to an `Undefined` cell.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.tag().is_none_or(|tag| tag == Tag::Undefined)
    }

    /// Dispatch to the visitor method matching the stored kind, or to
    /// [`Visitor::visit_null`] when unbound.
    pub fn visit<V: Visitor<'a>>(&self, visitor: V) -> V::Output {
        match self.cell() {
            Some(cell) => cell.visit(visitor),
            None => visitor.visit_null(),
        }
    }

    /// Replace the value with a new empty array and return it.
    pub fn to_array(&self) -> JsonArray<'a> {
        match self.binding {
            Some(Binding { arena, cell }) => {
                let array = arena.alloc_array();
                cell.set_array(array);
                JsonArray::from_data(array)
            }
            None => JsonArray::invalid(),
        }
    }

    /// Replace the value with a new empty object and return it.
    pub fn to_object(&self) -> JsonObject<'a> {
        match self.binding {
            Some(Binding { arena, cell }) => {
                let object = arena.alloc_object();
                cell.set_object(object);
                JsonObject::from_data(object)
            }
            None => JsonObject::invalid(),
        }
    }
}

impl fmt::Display for Variant<'_> {
    /// Compact JSON text of the value. Fails for trees nested deeper than
    /// [`MAX_RENDER_DEPTH`](crate::serialize::MAX_RENDER_DEPTH).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serialize::to_json_string(*self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
