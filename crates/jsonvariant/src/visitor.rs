//! Double dispatch over the concrete kind of a value.
//!
//! Consumers implement [`Visitor`] instead of inspecting tags: the cell picks
//! the method matching its own tag, and an unbound [`Variant`](crate::Variant)
//! calls [`Visitor::visit_null`].

use crate::array::JsonArray;
use crate::object::JsonObject;

/// One method per JSON kind. Exactly one is called per visit.
///
/// Container methods receive the child handle, so a visitor recurses by
/// visiting the elements or members itself.
pub trait Visitor<'a> {
    type Output;

    /// Unbound accessor or `Undefined` cell.
    fn visit_null(self) -> Self::Output;

    fn visit_bool(self, value: bool) -> Self::Output;

    fn visit_i64(self, value: i64) -> Self::Output;

    fn visit_f64(self, value: f64) -> Self::Output;

    fn visit_str(self, value: &'a str) -> Self::Output;

    fn visit_array(self, array: JsonArray<'a>) -> Self::Output;

    fn visit_object(self, object: JsonObject<'a>) -> Self::Output;
}
