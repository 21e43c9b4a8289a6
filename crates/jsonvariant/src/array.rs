//! Ordered child sequence of an `Array` cell.

use std::fmt;

use crate::arena::Arena;
use crate::convert::IntoVariant;
use crate::list::{Node, NodeIter, NodeList};
use crate::object::JsonObject;
use crate::variant::Variant;

/// Arena-resident backing store of an array.
pub struct ArrayData<'a> {
    arena: &'a Arena,
    items: NodeList<'a, ()>,
}

impl<'a> ArrayData<'a> {
    pub(crate) fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            items: NodeList::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl fmt::Debug for ArrayData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayData")
            .field("len", &self.items.len())
            .finish()
    }
}

/// Non-owning handle to an array.
///
/// An invalid handle (from a failed conversion or [`JsonArray::default`]) is
/// always safe to use: it reads as empty and ignores writes.
#[derive(Clone, Copy, Default)]
pub struct JsonArray<'a> {
    data: Option<&'a ArrayData<'a>>,
}

impl<'a> JsonArray<'a> {
    /// A handle referring to no array.
    #[must_use]
    pub const fn invalid() -> Self {
        Self { data: None }
    }

    pub(crate) fn from_data(data: &'a ArrayData<'a>) -> Self {
        Self { data: Some(data) }
    }

    pub(crate) fn data(&self) -> Option<&'a ArrayData<'a>> {
        self.data
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.map_or(0, ArrayData::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Accessor for the element at `index`; unbound when out of range.
    pub fn get(&self, index: usize) -> Variant<'a> {
        self.iter().nth(index).unwrap_or_default()
    }

    /// Append `value` and return an accessor to the new element.
    pub fn add<T: IntoVariant<'a>>(&self, value: T) -> Variant<'a> {
        let Some(data) = self.data else {
            return Variant::unbound();
        };
        let node = data.arena.alloc(Node::new(()));
        data.items.push_back(node);
        let element = Variant::new(data.arena, &node.value);
        element.set(value);
        element
    }

    /// Append a new empty array and return it.
    pub fn add_array(&self) -> JsonArray<'a> {
        self.add(()).to_array()
    }

    /// Append a new empty object and return it.
    pub fn add_object(&self) -> JsonObject<'a> {
        self.add(()).to_object()
    }

    /// Unlink the element at `index`. Out-of-range indices are ignored.
    pub fn remove(&self, index: usize) {
        if let Some(data) = self.data {
            data.items.remove_first(|i, _| i == index);
        }
    }

    pub fn iter(&self) -> ArrayIter<'a> {
        ArrayIter {
            inner: self.data.map(|d| (d.arena, d.items.iter())),
        }
    }
}

impl fmt::Debug for JsonArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.debug_list().entries(self.iter()).finish()
        } else {
            f.write_str("JsonArray(invalid)")
        }
    }
}

impl<'a> IntoIterator for JsonArray<'a> {
    type Item = Variant<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`JsonArray`].
pub struct ArrayIter<'a> {
    inner: Option<(&'a Arena, NodeIter<'a, ()>)>,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = Variant<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (arena, nodes) = self.inner.as_mut()?;
        let node = nodes.next()?;
        Some(Variant::new(*arena, &node.value))
    }
}
