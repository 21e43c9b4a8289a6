//! Insertion-ordered child mapping of an `Object` cell. Keys are unique.

use std::fmt;

use crate::arena::Arena;
use crate::array::JsonArray;
use crate::convert::IntoVariant;
use crate::list::{Node, NodeIter, NodeList};
use crate::variant::Variant;

/// Arena-resident backing store of an object.
pub struct ObjectData<'a> {
    arena: &'a Arena,
    members: NodeList<'a, &'a str>,
}

impl<'a> ObjectData<'a> {
    pub(crate) fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            members: NodeList::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    fn find(&self, key: &str) -> Option<&'a Node<'a, &'a str>> {
        self.members.iter().find(|node| node.key == key)
    }
}

impl fmt::Debug for ObjectData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectData")
            .field("len", &self.members.len())
            .finish()
    }
}

/// Key types accepted by [`JsonObject::insert`].
///
/// A `&'a str` key is linked (stored without copying, so it must outlive the
/// arena borrow); owned keys are duplicated into the arena.
pub trait IntoKey<'a> {
    fn as_key(&self) -> &str;
    fn into_key(self, arena: &'a Arena) -> &'a str;
}

impl<'a> IntoKey<'a> for &'a str {
    fn as_key(&self) -> &str {
        self
    }

    fn into_key(self, _arena: &'a Arena) -> &'a str {
        self
    }
}

impl<'a> IntoKey<'a> for String {
    fn as_key(&self) -> &str {
        self
    }

    fn into_key(self, arena: &'a Arena) -> &'a str {
        arena.alloc_str(&self)
    }
}

impl<'a> IntoKey<'a> for &String {
    fn as_key(&self) -> &str {
        self
    }

    fn into_key(self, arena: &'a Arena) -> &'a str {
        arena.alloc_str(self)
    }
}

/// Non-owning handle to an object.
///
/// An invalid handle reads as empty and ignores writes.
#[derive(Clone, Copy, Default)]
pub struct JsonObject<'a> {
    data: Option<&'a ObjectData<'a>>,
}

impl<'a> JsonObject<'a> {
    /// A handle referring to no object.
    #[must_use]
    pub const fn invalid() -> Self {
        Self { data: None }
    }

    pub(crate) fn from_data(data: &'a ObjectData<'a>) -> Self {
        Self { data: Some(data) }
    }

    pub(crate) fn data(&self) -> Option<&'a ObjectData<'a>> {
        self.data
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.map_or(0, ObjectData::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Accessor for the member named `key`; unbound when absent.
    pub fn get(&self, key: &str) -> Variant<'a> {
        self.data
            .and_then(|data| {
                data.find(key)
                    .map(|node| Variant::new(data.arena, &node.value))
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.is_some_and(|data| data.find(key).is_some())
    }

    /// Set member `key` to `value`, replacing the value of an existing member
    /// in place (its position is kept). Returns an accessor to the member.
    pub fn insert<K, T>(&self, key: K, value: T) -> Variant<'a>
    where
        K: IntoKey<'a>,
        T: IntoVariant<'a>,
    {
        let Some(data) = self.data else {
            return Variant::unbound();
        };
        let node = match data.find(key.as_key()) {
            Some(node) => node,
            None => {
                let node = data.arena.alloc(Node::new(key.into_key(data.arena)));
                data.members.push_back(node);
                node
            }
        };
        let member = Variant::new(data.arena, &node.value);
        member.set(value);
        member
    }

    /// Set member `key` to a new empty array and return it.
    pub fn insert_array<K: IntoKey<'a>>(&self, key: K) -> JsonArray<'a> {
        self.insert(key, ()).to_array()
    }

    /// Set member `key` to a new empty object and return it.
    pub fn insert_object<K: IntoKey<'a>>(&self, key: K) -> JsonObject<'a> {
        self.insert(key, ()).to_object()
    }

    /// Unlink member `key`. Returns whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.data
            .is_some_and(|data| data.members.remove_first(|_, node| node.key == key))
    }

    pub fn iter(&self) -> ObjectIter<'a> {
        ObjectIter {
            inner: self.data.map(|d| (d.arena, d.members.iter())),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.iter().map(|(key, _)| key)
    }
}

impl fmt::Debug for JsonObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.debug_map().entries(self.iter()).finish()
        } else {
            f.write_str("JsonObject(invalid)")
        }
    }
}

impl<'a> IntoIterator for JsonObject<'a> {
    type Item = (&'a str, Variant<'a>);
    type IntoIter = ObjectIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`JsonObject`], in insertion order.
pub struct ObjectIter<'a> {
    inner: Option<(&'a Arena, NodeIter<'a, &'a str>)>,
}

impl<'a> Iterator for ObjectIter<'a> {
    type Item = (&'a str, Variant<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (arena, nodes) = self.inner.as_mut()?;
        let node = nodes.next()?;
        Some((node.key, Variant::new(*arena, &node.value)))
    }
}
