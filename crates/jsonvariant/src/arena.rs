//! The arena that owns every cell, string copy and child collection of a document.
//!
//! Nothing allocated here is ever freed individually: handles are plain `&'a`
//! references into the arena, and storage is reclaimed only when the arena is
//! dropped or [`Arena::reset`] is called (which requires exclusive access, so no
//! handle can survive it).

use std::fmt;

use bumpalo::Bump;
use tracing::debug;

use crate::array::{ArrayData, JsonArray};
use crate::data::TaggedValue;
use crate::object::{JsonObject, ObjectData};
use crate::variant::Variant;

/// Default initial arena capacity (1KB).
///
/// Documents on constrained targets are small; the arena grows in chunks when
/// this is exhausted.
const DEFAULT_ARENA_CAPACITY: usize = 1024;

/// Bump allocator owning the storage of one or more JSON documents.
pub struct Arena {
    bump: Bump,
}

impl Arena {
    /// Create an arena with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARENA_CAPACITY)
    }

    /// Create an arena with the specified initial capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Total bytes reserved by the arena so far.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Reclaim every allocation at once.
    ///
    /// Takes `&mut self`, so the borrow checker guarantees no [`Variant`],
    /// [`JsonArray`] or [`JsonObject`] into this arena is still alive.
    pub fn reset(&mut self) {
        debug!(
            allocated_bytes = self.bump.allocated_bytes(),
            "resetting arena"
        );
        self.bump.reset();
    }

    /// Allocate a fresh `Undefined` cell and return an accessor bound to it.
    pub fn variant(&self) -> Variant<'_> {
        Variant::new(self, self.alloc_cell())
    }

    /// Allocate an empty array not yet attached to any cell.
    pub fn array(&self) -> JsonArray<'_> {
        JsonArray::from_data(self.alloc_array())
    }

    /// Allocate an empty object not yet attached to any cell.
    pub fn object(&self) -> JsonObject<'_> {
        JsonObject::from_data(self.alloc_object())
    }

    pub(crate) fn alloc<T>(&self, value: T) -> &T {
        self.bump.alloc(value)
    }

    pub(crate) fn alloc_cell(&self) -> &TaggedValue<'_> {
        self.alloc(TaggedValue::undefined())
    }

    /// Duplicate `s` into arena-owned storage.
    pub(crate) fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    pub(crate) fn alloc_array(&self) -> &ArrayData<'_> {
        self.alloc(ArrayData::new(self))
    }

    pub(crate) fn alloc_object(&self) -> &ObjectData<'_> {
        self.alloc(ObjectData::new(self))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("allocated_bytes", &self.bump.allocated_bytes())
            .finish()
    }
}
