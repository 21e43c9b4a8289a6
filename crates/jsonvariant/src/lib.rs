//! # jsonvariant
//!
//! Arena-backed JSON values read and written through one uniform, non-owning
//! accessor: [`Variant`].
//!
//! Every cell, string copy and child collection lives in an [`Arena`]; accessors
//! and collection handles are `Copy` references into it. Conversions are chosen
//! by the requested Rust type at compile time and never fail: an unbound
//! accessor or a kind mismatch yields a well-defined default.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonvariant::{Arena, JsonArray};
//!
//! let arena = Arena::new();
//! let root = arena.variant();
//!
//! root.set(3.9);
//! assert_eq!(root.get::<i32>(), 3); // truncated toward zero
//! assert!(root.is::<f64>());
//!
//! let readings = root.to_array();
//! readings.add(42);
//! readings.add("ok");
//! assert!(root.is::<JsonArray>());
//! assert_eq!(root.get::<String>(), r#"[42,"ok"]"#);
//!
//! // Absent values degrade to defaults instead of failing.
//! let missing = readings.get(10);
//! assert!(missing.is_null());
//! assert_eq!(missing.get::<u8>(), 0);
//! ```
//!
//! ## Modules
//!
//! - [`arena`]: the allocator owning all storage
//! - [`data`]: the storage cell ([`TaggedValue`]) and its [`Tag`]
//! - [`variant`]: the [`Variant`] accessor
//! - [`convert`]: per-type `set`/`get`/`is` rules
//! - [`visitor`]: kind dispatch for consumers
//! - [`array`], [`object`]: child collection handles
//! - [`serialize`]: JSON rendering and `serde::Serialize`
//! - [`document`]: building documents from JSON text
//! - [`error`]: error types for document building

pub mod arena;
pub mod array;
pub mod convert;
pub mod data;
pub mod document;
pub mod error;
mod list;
pub mod number;
pub mod object;
pub mod serialize;
pub mod variant;
pub mod visitor;

pub use arena::Arena;
pub use array::{ArrayIter, JsonArray};
pub use convert::{FromVariant, IntoVariant, VariantType};
pub use data::{Content, Tag, TaggedValue};
pub use document::{ParseOptions, DEFAULT_NESTING_LIMIT};
pub use error::DocumentError;
pub use number::{Float, Integer};
pub use object::{IntoKey, JsonObject, ObjectIter};
pub use serialize::{to_json_string, write_json, MAX_RENDER_DEPTH};
pub use variant::Variant;
pub use visitor::Visitor;
