//! Core of an immutable, fluent JSON Schema builder.
//!
//! This crate defines the builder state and the machinery addons use to
//! extend it:
//!
//! - [`Store`] — an `Arc`-shared JSON object with pure `merge`/`without`.
//! - [`Schematik`] — a builder holding a flags store and a schema store.
//!   Every setter returns a new builder; clones share state until they write.
//! - [`wrap`] / [`wrap_method`] — turn addon functions into chainable
//!   methods.
//! - [`Schematik::use_extension`] / [`Schematik::typedef`] — the process-wide
//!   extension table with its instance and static [`Surfaces`].
//! - [`Schematik::done`] — materializes the schema, applying nullable
//!   wrapping.
//! - [`Config`] — default flags and whitelisted types.
//!
//! Concrete vocabulary (`string`, `object`, `unique`, ...) lives in addon
//! crates that register through [`Extension`]s.
//!
//! # Example
//!
//! ```
//! use schematik_core::*;
//! use serde_json::json;
//!
//! let mut base = Schematik::new();
//! base.assign_type("integer", false).unwrap();
//!
//! let bounded = base.merge_schema(
//!     json!({ "minimum": 0 }).as_object().unwrap().clone(),
//!     MergeMode::Shallow,
//! );
//!
//! assert_eq!(bounded.done(), json!({ "type": "integer", "minimum": 0 }));
//! assert_eq!(base.done(), json!({ "type": "integer" }));
//! ```

mod builder;
mod config;
mod error;
mod finalize;
mod registry;
mod store;
mod wrap;

pub use builder::{Receiver, SCHEMATIK_TAG, SchemaAccess, SchemaArg, Schematik, is_schematik};
pub use config::{Config, DEFAULT_TYPES, NULLABLE_FLAG};
pub use error::{Result, SchematikError};
pub use registry::{
    DEFAULT_TYPEDEF_BASE, Expression, Extension, Method, RESERVED_NAMES, Surface, Surfaces,
    TypedefEntry,
};
pub use store::{MergeMode, Store};
pub use wrap::{wrap, wrap_method};
