//! Built-in vocabulary for the Schematik JSON Schema builder.
//!
//! The core crate knows nothing about concrete keywords. This crate
//! registers them as one [`Extension`] ([`BUILTINS`]):
//!
//! - **Types** — `null`, `boolean`, `integer`, `number`, `string`, `array`,
//!   `object` (both surfaces).
//! - **Composition** — `one_of`, `any_of`, `all_of` (both surfaces).
//! - **Strings** — `matches`, `format`.
//! - **Arrays** — `items`, `unique`.
//! - **Objects** — `property`, `additional`.
//! - **Ranges** — `min` / `max` followed by `count` or `value`.
//! - **Annotations** — `title`, `description`, `default`, `enum`,
//!   `nullable`.
//!
//! Methods are reachable by name through [`Schematik::call`] and
//! [`Schematik::call_static`], or through the typed [`SchematikExt`] trait
//! and the constructor functions.
//!
//! # Example
//!
//! ```
//! use schematik_addons::{SchematikExt, array, install, integer};
//! use schematik_core::Schematik;
//! use serde_json::json;
//!
//! // Typed
//! let ids = array()?.items(&integer()?.min()?.value(1)?)?.unique()?;
//!
//! // Dynamic
//! install();
//! let same = Schematik::call_static("array", &[])?
//!     .call("items", &[json!({ "type": "integer", "minimum": 1 })])?
//!     .call("unique", &[])?;
//!
//! assert_eq!(ids.done(), same.done());
//! # Ok::<(), schematik_core::SchematikError>(())
//! ```

mod annotate;
mod args;
mod array;
mod bounds;
mod composite;
mod ext;
mod object;
mod string;
mod types;

use schematik_core::{Extension, Schematik, Surfaces};

pub use bounds::RANGE_FLAG;
pub use ext::{
    SchematikExt, all_of, any_of, array, boolean, integer, null, number, object, one_of, string,
};

fn register(surfaces: &mut Surfaces) {
    types::register(surfaces);
    composite::register(surfaces);
    string::register(surfaces);
    array::register(surfaces);
    object::register(surfaces);
    bounds::register(surfaces);
    annotate::register(surfaces);
}

/// All built-in methods.
pub static BUILTINS: Extension = Extension::new("schematik-builtins", register);

/// Registers [`BUILTINS`]. Safe to call any number of times.
pub fn install() {
    Schematik::use_extension(&BUILTINS);
}
