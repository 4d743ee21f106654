//! Typed entry points over the dynamic method table.
//!
//! Every function here installs the built-ins if needed and dispatches by
//! name, so typed and dynamic callers share one implementation. Nested
//! builders are finalized with [`Schematik::done`] before they are embedded.

use serde_json::{Value, json};

use schematik_core::{Result, Schematik};

use crate::install;

fn call(this: &Schematik, method: &str, args: &[Value]) -> Result<Schematik> {
    install();
    this.call(method, args)
}

fn call_static(method: &str, args: &[Value]) -> Result<Schematik> {
    install();
    Schematik::call_static(method, args)
}

fn documents(schemas: &[Schematik]) -> Vec<Value> {
    schemas.iter().map(Schematik::done).collect()
}

/// A builder with `type: "null"`.
pub fn null() -> Result<Schematik> {
    call_static("null", &[])
}

/// A builder with `type: "boolean"`.
pub fn boolean() -> Result<Schematik> {
    call_static("boolean", &[])
}

/// A builder with `type: "integer"`.
pub fn integer() -> Result<Schematik> {
    call_static("integer", &[])
}

/// A builder with `type: "number"`.
pub fn number() -> Result<Schematik> {
    call_static("number", &[])
}

/// A builder with `type: "string"`.
pub fn string() -> Result<Schematik> {
    call_static("string", &[])
}

/// A builder with `type: "array"`.
pub fn array() -> Result<Schematik> {
    call_static("array", &[])
}

/// A builder with `type: "object"` and `additionalProperties: true`.
pub fn object() -> Result<Schematik> {
    call_static("object", &[])
}

pub fn one_of(schemas: &[Schematik]) -> Result<Schematik> {
    call_static("one_of", &documents(schemas))
}

pub fn any_of(schemas: &[Schematik]) -> Result<Schematik> {
    call_static("any_of", &documents(schemas))
}

pub fn all_of(schemas: &[Schematik]) -> Result<Schematik> {
    call_static("all_of", &documents(schemas))
}

/// Chainable built-in vocabulary for [`Schematik`].
///
/// # Examples
///
/// ```
/// use schematik_addons::{SchematikExt, object, string};
/// use serde_json::json;
///
/// let person = object()?
///     .required("name", &string()?.max()?.count(64)?)?
///     .additional(false)?;
///
/// assert_eq!(
///     person.done(),
///     json!({
///         "type": "object",
///         "additionalProperties": false,
///         "properties": { "name": { "type": "string", "maxLength": 64 } },
///         "required": ["name"]
///     })
/// );
/// # Ok::<(), schematik_core::SchematikError>(())
/// ```
pub trait SchematikExt {
    /// Sets `pattern`; the pattern must be a valid regular expression.
    fn matches(&self, pattern: &str) -> Result<Schematik>;
    fn format(&self, name: &str) -> Result<Schematik>;
    fn items(&self, schema: &Schematik) -> Result<Schematik>;
    fn unique(&self) -> Result<Schematik>;
    /// Adds an optional property.
    fn property(&self, name: &str, schema: &Schematik) -> Result<Schematik>;
    /// Adds a property and lists it under `required`.
    fn required(&self, name: &str, schema: &Schematik) -> Result<Schematik>;
    fn additional(&self, allowed: bool) -> Result<Schematik>;
    fn min(&self) -> Result<Schematik>;
    fn max(&self) -> Result<Schematik>;
    /// Length, item or property count bound, depending on the type.
    fn count(&self, amount: u64) -> Result<Schematik>;
    /// `minimum` / `maximum` bound for numeric types.
    fn value(&self, bound: impl Into<Value>) -> Result<Schematik>;
    fn title(&self, text: &str) -> Result<Schematik>;
    fn description(&self, text: &str) -> Result<Schematik>;
    fn default_value(&self, value: impl Into<Value>) -> Result<Schematik>;
    fn enum_values(&self, values: &[Value]) -> Result<Schematik>;
    /// Marks the schema as accepting `null` as well.
    fn nullable(&self) -> Result<Schematik>;
    fn one_of(&self, schemas: &[Schematik]) -> Result<Schematik>;
    fn any_of(&self, schemas: &[Schematik]) -> Result<Schematik>;
    fn all_of(&self, schemas: &[Schematik]) -> Result<Schematik>;
}

impl SchematikExt for Schematik {
    fn matches(&self, pattern: &str) -> Result<Schematik> {
        call(self, "matches", &[json!(pattern)])
    }

    fn format(&self, name: &str) -> Result<Schematik> {
        call(self, "format", &[json!(name)])
    }

    fn items(&self, schema: &Schematik) -> Result<Schematik> {
        call(self, "items", &[schema.done()])
    }

    fn unique(&self) -> Result<Schematik> {
        call(self, "unique", &[])
    }

    fn property(&self, name: &str, schema: &Schematik) -> Result<Schematik> {
        call(self, "property", &[json!(name), schema.done()])
    }

    fn required(&self, name: &str, schema: &Schematik) -> Result<Schematik> {
        call(self, "property", &[json!(name), schema.done(), json!(true)])
    }

    fn additional(&self, allowed: bool) -> Result<Schematik> {
        call(self, "additional", &[json!(allowed)])
    }

    fn min(&self) -> Result<Schematik> {
        call(self, "min", &[])
    }

    fn max(&self) -> Result<Schematik> {
        call(self, "max", &[])
    }

    fn count(&self, amount: u64) -> Result<Schematik> {
        call(self, "count", &[json!(amount)])
    }

    fn value(&self, bound: impl Into<Value>) -> Result<Schematik> {
        call(self, "value", &[bound.into()])
    }

    fn title(&self, text: &str) -> Result<Schematik> {
        call(self, "title", &[json!(text)])
    }

    fn description(&self, text: &str) -> Result<Schematik> {
        call(self, "description", &[json!(text)])
    }

    fn default_value(&self, value: impl Into<Value>) -> Result<Schematik> {
        call(self, "default", &[value.into()])
    }

    fn enum_values(&self, values: &[Value]) -> Result<Schematik> {
        call(self, "enum", values)
    }

    fn nullable(&self) -> Result<Schematik> {
        call(self, "nullable", &[])
    }

    fn one_of(&self, schemas: &[Schematik]) -> Result<Schematik> {
        call(self, "one_of", &documents(schemas))
    }

    fn any_of(&self, schemas: &[Schematik]) -> Result<Schematik> {
        call(self, "any_of", &documents(schemas))
    }

    fn all_of(&self, schemas: &[Schematik]) -> Result<Schematik> {
        call(self, "all_of", &documents(schemas))
    }
}
