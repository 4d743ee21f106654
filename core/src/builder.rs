//! The immutable builder type.
//!
//! A [`Schematik`] holds exactly two [`Store`]s: behavioral flags and the
//! schema fragment under construction. Setters return a new builder and
//! leave the receiver untouched; clones share both stores until one side
//! writes.

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{Result, SchematikError};
use crate::store::{MergeMode, Store};

/// Fixed string representation of every builder.
pub const SCHEMATIK_TAG: &str = "[object Schematik]";

/// Immutable JSON Schema builder.
///
/// # Examples
///
/// ```
/// use schematik_core::{MergeMode, Schematik};
/// use serde_json::json;
///
/// let base = Schematik::new();
/// let number = base
///     .merge_schema(json!({ "type": "number" }).as_object().unwrap().clone(), MergeMode::Shallow)
///     .set_flag("nullable", true);
///
/// assert_eq!(number.schema("type"), Some(&json!("number")));
/// assert!(base.schema("type").is_none());
/// assert_eq!(base.to_string(), "[object Schematik]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schematik {
    flags: Store,
    schema: Store,
}

impl Default for Schematik {
    fn default() -> Self {
        Self::new()
    }
}

impl Schematik {
    /// Creates a builder seeded with the process-wide default flags and an
    /// empty schema.
    pub fn new() -> Self {
        Self {
            flags: Store::new(Config::global().default_flags.clone()),
            schema: Store::default(),
        }
    }

    /// Returns the current value of a flag.
    pub fn flag(&self, key: &str) -> Option<&Value> {
        self.flags.get(key)
    }

    /// Returns a new builder with `key` set to `value`.
    pub fn set_flag(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut partial = Map::new();
        partial.insert(key.to_string(), value.into());
        Self {
            flags: self.flags.merge(&partial, MergeMode::Shallow),
            schema: self.schema.clone(),
        }
    }

    /// Returns a new builder with `key` removed from its flags.
    pub fn clear_flag(&self, key: &str) -> Self {
        Self {
            flags: self.flags.without(key),
            schema: self.schema.clone(),
        }
    }

    /// Returns the value stored under a top-level schema keyword.
    pub fn schema(&self, key: &str) -> Option<&Value> {
        self.schema.get(key)
    }

    /// Returns a new builder with `partial` merged into the schema fragment.
    pub fn merge_schema(&self, partial: Map<String, Value>, mode: MergeMode) -> Self {
        Self {
            flags: self.flags.clone(),
            schema: self.schema.merge(&partial, mode),
        }
    }

    /// Reads or merges the schema depending on the shape of `arg`.
    ///
    /// A key reads the top-level keyword; a partial document yields a new
    /// builder with the document merged in.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](SchematikError::InvalidArgument) for any
    /// other JSON value.
    ///
    /// # Examples
    ///
    /// ```
    /// use schematik_core::{MergeMode, SchemaAccess, Schematik, SchematikError};
    /// use serde_json::json;
    ///
    /// let b = Schematik::new();
    /// let SchemaAccess::Derived(next) = b.schema_with(json!({ "minimum": 1 }), MergeMode::Shallow).unwrap() else {
    ///     panic!("expected a builder");
    /// };
    /// assert!(matches!(next.schema_with("minimum", MergeMode::Shallow), Ok(SchemaAccess::Value(Some(_)))));
    ///
    /// let err = b.schema_with(json!(123), MergeMode::Shallow).unwrap_err();
    /// assert!(matches!(err, SchematikError::InvalidArgument));
    /// ```
    pub fn schema_with(
        &self,
        arg: impl Into<SchemaArg>,
        mode: MergeMode,
    ) -> Result<SchemaAccess<'_>> {
        match arg.into() {
            SchemaArg::Key(key) => Ok(SchemaAccess::Value(self.schema.get(&key))),
            SchemaArg::Partial(partial) => {
                Ok(SchemaAccess::Derived(self.merge_schema(partial, mode)))
            }
            SchemaArg::Invalid(_) => Err(SchematikError::InvalidArgument),
        }
    }

    /// Copies this builder's flags and schema into `target`.
    ///
    /// Returns the receiver for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`](SchematikError::TypeMismatch) when `target`
    /// is not a [`Schematik`]; `target` is left untouched.
    pub fn copy_to(&self, target: &mut dyn Any) -> Result<&Self> {
        let target = target
            .downcast_mut::<Schematik>()
            .ok_or(SchematikError::TypeMismatch)?;
        target.flags = self.flags.clone();
        target.schema = self.schema.clone();
        Ok(self)
    }

    /// Returns the `type` keyword when it holds a single type name.
    ///
    /// A list of types (`["string", "null"]`) yields `None` here; use
    /// [`type_value`](Self::type_value) for the raw keyword.
    pub fn type_name(&self) -> Option<&str> {
        self.type_value().and_then(Value::as_str)
    }

    /// Returns the `type` keyword as stored, whatever its shape.
    pub fn type_value(&self) -> Option<&Value> {
        self.schema.get("type")
    }

    /// Assigns the `type` keyword on this builder.
    ///
    /// Unlike the other setters this writes the receiver's own schema
    /// reference, so an addon can settle the type of a builder it already
    /// owns. Snapshots shared with other builders are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidType`](SchematikError::InvalidType) if `value` is not
    /// whitelisted, or
    /// [`OverwriteNotAllowed`](SchematikError::OverwriteNotAllowed) if a type
    /// is already set and neither `force` nor the configuration allows
    /// replacing it.
    pub fn assign_type(&mut self, value: &str, force: bool) -> Result<&mut Self> {
        let config = Config::global();
        if !config.is_whitelisted(value) {
            return Err(SchematikError::InvalidType(value.to_string()));
        }
        if !force && !config.allow_type_overwrite && self.schema.contains("type") {
            return Err(SchematikError::OverwriteNotAllowed);
        }

        let mut partial = Map::new();
        partial.insert("type".to_string(), Value::String(value.to_string()));
        self.schema = self.schema.merge(&partial, MergeMode::Shallow);
        Ok(self)
    }

    pub(crate) fn flags_store(&self) -> &Store {
        &self.flags
    }

    pub(crate) fn schema_store(&self) -> &Store {
        &self.schema
    }

    pub(crate) fn with_flags(mut self, flags: Store) -> Self {
        self.flags = flags;
        self
    }

    /// Returns `true` when both builders share their flag and schema snapshots.
    pub fn shares_state_with(&self, other: &Schematik) -> bool {
        Store::ptr_eq(&self.flags, &other.flags) && Store::ptr_eq(&self.schema, &other.schema)
    }
}

impl fmt::Display for Schematik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SCHEMATIK_TAG)
    }
}

/// Returns `true` if `value` is a [`Schematik`].
pub fn is_schematik(value: &dyn Any) -> bool {
    value.is::<Schematik>()
}

/// Argument to [`Schematik::schema_with`], classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaArg {
    /// Top-level keyword to read.
    Key(String),
    /// Partial document to merge.
    Partial(Map<String, Value>),
    /// Anything else.
    Invalid(Value),
}

impl From<Value> for SchemaArg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(key) => Self::Key(key),
            Value::Object(partial) => Self::Partial(partial),
            other => Self::Invalid(other),
        }
    }
}

impl From<&str> for SchemaArg {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<Map<String, Value>> for SchemaArg {
    fn from(partial: Map<String, Value>) -> Self {
        Self::Partial(partial)
    }
}

/// Result of [`Schematik::schema_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaAccess<'a> {
    /// Value read for a key.
    Value(Option<&'a Value>),
    /// New builder carrying the merged schema.
    Derived(Schematik),
}

/// Receiver resolution for methods reachable from both surfaces.
///
/// An instance call continues the caller's chain; a static call starts from
/// a fresh default builder.
#[derive(Debug, Clone, Copy)]
pub enum Receiver<'a> {
    Instance(&'a Schematik),
    Static,
}

impl Receiver<'_> {
    /// Returns a usable builder for this receiver.
    pub fn resolve(self) -> Schematik {
        match self {
            Receiver::Instance(this) => this.clone(),
            Receiver::Static => Schematik::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn partial(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_set_flag_leaves_receiver_unchanged() {
        let a = Schematik::new();
        let b = a.set_flag("custom", true);

        assert_eq!(a.flag("custom"), None);
        assert_eq!(b.flag("custom"), Some(&json!(true)));
    }

    #[test]
    fn test_clear_flag() {
        let a = Schematik::new().set_flag("range", "min");
        let b = a.clear_flag("range");

        assert_eq!(b.flag("range"), None);
        assert_eq!(a.flag("range"), Some(&json!("min")));
    }

    #[test]
    fn test_sibling_merges_are_independent() {
        let a = Schematik::new();
        let one = a.merge_schema(partial(json!({ "x": 1 })), MergeMode::Shallow);
        let two = a.merge_schema(partial(json!({ "x": 2 })), MergeMode::Shallow);

        assert_eq!(one.schema("x"), Some(&json!(1)));
        assert_eq!(two.schema("x"), Some(&json!(2)));
        assert_eq!(a.schema("x"), None);
    }

    #[test]
    fn test_schema_with_rejects_non_object() {
        let err = Schematik::new()
            .schema_with(json!(123), MergeMode::Shallow)
            .unwrap_err();
        assert_eq!(err.to_string(), "Value must be a string or an object.");
    }

    #[test]
    fn test_schema_with_reads_key() {
        let b = Schematik::new().merge_schema(partial(json!({ "type": "string" })), MergeMode::Shallow);
        assert_eq!(
            b.schema_with("type", MergeMode::Shallow).unwrap(),
            SchemaAccess::Value(Some(&json!("string")))
        );
        assert_eq!(
            b.schema_with("missing", MergeMode::Shallow).unwrap(),
            SchemaAccess::Value(None)
        );
    }

    #[test]
    fn test_clone_shares_then_diverges() {
        let original = Schematik::new().set_flag("k", 0);
        let copy = original.clone();
        assert!(copy.shares_state_with(&original));

        let left = original.set_flag("k", 1);
        let right = copy.set_flag("k", 2);
        assert_eq!(left.flag("k"), Some(&json!(1)));
        assert_eq!(right.flag("k"), Some(&json!(2)));
        assert_eq!(original.flag("k"), Some(&json!(0)));
    }

    #[test]
    fn test_copy_to_overwrites_target() {
        let source = Schematik::new().set_flag("k", "v");
        let mut target = Schematik::new();

        source.copy_to(&mut target).unwrap();
        assert!(target.shares_state_with(&source));
    }

    #[test]
    fn test_copy_to_rejects_non_schematik() {
        let mut target = Map::new();
        let err = Schematik::new().copy_to(&mut target).unwrap_err();

        assert_eq!(err.to_string(), "Cannot copy to a non-Schematik object.");
        assert!(target.is_empty());
        assert!(!is_schematik(&target));
    }

    #[test]
    fn test_assign_type_getter_and_force() {
        let mut b = Schematik::new();
        b.assign_type("number", false).unwrap();
        assert_eq!(b.type_name(), Some("number"));

        let err = b.assign_type("string", false).unwrap_err();
        assert!(matches!(err, SchematikError::OverwriteNotAllowed));
        assert_eq!(b.type_name(), Some("number"));

        b.assign_type("string", true).unwrap();
        assert_eq!(b.type_name(), Some("string"));
    }

    #[test]
    fn test_type_value_exposes_type_lists() {
        let mut b = Schematik::new().merge_schema(
            partial(json!({ "type": ["string", "null"] })),
            MergeMode::Shallow,
        );

        assert_eq!(b.type_name(), None);
        assert_eq!(b.type_value(), Some(&json!(["string", "null"])));

        let err = b.assign_type("string", false).unwrap_err();
        assert!(matches!(err, SchematikError::OverwriteNotAllowed));
        assert_eq!(b.type_value(), Some(&json!(["string", "null"])));
    }

    #[test]
    fn test_assign_type_rejects_unknown_type() {
        let err = Schematik::new().assign_type("bogus", false).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type value bogus");
    }

    #[test]
    fn test_assign_type_does_not_touch_clones() {
        let original = Schematik::new();
        let mut copy = original.clone();
        copy.assign_type("integer", false).unwrap();

        assert_eq!(copy.type_name(), Some("integer"));
        assert_eq!(original.type_name(), None);
    }

    #[test]
    fn test_receiver_resolution() {
        let b = Schematik::new().set_flag("k", 1);
        assert!(Receiver::Instance(&b).resolve().shares_state_with(&b));
        assert_eq!(Receiver::Static.resolve().flag("k"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Schematik::new().to_string(), SCHEMATIK_TAG);
    }
}
