//! Materializing a builder into a plain schema document.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::builder::Schematik;
use crate::config::NULLABLE_FLAG;
use crate::store::MergeMode;

impl Schematik {
    /// Converts the builder into a JSON Schema document.
    ///
    /// The result is deeply independent of the builder. When the `nullable`
    /// flag is set, the document is wrapped as
    /// `{"oneOf": [{"type": "null"}, <document>]}` and the flag itself is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use schematik_core::Schematik;
    /// use serde_json::json;
    ///
    /// let mut number = Schematik::new();
    /// number.assign_type("number", false).unwrap();
    ///
    /// assert_eq!(number.done(), json!({ "type": "number" }));
    /// assert_eq!(
    ///     number.set_flag("nullable", true).done(),
    ///     json!({ "oneOf": [{ "type": "null" }, { "type": "number" }] })
    /// );
    /// ```
    pub fn done(&self) -> Value {
        let document = Value::Object(self.schema_store().to_map());
        if !is_truthy(self.flag(NULLABLE_FLAG)) {
            return document;
        }

        let mut composite = Map::new();
        composite.insert("oneOf".to_string(), json!([{ "type": "null" }, document]));

        let base = Schematik::new().merge_schema(composite, MergeMode::Shallow);
        let flags = base
            .flags_store()
            .without(NULLABLE_FLAG)
            .merge(&self.flags_store().without(NULLABLE_FLAG).to_map(), MergeMode::Shallow);
        base.with_flags(flags).done()
    }
}

impl Serialize for Schematik {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.done().serialize(serializer)
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
