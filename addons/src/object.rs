//! Object keywords.

use serde_json::{Map, Value};

use schematik_core::{MergeMode, Result, Schematik, SchematikError, Surfaces, wrap};

use crate::args::{self, document, partial};

pub(crate) fn register(surfaces: &mut Surfaces) {
    wrap(surfaces.instance_mut(), "property", property);
    wrap(surfaces.instance_mut(), "additional", additional);
}

/// `property(name, schema, required = false)`.
///
/// Properties accumulate through a deep merge, so redefining a name merges
/// into the earlier definition.
fn property(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let name = args::string("property", args, 0)?;
    let schema = document("property", args, 1)?;
    let is_required = args::flag_or("property", args, 2, false)?;

    let mut properties = Map::new();
    properties.insert(name.to_string(), schema);
    let mut next = this.merge_schema(partial("properties", properties), MergeMode::Deep);

    if is_required {
        let mut required = match next.schema("required") {
            Some(Value::Array(names)) => names.clone(),
            _ => Vec::new(),
        };
        if !required.iter().any(|existing| existing == name) {
            required.push(Value::String(name.to_string()));
        }
        next = next.merge_schema(partial("required", required), MergeMode::Shallow);
    }

    Ok(Some(next))
}

/// `additional(bool | schema)` sets `additionalProperties`.
fn additional(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let value = match args::required("additional", args, 0)? {
        value @ (Value::Bool(_) | Value::Object(_)) => value.clone(),
        _ => {
            return Err(SchematikError::invalid_parameter(
                "additional",
                "expected a boolean or a schema object",
            ));
        }
    };
    Ok(Some(this.merge_schema(
        partial("additionalProperties", value),
        MergeMode::Shallow,
    )))
}
