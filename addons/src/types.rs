//! Type constructors, reachable from both surfaces.

use serde_json::Value;

use schematik_core::{MergeMode, Result, Schematik, Surfaces, wrap_method};

use crate::args::partial;

/// Types whose constructor only assigns `type`.
const PLAIN_TYPES: &[&str] = &["null", "boolean", "integer", "number", "string", "array"];

pub(crate) fn register(surfaces: &mut Surfaces) {
    for &type_name in PLAIN_TYPES {
        surfaces.install_both(
            type_name,
            wrap_method(move |this, _args| {
                this.assign_type(type_name, false)?;
                Ok(None)
            }),
        );
    }
    surfaces.install_both("object", wrap_method(object));
}

/// Objects accept unknown properties unless told otherwise.
fn object(this: &mut Schematik, _args: &[Value]) -> Result<Option<Schematik>> {
    this.assign_type("object", false)?;
    Ok(Some(this.merge_schema(
        partial("additionalProperties", true),
        MergeMode::Shallow,
    )))
}
