//! Annotation keywords and the `nullable` switch.

use serde_json::Value;

use schematik_core::{MergeMode, NULLABLE_FLAG, Result, Schematik, SchematikError, Surfaces, wrap};

use crate::args::{self, partial};

pub(crate) fn register(surfaces: &mut Surfaces) {
    for (method, keyword) in [("title", "title"), ("description", "description")] {
        wrap(surfaces.instance_mut(), method, move |this, args| {
            let text = args::string(method, args, 0)?;
            Ok(Some(this.merge_schema(partial(keyword, text), MergeMode::Shallow)))
        });
    }
    wrap(surfaces.instance_mut(), "default", default);
    wrap(surfaces.instance_mut(), "enum", enumerate);
    wrap(surfaces.instance_mut(), "nullable", |this, _args| {
        Ok(Some(this.set_flag(NULLABLE_FLAG, true)))
    });
}

fn default(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let value = args::required("default", args, 0)?.clone();
    Ok(Some(this.merge_schema(partial("default", value), MergeMode::Shallow)))
}

/// `enum(a, b, ...)`: every argument is one allowed value.
fn enumerate(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    if args.is_empty() {
        return Err(SchematikError::invalid_parameter(
            "enum",
            "expected at least one value",
        ));
    }
    Ok(Some(this.merge_schema(partial("enum", args.to_vec()), MergeMode::Shallow)))
}
