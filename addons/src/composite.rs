//! `oneOf` / `anyOf` / `allOf` composition.

use serde_json::Value;

use schematik_core::{MergeMode, Result, Schematik, SchematikError, Surfaces, wrap_method};

use crate::args::{document, partial};

/// Method name and the keyword it writes.
const COMBINATORS: &[(&str, &str)] = &[("one_of", "oneOf"), ("any_of", "anyOf"), ("all_of", "allOf")];

pub(crate) fn register(surfaces: &mut Surfaces) {
    for &(method, keyword) in COMBINATORS {
        surfaces.install_both(
            method,
            wrap_method(move |this, args| combine(this, method, keyword, args).map(Some)),
        );
    }
}

fn combine(this: &Schematik, method: &str, keyword: &str, args: &[Value]) -> Result<Schematik> {
    if args.is_empty() {
        return Err(SchematikError::invalid_parameter(
            method,
            "expected at least one schema",
        ));
    }
    let branches = (0..args.len())
        .map(|index| document(method, args, index))
        .collect::<Result<Vec<_>>>()?;

    Ok(this.merge_schema(partial(keyword, branches), MergeMode::Shallow))
}
