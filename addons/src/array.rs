//! Array keywords.

use serde_json::Value;

use schematik_core::{MergeMode, Result, Schematik, Surfaces, wrap};

use crate::args::{document, partial};

pub(crate) fn register(surfaces: &mut Surfaces) {
    wrap(surfaces.instance_mut(), "items", items);
    wrap(surfaces.instance_mut(), "unique", unique);
}

fn items(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let schema = document("items", args, 0)?;
    Ok(Some(this.merge_schema(partial("items", schema), MergeMode::Shallow)))
}

/// Sets `uniqueItems`. Works on any builder, typed or not.
fn unique(this: &mut Schematik, _args: &[Value]) -> Result<Option<Schematik>> {
    Ok(Some(this.merge_schema(partial("uniqueItems", true), MergeMode::Shallow)))
}
