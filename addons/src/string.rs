//! String keywords.

use regex::Regex;
use serde_json::Value;

use schematik_core::{MergeMode, Result, Schematik, SchematikError, Surfaces, wrap};

use crate::args::{self, partial};

pub(crate) fn register(surfaces: &mut Surfaces) {
    wrap(surfaces.instance_mut(), "matches", matches);
    wrap(surfaces.instance_mut(), "format", format);
}

/// Sets `pattern`. The expression must compile as a regular expression.
fn matches(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let pattern = args::string("matches", args, 0)?;
    Regex::new(pattern)
        .map_err(|err| SchematikError::invalid_parameter("matches", err.to_string()))?;

    Ok(Some(this.merge_schema(partial("pattern", pattern), MergeMode::Shallow)))
}

fn format(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let name = args::string("format", args, 0)?;
    Ok(Some(this.merge_schema(partial("format", name), MergeMode::Shallow)))
}
