//! Range keywords: `min` / `max` followed by `count` or `value`.
//!
//! `min` and `max` only record which end of the range the next call sets, in
//! the `range` flag. `count` then picks the keyword for the builder's type
//! (`minLength`, `minItems` or `minProperties`) and `value` writes
//! `minimum` / `maximum`. Both clear the flag afterwards.

use serde_json::Value;

use schematik_core::{MergeMode, Result, Schematik, SchematikError, Surfaces, wrap};

use crate::args::{self, partial};

/// Flag holding the pending range side (`"min"` or `"max"`).
pub const RANGE_FLAG: &str = "range";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Min,
    Max,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Side::Min => "min",
            Side::Max => "max",
        }
    }

    fn pending(this: &Schematik, method: &str) -> Result<Self> {
        match this.flag(RANGE_FLAG).and_then(Value::as_str) {
            Some("min") => Ok(Side::Min),
            Some("max") => Ok(Side::Max),
            _ => Err(SchematikError::invalid_parameter(
                method,
                "call min or max first",
            )),
        }
    }
}

pub(crate) fn register(surfaces: &mut Surfaces) {
    for side in [Side::Min, Side::Max] {
        wrap(surfaces.instance_mut(), side.as_str(), move |this, _args| {
            Ok(Some(this.set_flag(RANGE_FLAG, side.as_str())))
        });
    }
    wrap(surfaces.instance_mut(), "count", count);
    wrap(surfaces.instance_mut(), "value", value);
}

fn count(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let side = Side::pending(this, "count")?;
    let amount = args::count("count", args, 0)?;

    let suffix = match this.type_name() {
        Some("string") => "Length",
        Some("array") => "Items",
        Some("object") => "Properties",
        other => {
            return Err(SchematikError::invalid_parameter(
                "count",
                format!("not applicable to type {}", other.unwrap_or("<none>")),
            ));
        }
    };
    let keyword = format!("{}{suffix}", side.as_str());

    Ok(Some(
        this.merge_schema(partial(&keyword, amount), MergeMode::Shallow)
            .clear_flag(RANGE_FLAG),
    ))
}

fn value(this: &mut Schematik, args: &[Value]) -> Result<Option<Schematik>> {
    let side = Side::pending(this, "value")?;
    let bound = args::number("value", args, 0)?;

    if !matches!(this.type_name(), Some("number" | "integer")) {
        return Err(SchematikError::invalid_parameter(
            "value",
            "only numeric types take a value bound",
        ));
    }
    let keyword = match side {
        Side::Min => "minimum",
        Side::Max => "maximum",
    };

    Ok(Some(
        this.merge_schema(partial(keyword, bound), MergeMode::Shallow)
            .clear_flag(RANGE_FLAG),
    ))
}
