//! Argument extraction for dynamically dispatched addon methods.

use serde_json::{Map, Number, Value};

use schematik_core::{Result, SchematikError};

pub(crate) fn required<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a Value> {
    args.get(index).ok_or_else(|| {
        SchematikError::invalid_parameter(method, format!("missing argument #{}", index + 1))
    })
}

pub(crate) fn string<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a str> {
    required(method, args, index)?
        .as_str()
        .ok_or_else(|| SchematikError::invalid_parameter(method, "expected a string"))
}

pub(crate) fn count(method: &str, args: &[Value], index: usize) -> Result<u64> {
    required(method, args, index)?
        .as_u64()
        .ok_or_else(|| SchematikError::invalid_parameter(method, "expected a non-negative integer"))
}

pub(crate) fn number(method: &str, args: &[Value], index: usize) -> Result<Number> {
    match required(method, args, index)? {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(SchematikError::invalid_parameter(method, "expected a number")),
    }
}

/// Optional boolean; a missing argument yields `default`.
pub(crate) fn flag_or(method: &str, args: &[Value], index: usize, default: bool) -> Result<bool> {
    match args.get(index) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchematikError::invalid_parameter(method, "expected a boolean")),
    }
}

/// A schema document argument (a JSON object).
pub(crate) fn document(method: &str, args: &[Value], index: usize) -> Result<Value> {
    let value = required(method, args, index)?;
    if value.is_object() {
        Ok(value.clone())
    } else {
        Err(SchematikError::invalid_parameter(method, "expected a schema object"))
    }
}

/// Builds a single-entry partial document.
pub(crate) fn partial(key: &str, value: impl Into<Value>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value.into());
    map
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_argument() {
        let err = string("matches", &[], 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument to 'matches': missing argument #1"
        );
    }

    #[test]
    fn test_wrong_shape() {
        assert!(count("count", &[json!(-1)], 0).is_err());
        assert!(document("items", &[json!("string")], 0).is_err());
        assert!(flag_or("additional", &[json!("yes")], 0, true).is_err());
    }

    #[test]
    fn test_defaults_and_values() {
        assert!(flag_or("property", &[], 1, false).is_ok_and(|b| !b));
        assert_eq!(count("count", &[json!(10)], 0).unwrap(), 10);
        assert_eq!(number("value", &[json!(1.5)], 0).unwrap().as_f64(), Some(1.5));
        assert_eq!(partial("uniqueItems", true).get("uniqueItems"), Some(&json!(true)));
    }
}
