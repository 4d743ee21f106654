//! Building a nested schema with the typed API.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p schematik-demos --example person_schema
//! ```

use schematik_addons::{SchematikExt, array, integer, object, string};
use schematik_core::Result;

fn main() -> Result<()> {
    let address = object()?
        .required("street", &string()?)?
        .required("city", &string()?)?
        .property("zip", &string()?.matches(r"^\d{5}$")?)?
        .additional(false)?;

    let person = object()?
        .title("Person")?
        .required("name", &string()?.min()?.count(1)?)?
        .property("age", &integer()?.min()?.value(0)?.nullable()?)?
        .property("emails", &array()?.items(&string()?.format("email")?)?.unique()?)?
        .property("address", &address)?;

    // Earlier links of the chain are untouched.
    println!("address alone:");
    println!("{}", serde_json::to_string_pretty(&address).unwrap_or_default());
    println!();
    println!("person:");
    println!("{}", serde_json::to_string_pretty(&person.done()).unwrap_or_default());

    Ok(())
}
