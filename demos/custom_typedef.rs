//! Registering addon vocabulary and typedef shortcuts at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p schematik-demos --example custom_typedef
//! ```

use schematik_addons::{SchematikExt, install};
use schematik_core::{Extension, MergeMode, Result, Schematik, Surfaces, wrap};
use serde_json::{Value, json};

/// A small addon: `deprecated` marks any schema as deprecated.
fn install_deprecation(surfaces: &mut Surfaces) {
    wrap(surfaces.instance_mut(), "deprecated", |this, _args| {
        let partial = json!({ "deprecated": true });
        Ok(Some(this.merge_schema(
            partial.as_object().cloned().unwrap_or_default(),
            MergeMode::Shallow,
        )))
    });
}

static DEPRECATION: Extension = Extension::new("deprecation", install_deprecation);

fn main() -> Result<()> {
    install();
    Schematik::use_extension(&DEPRECATION);

    Schematik::typedef("slug", Some("string"), |t, _| t.matches("^[a-z0-9-]+$"))?;
    Schematik::typedef("port", Some("integer"), |t, _| {
        t.min()?.value(1)?.max()?.value(65535)
    })?;
    Schematik::typedef("tagged", None, |t, args| {
        let tag = args.first().and_then(Value::as_str).unwrap_or("untagged");
        t.title(tag)
    })?;

    let service = Schematik::call_static("object", &[])?
        .required("name", &Schematik::call_static("slug", &[])?)?
        .required("port", &Schematik::call_static("port", &[])?)?
        .property(
            "legacy_port",
            &Schematik::call_static("port", &[])?.call("deprecated", &[])?,
        )?
        .call("deprecated", &[])?;

    let tagged = Schematik::call_static("tagged", &[json!("config")])?;

    for entry in Schematik::typedefs() {
        println!("typedef {} (base: {})", entry.name, entry.base);
    }
    println!("{}", serde_json::to_string_pretty(&service).unwrap_or_default());
    println!("{}", serde_json::to_string_pretty(&tagged).unwrap_or_default());

    Ok(())
}
