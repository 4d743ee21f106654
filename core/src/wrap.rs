//! Chainable wrapping for addon methods.
//!
//! Addon authors write plain functions over a working copy of the receiver:
//!
//! ```text
//! fn(&mut Schematik, &[Value]) -> Result<Option<Schematik>>
//! ```
//!
//! Returning `Some(builder)` hands that builder back to the caller. Returning
//! `None` means "continue the chain": the wrapper returns the working copy,
//! including any in-place edits such as
//! [`assign_type`](crate::Schematik::assign_type). Either way every
//! registered method yields a builder.

use std::sync::Arc;

use serde_json::Value;

use crate::builder::Schematik;
use crate::error::Result;
use crate::registry::{Method, Surface};

/// Wraps `f` so that a `None` result continues with the receiver's copy.
///
/// # Examples
///
/// ```
/// use schematik_core::{wrap_method, Schematik};
///
/// let typed = wrap_method(|this: &mut Schematik, _args: &[serde_json::Value]| {
///     this.assign_type("boolean", false)?;
///     Ok(None)
/// });
///
/// let receiver = Schematik::new();
/// let next = typed(&receiver, &[]).unwrap();
/// assert_eq!(next.type_name(), Some("boolean"));
/// assert_eq!(receiver.type_name(), None);
/// ```
pub fn wrap_method<F>(f: F) -> Method
where
    F: Fn(&mut Schematik, &[Value]) -> Result<Option<Schematik>> + Send + Sync + 'static,
{
    Arc::new(move |receiver: &Schematik, args: &[Value]| {
        let mut this = receiver.clone();
        Ok(f(&mut this, args)?.unwrap_or(this))
    })
}

/// Installs `f` on `surface` under `name`, wrapped by [`wrap_method`].
pub fn wrap<F>(surface: &mut Surface, name: &str, f: F)
where
    F: Fn(&mut Schematik, &[Value]) -> Result<Option<Schematik>> + Send + Sync + 'static,
{
    surface.install(name, wrap_method(f));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_none_continues_with_clone() {
        let mut surface = Surface::default();
        wrap(&mut surface, "noop", |_this, _args| Ok(None));

        let receiver = Schematik::new().set_flag("k", 1);
        let method = surface.get("noop").unwrap();
        let next = method(&receiver, &[]).unwrap();

        assert!(next.shares_state_with(&receiver));
    }

    #[test]
    fn test_some_is_returned_as_is() {
        let mut surface = Surface::default();
        wrap(&mut surface, "mark", |this, args| {
            Ok(Some(this.set_flag("mark", args[0].clone())))
        });

        let method = surface.get("mark").unwrap();
        let next = method(&Schematik::new(), &[json!("x")]).unwrap();
        assert_eq!(next.flag("mark"), Some(&json!("x")));
    }

    #[test]
    fn test_errors_propagate() {
        let method = wrap_method(|this, _args| {
            this.assign_type("bogus", false)?;
            Ok(None)
        });

        let err = method(&Schematik::new(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type value bogus");
    }
}
