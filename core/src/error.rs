//! Error types for builder operations.
//!
//! Every failure is a synchronous usage error raised at the call that broke a
//! contract. A failed call never changes the receiver's flags or schema.

use thiserror::Error;

/// Errors that can occur while building a schema.
#[derive(Debug, Error)]
pub enum SchematikError {
    /// `schema_with` received something other than a key or a partial document.
    #[error("Value must be a string or an object.")]
    InvalidArgument,

    /// `copy_to` target is not a [`Schematik`](crate::Schematik).
    #[error("Cannot copy to a non-Schematik object.")]
    TypeMismatch,

    /// Type name is not in the configured whitelist.
    #[error("Invalid type value {0}")]
    InvalidType(String),

    /// A type is already assigned and replacing it is not permitted.
    #[error("Overwriting existing type is not allowed.")]
    OverwriteNotAllowed,

    /// A typedef name is already taken on the instance or static surface.
    #[error("Cannot define type named '{0}'")]
    NameCollision(String),

    /// Dynamic dispatch found no method under this name.
    #[error("No method named '{0}' is registered")]
    UnknownMethod(String),

    /// An addon method rejected its arguments.
    #[error("invalid argument to '{method}': {reason}")]
    InvalidParameter { method: String, reason: String },

    /// Configuration file I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The process-wide configuration was already set or already read.
    #[error("configuration already installed")]
    ConfigAlreadyInstalled,
}

impl SchematikError {
    /// Shorthand for [`SchematikError::InvalidParameter`].
    pub fn invalid_parameter(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for results with [`SchematikError`].
pub type Result<T> = std::result::Result<T, SchematikError>;
