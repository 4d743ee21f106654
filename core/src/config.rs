//! Process-wide builder configuration.
//!
//! The configuration is the read-only seed every builder starts from: the
//! default flags, the set of type names `assign_type` accepts, and whether an
//! assigned type may be replaced without `force`.
//!
//! # Example YAML
//!
//! ```yaml
//! default_flags:
//!   nullable: false
//! whitelisted_types:
//!   - "null"
//!   - boolean
//!   - integer
//!   - number
//!   - string
//!   - array
//!   - object
//! allow_type_overwrite: false
//! ```
//!
//! Call [`Config::install`] once at startup, before the first builder is
//! created, to replace the defaults.

use std::collections::BTreeSet;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SchematikError};

/// Flag that wraps the finalized document in `oneOf [null, schema]`.
pub const NULLABLE_FLAG: &str = "nullable";

/// JSON Schema primitive types accepted by default.
pub const DEFAULT_TYPES: &[&str] = &[
    "null", "boolean", "integer", "number", "string", "array", "object",
];

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Builder configuration.
///
/// # Examples
///
/// ```
/// use schematik_core::Config;
///
/// let config = Config::from_yaml_str("allow_type_overwrite: true").unwrap();
/// assert!(config.allow_type_overwrite);
/// assert!(config.is_whitelisted("string"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flags every new builder starts with.
    pub default_flags: Map<String, Value>,
    /// Type names accepted by `assign_type`.
    pub whitelisted_types: BTreeSet<String>,
    /// Allows replacing an assigned type without `force`.
    pub allow_type_overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut default_flags = Map::new();
        default_flags.insert(NULLABLE_FLAG.to_string(), Value::Bool(false));

        Self {
            default_flags,
            whitelisted_types: DEFAULT_TYPES.iter().map(|t| t.to_string()).collect(),
            allow_type_overwrite: false,
        }
    }
}

impl Config {
    /// Parses configuration from a YAML (or JSON) string.
    ///
    /// Missing fields keep their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Loads configuration from a YAML (or JSON) file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](SchematikError::IoError) if the file cannot be
    /// read, or [`YamlError`](SchematikError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if `type_name` may be assigned.
    pub fn is_whitelisted(&self, type_name: &str) -> bool {
        self.whitelisted_types.contains(type_name)
    }

    /// Installs `config` as the process-wide seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigAlreadyInstalled`](SchematikError::ConfigAlreadyInstalled)
    /// when a configuration was installed before, or when a builder already
    /// read the defaults.
    pub fn install(config: Config) -> Result<()> {
        GLOBAL
            .set(config)
            .map_err(|_| SchematikError::ConfigAlreadyInstalled)?;
        debug!("Installed process-wide builder configuration");
        Ok(())
    }

    /// Returns the process-wide configuration, falling back to the defaults.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(Config::default)
    }
}
