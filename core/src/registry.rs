//! Process-wide extension table.
//!
//! Builder vocabulary is not hard-coded into [`Schematik`]. Addons register
//! named methods on two surfaces:
//!
//! - the **instance** surface, reached through [`Schematik::call`], which
//!   continues the caller's chain;
//! - the **static** surface, reached through [`Schematik::call_static`],
//!   which starts from a fresh default builder.
//!
//! Addons are bundled as [`Extension`]s and applied with
//! [`Schematik::use_extension`], at most once each. Named shortcuts are added
//! with [`Schematik::typedef`], which refuses to shadow an existing name.
//!
//! # Example
//!
//! ```
//! use schematik_core::{wrap, Extension, Schematik, Surfaces};
//! use serde_json::json;
//!
//! fn install(surfaces: &mut Surfaces) {
//!     surfaces.install_both("doc_boolean", schematik_core::wrap_method(|this, _| {
//!         this.assign_type("boolean", false)?;
//!         Ok(None)
//!     }));
//!     wrap(surfaces.instance_mut(), "doc_describe", |this, args| {
//!         Ok(Some(this.merge_schema(
//!             json!({ "description": args[0] }).as_object().unwrap().clone(),
//!             Default::default(),
//!         )))
//!     });
//! }
//!
//! static DOC_TYPES: Extension = Extension::new("doc-types", install);
//! Schematik::use_extension(&DOC_TYPES);
//!
//! let flag = Schematik::call_static("doc_boolean", &[])
//!     .and_then(|b| b.call("doc_describe", &[json!("on/off")]))
//!     .unwrap();
//! assert_eq!(flag.done(), json!({ "type": "boolean", "description": "on/off" }));
//! ```

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::{
    Arc, LazyLock, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use serde_json::Value;
use tracing::{debug, warn};

use crate::builder::{Receiver, Schematik};
use crate::error::{Result, SchematikError};

/// Base instantiated by a typedef when none is given.
pub const DEFAULT_TYPEDEF_BASE: &str = "object";

/// Names of the builder's own operations; typedefs may not take them.
pub const RESERVED_NAMES: &[&str] = &[
    "new",
    "done",
    "flag",
    "set_flag",
    "clear_flag",
    "schema",
    "merge_schema",
    "schema_with",
    "clone",
    "copy_to",
    "copyTo",
    "self",
    "typedef",
    "typedefs",
    "use",
    "use_extension",
    "assign_type",
    "__type",
    "type_name",
    "type_value",
    "to_string",
    "toString",
    "call",
    "call_static",
    "responds_to",
];

/// A registered builder method.
pub type Method = Arc<dyn Fn(&Schematik, &[Value]) -> Result<Schematik> + Send + Sync>;

/// The recipe behind a typedef shortcut.
pub type Expression = Arc<dyn Fn(Schematik, &[Value]) -> Result<Schematik> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::default()));

static APPLY_GATE: Mutex<()> = Mutex::new(());

thread_local! {
    static APPLY_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One side of the method table.
#[derive(Clone, Default)]
pub struct Surface {
    methods: HashMap<String, Method>,
}

impl Surface {
    /// Installs `method` under `name`, returning the method it replaced.
    pub fn install(&mut self, name: &str, method: Method) -> Option<Method> {
        let previous = self.methods.insert(name.to_string(), method);
        if previous.is_some() {
            warn!(method = name, "Replacing previously registered method");
        } else {
            debug!(method = name, "Registered method");
        }
        previous
    }

    fn absorb(&mut self, staged: Surface) {
        for (name, method) in staged.methods {
            if self.methods.insert(name.clone(), method).is_some() {
                warn!(method = %name, "Replacing previously registered method");
            }
        }
    }

    /// Returns the method registered under `name`.
    pub fn get(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("methods", &self.names())
            .finish()
    }
}

/// The registration interface handed to an [`Extension`].
#[derive(Debug, Clone, Default)]
pub struct Surfaces {
    instance: Surface,
    statics: Surface,
}

impl Surfaces {
    pub fn instance_mut(&mut self) -> &mut Surface {
        &mut self.instance
    }

    pub fn static_mut(&mut self) -> &mut Surface {
        &mut self.statics
    }

    /// Installs `method` on both surfaces.
    pub fn install_both(&mut self, name: &str, method: Method) {
        self.instance.install(name, Arc::clone(&method));
        self.statics.install(name, method);
    }

    /// Returns `true` if `name` exists on either surface.
    pub fn contains(&self, name: &str) -> bool {
        self.instance.contains(name) || self.statics.contains(name)
    }

    fn absorb(&mut self, staged: Surfaces) {
        self.instance.absorb(staged.instance);
        self.statics.absorb(staged.statics);
    }
}

/// A bundle of addon registrations.
///
/// Identity is the address of the `Extension` value, so declare extensions
/// as `static` items.
pub struct Extension {
    name: &'static str,
    apply: fn(&mut Surfaces),
}

impl Extension {
    pub const fn new(name: &'static str, apply: fn(&mut Surfaces)) -> Self {
        Self { name, apply }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn id(&'static self) -> usize {
        std::ptr::from_ref(self) as usize
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension").field("name", &self.name).finish()
    }
}

/// A registered typedef shortcut.
#[derive(Clone)]
pub struct TypedefEntry {
    pub name: String,
    pub base: String,
    pub expression: Expression,
}

impl fmt::Debug for TypedefEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedefEntry")
            .field("name", &self.name)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Registry {
    surfaces: Surfaces,
    typedefs: BTreeMap<String, TypedefEntry>,
    applied: HashSet<usize>,
}

fn read() -> RwLockReadGuard<'static, Registry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Registry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Serializes extension application across threads.
///
/// Re-entrant per thread, so an extension may apply its own dependencies.
struct ApplyGate {
    _guard: Option<MutexGuard<'static, ()>>,
}

impl ApplyGate {
    fn enter() -> Self {
        let guard = (APPLY_DEPTH.get() == 0)
            .then(|| APPLY_GATE.lock().unwrap_or_else(PoisonError::into_inner));
        APPLY_DEPTH.set(APPLY_DEPTH.get() + 1);
        Self { _guard: guard }
    }
}

impl Drop for ApplyGate {
    fn drop(&mut self) {
        APPLY_DEPTH.set(APPLY_DEPTH.get() - 1);
    }
}

impl Schematik {
    /// Invokes the instance method `name` with this builder as receiver.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownMethod`](SchematikError::UnknownMethod) if nothing is
    /// registered under `name`, or whatever the method itself returns.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Schematik> {
        let method = read()
            .surfaces
            .instance
            .get(name)
            .ok_or_else(|| SchematikError::UnknownMethod(name.to_string()))?;
        method(self, args)
    }

    /// Invokes the static method `name` on a fresh default builder.
    pub fn call_static(name: &str, args: &[Value]) -> Result<Schematik> {
        let method = read()
            .surfaces
            .statics
            .get(name)
            .ok_or_else(|| SchematikError::UnknownMethod(name.to_string()))?;
        method(&Receiver::Static.resolve(), args)
    }

    /// Returns `true` if `name` is registered on either surface.
    pub fn responds_to(name: &str) -> bool {
        read().surfaces.contains(name)
    }

    /// Applies `extension` unless it was applied before.
    ///
    /// Returns `true` when the extension ran. Methods are registered on a
    /// staging [`Surfaces`] and published once the extension returns, so
    /// the extension itself may call [`Schematik::typedef`] or any other
    /// registry operation. Concurrent callers wait until a running
    /// extension has been published.
    pub fn use_extension(extension: &'static Extension) -> bool {
        let _gate = ApplyGate::enter();
        if !write().applied.insert(extension.id()) {
            debug!(extension = extension.name(), "Extension already applied");
            return false;
        }

        let mut staged = Surfaces::default();
        (extension.apply)(&mut staged);
        write().surfaces.absorb(staged);

        debug!(extension = extension.name(), "Applied extension");
        true
    }

    /// Registers `name` as a shortcut on both surfaces.
    ///
    /// Invoking the shortcut instantiates `base` (default
    /// [`DEFAULT_TYPEDEF_BASE`]) on the resolved receiver and passes that
    /// instance plus the call arguments to `expression`.
    ///
    /// # Errors
    ///
    /// Returns [`NameCollision`](SchematikError::NameCollision) if `name` is
    /// one of [`RESERVED_NAMES`] or already registered on either surface.
    pub fn typedef<F>(name: &str, base: Option<&str>, expression: F) -> Result<()>
    where
        F: Fn(Schematik, &[Value]) -> Result<Schematik> + Send + Sync + 'static,
    {
        let mut registry = write();
        if RESERVED_NAMES.contains(&name) || registry.surfaces.contains(name) {
            return Err(SchematikError::NameCollision(name.to_string()));
        }

        let base = base.unwrap_or(DEFAULT_TYPEDEF_BASE).to_string();
        let expression: Expression = Arc::new(expression);

        let shortcut: Method = {
            let base = base.clone();
            let expression = Arc::clone(&expression);
            Arc::new(move |receiver: &Schematik, args: &[Value]| {
                let instance = instantiate(Receiver::Instance(receiver), &base)?;
                expression(instance, args)
            })
        };

        registry.surfaces.install_both(name, shortcut);
        registry.typedefs.insert(
            name.to_string(),
            TypedefEntry {
                name: name.to_string(),
                base: base.clone(),
                expression,
            },
        );

        debug!(typedef = name, base = %base, "Defined type shortcut");
        Ok(())
    }

    /// Returns all registered typedefs, sorted by name.
    pub fn typedefs() -> Vec<TypedefEntry> {
        read().typedefs.values().cloned().collect()
    }
}

fn instantiate(receiver: Receiver<'_>, base: &str) -> Result<Schematik> {
    receiver.resolve().call(base, &[])
}
