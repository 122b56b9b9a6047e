//! Table metadata registry.
//!
//! Generated code provides a static [`OrmRegistry`] and an `init()`
//! function that calls [`install`] once at startup. Typed queries then
//! resolve their table with [`lookup_by_type_id`].

use std::sync::OnceLock;

use crate::error::RegistryError;
use crate::meta::TableMeta;

/// Lookup of table metadata by type id.
pub trait OrmRegistry: Send + Sync {
    /// All registered tables.
    fn tables(&self) -> &[TableMeta];

    /// Table registered under `type_id`, if any.
    fn by_type_id(&self, type_id: &str) -> Option<&TableMeta> {
        self.tables().iter().find(|t| t.type_id == type_id)
    }
}

/// A registry over an owned table list.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: Vec<TableMeta>,
}

impl Registry {
    /// Creates a registry from tables.
    #[must_use]
    pub fn new(tables: Vec<TableMeta>) -> Self {
        Self { tables }
    }
}

impl OrmRegistry for Registry {
    fn tables(&self) -> &[TableMeta] {
        &self.tables
    }
}

static GLOBAL: OnceLock<&'static dyn OrmRegistry> = OnceLock::new();

/// Installs the process-wide registry.
///
/// # Errors
///
/// [`RegistryError::AlreadyInstalled`] if a registry is already installed.
pub fn install(registry: &'static dyn OrmRegistry) -> Result<(), RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// The process-wide registry.
///
/// # Errors
///
/// [`RegistryError::NotInstalled`] before [`install`] has run.
pub fn global() -> Result<&'static dyn OrmRegistry, RegistryError> {
    GLOBAL.get().copied().ok_or(RegistryError::NotInstalled)
}

/// Resolves a table through the process-wide registry.
///
/// # Errors
///
/// [`RegistryError::NotInstalled`] or [`RegistryError::UnknownTypeId`].
pub fn lookup_by_type_id(type_id: &str) -> Result<&'static TableMeta, RegistryError> {
    global()?
        .by_type_id(type_id)
        .ok_or_else(|| RegistryError::UnknownTypeId(type_id.to_string()))
}
