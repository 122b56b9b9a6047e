//! Error types for criteria compilation, row mapping and registry lookup.

use thiserror::Error;

/// A criteria tree that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// `IN` with no values.
    #[error("IN list for column '{column}' is empty")]
    EmptyInList {
        /// Column the list applies to.
        column: String,
    },

    /// `BETWEEN` needs exactly a start and an end bound.
    #[error("BETWEEN on column '{column}' needs exactly 2 bounds, got {count}")]
    BetweenArity {
        /// Column the range applies to.
        column: String,
        /// Number of bounds supplied.
        count: usize,
    },

    /// `and()` / `or()` called without operands.
    #[error("{0}() requires at least one expression")]
    EmptyCombinator(&'static str),
}

/// A row that cannot be mapped onto a typed entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A NOT NULL column came back absent or NULL.
    #[error("column '{column}' is null")]
    NullViolation {
        /// Offending column.
        column: String,
    },

    /// The stored value has a different storage class than the field.
    #[error("column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Offending column.
        column: String,
        /// Expected storage class.
        expected: &'static str,
        /// Storage class actually read.
        found: &'static str,
    },
}

/// Registry lookup and initialization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No table is registered under this type id.
    #[error("table meta not found for type id '{0}'")]
    UnknownTypeId(String),

    /// [`crate::registry::install`] has not been called yet.
    #[error("ORM registry is not installed; call the generated init() at startup")]
    NotInstalled,

    /// [`crate::registry::install`] was called twice.
    #[error("ORM registry is already installed")]
    AlreadyInstalled,
}
