//! Host type resolution for generated entity fields.

use rowcast_core::Affinity;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::schema::{Column, Table};

/// A per-column override from the generator config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// `bool`, stored as 0/1.
    Bool,
    /// `i32`.
    Int,
    /// `i64`.
    Long,
    /// `f64`.
    Double,
    /// `String`.
    String,
    /// `Vec<u8>`.
    Bytes,
}

impl TypeHint {
    /// Parses a hint name, case-insensitively. `Boolean` is accepted for
    /// `Bool`.
    #[must_use]
    pub fn parse(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            _ => None,
        }
    }
}

/// Base Rust type of a field, before nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostType {
    /// `bool`
    Bool,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f64`
    F64,
    /// `String`
    String,
    /// `Vec<u8>`
    Bytes,
}

impl HostType {
    /// Default host type for an affinity.
    #[must_use]
    pub const fn for_affinity(affinity: Affinity) -> Self {
        match affinity {
            Affinity::Integer => Self::I64,
            Affinity::Real => Self::F64,
            Affinity::Blob => Self::Bytes,
            Affinity::Text | Affinity::Numeric | Affinity::Unknown => Self::String,
        }
    }

    /// Host type selected by a hint.
    #[must_use]
    pub const fn for_hint(hint: TypeHint) -> Self {
        match hint {
            TypeHint::Bool => Self::Bool,
            TypeHint::Int => Self::I32,
            TypeHint::Long => Self::I64,
            TypeHint::Double => Self::F64,
            TypeHint::String => Self::String,
            TypeHint::Bytes => Self::Bytes,
        }
    }

    /// Rust spelling of the type.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::String => "String",
            Self::Bytes => "Vec<u8>",
        }
    }
}

/// Resolved type of one entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    /// Base type.
    pub host: HostType,
    /// Wrapped in `Option` when the column is nullable.
    pub nullable: bool,
}

impl FieldType {
    /// Resolves a column's field type, applying the config's hint for
    /// `"Table.column"` if present.
    ///
    /// # Errors
    ///
    /// [`crate::GenError::InvalidTypeHint`] if the configured hint is unknown.
    pub fn resolve(table: &Table, column: &Column, config: &GeneratorConfig) -> Result<Self> {
        let key = format!("{}.{}", table.name, column.name);
        let host = match config.type_hint(&key)? {
            Some(hint) => HostType::for_hint(hint),
            None => HostType::for_affinity(column.affinity),
        };
        Ok(Self {
            host,
            nullable: column.nullable,
        })
    }

    /// Rust spelling, e.g. `Option<i64>`.
    #[must_use]
    pub fn rust_type(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.host.rust_type())
        } else {
            self.host.rust_type().to_string()
        }
    }
}
