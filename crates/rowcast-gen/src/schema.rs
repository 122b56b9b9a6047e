//! Introspected schema model.

use rowcast_core::{Affinity, ColumnMeta, TableMeta};
use serde::{Serialize, Serializer};

/// A column as read from the materialized schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared type text; `None` when the declaration has no type.
    pub declared_type: Option<String>,
    /// Affinity derived from `declared_type`.
    #[serde(serialize_with = "serialize_affinity")]
    pub affinity: Affinity,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Raw default expression.
    pub default_value: Option<String>,
    /// 0 when not part of the primary key, otherwise the 1-based position.
    pub primary_key_ordinal: u32,
    /// Set on the single `INTEGER PRIMARY KEY AUTOINCREMENT` column.
    pub auto_increment: bool,
}

impl Column {
    /// Creates a nullable, non-key column; the affinity follows the declared type.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: Option<&str>) -> Self {
        let declared_type = declared_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self {
            name: name.into(),
            affinity: Affinity::from_declared_type(declared_type.as_deref()),
            declared_type,
            nullable: true,
            default_value: None,
            primary_key_ordinal: 0,
            auto_increment: false,
        }
    }

    /// Runtime metadata for this column.
    #[must_use]
    pub fn to_meta(&self) -> ColumnMeta {
        let mut meta = ColumnMeta::owned(self.name.clone(), self.affinity)
            .primary_key(self.primary_key_ordinal);
        meta.nullable = self.nullable;
        meta.auto_increment = self.auto_increment;
        meta.default_value = self.default_value.clone().map(Into::into);
        meta
    }
}

/// A table as read from the materialized schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Stable registry id derived from `name`.
    pub type_id: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates a table; the type id is derived from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let name = name.into();
        Self {
            type_id: type_id_for(&name),
            name,
            columns,
        }
    }

    /// Primary key columns ordered by key position.
    #[must_use]
    pub fn primary_key(&self) -> Vec<&Column> {
        let mut keys: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.primary_key_ordinal > 0)
            .collect();
        keys.sort_by_key(|c| c.primary_key_ordinal);
        keys
    }

    /// The column that can carry the auto-increment flag: the only key
    /// column, with ordinal 1 and INTEGER affinity.
    #[must_use]
    pub fn auto_increment_candidate(&self) -> Option<&Column> {
        match self.primary_key().as_slice() {
            [only] if only.primary_key_ordinal == 1 && only.affinity == Affinity::Integer => {
                Some(*only)
            }
            _ => None,
        }
    }

    /// Runtime metadata for this table.
    #[must_use]
    pub fn to_meta(&self) -> TableMeta {
        TableMeta::owned(
            self.name.clone(),
            self.type_id.clone(),
            self.columns.iter().map(Column::to_meta).collect(),
        )
    }
}

/// Type id for a table name: the first character upper-cased, the rest
/// unchanged.
#[must_use]
pub fn type_id_for(table_name: &str) -> String {
    let mut chars = table_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn serialize_affinity<S: Serializer>(
    affinity: &Affinity,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(affinity.as_str())
}
