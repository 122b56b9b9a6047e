//! Table and column metadata.
//!
//! [`TableMeta`] and [`ColumnMeta`] describe a table the way the generator
//! saw it after replaying the schema. Generated code declares them as
//! `static` items, so every constructor here is `const`; owned variants
//! exist for metadata assembled at run time.

use std::borrow::Cow;
use std::fmt;

/// Storage category of a column, derived from its declared type.
///
/// See [SQLite type affinity](https://www.sqlite.org/datatype3.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affinity {
    /// 64-bit signed integer storage.
    Integer,
    /// Floating point storage.
    Real,
    /// Text storage.
    Text,
    /// Raw bytes.
    Blob,
    /// Mixed numeric storage; read back as text.
    Numeric,
    /// No declared type.
    Unknown,
}

impl Affinity {
    /// Resolves the affinity of a declared column type.
    ///
    /// Matching is case-insensitive. An exact affinity name wins, otherwise
    /// the substring rules apply in order: `INT`, then
    /// `CHAR`/`CLOB`/`TEXT`, then `BLOB`, then `REAL`/`FLOA`/`DOUB`, and
    /// anything else is [`Affinity::Numeric`]. A missing or blank type is
    /// [`Affinity::Unknown`].
    #[must_use]
    pub fn from_declared_type(declared: Option<&str>) -> Self {
        let Some(declared) = declared.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Unknown;
        };
        let upper = declared.to_ascii_uppercase();

        match upper.as_str() {
            "INTEGER" => return Self::Integer,
            "REAL" => return Self::Real,
            "TEXT" => return Self::Text,
            "BLOB" => return Self::Blob,
            "NUMERIC" => return Self::Numeric,
            _ => {}
        }

        if upper.contains("INT") {
            Self::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Self::Text
        } else if upper.contains("BLOB") {
            Self::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Self::Real
        } else {
            Self::Numeric
        }
    }

    /// Returns the upper-case SQL name of this affinity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Numeric => "NUMERIC",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns the variant name as written in Rust source.
    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Real => "Real",
            Self::Text => "Text",
            Self::Blob => "Blob",
            Self::Numeric => "Numeric",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name, unique within its table.
    pub name: Cow<'static, str>,
    /// Storage affinity.
    pub affinity: Affinity,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Raw SQL default expression.
    pub default_value: Option<Cow<'static, str>>,
    /// 0 when not part of the primary key, otherwise the 1-based position.
    pub primary_key_ordinal: u32,
    /// Set only on an `INTEGER PRIMARY KEY AUTOINCREMENT` column.
    pub auto_increment: bool,
}

impl ColumnMeta {
    /// Creates column metadata from static strings.
    #[must_use]
    pub const fn new(
        name: &'static str,
        affinity: Affinity,
        nullable: bool,
        default_value: Option<&'static str>,
        primary_key_ordinal: u32,
        auto_increment: bool,
    ) -> Self {
        let default_value = match default_value {
            Some(d) => Some(Cow::Borrowed(d)),
            None => None,
        };
        Self {
            name: Cow::Borrowed(name),
            affinity,
            nullable,
            default_value,
            primary_key_ordinal,
            auto_increment,
        }
    }

    /// Creates a nullable, non-key column with an owned name.
    #[must_use]
    pub fn owned(name: impl Into<String>, affinity: Affinity) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            affinity,
            nullable: true,
            default_value: None,
            primary_key_ordinal: 0,
            auto_increment: false,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the primary key position.
    #[must_use]
    pub fn primary_key(mut self, ordinal: u32) -> Self {
        self.primary_key_ordinal = ordinal;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the raw default expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default_value = Some(Cow::Owned(expr.into()));
        self
    }

    /// Returns whether the column belongs to the primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.primary_key_ordinal > 0
    }
}

/// Metadata for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    /// SQL table name.
    pub table_name: Cow<'static, str>,
    /// Stable registry identifier.
    pub type_id: Cow<'static, str>,
    /// Columns in declaration order.
    pub columns: Cow<'static, [ColumnMeta]>,
}

impl TableMeta {
    /// Creates table metadata from static data.
    #[must_use]
    pub const fn new(
        table_name: &'static str,
        type_id: &'static str,
        columns: &'static [ColumnMeta],
    ) -> Self {
        Self {
            table_name: Cow::Borrowed(table_name),
            type_id: Cow::Borrowed(type_id),
            columns: Cow::Borrowed(columns),
        }
    }

    /// Creates table metadata from owned data.
    #[must_use]
    pub fn owned(
        table_name: impl Into<String>,
        type_id: impl Into<String>,
        columns: Vec<ColumnMeta>,
    ) -> Self {
        Self {
            table_name: Cow::Owned(table_name.into()),
            type_id: Cow::Owned(type_id.into()),
            columns: Cow::Owned(columns),
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_ref())
    }

    /// Returns the primary key columns ordered by their key position.
    #[must_use]
    pub fn primary_key(&self) -> Vec<&ColumnMeta> {
        let mut keys: Vec<&ColumnMeta> =
            self.columns.iter().filter(|c| c.is_primary_key()).collect();
        keys.sort_by_key(|c| c.primary_key_ordinal);
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static USERS_COLUMNS: [ColumnMeta; 2] = [
        ColumnMeta::new("id", Affinity::Integer, false, None, 1, true),
        ColumnMeta::new("name", Affinity::Text, false, Some("''"), 0, false),
    ];
    static USERS: TableMeta = TableMeta::new("users", "Users", &USERS_COLUMNS);

    #[test]
    fn test_exact_affinity_names() {
        assert_eq!(Affinity::from_declared_type(Some("integer")), Affinity::Integer);
        assert_eq!(Affinity::from_declared_type(Some("NUMERIC")), Affinity::Numeric);
        assert_eq!(Affinity::from_declared_type(Some("Blob")), Affinity::Blob);
    }

    #[test]
    fn test_substring_rules() {
        assert_eq!(Affinity::from_declared_type(Some("BIGINT")), Affinity::Integer);
        assert_eq!(Affinity::from_declared_type(Some("VARCHAR(255)")), Affinity::Text);
        assert_eq!(Affinity::from_declared_type(Some("CLOB")), Affinity::Text);
        assert_eq!(Affinity::from_declared_type(Some("DOUBLE PRECISION")), Affinity::Real);
        assert_eq!(Affinity::from_declared_type(Some("FLOAT")), Affinity::Real);
        assert_eq!(Affinity::from_declared_type(Some("DECIMAL(10,2)")), Affinity::Numeric);
        assert_eq!(Affinity::from_declared_type(Some("BOOLEAN")), Affinity::Numeric);
    }

    #[test]
    fn test_substring_precedence() {
        // "INT" is checked before "CHAR".
        assert_eq!(Affinity::from_declared_type(Some("CHARINT")), Affinity::Integer);
        // "POINT" contains "INT".
        assert_eq!(Affinity::from_declared_type(Some("FLOATING POINT")), Affinity::Integer);
    }

    #[test]
    fn test_missing_type_is_unknown() {
        assert_eq!(Affinity::from_declared_type(None), Affinity::Unknown);
        assert_eq!(Affinity::from_declared_type(Some("  ")), Affinity::Unknown);
    }

    #[test]
    fn test_static_table_meta() {
        assert_eq!(USERS.table_name, "users");
        assert_eq!(USERS.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(USERS.column("name").unwrap().default_value.as_deref(), Some("''"));
        assert!(USERS.column("missing").is_none());
    }

    #[test]
    fn test_primary_key_order() {
        let table = TableMeta::owned(
            "pairs",
            "Pairs",
            vec![
                ColumnMeta::owned("b", Affinity::Integer).primary_key(2),
                ColumnMeta::owned("note", Affinity::Text),
                ColumnMeta::owned("a", Affinity::Integer).primary_key(1),
            ],
        );
        let keys: Vec<&str> = table.primary_key().iter().map(|c| c.name.as_ref()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
