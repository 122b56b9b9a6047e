//! SQL values: statement arguments and decoded column values.
//!
//! [`SqlValue`] is what goes *into* a statement as a bound parameter.
//! [`ColumnValue`] is what comes *out* of a result row; it only has the
//! storage classes a SQLite-style engine can return.

use std::fmt;

/// A SQL value bound as a statement parameter.
///
/// Values are always bound positionally, never interpolated into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value, bound as 0/1.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Binds any displayable value by its string representation.
    ///
    /// This is the fallback for host types without a native SQL mapping.
    #[must_use]
    pub fn display<T: fmt::Display>(value: T) -> Self {
        Self::Text(value.to_string())
    }

    /// Returns `true` for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Renders the value for logs. Blobs are summarized by length.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Blob(b) => write!(f, "[bytes {}]", b.len()),
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

macro_rules! lossless_int {
    ($($t:ty),*) => {
        $(
            impl ToSqlValue for $t {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

lossless_int!(i32, i16, i8, u32, u16, u8);

/// Values above `i64::MAX` do not fit an integer column and are bound as text.
impl ToSqlValue for u64 {
    fn to_sql_value(self) -> SqlValue {
        i64::try_from(self).map_or_else(|_| SqlValue::display(self), SqlValue::Int)
    }
}

impl ToSqlValue for usize {
    fn to_sql_value(self) -> SqlValue {
        i64::try_from(self).map_or_else(|_| SqlValue::display(self), SqlValue::Int)
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for char {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::display(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

/// A value read back from a result column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// SQL NULL.
    Null,
    /// 64-bit integer.
    Integer(i64),
    /// Double precision float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl ColumnValue {
    /// Returns `true` for [`ColumnValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the storage class, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "INTEGER",
            Self::Real(_) => "REAL",
            Self::Text(_) => "TEXT",
            Self::Blob(_) => "BLOB",
        }
    }
}

impl From<ColumnValue> for SqlValue {
    fn from(value: ColumnValue) -> Self {
        match value {
            ColumnValue::Null => Self::Null,
            ColumnValue::Integer(n) => Self::Int(n),
            ColumnValue::Real(x) => Self::Float(x),
            ColumnValue::Text(s) => Self::Text(s),
            ColumnValue::Blob(b) => Self::Blob(b),
        }
    }
}

/// Conversion from a non-null [`ColumnValue`] into a host type.
///
/// `None` means the stored value has a different storage class.
pub trait FromColumnValue: Sized {
    /// Name of the expected storage class.
    const EXPECTED: &'static str;

    /// Converts a non-null column value.
    fn from_column_value(value: &ColumnValue) -> Option<Self>;
}

impl FromColumnValue for i64 {
    const EXPECTED: &'static str = "INTEGER";

    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromColumnValue for i32 {
    const EXPECTED: &'static str = "INTEGER";

    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Integer(n) => i32::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl FromColumnValue for bool {
    const EXPECTED: &'static str = "INTEGER";

    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Integer(n) => Some(*n != 0),
            _ => None,
        }
    }
}

impl FromColumnValue for f64 {
    const EXPECTED: &'static str = "REAL";

    #[allow(clippy::cast_precision_loss)]
    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Real(x) => Some(*x),
            ColumnValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

/// Numbers are accepted and rendered as text, so untyped
/// columns that stored a number still map onto a `String` field.
impl FromColumnValue for String {
    const EXPECTED: &'static str = "TEXT";

    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Text(s) => Some(s.clone()),
            ColumnValue::Integer(n) => Some(n.to_string()),
            ColumnValue::Real(x) => Some(x.to_string()),
            ColumnValue::Null | ColumnValue::Blob(_) => None,
        }
    }
}

impl FromColumnValue for Vec<u8> {
    const EXPECTED: &'static str = "BLOB";

    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Blob(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl FromColumnValue for ColumnValue {
    const EXPECTED: &'static str = "any";

    fn from_column_value(value: &ColumnValue) -> Option<Self> {
        Some(value.clone())
    }
}
