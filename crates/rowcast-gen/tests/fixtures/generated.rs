// @generated by rowcast-gen. Do not edit.

use rowcast_core::registry::{install, OrmRegistry};
use rowcast_core::{
    Affinity, ColumnMeta, DataRow, Entity, MapError, RegistryError, RowMapper, TableMeta,
};

static ITEM_COLUMNS: [ColumnMeta; 5] = [
    ColumnMeta::new("id", Affinity::Integer, false, None, 1, false),
    ColumnMeta::new("type", Affinity::Text, false, None, 0, false),
    ColumnMeta::new("price", Affinity::Real, true, None, 0, false),
    ColumnMeta::new("image", Affinity::Blob, true, None, 0, false),
    ColumnMeta::new("extra", Affinity::Unknown, true, None, 0, false),
];

static RESULT2_COLUMNS: [ColumnMeta; 2] = [
    ColumnMeta::new("code", Affinity::Integer, false, None, 0, false),
    ColumnMeta::new("detail", Affinity::Text, true, None, 0, false),
];

static STRING2_COLUMNS: [ColumnMeta; 1] = [
    ColumnMeta::new("value", Affinity::Text, true, None, 0, false),
];

static USER_COLUMNS: [ColumnMeta; 3] = [
    ColumnMeta::new("id", Affinity::Integer, true, None, 1, true),
    ColumnMeta::new("name", Affinity::Text, false, Some("'anon'"), 0, false),
    ColumnMeta::new("age", Affinity::Integer, true, None, 0, false),
];

static TABLES: [TableMeta; 4] = [
    TableMeta::new("item", "Item", &ITEM_COLUMNS),
    TableMeta::new("result", "Result", &RESULT2_COLUMNS),
    TableMeta::new("string", "String", &STRING2_COLUMNS),
    TableMeta::new("user", "User", &USER_COLUMNS),
];

/// Metadata for table `item`.
pub fn item_table() -> &'static TableMeta {
    &TABLES[0]
}

/// Row of table `item`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub r#type: String,
    pub price: Option<f64>,
    pub image: Option<Vec<u8>>,
    pub extra: Option<String>,
}

/// Maps rows of table `item` into [`Item`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemRowMapper;

impl RowMapper<Item> for ItemRowMapper {
    fn map(&self, row: &DataRow) -> Result<Item, MapError> {
        Ok(Item {
            id: row.required("id")?,
            r#type: row.required("type")?,
            price: row.optional("price")?,
            image: row.optional("image")?,
            extra: row.optional("extra")?,
        })
    }
}

impl Entity for Item {
    const TYPE_ID: &'static str = "Item";

    fn from_row(row: &DataRow) -> Result<Self, MapError> {
        ItemRowMapper.map(row)
    }
}

/// Metadata for table `result`.
pub fn result2_table() -> &'static TableMeta {
    &TABLES[1]
}

/// Row of table `result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Result2 {
    pub code: i64,
    pub detail: Option<String>,
}

/// Maps rows of table `result` into [`Result2`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Result2RowMapper;

impl RowMapper<Result2> for Result2RowMapper {
    fn map(&self, row: &DataRow) -> Result<Result2, MapError> {
        Ok(Result2 {
            code: row.required("code")?,
            detail: row.optional("detail")?,
        })
    }
}

impl Entity for Result2 {
    const TYPE_ID: &'static str = "Result";

    fn from_row(row: &DataRow) -> Result<Self, MapError> {
        Result2RowMapper.map(row)
    }
}

/// Metadata for table `string`.
pub fn string2_table() -> &'static TableMeta {
    &TABLES[2]
}

/// Row of table `string`.
#[derive(Debug, Clone, PartialEq)]
pub struct String2 {
    pub value: Option<String>,
}

/// Maps rows of table `string` into [`String2`].
#[derive(Debug, Clone, Copy, Default)]
pub struct String2RowMapper;

impl RowMapper<String2> for String2RowMapper {
    fn map(&self, row: &DataRow) -> Result<String2, MapError> {
        Ok(String2 {
            value: row.optional("value")?,
        })
    }
}

impl Entity for String2 {
    const TYPE_ID: &'static str = "String";

    fn from_row(row: &DataRow) -> Result<Self, MapError> {
        String2RowMapper.map(row)
    }
}

/// Metadata for table `user`.
pub fn user_table() -> &'static TableMeta {
    &TABLES[3]
}

/// Row of table `user`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub age: Option<i64>,
}

/// Maps rows of table `user` into [`User`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRowMapper;

impl RowMapper<User> for UserRowMapper {
    fn map(&self, row: &DataRow) -> Result<User, MapError> {
        Ok(User {
            id: row.optional("id")?,
            name: row.required("name")?,
            age: row.optional("age")?,
        })
    }
}

impl Entity for User {
    const TYPE_ID: &'static str = "User";

    fn from_row(row: &DataRow) -> Result<Self, MapError> {
        UserRowMapper.map(row)
    }
}

/// Registry over every generated table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedRegistry;

impl OrmRegistry for GeneratedRegistry {
    fn tables(&self) -> &[TableMeta] {
        &TABLES
    }
}

/// Installs [`GeneratedRegistry`] as the process-wide registry.
///
/// # Errors
///
/// Fails if a registry is already installed.
pub fn init() -> Result<(), RegistryError> {
    install(&GeneratedRegistry)
}
