//! Rust source generation.
//!
//! Renders one file holding, per table, the static metadata, an entity
//! struct, its row mapper and its `Entity` impl, followed by a registry
//! over all tables and an `init()` that installs it. Tables are rendered
//! in name order and nothing time-dependent is emitted, so the output is
//! byte-identical for the same schema and config.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::schema::{Column, Table};
use crate::types::FieldType;

/// First line of every generated file.
pub const HEADER: &str = "// @generated by rowcast-gen. Do not edit.";

static NON_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid identifier regex"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel case regex"));
static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid acronym regex"));

const KEYWORDS: [&str; 48] = [
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: [&str; 4] = ["crate", "self", "super", "Self"];

/// Names the generated file imports, declares or uses from the prelude.
/// `Self` is listed because it cannot name a struct at all.
const RESERVED_TYPES: [&str; 20] = [
    "Affinity",
    "ColumnMeta",
    "DataRow",
    "Entity",
    "GeneratedRegistry",
    "MapError",
    "OrmRegistry",
    "RegistryError",
    "RowMapper",
    "TableMeta",
    "Box",
    "Err",
    "None",
    "Ok",
    "Option",
    "Result",
    "Self",
    "Some",
    "String",
    "Vec",
];

struct Field {
    ident: String,
    column: String,
    ty: FieldType,
}

struct TableModel<'a> {
    table: &'a Table,
    struct_name: String,
    snake: String,
    fields: Vec<Field>,
}

/// Renders the generated source for `tables`.
///
/// # Errors
///
/// [`crate::GenError::InvalidTypeHint`] if a configured hint is unknown.
pub fn render(tables: &[Table], config: &GeneratorConfig) -> Result<String> {
    let models = build_models(tables, config)?;
    let runtime = &config.runtime_crate;

    let mut out = String::new();
    out.push_str(&format!(
        "{HEADER}\n\
         \n\
         use {runtime}::registry::{{install, OrmRegistry}};\n\
         use {runtime}::{{\n\
         \x20   Affinity, ColumnMeta, DataRow, Entity, MapError, RegistryError, RowMapper, TableMeta,\n\
         }};\n"
    ));

    for model in &models {
        out.push('\n');
        out.push_str(&render_columns(model));
    }

    out.push_str(&format!(
        "\nstatic TABLES: [TableMeta; {}] = [\n",
        models.len()
    ));
    for model in &models {
        out.push_str(&format!(
            "    TableMeta::new({:?}, {:?}, &{}_COLUMNS),\n",
            model.table.name,
            model.table.type_id,
            model.snake.to_ascii_uppercase()
        ));
    }
    out.push_str("];\n");

    for (index, model) in models.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_table(index, model));
    }

    out.push_str(&render_registry());
    Ok(out)
}

fn build_models<'a>(tables: &'a [Table], config: &GeneratorConfig) -> Result<Vec<TableModel<'a>>> {
    let mut sorted: Vec<&Table> = tables.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut used_types: BTreeSet<String> =
        RESERVED_TYPES.iter().map(|s| (*s).to_string()).collect();
    let mut used_snakes = BTreeSet::new();
    let mut models = Vec::with_capacity(sorted.len());

    for table in sorted {
        let base = config
            .struct_names
            .get(&table.name)
            .cloned()
            .unwrap_or_else(|| struct_name(&table.type_id));
        let struct_name = unique_struct_name(&base, &mut used_types, &mut used_snakes);
        let snake = snake_case(&struct_name);

        let mut used_fields = BTreeSet::new();
        let mut fields = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            fields.push(Field {
                ident: field_ident(column, &mut used_fields),
                column: column.name.clone(),
                ty: FieldType::resolve(table, column, config)?,
            });
        }

        models.push(TableModel {
            table,
            struct_name,
            snake,
            fields,
        });
    }
    Ok(models)
}

fn unique_struct_name(
    base: &str,
    used_types: &mut BTreeSet<String>,
    used_snakes: &mut BTreeSet<String>,
) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    loop {
        let mapper = format!("{candidate}RowMapper");
        let snake = snake_case(&candidate);
        if !used_types.contains(&candidate)
            && !used_types.contains(&mapper)
            && !used_snakes.contains(&snake)
        {
            used_types.insert(candidate.clone());
            used_types.insert(mapper);
            used_snakes.insert(snake);
            return candidate;
        }
        candidate = format!("{base}{n}");
        n += 1;
    }
}

fn field_ident(column: &Column, used: &mut BTreeSet<String>) -> String {
    let base = snake_case(&column.name);
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}_{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    escape_keyword(&candidate)
}

/// Struct name for a type id: alphanumeric runs, each capitalized.
#[must_use]
pub fn struct_name(type_id: &str) -> String {
    let mut name: String = NON_IDENT
        .split(type_id)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect();
    if name.is_empty() {
        name.push_str("Table");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Table");
    }
    name
}

/// Snake case identifier for a column or struct name.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let split = ACRONYM.replace_all(name, "${1}_${2}");
    let split = LOWER_UPPER.replace_all(&split, "${1}_${2}");
    let joined = NON_IDENT.replace_all(&split, "_");
    let mut ident = joined.trim_matches('_').to_ascii_lowercase();
    if ident.is_empty() {
        ident.push_str("field");
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn escape_keyword(ident: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&ident) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

fn render_columns(model: &TableModel<'_>) -> String {
    let columns = &model.table.columns;
    let mut out = format!(
        "static {}_COLUMNS: [ColumnMeta; {}] = [\n",
        model.snake.to_ascii_uppercase(),
        columns.len()
    );
    for column in columns {
        let default = column
            .default_value
            .as_ref()
            .map_or_else(|| "None".to_string(), |d| format!("Some({d:?})"));
        out.push_str(&format!(
            "    ColumnMeta::new({:?}, Affinity::{}, {}, {default}, {}, {}),\n",
            column.name,
            column.affinity.variant_name(),
            column.nullable,
            column.primary_key_ordinal,
            column.auto_increment
        ));
    }
    out.push_str("];\n");
    out
}

fn render_table(index: usize, model: &TableModel<'_>) -> String {
    let name = &model.struct_name;
    let snake = &model.snake;
    let table_name = &model.table.name;
    let type_id = &model.table.type_id;

    let mut struct_fields = String::new();
    let mut mapper_fields = String::new();
    for field in &model.fields {
        struct_fields.push_str(&format!(
            "    pub {}: {},\n",
            field.ident,
            field.ty.rust_type()
        ));
        let getter = if field.ty.nullable { "optional" } else { "required" };
        mapper_fields.push_str(&format!(
            "            {}: row.{getter}({:?})?,\n",
            field.ident, field.column
        ));
    }

    format!(
        "/// Metadata for table `{table_name}`.\n\
         pub fn {snake}_table() -> &'static TableMeta {{\n\
         \x20   &TABLES[{index}]\n\
         }}\n\
         \n\
         /// Row of table `{table_name}`.\n\
         #[derive(Debug, Clone, PartialEq)]\n\
         pub struct {name} {{\n\
         {struct_fields}\
         }}\n\
         \n\
         /// Maps rows of table `{table_name}` into [`{name}`].\n\
         #[derive(Debug, Clone, Copy, Default)]\n\
         pub struct {name}RowMapper;\n\
         \n\
         impl RowMapper<{name}> for {name}RowMapper {{\n\
         \x20   fn map(&self, row: &DataRow) -> Result<{name}, MapError> {{\n\
         \x20       Ok({name} {{\n\
         {mapper_fields}\
         \x20       }})\n\
         \x20   }}\n\
         }}\n\
         \n\
         impl Entity for {name} {{\n\
         \x20   const TYPE_ID: &'static str = {type_id:?};\n\
         \n\
         \x20   fn from_row(row: &DataRow) -> Result<Self, MapError> {{\n\
         \x20       {name}RowMapper.map(row)\n\
         \x20   }}\n\
         }}\n"
    )
}

fn render_registry() -> String {
    "\n\
     /// Registry over every generated table.\n\
     #[derive(Debug, Clone, Copy, Default)]\n\
     pub struct GeneratedRegistry;\n\
     \n\
     impl OrmRegistry for GeneratedRegistry {\n\
     \x20   fn tables(&self) -> &[TableMeta] {\n\
     \x20       &TABLES\n\
     \x20   }\n\
     }\n\
     \n\
     /// Installs [`GeneratedRegistry`] as the process-wide registry.\n\
     ///\n\
     /// # Errors\n\
     ///\n\
     /// Fails if a registry is already installed.\n\
     pub fn init() -> Result<(), RegistryError> {\n\
     \x20   install(&GeneratedRegistry)\n\
     }\n"
        .to_string()
}
