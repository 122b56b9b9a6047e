//! End-to-end generator runs over schema directories and snapshots.

use std::fs;
use std::path::Path;

use rowcast_gen::{generate, load_schema, GenError, GeneratorConfig, SchemaSource};
use rowcast_orm::{SqlDriver, SqliteDriver};
use tempfile::TempDir;

fn schema_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("migrations")).unwrap();
    fs::write(
        root.join("a.sq"),
        "-- users\n\
         CREATE TABLE user (\n\
           id INTEGER PRIMARY KEY AUTOINCREMENT,\n\
           name TEXT NOT NULL,\n\
           age INTEGER\n\
         );\n\
         \n\
         selectAll:\n\
         SELECT * FROM user;\n",
    )
    .unwrap();
    fs::write(
        root.join("b.sq"),
        "CREATE TABLE post (\n\
           id INTEGER PRIMARY KEY,\n\
           user_id INTEGER NOT NULL REFERENCES user(id),\n\
           /* body may be long */\n\
           body TEXT\n\
         );\n\
         CREATE INDEX post_user ON post(user_id);\n",
    )
    .unwrap();
    fs::write(
        root.join("migrations/1.sqm"),
        "CREATE TABLE tag (id INTEGER PRIMARY KEY, label TEXT);\n\
         CREATE TABLE broken (;\n",
    )
    .unwrap();
    fs::write(
        root.join("migrations/2.sqm"),
        "CREATE TABLE note (id INTEGER PRIMARY KEY AUTOINCREMENT, score REAL, raw BLOB);\n",
    )
    .unwrap();
    fs::write(root.join("notes.txt"), "CREATE TABLE ignored (id INTEGER);").unwrap();
    dir
}

fn directory(dir: &TempDir) -> SchemaSource {
    SchemaSource::Directory(dir.path().to_path_buf())
}

#[test]
fn test_malformed_statement_is_skipped_and_reported() {
    let dir = schema_dir();
    let (tables, report) = load_schema(&directory(&dir), &GeneratorConfig::default()).unwrap();

    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["note", "post", "tag", "user"]);

    let report = report.unwrap();
    assert_eq!(report.applied, 5);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].sql, "CREATE TABLE broken (;");
}

#[test]
fn test_introspected_columns() {
    let dir = schema_dir();
    let (tables, _) = load_schema(&directory(&dir), &GeneratorConfig::default()).unwrap();
    let user = tables.iter().find(|t| t.name == "user").unwrap();
    assert_eq!(user.type_id, "User");
    assert!(user.columns[0].auto_increment);
    assert!(!user.columns[1].nullable);
    assert!(user.columns[2].nullable);

    let post = tables.iter().find(|t| t.name == "post").unwrap();
    assert!(!post.columns[0].auto_increment);
}

#[test]
fn test_generated_source_is_deterministic_and_sorted() {
    let dir = schema_dir();
    let config = GeneratorConfig::default();
    let first = generate(&directory(&dir), &config).unwrap();
    let second = generate(&directory(&dir), &config).unwrap();
    assert_eq!(first, second);

    let positions: Vec<usize> = ["pub struct Note {", "pub struct Post {", "pub struct Tag {", "pub struct User {"]
        .iter()
        .map(|needle| first.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(first.contains("static TABLES: [TableMeta; 4] = ["));
    assert!(first.contains("    pub name: String,\n"));
    assert!(first.contains("    pub raw: Option<Vec<u8>>,\n"));
    assert!(first.contains("    pub score: Option<f64>,\n"));
    assert!(!first.contains("ignored"));
}

#[test]
fn test_type_hints_change_field_types() {
    let dir = schema_dir();
    let config = GeneratorConfig::from_json(
        r#"{ "type_hints": { "user.age": "Int", "tag.label": "Bytes" },
             "struct_names": { "user": "Member" } }"#,
    )
    .unwrap();
    let code = generate(&directory(&dir), &config).unwrap();
    assert!(code.contains("pub struct Member {"));
    assert!(code.contains("    pub age: Option<i32>,\n"));
    assert!(code.contains("    pub label: Option<Vec<u8>>,\n"));
    assert!(code.contains("    const TYPE_ID: &'static str = \"User\";\n"));
}

#[test]
fn test_snapshot_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    {
        let driver = SqliteDriver::open(&path).unwrap();
        driver
            .execute("CREATE TABLE item (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL)")
            .unwrap();
        driver.execute("CREATE TABLE android_metadata (locale TEXT)").unwrap();
    }

    let source = SchemaSource::Snapshot(path);
    let (tables, report) = load_schema(&source, &GeneratorConfig::default()).unwrap();
    assert!(report.is_none());
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "item");
    assert!(tables[0].columns[0].auto_increment);

    let code = generate(&source, &GeneratorConfig::default()).unwrap();
    assert!(code.contains("pub struct Item {"));
    assert!(code.contains("            title: row.required(\"title\")?,\n"));
}

#[test]
fn test_missing_inputs() {
    let config = GeneratorConfig::default();
    let missing_dir = SchemaSource::Directory(Path::new("/nonexistent/rowcast").to_path_buf());
    assert!(matches!(
        load_schema(&missing_dir, &config).unwrap_err(),
        GenError::SchemaDirNotFound(_)
    ));

    let missing_db = SchemaSource::Snapshot(Path::new("/nonexistent/rowcast.db").to_path_buf());
    assert!(matches!(
        load_schema(&missing_db, &config).unwrap_err(),
        GenError::SnapshotNotFound(_)
    ));
}
