//! Schema source reading and DDL extraction.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"));

/// Statement heads kept by [`extract_ddl`], matched in the first 128
/// lower-cased characters.
const DDL_HEADS: [&str; 3] = ["create table", "create index", "alter table"];

/// Where the schema comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A directory of schema and migration files, replayed in memory.
    Directory(PathBuf),
    /// An existing database file, introspected read-only.
    Snapshot(PathBuf),
}

/// Collects schema files under `root`, recursively, sorted by path.
///
/// # Errors
///
/// [`GenError::SchemaDirNotFound`] if `root` is not a directory, or an IO
/// error while listing it.
pub fn collect_files(root: &Path, config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(GenError::SchemaDirNotFound(root.to_path_buf()));
    }
    let mut files = Vec::new();
    walk(root, config, &mut files)?;
    files.sort();
    info!(root = %root.display(), count = files.len(), "Found schema files");
    Ok(files)
}

fn walk(dir: &Path, config: &GeneratorConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| GenError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| GenError::io(dir, e))?.path();
        if path.is_dir() {
            walk(&path, config, files)?;
        } else if config.matches_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Removes `/* ... */` blocks (across lines) and `--` line comments.
#[must_use]
pub fn strip_comments(input: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(input, " ");
    without_blocks
        .lines()
        .map(|line| line.find("--").map_or(line, |i| &line[..i]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits one file's text into the DDL statements worth replaying.
///
/// Each kept statement is trimmed and re-terminated with `;`.
#[must_use]
pub fn extract_ddl(text: &str) -> Vec<String> {
    strip_comments(text)
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            let head: String = s.chars().take(128).collect::<String>().to_lowercase();
            DDL_HEADS.iter().any(|h| head.contains(h))
        })
        .map(|s| format!("{s};"))
        .collect()
}

/// Reads every schema file under `root` and returns its DDL in file order,
/// then textual order.
///
/// # Errors
///
/// Same as [`collect_files`], plus IO errors reading a file.
pub fn read_ddl(root: &Path, config: &GeneratorConfig) -> Result<Vec<String>> {
    let mut ddl = Vec::new();
    for file in collect_files(root, config)? {
        let text = fs::read_to_string(&file).map_err(|e| GenError::io(&file, e))?;
        let statements = extract_ddl(&text);
        debug!(file = %file.display(), statements = statements.len(), "Extracted DDL");
        ddl.extend(statements);
    }
    info!(count = ddl.len(), "Extracted DDL statements");
    Ok(ddl)
}
