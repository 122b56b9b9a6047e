//! Generator configuration.
//!
//! Loaded from a JSON file; every field is optional:
//!
//! ```json
//! {
//!   "extensions": ["sq", "sqm", "sql"],
//!   "type_hints": { "User.active": "Bool", "User.age": "Int" },
//!   "struct_names": { "user_profile": "Profile" },
//!   "runtime_crate": "rowcast_core"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::types::TypeHint;

/// Settings for reading a schema and rendering code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Schema file extensions, matched case-insensitively.
    pub extensions: Vec<String>,
    /// `"Table.column"` to host type hint.
    pub type_hints: BTreeMap<String, String>,
    /// Table name to entity struct name.
    pub struct_names: BTreeMap<String, String>,
    /// Path of the runtime crate in generated `use` items.
    pub runtime_crate: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["sq".into(), "sqm".into(), "sql".into()],
            type_hints: BTreeMap::new(),
            struct_names: BTreeMap::new(),
            runtime_crate: "rowcast_core".into(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a JSON config.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or an unknown type hint.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, on malformed JSON or an unknown
    /// type hint.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Checks that every type hint is known.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidTypeHint`] for the first unknown hint.
    pub fn validate(&self) -> Result<()> {
        for key in self.type_hints.keys() {
            self.type_hint(key)?;
        }
        Ok(())
    }

    /// The parsed hint for `"Table.column"`, if configured.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidTypeHint`] if the configured hint is unknown.
    pub fn type_hint(&self, key: &str) -> Result<Option<TypeHint>> {
        self.type_hints
            .get(key)
            .map(|hint| {
                TypeHint::parse(hint).ok_or_else(|| GenError::InvalidTypeHint {
                    key: key.to_string(),
                    hint: hint.clone(),
                })
            })
            .transpose()
    }

    /// Whether `path` has one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_object() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.runtime_crate, "rowcast_core");
    }

    #[test]
    fn test_parses_hints_and_names() {
        let config = GeneratorConfig::from_json(
            r#"{"type_hints": {"User.active": "bool"}, "struct_names": {"User": "Account"}}"#,
        )
        .unwrap();
        assert_eq!(config.type_hint("User.active").unwrap(), Some(TypeHint::Bool));
        assert_eq!(config.type_hint("User.name").unwrap(), None);
        assert_eq!(config.struct_names["User"], "Account");
    }

    #[test]
    fn test_unknown_hint_is_rejected() {
        let err = GeneratorConfig::from_json(r#"{"type_hints": {"User.at": "Instant"}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::InvalidTypeHint { ref key, ref hint } if key == "User.at" && hint == "Instant"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GeneratorConfig::from_json("{"),
            Err(GenError::Config(_))
        ));
    }

    #[test]
    fn test_extension_matching() {
        let config = GeneratorConfig::default();
        assert!(config.matches_extension(Path::new("a/b/001.SQM")));
        assert!(config.matches_extension(Path::new("schema.sq")));
        assert!(!config.matches_extension(Path::new("notes.txt")));
        assert!(!config.matches_extension(Path::new("Makefile")));
    }
}
