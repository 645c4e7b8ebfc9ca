/*
 * builtins.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Built-in variables derived from a notebook's source path.

use crate::error::{TemplateError, TemplateResult};
use indexmap::IndexMap;
use std::path::Path;

/// Language name reported for unrecognized extensions.
pub const UNKNOWN_LANG: &str = "???";

/// Map a file extension (with or without the leading dot) to a notebook language.
pub fn lang_for_extension(extension: &str) -> Option<&'static str> {
    match extension.trim_start_matches('.') {
        "py" => Some("Python"),
        "r" => Some("R"),
        "scala" => Some("Scala"),
        "sql" => Some("SQL"),
        _ => None,
    }
}

/// Compute the path-derived built-ins for `src`.
///
/// - `basename`: file name without extension
/// - `extension`: extension without the dot
/// - `filename`: file name with extension
/// - `source_path_no_ext`: `src` without its extension (relative paths only)
/// - `lang`: notebook language, when `allow_lang` is set
pub fn path_builtins(src: &Path, allow_lang: bool) -> IndexMap<String, String> {
    let filename = src
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let basename = src
        .file_stem()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = src
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut vars = IndexMap::new();
    vars.insert("basename".to_string(), basename);
    vars.insert("extension".to_string(), extension.clone());
    vars.insert("filename".to_string(), filename);

    if src.is_relative() {
        let no_ext = src.with_extension("");
        vars.insert(
            "source_path_no_ext".to_string(),
            no_ext.to_string_lossy().into_owned(),
        );
    }

    if allow_lang {
        let lang = lang_for_extension(&extension).unwrap_or(UNKNOWN_LANG);
        vars.insert("lang".to_string(), lang.to_string());
    }

    vars
}

/// Reject destination templates containing `@`, which marks protected
/// variable references during expansion.
pub fn validate_destination(dest: &str) -> TemplateResult<()> {
    if dest.contains('@') {
        return Err(TemplateError::InvalidDestination {
            dest: dest.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_python_notebook() {
        let vars = path_builtins(Path::new("Module-1/01-Why-Spark.py"), true);
        assert_eq!(vars["basename"], "01-Why-Spark");
        assert_eq!(vars["extension"], "py");
        assert_eq!(vars["filename"], "01-Why-Spark.py");
        assert_eq!(vars["source_path_no_ext"], "Module-1/01-Why-Spark");
        assert_eq!(vars["lang"], "Python");
        let names: Vec<&str> = vars.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["basename", "extension", "filename", "source_path_no_ext", "lang"]
        );
    }

    #[test]
    fn test_absolute_path_has_no_source_path() {
        let vars = path_builtins(Path::new("/courses/intro.scala"), true);
        assert!(!vars.contains_key("source_path_no_ext"));
        assert_eq!(vars["lang"], "Scala");
    }

    #[test]
    fn test_unknown_language_and_no_lang() {
        let vars = path_builtins(Path::new("notes.txt"), true);
        assert_eq!(vars["lang"], UNKNOWN_LANG);

        let vars = path_builtins(Path::new("notes.txt"), false);
        assert!(!vars.contains_key("lang"));
    }

    #[test]
    fn test_no_extension() {
        let vars = path_builtins(Path::new("README"), false);
        assert_eq!(vars["basename"], "README");
        assert_eq!(vars["extension"], "");
        assert_eq!(vars["filename"], "README");
    }

    #[test]
    fn test_lang_for_extension() {
        assert_eq!(lang_for_extension(".py"), Some("Python"));
        assert_eq!(lang_for_extension("scala"), Some("Scala"));
        assert_eq!(lang_for_extension("java"), None);
    }

    #[test]
    fn test_validate_destination() {
        assert!(validate_destination("${basename}.py").is_ok());
        assert!(matches!(
            validate_destination("a@b"),
            Err(TemplateError::InvalidDestination { .. })
        ));
    }
}
