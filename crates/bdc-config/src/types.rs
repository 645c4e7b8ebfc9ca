/*
 * types.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Core types for build-file variables.

use bdc_template::TemplateError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Variables declared in a build file, and the notebooks that use them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildVariables {
    /// Top-level `variables`, visible to every template in the build.
    pub globals: IndexMap<String, String>,

    /// Settings shared by every notebook.
    pub notebook_defaults: NotebookDefaults,

    /// The `notebooks` section, in file order.
    pub notebooks: Vec<Notebook>,
}

/// The `notebook_defaults` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotebookDefaults {
    /// Destination template for notebooks without their own `dest`.
    pub dest: Option<String>,

    /// Variables merged under every notebook's own variables.
    pub variables: IndexMap<String, String>,
}

/// One entry of the `notebooks` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    /// Source path, relative to the build file's source base.
    pub src: PathBuf,

    /// Destination template (the notebook's own, or the default).
    pub dest: String,

    /// Notebook-local variables.
    pub variables: IndexMap<String, String>,

    /// Whether the notebook is excluded from the build.
    pub skip: bool,
}

/// Errors raised while loading build-file variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The build file could not be read.
    #[error("Cannot read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build file is not valid YAML (or has the wrong shape).
    #[error("Invalid build file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A variable name contains characters outside `[A-Za-z0-9_]`.
    #[error("Invalid variable name \"{name}\" in {section}; names may contain only letters, digits and underscores")]
    InvalidVariableName { name: String, section: String },

    /// A variable's value is a mapping or a sequence.
    #[error("Variable \"{name}\" in {section} must have a scalar value")]
    NonScalarVariable { name: String, section: String },

    /// A notebook has no `dest` and there is no default.
    #[error("Notebook \"{}\": missing \"dest\", and no default \"dest\" in notebook_defaults", src.display())]
    MissingDestination { src: PathBuf },

    /// A boolean field holds something other than a recognized boolean.
    #[error("Bad boolean value: \"{value}\"")]
    BadBoolean { value: String },

    /// A template in the build file failed to compile or expand.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// Shapes as they appear in YAML. Unknown keys are ignored.

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawBuild {
    #[serde(default)]
    pub variables: Option<IndexMap<String, serde_yaml::Value>>,
    #[serde(default)]
    pub notebook_defaults: Option<RawNotebookDefaults>,
    #[serde(default)]
    pub notebooks: Option<Vec<RawNotebook>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawNotebookDefaults {
    #[serde(default)]
    pub dest: Option<String>,
    #[serde(default)]
    pub variables: Option<IndexMap<String, serde_yaml::Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNotebook {
    pub src: String,
    #[serde(default)]
    pub dest: Option<String>,
    #[serde(default)]
    pub variables: Option<IndexMap<String, serde_yaml::Value>>,
    #[serde(default)]
    pub skip: Option<serde_yaml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidVariableName {
            name: "a-b".to_string(),
            section: "variables".to_string(),
        };
        assert!(err.to_string().starts_with("Invalid variable name \"a-b\" in variables"));

        let err = ConfigError::MissingDestination {
            src: PathBuf::from("01-Intro.py"),
        };
        assert!(err.to_string().starts_with("Notebook \"01-Intro.py\": missing \"dest\""));
    }

    #[test]
    fn test_template_errors_pass_through() {
        let err = ConfigError::from(TemplateError::InvalidDestination {
            dest: "a@b".to_string(),
        });
        assert_eq!(
            err.to_string(),
            TemplateError::InvalidDestination {
                dest: "a@b".to_string()
            }
            .to_string()
        );
    }
}
