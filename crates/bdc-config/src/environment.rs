/*
 * environment.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Loading build files and layering their variables into environments.

use crate::convert::{bool_from_yaml, convert_variables};
use crate::types::{
    BuildVariables, ConfigError, ConfigResult, Notebook, NotebookDefaults, RawBuild,
};
use bdc_template::{
    Environment, POST_PARSE_VARIABLES, Template, path_builtins, validate_destination,
};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::debug;

impl BuildVariables {
    /// Parse the variable-bearing sections of a build file.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let raw: RawBuild = if yaml.trim().is_empty() {
            RawBuild::default()
        } else {
            serde_yaml::from_str::<Option<RawBuild>>(yaml)?.unwrap_or_default()
        };

        let globals = convert_variables("variables", raw.variables)?;

        let raw_defaults = raw.notebook_defaults.unwrap_or_default();
        let notebook_defaults = NotebookDefaults {
            dest: raw_defaults.dest,
            variables: convert_variables("notebook_defaults", raw_defaults.variables)?,
        };

        let mut notebooks = Vec::new();
        for raw_nb in raw.notebooks.unwrap_or_default() {
            let src = PathBuf::from(&raw_nb.src);
            let section = format!("notebook \"{}\"", raw_nb.src);
            let Some(dest) = raw_nb.dest.or_else(|| notebook_defaults.dest.clone()) else {
                return Err(ConfigError::MissingDestination { src });
            };
            let skip = match &raw_nb.skip {
                Some(value) => bool_from_yaml(value)?,
                None => false,
            };
            notebooks.push(Notebook {
                src,
                dest,
                variables: convert_variables(&section, raw_nb.variables)?,
                skip,
            });
        }

        debug!(
            globals = globals.len(),
            notebooks = notebooks.len(),
            "loaded build variables"
        );

        Ok(BuildVariables {
            globals,
            notebook_defaults,
            notebooks,
        })
    }

    /// Read and parse a build file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// The build-wide environment: `builtins` plus the global variables.
    pub fn environment(&self, builtins: &IndexMap<String, String>) -> Environment {
        let mut env = Environment::with_builtins(builtins.clone());
        env.extend_globals(self.globals.clone());
        env
    }

    /// The environment for one notebook.
    ///
    /// Adds the notebook's path built-ins, then layers the default notebook
    /// variables and the notebook's own variables as locals.
    pub fn notebook_environment(
        &self,
        builtins: &IndexMap<String, String>,
        notebook: &Notebook,
    ) -> Environment {
        let mut env = self.environment(builtins);
        for (name, value) in path_builtins(&notebook.src, true) {
            env.set_builtin(name, value);
        }
        env.extend_locals(self.notebook_defaults.variables.clone());
        env.extend_locals(notebook.variables.clone());
        env
    }

    /// Expand a notebook's destination as far as possible at load time.
    ///
    /// Tokens that reference [`POST_PARSE_VARIABLES`] are left in place for a
    /// later pass; every other variable is expanded, with undefined names
    /// becoming empty. The result is itself a template.
    pub fn expand_destination(
        &self,
        builtins: &IndexMap<String, String>,
        notebook: &Notebook,
    ) -> ConfigResult<String> {
        validate_destination(&notebook.dest)?;

        let env = self.notebook_environment(builtins, notebook);
        let template = Template::compile(&notebook.dest)?;
        Ok(template.partial_substitute(&env, &POST_PARSE_VARIABLES)?)
    }
}
