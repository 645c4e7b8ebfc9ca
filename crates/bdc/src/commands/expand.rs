/*
 * expand.rs
 * Copyright (c) 2025 Databricks Education Team
 *
 * Expand command implementation
 */

//! Expand command implementation.
//!
//! Builds an environment from (in order) path built-ins, `-B` built-ins,
//! build-file globals and `-D` globals, then expands one template.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use tracing::debug;

use bdc_config::BuildVariables;
use bdc_template::{Environment, Template, path_builtins};

use super::parse_assignment;

/// Arguments for the expand command
#[derive(Debug, Default)]
pub struct ExpandArgs {
    /// Inline template text
    pub template: Option<String>,
    /// Template file
    pub file: Option<PathBuf>,
    /// Build file supplying global variables
    pub vars: Option<PathBuf>,
    /// `NAME=VALUE` globals
    pub define: Vec<String>,
    /// `NAME=VALUE` built-ins
    pub builtin: Vec<String>,
    /// Source path for path built-ins
    pub source: Option<PathBuf>,
    /// Lenient expansion
    pub safe: bool,
}

/// Execute the expand command
pub fn execute(args: ExpandArgs) -> Result<()> {
    let output = expand(&args)?;
    println!("{}", output);
    Ok(())
}

fn expand(args: &ExpandArgs) -> Result<String> {
    let template = load_template(args)?;
    let env = build_environment(args)?;

    debug!(
        variables = ?template.variables(),
        safe = args.safe,
        "expanding template"
    );

    let output = if args.safe {
        template.safe_substitute(&env)?
    } else {
        template.substitute(&env)?
    };
    Ok(output)
}

fn load_template(args: &ExpandArgs) -> Result<Template> {
    match (&args.template, &args.file) {
        (Some(text), None) => Ok(Template::compile(text)?),
        (None, Some(path)) => Template::compile_from_file(path)
            .with_context(|| format!("Failed to load template {}", path.display())),
        (Some(_), Some(_)) => bail!("Give either a TEMPLATE argument or --file, not both"),
        (None, None) => bail!("No template given; pass TEMPLATE or --file"),
    }
}

fn build_environment(args: &ExpandArgs) -> Result<Environment> {
    let mut builtins = IndexMap::new();
    if let Some(source) = &args.source {
        builtins.extend(path_builtins(source, true));
    }
    for assignment in &args.builtin {
        let (name, value) = parse_assignment(assignment)?;
        builtins.insert(name, value);
    }

    let mut env = match &args.vars {
        Some(path) => BuildVariables::from_path(path)
            .with_context(|| format!("Failed to load variables from {}", path.display()))?
            .environment(&builtins),
        None => Environment::with_builtins(builtins),
    };

    for assignment in &args.define {
        let (name, value) = parse_assignment(assignment)?;
        env.declare_global(name, value);
    }

    Ok(env)
}
