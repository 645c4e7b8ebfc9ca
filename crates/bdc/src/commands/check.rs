/*
 * check.rs
 * Copyright (c) 2025 Databricks Education Team
 *
 * Check command implementation
 */

//! Compile every notebook destination in a build file and report the ones
//! that do not parse.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use bdc_config::BuildVariables;
use bdc_template::{Template, TemplateError, validate_destination};

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    /// Build file to check
    pub build_file: PathBuf,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let build = BuildVariables::from_path(&args.build_file)
        .with_context(|| format!("Failed to load {}", args.build_file.display()))?;

    let problems = check(&build);
    for (src, err) in &problems {
        eprintln!("{}:", src.display());
        eprint!("{}", err.to_report());
    }

    if !problems.is_empty() {
        bail!(
            "{} of {} notebook destination(s) failed to compile",
            problems.len(),
            build.notebooks.len()
        );
    }

    info!(
        notebooks = build.notebooks.len(),
        "all notebook destinations compile"
    );
    Ok(())
}

/// Destinations that are rejected or fail to compile, with their notebooks' sources.
fn check(build: &BuildVariables) -> Vec<(PathBuf, TemplateError)> {
    build
        .notebooks
        .iter()
        .filter_map(|notebook| {
            validate_destination(&notebook.dest)
                .and_then(|()| Template::compile(&notebook.dest))
                .err()
                .map(|err| (notebook.src.clone(), err))
        })
        .collect()
}
