//! Command implementations for the bdc CLI
//!
//! Each command module handles the CLI interface and delegates to
//! bdc-template and bdc-config for the actual work.

pub mod check;
pub mod expand;
pub mod refs;

use anyhow::{Result, bail};
use bdc_config::is_valid_variable_name;

/// Split a `NAME=VALUE` command-line assignment.
pub(crate) fn parse_assignment(assignment: &str) -> Result<(String, String)> {
    let Some((name, value)) = assignment.split_once('=') else {
        bail!("Expected NAME=VALUE, got \"{}\"", assignment);
    };
    if !is_valid_variable_name(name) {
        bail!(
            "Invalid variable name \"{}\"; names may contain only letters, digits and underscores",
            name
        );
    }
    Ok((name.to_string(), value.to_string()))
}
