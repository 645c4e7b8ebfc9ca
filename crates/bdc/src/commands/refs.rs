/*
 * refs.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Show the last reference to a variable in a template.

use anyhow::{Result, bail};

use bdc_template::find_variable_ref;

/// Arguments for the refs command
#[derive(Debug)]
pub struct RefsArgs {
    /// Variable to look for
    pub name: String,
    /// Template text to search
    pub template: String,
}

/// Execute the refs command
pub fn execute(args: RefsArgs) -> Result<()> {
    print!("{}", describe(&args)?);
    Ok(())
}

fn describe(args: &RefsArgs) -> Result<String> {
    let Some(found) = find_variable_ref(&args.name, &args.template) else {
        bail!(
            "No reference to \"{}\" in \"{}\"",
            args.name,
            args.template
        );
    };
    Ok(format!(
        "before:    {}\nreference: {}\nafter:     {}\n",
        found.before, found.reference, found.after
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, template: &str) -> RefsArgs {
        RefsArgs {
            name: name.to_string(),
            template: template.to_string(),
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&args("lang", "out/${lang}/x")).unwrap(),
            "before:    out/\nreference: ${lang}\nafter:     /x\n"
        );
    }

    #[test]
    fn test_no_reference() {
        let err = describe(&args("lang", "$language")).unwrap_err();
        assert_eq!(err.to_string(), "No reference to \"lang\" in \"$language\"");
    }
}
