/*
 * refs.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Searching raw template text for references to a particular variable.
//!
//! Some variables (the target language, the notebook type, ...) only get
//! values late in a build. Templates that mention them are expanded in two
//! passes, see [`Template::partial_substitute`](crate::Template::partial_substitute).

use regex::Regex;

/// Variables whose values are only known after a notebook has been split.
pub const POST_PARSE_VARIABLES: [&str; 5] = [
    "target_lang",
    "target_extension",
    "notebook_type",
    "output_dir",
    "profile",
];

/// A reference to a variable found in some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableRefMatch<'t> {
    /// Text preceding the reference.
    pub before: &'t str,
    /// The reference itself, e.g. `${name}` or `$name`.
    pub reference: &'t str,
    /// Text following the reference.
    pub after: &'t str,
}

/// Compiled patterns matching every syntactic form of a reference to one variable.
#[derive(Debug, Clone)]
struct VariableRefPatterns {
    patterns: Vec<Regex>,
}

impl VariableRefPatterns {
    fn new(name: &str) -> Self {
        let n = regex::escape(name);
        let sources = [
            format!(r"(?s)^(.*)(\$\{{{n}\}})(.*)$"),
            format!(r"(?s)^(.*)(\$\{{{n}\[-?\d*:?-?\d*\]\}})(.*)$"),
            format!(r"(?s)^(.*)(\${n})([^A-Za-z0-9_].*)$"),
            format!(r"(?s)^(.*)(\${n})()$"),
            format!(
                r#"(?s)^(.*)(\$\{{{n}\s*[=!]=\s*"[^}}?:]*"\s*\?\s*"[^}}?:]*"\s*:\s*"[^}}?:]*"\s*\}})(.*)$"#
            ),
        ];
        let patterns = sources
            .iter()
            .map(|source| Regex::new(source).expect("escaped variable pattern is valid"))
            .collect();
        Self { patterns }
    }

    /// Find a reference in `text`.
    ///
    /// The forms are tried in order (`${name}`, subscripted, bare, bare at
    /// end of text, ternary); within a form the last occurrence wins.
    fn find<'t>(&self, text: &'t str) -> Option<VariableRefMatch<'t>> {
        self.patterns.iter().find_map(|pattern| {
            pattern.captures(text).map(|caps| VariableRefMatch {
                before: caps.get(1).map_or("", |m| m.as_str()),
                reference: caps.get(2).map_or("", |m| m.as_str()),
                after: caps.get(3).map_or("", |m| m.as_str()),
            })
        })
    }
}

/// Find a reference to `name` in `text`.
pub fn find_variable_ref<'t>(name: &str, text: &'t str) -> Option<VariableRefMatch<'t>> {
    VariableRefPatterns::new(name).find(text)
}
