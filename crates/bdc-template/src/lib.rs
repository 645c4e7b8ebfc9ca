/*
 * lib.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Variable substitution language for course build files.
//!
//! Templates are plain text with embedded references:
//!
//! - Variable references: `$name` or `${name}`
//! - Subscripts and slices: `${name[0]}`, `${name[-3:]}`, `${name[:-1]}`
//! - Ternaries: `${name == "value" ? "if true" : "if false"}` (also `!=`)
//! - Inline regex edits: `${name/regex/replacement/flags}`, or with `|` as
//!   the delimiter: `${name|regex|replacement|flags}`
//! - Escapes: `$$` and `\$` for a literal `$`, `\\` for a literal `\`
//!
//! # Architecture
//!
//! A template is compiled once into a list of [`TemplateNode`]s; all syntax
//! errors (including bad regular expressions) surface at compile time. The
//! compiled [`Template`] is immutable and can be expanded any number of times,
//! from any number of threads, against an [`Environment`].
//!
//! The environment has three layers. Built-ins always win, locals shadow
//! globals.
//!
//! # Example
//!
//! ```
//! use bdc_template::{Environment, Template};
//!
//! let mut env = Environment::with_builtins([("basename", "01-Intro")]);
//! env.declare_global("course", "spark");
//!
//! let template = Template::compile("${course}/${basename/^\\d+-//}.py")?;
//! assert_eq!(template.substitute(&env)?, "spark/Intro.py");
//! # Ok::<(), bdc_template::TemplateError>(())
//! ```

pub mod ast;
pub mod builtins;
pub mod context;
pub mod edit;
pub mod error;
pub mod eval_context;
pub mod evaluator;
pub mod parser;
pub mod refs;
pub mod slice;

use indexmap::IndexMap;

// Re-export main types at crate root
pub use ast::{
    CompareOp, Literal, QuotedString, RegexEdit, ReplacementPart, Segment, Span, Subscript,
    TemplateNode, Ternary, VariableRef,
};
pub use builtins::{path_builtins, validate_destination};
pub use context::{Environment, VariableValue};
pub use error::{TemplateError, TemplateResult};
pub use eval_context::EvalContext;
pub use parser::Template;
pub use refs::{POST_PARSE_VARIABLES, VariableRefMatch, find_variable_ref};

fn environment(
    variables: &IndexMap<String, String>,
    builtins: &IndexMap<String, String>,
) -> Environment {
    let mut env = Environment::with_builtins(builtins.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    env.extend_globals(variables.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    env
}

/// Compile and expand `template` in one step, failing on undefined variables.
pub fn expand(
    template: &str,
    variables: &IndexMap<String, String>,
    builtins: &IndexMap<String, String>,
) -> TemplateResult<String> {
    Template::compile(template)?.substitute(&environment(variables, builtins))
}

/// Like [`expand`], but undefined variables expand to an empty string.
pub fn expand_safe(
    template: &str,
    variables: &IndexMap<String, String>,
    builtins: &IndexMap<String, String>,
) -> TemplateResult<String> {
    Template::compile(template)?.safe_substitute(&environment(variables, builtins))
}
