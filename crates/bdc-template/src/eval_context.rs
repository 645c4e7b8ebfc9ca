/*
 * eval_context.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Evaluation context for template expansion.
//!
//! [`EvalContext`] is threaded through all evaluation functions. It carries
//! the variable environment, the template source (for error messages), and
//! the undefined-variable policy:
//!
//! - **strict** mode fails on the first undefined variable
//! - **lenient** mode substitutes an empty string and records the name

use crate::context::Environment;
use crate::error::{TemplateError, TemplateResult};
use tracing::debug;

/// Context for one template expansion.
pub struct EvalContext<'a> {
    /// Variable bindings for substitution.
    pub variables: &'a Environment,

    /// Source of the template being expanded.
    pub template: &'a str,

    /// Strict mode: undefined variables are errors rather than empty strings.
    pub strict_mode: bool,

    /// Names that were undefined during a lenient expansion, in order of first use.
    undefined: Vec<String>,
}

impl<'a> EvalContext<'a> {
    /// Create a new (lenient) evaluation context.
    pub fn new(variables: &'a Environment, template: &'a str) -> Self {
        Self {
            variables,
            template,
            strict_mode: false,
            undefined: Vec::new(),
        }
    }

    /// Enable or disable strict mode.
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Look up a variable, applying the undefined-variable policy.
    pub fn lookup(&mut self, name: &str) -> TemplateResult<&'a str> {
        let variables = self.variables;
        if let Some(value) = variables.get(name) {
            return Ok(value);
        }
        if self.strict_mode {
            return Err(TemplateError::UndefinedVariable {
                name: name.to_string(),
                template: self.template.to_string(),
            });
        }
        if !self.undefined.iter().any(|n| n == name) {
            debug!(
                variable = name,
                template = self.template,
                "undefined variable replaced with empty string"
            );
            self.undefined.push(name.to_string());
        }
        Ok("")
    }

    /// Names that were undefined so far (always empty in strict mode).
    pub fn undefined(&self) -> &[String] {
        &self.undefined
    }

    /// Consume the context and return the undefined names.
    pub fn into_undefined(self) -> Vec<String> {
        self.undefined
    }
}
