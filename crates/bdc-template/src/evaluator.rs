/*
 * evaluator.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Template evaluation engine.
//!
//! Evaluation is a single left-to-right pass over the compiled nodes.
//! Variable values are inserted verbatim: a value that itself contains `$`
//! is not expanded again.
//!
//! [`Template::partial_substitute`] is the exception. Its output is itself a
//! template, meant to be expanded again once the deferred variables have
//! values, so inserted values are escaped and deferred tokens are copied
//! from the source unchanged.

use crate::ast::{
    CompareOp, QuotedString, RegexEdit, ReplacementPart, Segment, TemplateNode, Ternary,
    VariableRef,
};
use crate::context::Environment;
use crate::edit::ResolvedPart;
use crate::error::TemplateResult;
use crate::eval_context::EvalContext;
use crate::parser::Template;

impl Template {
    /// Expand this template, failing on undefined variables.
    pub fn substitute(&self, env: &Environment) -> TemplateResult<String> {
        let mut ctx = EvalContext::new(env, &self.source).with_strict_mode(true);
        self.evaluate(&mut ctx)
    }

    /// Expand this template, substituting an empty string for undefined variables.
    pub fn safe_substitute(&self, env: &Environment) -> TemplateResult<String> {
        let mut ctx = EvalContext::new(env, &self.source);
        self.evaluate(&mut ctx)
    }

    /// Expand everything except tokens that mention one of `deferred`.
    ///
    /// Those tokens (a whole ternary or edit, even if only a branch or the
    /// replacement mentions a deferred name) are copied from the source; a
    /// deferred bare `$name` is written as `${name}`. The result is a template
    /// whose later full expansion gives the same text a single expansion
    /// would have given.
    /// Other undefined variables expand to an empty string.
    pub fn partial_substitute(
        &self,
        env: &Environment,
        deferred: &[&str],
    ) -> TemplateResult<String> {
        let mut ctx = EvalContext::new(env, &self.source);
        let mut output = String::new();
        for node in &self.nodes {
            let span = node.span();
            let source = &self.source[span.start..span.end];
            match node {
                TemplateNode::Literal(_) => output.push_str(source),
                TemplateNode::Variable(var)
                    if !var.braced && deferred.contains(&var.name.as_str()) =>
                {
                    output.push_str("${");
                    output.push_str(&var.name);
                    output.push('}');
                }
                _ if mentions_any(node, deferred) => output.push_str(source),
                _ => {
                    let mut value = String::new();
                    evaluate_node(node, &mut ctx, &mut value)?;
                    escape_into(&value, &mut output);
                }
            }
        }
        Ok(output)
    }

    /// Expand this template with an explicit context.
    ///
    /// Useful for lenient expansion when the caller wants to know which
    /// variables were missing.
    pub fn evaluate(&self, ctx: &mut EvalContext) -> TemplateResult<String> {
        evaluate(&self.nodes, ctx)
    }
}

/// Evaluate a list of template nodes.
pub fn evaluate(nodes: &[TemplateNode], ctx: &mut EvalContext) -> TemplateResult<String> {
    let mut output = String::new();
    for node in nodes {
        evaluate_node(node, ctx, &mut output)?;
    }
    Ok(output)
}

fn evaluate_node(
    node: &TemplateNode,
    ctx: &mut EvalContext,
    output: &mut String,
) -> TemplateResult<()> {
    match node {
        TemplateNode::Literal(literal) => output.push_str(&literal.text),
        TemplateNode::Variable(var) => output.push_str(&resolve_variable(var, ctx)?),
        TemplateNode::Ternary(ternary) => output.push_str(&evaluate_ternary(ternary, ctx)?),
        TemplateNode::Edit(edit) => output.push_str(&evaluate_edit(edit, ctx)?),
    }
    Ok(())
}

fn mentions_any(node: &TemplateNode, names: &[&str]) -> bool {
    let mut referenced = Vec::new();
    node.collect_variables(&mut referenced);
    referenced.iter().any(|name| names.contains(name))
}

/// Append `value` so that expanding the result yields `value` again.
fn escape_into(value: &str, output: &mut String) {
    for c in value.chars() {
        match c {
            '$' => output.push_str("$$"),
            '\\' => output.push_str("\\\\"),
            c => output.push(c),
        }
    }
}

/// Resolve a variable reference, applying its subscript if any.
fn resolve_variable(var: &VariableRef, ctx: &mut EvalContext) -> TemplateResult<String> {
    let value = ctx.lookup(&var.name)?;
    Ok(match &var.subscript {
        Some(subscript) => subscript.apply(value),
        None => value.to_string(),
    })
}

/// Expand a quoted string's text and variable segments.
fn evaluate_quoted(quoted: &QuotedString, ctx: &mut EvalContext) -> TemplateResult<String> {
    let mut output = String::new();
    for segment in &quoted.segments {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Variable(var) => output.push_str(&resolve_variable(var, ctx)?),
        }
    }
    Ok(output)
}

/// Evaluate a ternary. Only the selected branch is expanded.
fn evaluate_ternary(ternary: &Ternary, ctx: &mut EvalContext) -> TemplateResult<String> {
    let value = resolve_variable(&ternary.lhs, ctx)?;
    let comparand = evaluate_quoted(&ternary.comparand, ctx)?;

    let holds = match ternary.op {
        CompareOp::Eq => value == comparand,
        CompareOp::Ne => value != comparand,
    };

    if holds {
        evaluate_quoted(&ternary.if_true, ctx)
    } else {
        evaluate_quoted(&ternary.if_false, ctx)
    }
}

/// Evaluate an inline regex edit.
fn evaluate_edit(edit: &RegexEdit, ctx: &mut EvalContext) -> TemplateResult<String> {
    let subject = resolve_variable(&edit.subject, ctx)?;

    let mut replacement = Vec::with_capacity(edit.replacement.len());
    for part in &edit.replacement {
        replacement.push(match part {
            ReplacementPart::Text(text) => ResolvedPart::Text(text.clone()),
            ReplacementPart::Group(n) => ResolvedPart::Group(*n),
            ReplacementPart::Variable(var) => ResolvedPart::Text(resolve_variable(var, ctx)?),
        });
    }

    Ok(edit.apply(&subject, &replacement))
}
