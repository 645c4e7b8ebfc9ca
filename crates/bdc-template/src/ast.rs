/*
 * ast.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Template AST types.
//!
//! This module defines the tokens a compiled template is made of.
//! Each node records the byte span it was parsed from, so the exact source
//! text of any token can be recovered from the template.

use regex::Regex;

/// A byte range within the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A top-level node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text, with escapes already resolved.
    Literal(Literal),

    /// Variable reference: `$var`, `${var}` or `${var[subscript]}`
    Variable(VariableRef),

    /// Ternary conditional: `${var == "x" ? "yes" : "no"}`
    Ternary(Ternary),

    /// Inline regex edit: `${var/regex/replacement/flags}`
    Edit(RegexEdit),
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The literal text content.
    pub text: String,
    /// Source location of this literal.
    pub span: Span,
}

/// A reference to a variable, optionally subscripted.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    /// The variable name (`[A-Za-z0-9_]+`).
    pub name: String,
    /// Optional index or slice applied to the value.
    pub subscript: Option<Subscript>,
    /// Whether the reference used the `${...}` form.
    pub braced: bool,
    /// Source location of the whole reference.
    pub span: Span,
}

/// Index or slice applied to a variable value.
///
/// Indices count characters, and negative indices count from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscript {
    /// `[i]`
    Index(i64),
    /// `[i:j]`, `[i:]`, `[:j]` or `[:]`
    Slice { start: Option<i64>, end: Option<i64> },
}

/// Comparison operator in a ternary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

/// Ternary conditional: `${var OP "comparand" ? "if-true" : "if-false"}`
#[derive(Debug, Clone, PartialEq)]
pub struct Ternary {
    /// The variable being tested.
    pub lhs: VariableRef,
    /// `==` or `!=`.
    pub op: CompareOp,
    /// The string the variable is compared against.
    pub comparand: QuotedString,
    /// Substituted when the comparison holds.
    pub if_true: QuotedString,
    /// Substituted otherwise.
    pub if_false: QuotedString,
    /// Source location of the whole `${...}` token.
    pub span: Span,
}

/// A double-quoted string inside a ternary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuotedString {
    pub segments: Vec<Segment>,
    /// Source location, including the quotes.
    pub span: Span,
}

/// A piece of a quoted string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Variable(VariableRef),
}

/// Inline regex edit: `${var/regex/replacement/flags}` or `${var|regex|replacement|flags}`
#[derive(Debug, Clone)]
pub struct RegexEdit {
    /// The variable whose value is edited.
    pub subject: VariableRef,
    /// The delimiter used in the token, `/` or `|`.
    pub delimiter: char,
    /// The pattern text, with escaped delimiters already unescaped.
    pub pattern: String,
    /// The compiled pattern (case-insensitive if the `i` flag was given).
    pub regex: Regex,
    /// Replacement pieces.
    pub replacement: Vec<ReplacementPart>,
    /// `i` flag.
    pub case_insensitive: bool,
    /// `g` flag: replace every match rather than only the first.
    pub replace_all: bool,
    /// Source location of the whole `${...}` token.
    pub span: Span,
}

// Regex has no PartialEq; two edits are equal when their sources are.
impl PartialEq for RegexEdit {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.delimiter == other.delimiter
            && self.pattern == other.pattern
            && self.replacement == other.replacement
            && self.case_insensitive == other.case_insensitive
            && self.replace_all == other.replace_all
            && self.span == other.span
    }
}

/// A piece of a regex-edit replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementPart {
    Text(String),
    /// Capture group reference, `$1` .. `$9` (`$0` is the whole match).
    Group(usize),
    Variable(VariableRef),
}

impl TemplateNode {
    /// Source location of this node.
    pub fn span(&self) -> Span {
        match self {
            TemplateNode::Literal(l) => l.span,
            TemplateNode::Variable(v) => v.span,
            TemplateNode::Ternary(t) => t.span,
            TemplateNode::Edit(e) => e.span,
        }
    }

    /// Push every variable this node references onto `out`, in source order.
    pub(crate) fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TemplateNode::Literal(_) => {}
            TemplateNode::Variable(v) => out.push(&v.name),
            TemplateNode::Ternary(t) => {
                out.push(&t.lhs.name);
                for q in [&t.comparand, &t.if_true, &t.if_false] {
                    q.collect_variables(out);
                }
            }
            TemplateNode::Edit(e) => {
                out.push(&e.subject.name);
                for part in &e.replacement {
                    if let ReplacementPart::Variable(v) = part {
                        out.push(&v.name);
                    }
                }
            }
        }
    }
}

impl QuotedString {
    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        for segment in &self.segments {
            if let Segment::Variable(v) = segment {
                out.push(&v.name);
            }
        }
    }
}
