/*
 * parser.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Template scanner and parser.
//!
//! Templates are scanned left to right. Literal runs are skipped with
//! `memchr`; each `$` or `\` is then classified as an escape, a bare
//! reference (`$name`), or the start of a braced token (`${...}`). A braced
//! token is classified by the character that follows its variable name:
//!
//! | next character     | token                       |
//! |--------------------|-----------------------------|
//! | `}`                | plain or subscripted variable |
//! | `/` or `|`         | inline regex edit           |
//! | space, `=` or `!`  | ternary conditional         |
//!
//! Quoted ternary strings and regex-edit replacements may contain `$name`,
//! `${name}` and `${name[...]}` references, but nothing more complex:
//! anything else starting with `${` there is kept as literal text.

use crate::ast::{
    CompareOp, Literal, QuotedString, RegexEdit, ReplacementPart, Segment, Span, Subscript,
    TemplateNode, Ternary, VariableRef,
};
use crate::error::{TemplateError, TemplateResult};
use indexmap::IndexSet;
use memchr::{memchr, memchr2};
use regex::RegexBuilder;
use std::path::Path;
use tracing::trace;

/// A compiled template ready for evaluation.
#[derive(Debug, Clone)]
pub struct Template {
    /// The parsed template AST.
    pub(crate) nodes: Vec<TemplateNode>,

    /// Original source, for error messages.
    pub(crate) source: String,
}

impl Template {
    /// Compile a template from source text.
    ///
    /// All syntax errors, including invalid regular expressions and
    /// references to missing capture groups, are reported here.
    pub fn compile(source: &str) -> TemplateResult<Self> {
        let nodes = Parser::new(source).parse_template()?;
        trace!(template = source, tokens = nodes.len(), "compiled template");
        Ok(Template {
            nodes,
            source: source.to_string(),
        })
    }

    /// Compile a template read from a file.
    pub fn compile_from_file(path: &Path) -> TemplateResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::compile(&source)
    }

    /// Get the AST nodes of this template.
    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    /// The template source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct variable names referenced by this template, in order of first use.
    pub fn variables(&self) -> Vec<&str> {
        let mut all = Vec::new();
        for node in &self.nodes {
            node.collect_variables(&mut all);
        }
        all.into_iter().collect::<IndexSet<_>>().into_iter().collect()
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Recursive-descent parser over the template bytes.
///
/// Every syntactic character is ASCII, so byte offsets at which the parser
/// stops are always character boundaries.
struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, position: usize, reason: impl Into<String>) -> TemplateError {
        TemplateError::parse(self.source, position, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Copy the character at the cursor into `out` and advance past it.
    fn push_char(&mut self, out: &mut String) {
        if let Some(c) = self.source[self.pos..].chars().next() {
            out.push(c);
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn parse_identifier(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_byte) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.source[start..self.pos].to_string())
    }

    fn parse_template(&mut self) -> TemplateResult<Vec<TemplateNode>> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        let mut text_start = 0;

        loop {
            let Some(offset) = memchr2(b'$', b'\\', &self.bytes[self.pos..]) else {
                text.push_str(&self.source[self.pos..]);
                self.pos = self.bytes.len();
                break;
            };
            text.push_str(&self.source[self.pos..self.pos + offset]);
            self.pos += offset;

            if self.peek() == Some(b'\\') {
                match self.peek_at(1) {
                    Some(b'$') => text.push('$'),
                    Some(b'\\') => text.push('\\'),
                    _ => {
                        text.push('\\');
                        self.pos += 1;
                        continue;
                    }
                }
                self.pos += 2;
                continue;
            }

            match self.peek_at(1) {
                Some(b'$') => {
                    text.push('$');
                    self.pos += 2;
                }
                Some(b'{') => {
                    flush_literal(&mut nodes, &mut text, text_start, self.pos);
                    nodes.push(self.parse_braced()?);
                    text_start = self.pos;
                }
                Some(b) if is_identifier_byte(b) => {
                    flush_literal(&mut nodes, &mut text, text_start, self.pos);
                    nodes.push(TemplateNode::Variable(self.parse_bare()));
                    text_start = self.pos;
                }
                _ => {
                    text.push('$');
                    self.pos += 1;
                }
            }
        }

        flush_literal(&mut nodes, &mut text, text_start, self.pos);
        Ok(nodes)
    }

    /// `$name`, with the cursor on the `$`.
    fn parse_bare(&mut self) -> VariableRef {
        let start = self.pos;
        self.pos += 1;
        let name = self.parse_identifier().unwrap_or_default();
        VariableRef {
            name,
            subscript: None,
            braced: false,
            span: Span::new(start, self.pos),
        }
    }

    /// Any `${...}` token, with the cursor on the `$`.
    fn parse_braced(&mut self) -> TemplateResult<TemplateNode> {
        let start = self.pos;
        if memchr(b'}', &self.bytes[start..]).is_none() {
            return Err(self.error(start, "unterminated \"${\""));
        }
        self.pos += 2;

        let Some(name) = self.parse_identifier() else {
            return Err(self.error(self.pos, "expected a variable name after \"${\""));
        };
        let subscript = if self.peek() == Some(b'[') {
            Some(self.parse_subscript()?)
        } else {
            None
        };

        match self.peek() {
            Some(b'}') => {
                self.pos += 1;
                Ok(TemplateNode::Variable(VariableRef {
                    name,
                    subscript,
                    braced: true,
                    span: Span::new(start, self.pos),
                }))
            }
            Some(delim @ (b'/' | b'|')) => {
                if subscript.is_some() {
                    return Err(self.error(
                        self.pos,
                        "an inline edit cannot be applied to a subscripted variable",
                    ));
                }
                self.parse_edit(start, name, delim).map(TemplateNode::Edit)
            }
            Some(b' ' | b'\t' | b'=' | b'!') => {
                let lhs = VariableRef {
                    name,
                    subscript,
                    braced: true,
                    span: Span::new(start + 2, self.pos),
                };
                self.parse_ternary(start, lhs).map(TemplateNode::Ternary)
            }
            None => Err(self.error(start, "unterminated \"${\"")),
            Some(_) => Err(self.error(
                self.pos,
                format!(
                    "unexpected character '{}' in variable reference",
                    self.source[self.pos..].chars().next().unwrap_or('?')
                ),
            )),
        }
    }

    /// `[i]`, `[i:j]`, `[i:]`, `[:j]` or `[:]`, with the cursor on the `[`.
    fn parse_subscript(&mut self) -> TemplateResult<Subscript> {
        let open = self.pos;
        self.pos += 1;

        let start = self.parse_index()?;
        let subscript = if self.peek() == Some(b':') {
            self.pos += 1;
            let end = self.parse_index()?;
            if self.peek() == Some(b':') {
                return Err(self.error(self.pos, "slice stride is not supported"));
            }
            Subscript::Slice { start, end }
        } else {
            match start {
                Some(i) => Subscript::Index(i),
                None if self.peek() == Some(b']') => {
                    return Err(self.error(open, "empty subscript"));
                }
                None => {
                    return Err(self.error(
                        self.pos,
                        "invalid subscript; expected a number, ':' or ']'",
                    ));
                }
            }
        };

        if self.peek() != Some(b']') {
            return Err(self.error(self.pos, "invalid subscript; expected a number, ':' or ']'"));
        }
        self.pos += 1;
        Ok(subscript)
    }

    /// An optionally negative integer, or nothing.
    fn parse_index(&mut self) -> TemplateResult<Option<i64>> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            if self.pos > start {
                return Err(self.error(start, "expected digits after '-' in subscript"));
            }
            return Ok(None);
        }
        self.source[start..self.pos]
            .parse::<i64>()
            .map(Some)
            .map_err(|_| self.error(start, "subscript is out of range"))
    }

    /// `${lhs OP "..." ? "..." : "..."}`, with the cursor just after the LHS.
    fn parse_ternary(&mut self, start: usize, lhs: VariableRef) -> TemplateResult<Ternary> {
        self.skip_whitespace();
        let op = match (self.peek(), self.peek_at(1)) {
            (Some(b'='), Some(b'=')) => CompareOp::Eq,
            (Some(b'!'), Some(b'=')) => CompareOp::Ne,
            _ => {
                return Err(self.error(
                    self.pos,
                    "expected \"==\" or \"!=\" in conditional substitution",
                ));
            }
        };
        self.pos += 2;

        self.skip_whitespace();
        let comparand = self.parse_quoted()?;
        self.skip_whitespace();
        self.expect(b'?', "expected '?' after the comparison string")?;
        self.skip_whitespace();
        let if_true = self.parse_quoted()?;
        self.skip_whitespace();
        self.expect(b':', "expected ':' after the true branch")?;
        self.skip_whitespace();
        let if_false = self.parse_quoted()?;
        self.skip_whitespace();

        match self.peek() {
            Some(b'}') => self.pos += 1,
            None => return Err(self.error(start, "unterminated \"${\"")),
            Some(_) => {
                return Err(self.error(self.pos, "expected '}' to close conditional substitution"));
            }
        }

        Ok(Ternary {
            lhs,
            op,
            comparand,
            if_true,
            if_false,
            span: Span::new(start, self.pos),
        })
    }

    fn expect(&mut self, byte: u8, reason: &str) -> TemplateResult<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(self.pos, reason))
        }
    }

    /// A double-quoted string, with the cursor on the opening quote.
    fn parse_quoted(&mut self) -> TemplateResult<QuotedString> {
        let open = self.pos;
        match self.peek() {
            Some(b'"') => self.pos += 1,
            Some(b'\'') => {
                return Err(self.error(
                    open,
                    "strings must be enclosed in double quotes, not single quotes",
                ));
            }
            _ => return Err(self.error(open, "expected a double-quoted string")),
        }

        let mut segments = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error(open, "unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => match self.peek_at(1) {
                    Some(c @ (b'"' | b'$' | b'\\')) => {
                        text.push(c as char);
                        self.pos += 2;
                    }
                    _ => {
                        text.push('\\');
                        self.pos += 1;
                    }
                },
                Some(b'$') => {
                    if let Some(var) = self.parse_nested_reference(&mut text)? {
                        if !text.is_empty() {
                            segments.push(Segment::Text(std::mem::take(&mut text)));
                        }
                        segments.push(Segment::Variable(var));
                    }
                }
                Some(_) => self.push_char(&mut text),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(QuotedString {
            segments,
            span: Span::new(open, self.pos),
        })
    }

    /// Handle a `$` inside a quoted string or replacement.
    ///
    /// Returns a reference for `$name`, `${name}` and `${name[...]}`. Escapes
    /// and anything that is not a simple reference are appended to `text`.
    fn parse_nested_reference(&mut self, text: &mut String) -> TemplateResult<Option<VariableRef>> {
        match self.peek_at(1) {
            Some(b'$') => {
                text.push('$');
                self.pos += 2;
                Ok(None)
            }
            Some(b'{') => {
                let saved = self.pos;
                match self.parse_simple_braced()? {
                    Some(var) => Ok(Some(var)),
                    None => {
                        self.pos = saved + 2;
                        text.push_str("${");
                        Ok(None)
                    }
                }
            }
            Some(b) if is_identifier_byte(b) => Ok(Some(self.parse_bare())),
            _ => {
                text.push('$');
                self.pos += 1;
                Ok(None)
            }
        }
    }

    /// `${name}` or `${name[...]}`; `None` (cursor unspecified) for anything else.
    fn parse_simple_braced(&mut self) -> TemplateResult<Option<VariableRef>> {
        let start = self.pos;
        self.pos += 2;
        let Some(name) = self.parse_identifier() else {
            return Ok(None);
        };
        let subscript = if self.peek() == Some(b'[') {
            Some(self.parse_subscript()?)
        } else {
            None
        };
        if self.peek() != Some(b'}') {
            return Ok(None);
        }
        self.pos += 1;
        Ok(Some(VariableRef {
            name,
            subscript,
            braced: true,
            span: Span::new(start, self.pos),
        }))
    }

    /// `${name<d>regex<d>replacement<d>flags}`, with the cursor on the first delimiter.
    fn parse_edit(&mut self, start: usize, name: String, delim: u8) -> TemplateResult<RegexEdit> {
        let subject = VariableRef {
            name,
            subscript: None,
            braced: true,
            span: Span::new(start + 2, self.pos),
        };
        self.pos += 1;

        let pattern_start = self.pos;
        let pattern = self.parse_pattern(start, delim)?;
        if pattern.is_empty() {
            return Err(self.error(pattern_start, "empty regular expression in inline edit"));
        }

        let replacement_start = self.pos;
        let replacement = self.parse_replacement(start, delim)?;

        let mut case_insensitive = false;
        let mut replace_all = false;
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated \"${\"")),
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b'i') => case_insensitive = true,
                Some(b'g') => replace_all = true,
                Some(_) => {
                    let flag = self.source[self.pos..].chars().next().unwrap_or('?');
                    return Err(self.error(
                        self.pos,
                        format!("unknown inline edit flag '{}'; expected 'i' or 'g'", flag),
                    ));
                }
            }
            self.pos += 1;
        }

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| {
                self.error(
                    pattern_start,
                    format!("bad regular expression \"{}\": {}", pattern, e),
                )
            })?;

        let groups = regex.captures_len() - 1;
        let max_group = replacement
            .iter()
            .filter_map(|part| match part {
                ReplacementPart::Group(n) => Some(*n),
                _ => None,
            })
            .max();
        if let Some(max_group) = max_group {
            if max_group > groups {
                return Err(self.error(
                    replacement_start,
                    format!(
                        "replacement refers to non-existent group ${} (pattern \"{}\" has {} group(s))",
                        max_group, pattern, groups
                    ),
                ));
            }
        }

        Ok(RegexEdit {
            subject,
            delimiter: delim as char,
            pattern,
            regex,
            replacement,
            case_insensitive,
            replace_all,
            span: Span::new(start, self.pos),
        })
    }

    /// The pattern part of an edit. Leaves the cursor after the closing delimiter.
    ///
    /// `\<delim>` is unescaped; every other backslash pair is passed through
    /// to the regex engine untouched.
    fn parse_pattern(&mut self, start: usize, delim: u8) -> TemplateResult<String> {
        let mut pattern = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated \"${\"")),
                Some(b) if b == delim => {
                    self.pos += 1;
                    return Ok(pattern);
                }
                Some(b'\\') => match self.peek_at(1) {
                    Some(b) if b == delim => {
                        pattern.push(delim as char);
                        self.pos += 2;
                    }
                    Some(_) => {
                        pattern.push('\\');
                        self.pos += 1;
                        self.push_char(&mut pattern);
                    }
                    None => return Err(self.error(start, "unterminated \"${\"")),
                },
                Some(_) => self.push_char(&mut pattern),
            }
        }
    }

    /// The replacement part of an edit. Leaves the cursor after the closing delimiter.
    fn parse_replacement(
        &mut self,
        start: usize,
        delim: u8,
    ) -> TemplateResult<Vec<ReplacementPart>> {
        let mut parts = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated \"${\"")),
                Some(b) if b == delim => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => match self.peek_at(1) {
                    Some(b) if b == delim || b == b'$' || b == b'\\' => {
                        text.push(b as char);
                        self.pos += 2;
                    }
                    _ => {
                        text.push('\\');
                        self.pos += 1;
                    }
                },
                Some(b'$') if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    if !text.is_empty() {
                        parts.push(ReplacementPart::Text(std::mem::take(&mut text)));
                    }
                    let group = usize::from(self.bytes[self.pos + 1] - b'0');
                    parts.push(ReplacementPart::Group(group));
                    self.pos += 2;
                }
                Some(b'$') => {
                    if let Some(var) = self.parse_nested_reference(&mut text)? {
                        if !text.is_empty() {
                            parts.push(ReplacementPart::Text(std::mem::take(&mut text)));
                        }
                        parts.push(ReplacementPart::Variable(var));
                    }
                }
                Some(_) => self.push_char(&mut text),
            }
        }

        if !text.is_empty() {
            parts.push(ReplacementPart::Text(text));
        }
        Ok(parts)
    }
}

fn flush_literal(nodes: &mut Vec<TemplateNode>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        nodes.push(TemplateNode::Literal(Literal {
            text: std::mem::take(text),
            span: Span::new(start, end),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> Template {
        Template::compile(source).expect("template should parse")
    }

    fn parse_error(source: &str) -> (usize, String) {
        match Template::compile(source) {
            Err(TemplateError::Parse {
                position, reason, ..
            }) => (position, reason),
            other => panic!("expected a parse error for {:?}, got {:?}", source, other),
        }
    }

    fn var(node: &TemplateNode) -> &VariableRef {
        match node {
            TemplateNode::Variable(v) => v,
            other => panic!("expected a variable, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_only() {
        let template = compile("just text");
        assert_eq!(template.nodes().len(), 1);
        match &template.nodes()[0] {
            TemplateNode::Literal(l) => {
                assert_eq!(l.text, "just text");
                assert_eq!(l.span, Span::new(0, 9));
            }
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_template() {
        assert!(compile("").nodes().is_empty());
    }

    #[test]
    fn test_escapes_merge_into_literal() {
        let template = compile(r"a$$b\$c\\d\e");
        assert_eq!(template.nodes().len(), 1);
        match &template.nodes()[0] {
            TemplateNode::Literal(l) => assert_eq!(l.text, r"a$b$c\d\e"),
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let template = compile("cost: $ 5 and $");
        assert_eq!(template.nodes().len(), 1);
    }

    #[test]
    fn test_bare_name_is_maximal() {
        let template = compile("$foo_bar1-x");
        let v = var(&template.nodes()[0]);
        assert_eq!(v.name, "foo_bar1");
        assert!(!v.braced);
        assert_eq!(v.span, Span::new(0, 9));
    }

    #[test]
    fn test_braced_and_subscripted() {
        let template = compile("${a}${b[-1]}${c[1:]}${d[:2]}${e[:]}");
        let subs: Vec<Option<Subscript>> =
            template.nodes().iter().map(|n| var(n).subscript).collect();
        assert_eq!(
            subs,
            vec![
                None,
                Some(Subscript::Index(-1)),
                Some(Subscript::Slice {
                    start: Some(1),
                    end: None
                }),
                Some(Subscript::Slice {
                    start: None,
                    end: Some(2)
                }),
                Some(Subscript::Slice {
                    start: None,
                    end: None
                }),
            ]
        );
    }

    #[test]
    fn test_ternary_shape() {
        let template = compile(r#"${nb == "answers" ? "-solution" : ""}"#);
        match &template.nodes()[0] {
            TemplateNode::Ternary(t) => {
                assert_eq!(t.lhs.name, "nb");
                assert_eq!(t.op, CompareOp::Eq);
                assert_eq!(
                    t.comparand.segments,
                    vec![Segment::Text("answers".to_string())]
                );
                assert!(t.if_false.segments.is_empty());
            }
            other => panic!("expected ternary, got {:?}", other),
        }
    }

    #[test]
    fn test_ternary_without_whitespace() {
        let template = compile(r#"${nb!="x"?"a":"b"}"#);
        assert!(matches!(
            &template.nodes()[0],
            TemplateNode::Ternary(Ternary {
                op: CompareOp::Ne,
                ..
            })
        ));
    }

    #[test]
    fn test_ternary_with_subscripted_lhs() {
        let template = compile(r#"${nb[0] == "a" ? "yes" : "no"}"#);
        match &template.nodes()[0] {
            TemplateNode::Ternary(t) => assert_eq!(t.lhs.subscript, Some(Subscript::Index(0))),
            other => panic!("expected ternary, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_regex_edit_in_quotes_is_literal() {
        let template = compile(r#"${a == "x" ? "${b/c/d/}" : "$c"}"#);
        match &template.nodes()[0] {
            TemplateNode::Ternary(t) => {
                assert_eq!(
                    t.if_true.segments,
                    vec![Segment::Text("${b/c/d/}".to_string())]
                );
            }
            other => panic!("expected ternary, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_parts() {
        let template = compile(r"${file|^(\d+)(-.*)$|$1s$2\$4|gi}");
        match &template.nodes()[0] {
            TemplateNode::Edit(e) => {
                assert_eq!(e.subject.name, "file");
                assert_eq!(e.delimiter, '|');
                assert_eq!(e.pattern, r"^(\d+)(-.*)$");
                assert!(e.case_insensitive);
                assert!(e.replace_all);
                assert_eq!(
                    e.replacement,
                    vec![
                        ReplacementPart::Group(1),
                        ReplacementPart::Text("s".to_string()),
                        ReplacementPart::Group(2),
                        ReplacementPart::Text("$4".to_string()),
                    ]
                );
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_escaped_delimiters() {
        let template = compile(r"${baz/[a-z]\/[a-z]/x\/y/i}");
        match &template.nodes()[0] {
            TemplateNode::Edit(e) => {
                assert_eq!(e.pattern, "[a-z]/[a-z]");
                assert_eq!(e.replacement, vec![ReplacementPart::Text("x/y".to_string())]);
                assert!(!e.replace_all);
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_replacement_variables() {
        let template = compile(r"${file/^\d+/X${bar[2]}-$baz/}");
        match &template.nodes()[0] {
            TemplateNode::Edit(e) => {
                assert_eq!(e.replacement.len(), 4);
                assert!(matches!(&e.replacement[1], ReplacementPart::Variable(v) if v.name == "bar"));
                assert!(matches!(&e.replacement[3], ReplacementPart::Variable(v) if v.name == "baz"));
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn test_variables_in_first_use_order() {
        let template =
            compile(r#"$b ${a} ${c == "$d" ? "${a}" : "$e"} ${f/(x)/$g$1/} ${f/(y)/$1/} $b"#);
        assert_eq!(template.variables(), vec!["b", "a", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_variables_many_repeats() {
        let source = "${x}$y".repeat(5000);
        assert_eq!(compile(&source).variables(), vec!["x", "y"]);
    }

    #[test]
    fn test_unterminated_brace() {
        let (position, reason) = parse_error("abc ${foo $bar");
        assert_eq!(position, 4);
        assert!(reason.contains("unterminated"));
    }

    #[test]
    fn test_missing_name() {
        let (position, _) = parse_error("${}");
        assert_eq!(position, 2);
    }

    #[test]
    fn test_bad_subscripts() {
        assert!(parse_error("${foo[]}").1.contains("empty subscript"));
        assert!(parse_error("${foo[1:2:3]}").1.contains("stride"));
        assert!(parse_error("${foo[a]}").1.contains("invalid subscript"));
        assert!(parse_error("${foo[-]}").1.contains("digits"));
        assert!(parse_error("${foo[99999999999999999999]}").1.contains("out of range"));
    }

    #[test]
    fn test_bad_ternaries() {
        assert!(parse_error(r#"${a = "x" ? "y" : "z"}"#).1.contains("\"==\""));
        assert!(parse_error(r#"${a == "x" "y" : "z"}"#).1.contains("'?'"));
        assert!(parse_error(r#"${a == "x" ? "y" "z"}"#).1.contains("':'"));
        assert!(parse_error(r#"${a == 'x' ? "y" : "z"}"#).1.contains("single quotes"));
        assert!(parse_error(r#"${a == "x ? "y" : "z"}"#).0 > 0);
    }

    #[test]
    fn test_bad_edits() {
        assert!(parse_error(r"${baz|[a-z]/[a-z]|x/y|igx}").1.contains("'x'"));
        assert!(parse_error(r"${baz|[a-z]/[a-z]|x/y").1.contains("unterminated"));
        assert!(parse_error(r"${baz|[a-z]/[a-z]|x/y|").1.contains("unterminated"));
        assert!(parse_error(r"${file|^[.*$|x|}").1.contains("bad regular expression"));
        assert!(parse_error(r"${file|^(\d+)(-.*)$|$1s$2$3|g}").1.contains("non-existent group"));
        assert!(parse_error(r"${file|||}").1.contains("empty regular expression"));
        assert!(parse_error(r"${file[0]/a/b/}").1.contains("subscripted"));
    }

    #[test]
    fn test_mismatched_delimiters() {
        // The token opens with '/', so '|' never closes the pattern.
        assert!(Template::compile(r"${foo/a|b|}").is_err());
    }
}
