/*
 * edit.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Inline regex edit application.
//!
//! The replacement is expanded once (its variable references resolved) and
//! then spliced into each match, with `$n` group references filled from the
//! match's captures. Replacement text is never re-interpreted by the regex
//! engine, so a `$` that reached this point is always literal.

use crate::ast::RegexEdit;
use regex::Captures;

/// A replacement whose variable references have already been resolved.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResolvedPart {
    Text(String),
    Group(usize),
}

impl RegexEdit {
    /// Apply this edit to `subject`, given the resolved replacement pieces.
    ///
    /// Only the first match is replaced unless the `g` flag was given. A
    /// pattern that does not match leaves `subject` unchanged.
    pub(crate) fn apply(&self, subject: &str, replacement: &[ResolvedPart]) -> String {
        let expand = |caps: &Captures| {
            let mut out = String::new();
            for part in replacement {
                match part {
                    ResolvedPart::Text(text) => out.push_str(text),
                    // Groups that did not participate in the match expand to nothing.
                    ResolvedPart::Group(n) => {
                        if let Some(m) = caps.get(*n) {
                            out.push_str(m.as_str());
                        }
                    }
                }
            }
            out
        };

        if self.replace_all {
            self.regex.replace_all(subject, expand).into_owned()
        } else {
            self.regex.replace(subject, expand).into_owned()
        }
    }
}
