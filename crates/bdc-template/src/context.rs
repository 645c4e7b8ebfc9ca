/*
 * context.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Variable environment types.
//!
//! An [`Environment`] holds three layers of string variables:
//!
//! 1. **Built-ins**, computed by the build (e.g., `basename`, `lang`)
//! 2. **Globals**, declared once per build file
//! 3. **Locals**, declared per notebook or per file
//!
//! Locals shadow globals, but built-ins can never be shadowed: declaring a
//! user variable with a built-in's name is accepted and then ignored.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// The variables visible to one expansion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    builtins: IndexMap<String, String>,
    globals: IndexMap<String, String>,
    locals: IndexMap<String, String>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment with the given built-in variables.
    pub fn with_builtins<K, V>(builtins: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::new();
        for (name, value) in builtins {
            env.set_builtin(name, value);
        }
        env
    }

    /// Set (or replace) a built-in variable.
    pub fn set_builtin(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.builtins.insert(name.into(), value.into());
    }

    /// Declare a global user variable.
    pub fn declare_global(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.note_shadowed_builtin(&name, "global");
        self.globals.insert(name, value.into());
    }

    /// Declare a local user variable. Locals take precedence over globals.
    pub fn declare_local(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.note_shadowed_builtin(&name, "local");
        self.locals.insert(name, value.into());
    }

    /// Declare several globals at once.
    pub fn extend_globals<K, V>(&mut self, vars: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            self.declare_global(name, value);
        }
    }

    /// Declare several locals at once.
    pub fn extend_locals<K, V>(&mut self, vars: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            self.declare_local(name, value);
        }
    }

    /// Create a copy of this environment with additional local variables.
    ///
    /// The receiver is left untouched, so one global environment can be
    /// reused for every notebook in a build.
    pub fn with_locals<K, V>(&self, vars: impl IntoIterator<Item = (K, V)>) -> Environment
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut child = self.clone();
        child.extend_locals(vars);
        child
    }

    /// Look up the visible value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.builtins
            .get(name)
            .or_else(|| self.locals.get(name))
            .or_else(|| self.globals.get(name))
            .map(String::as_str)
    }

    /// Look up a variable, distinguishing empty from non-empty values.
    ///
    /// A missing variable is reported as [`VariableValue::Empty`].
    pub fn value(&self, name: &str) -> VariableValue<'_> {
        VariableValue::from(self.get(name))
    }

    /// Whether `name` is a built-in variable.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Whether `name` is visible in any layer.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All visible variable names: built-ins first, then locals, then globals.
    pub fn names(&self) -> Vec<&str> {
        let names: IndexSet<&str> = self
            .builtins
            .keys()
            .chain(self.locals.keys())
            .chain(self.globals.keys())
            .map(String::as_str)
            .collect();
        names.into_iter().collect()
    }

    /// All visible variables and their values, in [`names`](Self::names) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names()
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value)))
    }

    fn note_shadowed_builtin(&self, name: &str, layer: &str) {
        if self.is_builtin(name) {
            debug!(
                variable = name,
                layer, "ignoring user declaration that shadows a built-in variable"
            );
        }
    }
}

/// A variable's value, classified by emptiness.
///
/// Build files use variables as flags; this keeps the empty/non-empty
/// distinction explicit instead of relying on string truthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableValue<'a> {
    /// Missing, or the empty string.
    Empty,
    /// Any non-empty string (including `"false"`).
    NonEmpty(&'a str),
}

impl<'a> VariableValue<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, VariableValue::Empty)
    }

    /// The underlying string; empty for [`VariableValue::Empty`].
    pub fn as_str(&self) -> &'a str {
        match self {
            VariableValue::Empty => "",
            VariableValue::NonEmpty(s) => s,
        }
    }
}

impl<'a> From<Option<&'a str>> for VariableValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => VariableValue::NonEmpty(s),
            _ => VariableValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_win_over_user_declarations() {
        let mut env = Environment::with_builtins([("course_name", "Foo")]);
        env.declare_global("course_name", "Bar");
        env.declare_local("course_name", "Baz");

        assert_eq!(env.get("course_name"), Some("Foo"));
    }

    #[test]
    fn test_locals_shadow_globals() {
        let mut env = Environment::new();
        env.declare_global("x", "global");
        env.declare_global("y", "global_y");
        env.declare_local("x", "local");

        assert_eq!(env.get("x"), Some("local"));
        assert_eq!(env.get("y"), Some("global_y"));
        assert_eq!(env.get("z"), None);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut env = Environment::new();
        env.declare_global("Foo", "upper");
        assert_eq!(env.get("foo"), None);
        assert_eq!(env.get("Foo"), Some("upper"));
    }

    #[test]
    fn test_with_locals_leaves_parent_unchanged() {
        let mut parent = Environment::new();
        parent.declare_global("x", "parent_x");

        let child = parent.with_locals([("x", "child_x"), ("y", "child_y")]);

        assert_eq!(child.get("x"), Some("child_x"));
        assert_eq!(child.get("y"), Some("child_y"));
        assert_eq!(parent.get("x"), Some("parent_x"));
        assert_eq!(parent.get("y"), None);
    }

    #[test]
    fn test_names_in_precedence_order_without_duplicates() {
        let mut env = Environment::with_builtins([("basename", "01-Intro")]);
        env.declare_global("course", "Spark");
        env.declare_global("basename", "ignored");
        env.declare_local("course", "Delta");
        env.declare_local("level", "2");

        assert_eq!(env.names(), vec!["basename", "course", "level"]);
        let pairs: Vec<(&str, &str)> = env.iter().collect();
        assert_eq!(
            pairs,
            vec![("basename", "01-Intro"), ("course", "Delta"), ("level", "2")]
        );
    }

    #[test]
    fn test_names_with_large_overlapping_layers() {
        let names: Vec<String> = (0..5000).map(|i| format!("v{i}")).collect();
        let mut env = Environment::with_builtins(names.iter().map(|n| (n.as_str(), "b")));
        env.extend_locals(names.iter().map(|n| (n.as_str(), "l")));
        env.extend_globals(names.iter().rev().map(|n| (n.as_str(), "g")));
        env.declare_global("extra", "g");

        let visible = env.names();
        assert_eq!(visible.len(), 5001);
        assert_eq!(visible[0], "v0");
        assert_eq!(visible[4999], "v4999");
        assert_eq!(visible[5000], "extra");
    }

    #[test]
    fn test_empty_string_is_defined() {
        let mut env = Environment::new();
        env.declare_global("blank", "");
        assert!(env.contains("blank"));
        assert_eq!(env.get("blank"), Some(""));
    }

    #[test]
    fn test_variable_value_classification() {
        let mut env = Environment::new();
        env.declare_global("blank", "");
        env.declare_global("flag", "false");

        assert_eq!(env.value("blank"), VariableValue::Empty);
        assert_eq!(env.value("missing"), VariableValue::Empty);
        assert_eq!(env.value("flag"), VariableValue::NonEmpty("false"));
        assert!(!env.value("flag").is_empty());
        assert_eq!(env.value("missing").as_str(), "");
    }
}
