/*
 * error.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Error types for template parsing and evaluation.

use thiserror::Error;

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Malformed substitution syntax. `position` is a byte offset into `template`.
    #[error("{}", describe_parse_error(template, *position, reason))]
    Parse {
        template: String,
        position: usize,
        reason: String,
    },

    /// A referenced variable has no value in any environment layer.
    #[error("Undefined variable \"{name}\" in \"{template}\"")]
    UndefinedVariable { name: String, template: String },

    /// A destination template contains a reserved character.
    #[error("The \"@\" character is not allowed in destinations: \"{dest}\"")]
    InvalidDestination { dest: String },

    /// I/O error (e.g., reading a template file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

impl TemplateError {
    pub(crate) fn parse(template: &str, position: usize, reason: impl Into<String>) -> Self {
        TemplateError::Parse {
            template: template.to_string(),
            position,
            reason: reason.into(),
        }
    }

    /// Render this error as an ariadne report against the template source.
    ///
    /// Parse errors get a labelled snippet pointing at the offending
    /// position; other errors fall back to their `Display` text.
    pub fn to_report(&self) -> String {
        match self {
            TemplateError::Parse {
                template,
                position,
                reason,
            } => render_ariadne_report(template, *position, reason)
                .unwrap_or_else(|| self.to_string()),
            _ => self.to_string(),
        }
    }
}

/// Format a parse error as the template followed by a caret under `position`.
fn describe_parse_error(template: &str, position: usize, reason: &str) -> String {
    let position = position.min(template.len());
    let line_start = template[..position].rfind('\n').map_or(0, |i| i + 1);
    let line_end = template[position..]
        .find('\n')
        .map_or(template.len(), |i| position + i);
    let line = &template[line_start..line_end];
    let column = template[line_start..position].chars().count();

    format!(
        "Failed to parse \"{}\": {}\n    {}\n    {}^",
        template,
        reason,
        line,
        " ".repeat(column)
    )
}

fn render_ariadne_report(template: &str, position: usize, reason: &str) -> Option<String> {
    use ariadne::{Color, Config, Label, Report, ReportKind, Source};

    const SOURCE_ID: &str = "<template>";

    // ariadne spans count characters, not bytes.
    let position = position.min(template.len());
    let start = template.get(..position)?.chars().count();
    let end = if position < template.len() {
        start + 1
    } else {
        start
    };

    let report = Report::build(ReportKind::Error, SOURCE_ID.to_string(), start)
        .with_config(Config::default().with_color(false))
        .with_message(format!("Failed to parse template: {}", reason))
        .with_label(
            Label::new((SOURCE_ID.to_string(), start..end))
                .with_message(reason)
                .with_color(Color::Red),
        )
        .finish();

    let mut output = Vec::new();
    report
        .write((SOURCE_ID.to_string(), Source::from(template)), &mut output)
        .ok()?;

    String::from_utf8(output).ok()
}
