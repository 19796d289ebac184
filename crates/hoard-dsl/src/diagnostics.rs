//! Diagnostics for rejected command lines.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;

use crate::error::CommandError;

/// A rejected command, positioned in its source line.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Byte range the message points at.
    pub span: std::ops::Range<usize>,
    /// Headline message.
    pub message: String,
    /// Optional text attached to the underline. Falls back to `message`.
    pub label: Option<String>,
}

impl Diagnostic {
    /// An error diagnostic at `span`.
    pub fn error(span: std::ops::Range<usize>, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach label text to the underline.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<&CommandError> for Diagnostic {
    fn from(err: &CommandError) -> Self {
        let diag = Diagnostic::error(err.span(), err.to_string());
        match err {
            CommandError::NotRecognized { .. } => {
                diag.with_label("expected `gives`, `takes from`, `buys`, `sells` or `Set Value`")
            }
            CommandError::ItemSyntax { .. } | CommandError::BadQuantity { .. } => {
                diag.with_label("write items as Name:Quantity")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let span = diag.span.clone();
        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        let report = Report::build(ReportKind::Error, (filename, span.clone()))
            .with_message(&diag.message)
            .with_label(
                Label::new((filename, span))
                    .with_message(label_text)
                    .with_color(Color::Red),
            );

        report
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_command;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(0..5, "Command not recognized.");
        assert_eq!(d.to_string(), "error: Command not recognized.");
    }

    #[test]
    fn from_command_error_keeps_span() {
        let err = parse_command("Alice gives Bob: 5, Arrow").unwrap_err();
        let diag = Diagnostic::from(&err);
        assert_eq!(diag.span, 20..25);
        assert_eq!(diag.label.as_deref(), Some("write items as Name:Quantity"));
    }

    #[test]
    fn render_produces_output() {
        let source = "Alice gives Bob: 5, Arrow";
        let err = parse_command(source).unwrap_err();
        let output = render_diagnostics(source, "command", &[Diagnostic::from(&err)]);
        assert!(output.contains("Item must be in [Item]:[Amount]."));
    }

    #[test]
    fn render_handles_end_of_input() {
        let source = "Alice gives";
        let err = parse_command(source).unwrap_err();
        let output = render_diagnostics(source, "command", &[Diagnostic::from(&err)]);
        assert!(output.contains("Command not recognized."));
    }
}
