//! Collection of every problem found while lexing and parsing

use crate::lexer::LexingError;
use crate::parser::SyntaxError;
use flint_tokens::spanned::{Span, Spanned};
use flint_tokens::SourceSnippet;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// The category of a diagnostic
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Indentation,
    UnterminatedLiteral,
    InvalidEscape,
    InvalidNumber,
    InvalidCharacterLiteral,
    Syntax,
    Cancelled,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiagnosticKind::Indentation => "indentation",
            DiagnosticKind::UnterminatedLiteral => "unterminated-literal",
            DiagnosticKind::InvalidEscape => "invalid-escape",
            DiagnosticKind::InvalidNumber => "invalid-number",
            DiagnosticKind::InvalidCharacterLiteral => "invalid-character-literal",
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single problem found in a source buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            severity: Severity::Error,
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Renders this diagnostic alongside the source it points into
    pub fn snippet<'a>(&'a self, source: &'a str, name: &'a str) -> SourceSnippet<'a, &'a Self> {
        SourceSnippet::new(self, source, name, self.span)
    }
}

impl Spanned for Diagnostic {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.kind, self.message)
    }
}

impl From<&LexingError> for Diagnostic {
    fn from(error: &LexingError) -> Self {
        let message = error.to_string();
        match error {
            LexingError::MixedIndentation { .. } => {
                Diagnostic::warning(DiagnosticKind::Indentation, message, error.span())
            }
            _ => Diagnostic::error(error.diagnostic_kind(), message, error.span()),
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        match error.lexing_error() {
            Some(lexing) => Diagnostic::from(lexing),
            None => Diagnostic::error(DiagnosticKind::Syntax, error.kind.to_string(), error.span),
        }
    }
}

/// Collects diagnostics over the course of a parse
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        debug!("reporting {diagnostic}");
        self.items.push(diagnostic);
    }

    pub fn report_lexing_error(&mut self, error: &LexingError) {
        self.push(error.into());
    }

    pub fn report_syntax_error(&mut self, error: &SyntaxError) {
        self.push(error.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks if any diagnostic with error severity was reported
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Gets every diagnostic in source order. Diagnostics at the same position keep the
    /// order they were reported in.
    pub fn into_sorted_vec(self) -> Vec<Diagnostic> {
        let mut items = self.items;
        items.sort_by_key(|d| d.span.start());
        items
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_tokens::spanned::Position;
    use test_log::test;

    fn span_at(offset: usize) -> Span {
        Span::empty(Position::new(offset, 1, offset + 1))
    }

    #[test]
    fn test_sorted_by_start() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error(DiagnosticKind::Syntax, "b", span_at(5)));
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::Indentation,
            "a",
            span_at(1),
        ));
        diagnostics.push(Diagnostic::error(DiagnosticKind::Syntax, "c", span_at(5)));
        assert!(diagnostics.has_errors());
        let messages = diagnostics
            .into_sorted_vec()
            .into_iter()
            .map(|d| d.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, ["a", "b", "c"]);
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::Indentation,
            "mixed",
            span_at(0),
        ));
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::error(DiagnosticKind::InvalidNumber, "bad", span_at(0));
        assert_eq!(diagnostic.to_string(), "error[invalid-number]: bad");
    }

    #[test]
    fn test_snippet() {
        let span = Span::new(Position::new(4, 1, 5), Position::new(7, 1, 8));
        let diagnostic = Diagnostic::error(DiagnosticKind::InvalidNumber, "bad", span);
        assert_eq!(
            diagnostic.snippet("x = 007\n", "main.ft").to_string(),
            "error[invalid-number]: bad\n  -> main.ft:1:5\n1 | x = 007\n        ~~~\n"
        );
    }
}
