use crate::lexer::LexingError;
use crate::parser::Err;
use flint_tokens::spanned::{Span, Spanned};
use flint_tokens::token::Token;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Represents an error occurring during parsing
#[derive(Debug, Error)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub span: Span,
    pub non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(kind: ErrorKind, span: Span, non_terminals: Vec<&'static str>) -> Self {
        Self {
            kind,
            span,
            non_terminal_stack: non_terminals,
        }
    }

    /// Gets the lexing error this error wraps, if any
    pub fn lexing_error(&self) -> Option<&LexingError> {
        match &self.kind {
            ErrorKind::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl Spanned for SyntaxError {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "syntax error at {}: {}", self.span.start(), self.kind)?;
        if !self.non_terminal_stack.is_empty() {
            writeln!(f, "non terminal stack:")?;
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                writeln!(f, "  {}: {}", idx, non_terminal)?;
            }
        }
        Ok(())
    }
}

impl From<LexingError> for SyntaxError {
    fn from(value: LexingError) -> Self {
        let span = value.span();
        Self::new(ErrorKind::Lex(value), span, vec![])
    }
}

/// [SyntaxError] kind
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("expected {}, found {found}", .expected.join(" or "))]
    ExpectedToken { expected: Vec<String>, found: String },
    #[error("invalid assignment target, expected an identifier, field access or array access")]
    InvalidAssignmentTarget,
    #[error("`{0}` declarations are not supported")]
    UnsupportedDeclaration(String),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error(transparent)]
    Lex(#[from] LexingError),
}

impl ErrorKind {
    pub fn expected_token(
        token_kinds: impl IntoIterator<Item = impl AsRef<str>>,
        found: &Token,
    ) -> Self {
        Self::ExpectedToken {
            expected: token_kinds
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            found: found.describe(),
        }
    }
}

pub type SyntaxResult<T = ()> = Result<T, Err<SyntaxError>>;
