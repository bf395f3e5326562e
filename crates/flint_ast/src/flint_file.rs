//! The root of a parsed source file

use crate::statements::Statement;
use flint_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// A parsed flint source file
#[derive(Debug, Clone, PartialEq)]
pub struct FlintFile {
    pub statements: Vec<TopLevelStatement>,
    pub span: Span,
}

/// A statement at the top level of a file. Declarations will be added here.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelStatement {
    Statement(Statement),
}

impl Spanned for FlintFile {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for TopLevelStatement {
    fn span(&self) -> Span {
        match self {
            TopLevelStatement::Statement(stmt) => stmt.span(),
        }
    }
}

impl Display for TopLevelStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TopLevelStatement::Statement(stmt) => write!(f, "{stmt}"),
        }
    }
}

/// One top level statement per line
impl Display for FlintFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{stmt}")?;
        }
        Ok(())
    }
}
