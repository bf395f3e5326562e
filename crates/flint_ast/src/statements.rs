//! Statements

use crate::block::Block;
use crate::expr::Expr;
use flint_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    Expression(ExpressionStatement),
    /// A bare `;`
    Empty(Span),
    Throw(ThrowStatement),
}

/// An expression evaluated for its effect
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expr: Expr,
    pub span: Span,
}

/// `throw value`
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub value: Expr,
    pub span: Span,
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Block(block) => block.span(),
            Statement::Expression(stmt) => stmt.span(),
            Statement::Empty(span) => *span,
            Statement::Throw(stmt) => stmt.span(),
        }
    }
}

impl Spanned for ExpressionStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for ThrowStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Block(block) => write!(f, "{block}"),
            Statement::Expression(stmt) => write!(f, "{stmt}"),
            Statement::Empty(_) => f.write_str(";"),
            Statement::Throw(stmt) => write!(f, "{stmt}"),
        }
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl Display for ThrowStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(throw {})", self.value)
    }
}
