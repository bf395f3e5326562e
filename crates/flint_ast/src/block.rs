use crate::statements::Statement;
use flint_tokens::spanned::{Span, Spanned};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// An indented block of statements
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Spanned for Block {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.statements.iter().join(" "))
    }
}
