//! Switch expressions

use crate::block::Block;
use crate::expr::Expr;
use crate::identifier::Identifier;
use crate::literal::Literal;
use crate::statements::{ExpressionStatement, ThrowStatement};
use flint_tokens::spanned::{Span, Spanned};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// `switch subjects:` followed by an indented list of arms
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpr {
    pub subjects: Vec<Expr>,
    /// The arms, in source order
    pub arms: Vec<SwitchArm>,
    pub span: Span,
}

/// `pattern -> body`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchArm {
    pub pattern: Pattern,
    pub body: ArmBody,
    pub span: Span,
}

/// What a switch arm matches against
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Binding(Identifier),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArmBody {
    Expression(ExpressionStatement),
    Block(Block),
    Throw(ThrowStatement),
}

impl Spanned for SwitchExpr {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for SwitchArm {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for Pattern {
    fn span(&self) -> Span {
        match self {
            Pattern::Binding(id) => id.span(),
            Pattern::Literal(lit) => lit.span(),
        }
    }
}

impl Spanned for ArmBody {
    fn span(&self) -> Span {
        match self {
            ArmBody::Expression(stmt) => stmt.span(),
            ArmBody::Block(block) => block.span(),
            ArmBody::Throw(stmt) => stmt.span(),
        }
    }
}

impl Display for SwitchExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(switch ({})", self.subjects.iter().join(" "))?;
        for arm in &self.arms {
            write!(f, " {arm}")?;
        }
        f.write_str(")")
    }
}

impl Display for SwitchArm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} -> {})", self.pattern, self.body)
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Binding(id) => write!(f, "{id}"),
            Pattern::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl Display for ArmBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArmBody::Expression(stmt) => write!(f, "{stmt}"),
            ArmBody::Block(block) => write!(f, "{block}"),
            ArmBody::Throw(stmt) => write!(f, "{stmt}"),
        }
    }
}
