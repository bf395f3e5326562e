//! Types as they are written in source

use crate::identifier::Identifier;
use flint_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// A type
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// A single named type
    Simple(Identifier),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::Simple(id) => id.name(),
        }
    }
}

impl Spanned for Type {
    fn span(&self) -> Span {
        match self {
            Type::Simple(id) => id.span(),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Simple(id) => write!(f, "{id}"),
        }
    }
}
