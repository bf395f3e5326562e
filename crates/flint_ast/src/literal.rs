//! Literal values

use crate::expr::Expr;
use flint_tokens::spanned::{Span, Spanned};
use flint_tokens::token::FloatSuffix;
use std::fmt::{Display, Formatter};

/// A literal
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    span: Span,
}

impl Literal {
    pub fn new(kind: LiteralKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Spanned for Literal {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    Integer(i64),
    Float {
        value: f64,
        suffix: Option<FloatSuffix>,
    },
    Char(char),
    String(StringLiteral),
    Boolean(bool),
    None,
    /// The `_` placeholder
    Default,
}

/// A string literal, possibly containing interpolated expressions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringLiteral {
    pub parts: Vec<StringPart>,
}

impl StringLiteral {
    pub fn new(parts: impl IntoIterator<Item = StringPart>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    /// Gets the string value if this literal contains no interpolations
    pub fn as_plain(&self) -> Option<String> {
        self.parts
            .iter()
            .try_fold(String::new(), |mut accum, part| match part {
                StringPart::Fragment(s) => {
                    accum.push_str(s);
                    Some(accum)
                }
                StringPart::Interpolation(_) => None,
            })
    }

    pub fn is_interpolated(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, StringPart::Interpolation(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    /// Decoded text
    Fragment(String),
    Interpolation(Box<Expr>),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            LiteralKind::Integer(i) => write!(f, "{i}"),
            LiteralKind::Float { value, suffix } => {
                write!(f, "{value:?}")?;
                match suffix {
                    Some(FloatSuffix::Float) => f.write_str("f"),
                    Some(FloatSuffix::Double) => f.write_str("d"),
                    None => Ok(()),
                }
            }
            LiteralKind::Char(c) => write!(f, "{c:?}"),
            LiteralKind::String(s) => {
                f.write_str("\"")?;
                for part in &s.parts {
                    match part {
                        StringPart::Fragment(text) => {
                            write!(f, "{}", text.escape_debug())?;
                        }
                        StringPart::Interpolation(expr) => {
                            write!(f, "{{{expr}}}")?;
                        }
                    }
                }
                f.write_str("\"")
            }
            LiteralKind::Boolean(b) => write!(f, "{b}"),
            LiteralKind::None => f.write_str("none"),
            LiteralKind::Default => f.write_str("_"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use flint_tokens::spanned::Position;

    fn span() -> Span {
        Span::empty(Position::START)
    }

    #[test]
    fn test_plain_string() {
        let s = StringLiteral::new([
            StringPart::Fragment("ab".to_string()),
            StringPart::Fragment("c".to_string()),
        ]);
        assert_eq!(s.as_plain().as_deref(), Some("abc"));
        assert!(!s.is_interpolated());
    }

    #[test]
    fn test_interpolated_string_display() {
        let inner = Expr::Literal(Literal::new(LiteralKind::Integer(1), span()));
        let s = StringLiteral::new([
            StringPart::Fragment("x = ".to_string()),
            StringPart::Interpolation(Box::new(inner)),
        ]);
        assert!(s.as_plain().is_none());
        let lit = Literal::new(LiteralKind::String(s), span());
        assert_eq!(lit.to_string(), "\"x = {1}\"");
    }
}
