//! Switch expressions

use crate::parser::blocking::{remove_nl, Parsable, SyntacticParser};
use crate::parser::{ErrorKind, SyntaxResult};
use flint_ast::block::Block;
use flint_ast::expr::Expr;
use flint_ast::identifier::Identifier;
use flint_ast::literal::Literal;
use flint_ast::statements::{ExpressionStatement, ThrowStatement};
use flint_ast::switch::{ArmBody, Pattern, SwitchArm, SwitchExpr};
use flint_tokens::spanned::Spanned;
use flint_tokens::token::TokenKind;
use tracing::trace;

impl Parsable for SwitchExpr {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let keyword = parser.expect(TokenKind::Switch)?;
        let mut subjects = vec![parser.parse(Expr::parse)?];
        while parser.consume_kind(&TokenKind::Comma)?.is_some() {
            subjects.push(parser.parse(Expr::parse)?);
        }
        let mut span = keyword.span().join(parser.expect(TokenKind::Colon)?.span());

        let mut arms = vec![];
        match parser.peek_kind()? {
            TokenKind::Newline => {
                parser.consume()?;
            }
            TokenKind::Dedent | TokenKind::Eof => {}
            TokenKind::Indent => {
                parser.consume()?;
                loop {
                    remove_nl(parser)?;
                    if parser.consume_kind(&TokenKind::Dedent)?.is_some() {
                        break;
                    }
                    let arm = parser.parse(SwitchArm::parse)?;
                    trace!("parsed switch arm {arm}");
                    span = span.join(arm.span());
                    arms.push(arm);
                }
            }
            _ => {
                let kind = ErrorKind::expected_token(["newline", "indent"], parser.peek()?);
                return Err(parser.error(kind));
            }
        }
        Ok(SwitchExpr {
            subjects,
            arms,
            span,
        })
    }
}

impl Parsable for SwitchArm {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let pattern = parser.parse(Pattern::parse)?;
        parser.expect(TokenKind::Arrow)?;
        let body = parser.parse(ArmBody::parse)?;
        Ok(SwitchArm {
            span: pattern.span().join(body.span()),
            pattern,
            body,
        })
    }
}

impl Parsable for Pattern {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        match parser.peek_kind()? {
            TokenKind::Identifier => Ok(Pattern::Binding(parser.parse(Identifier::parse)?)),
            kind if kind.is_literal() || kind == TokenKind::StringStart => {
                Ok(Pattern::Literal(parser.parse(Literal::parse)?))
            }
            _ => {
                let kind = ErrorKind::expected_token(["identifier", "literal"], parser.peek()?);
                Err(parser.error(kind))
            }
        }
    }
}

impl Parsable for ArmBody {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        match parser.peek_kind()? {
            TokenKind::Indent => Ok(ArmBody::Block(parser.parse(Block::parse)?)),
            TokenKind::Throw => Ok(ArmBody::Throw(parser.parse(ThrowStatement::parse)?)),
            _ => Ok(ArmBody::Expression(
                parser.parse(ExpressionStatement::parse)?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::test_parser;
    use test_log::test;

    fn parse_switch(src: &str) -> SwitchExpr {
        test_parser(src, |parser| {
            parser
                .parse(SwitchExpr::parse)
                .expect("switch should parse")
        })
    }

    #[test]
    fn test_arms_in_source_order() {
        let switch = parse_switch("switch x:\n    a -> 1\n    b -> 2\n");
        let patterns = switch
            .arms
            .iter()
            .map(|arm| arm.pattern.to_string())
            .collect::<Vec<_>>();
        assert_eq!(patterns, ["a", "b"]);
        assert_eq!(switch.to_string(), "(switch (x) (a -> 1) (b -> 2))");
    }

    #[test]
    fn test_empty_switch() {
        let switch = parse_switch("switch x, y:\nz");
        assert!(switch.arms.is_empty());
        assert_eq!(switch.subjects.len(), 2);
        let switch = parse_switch("switch x:");
        assert!(switch.arms.is_empty());
    }

    #[test]
    fn test_arm_bodies() {
        let switch = parse_switch(
            "switch v:\n  1 -> throw e\n  \"s\" ->\n    a\n    b\n  _ -> c = 2\n",
        );
        assert_eq!(
            switch.to_string(),
            "(switch (v) (1 -> (throw e)) (\"s\" -> {a b}) (_ -> (= c 2)))"
        );
    }

    #[test]
    fn test_invalid_pattern() {
        test_parser("switch x:\n  (a) -> 1\n", |parser| {
            let err = parser.parse(SwitchExpr::parse).unwrap_err().into_inner();
            assert_eq!(
                err.kind.to_string(),
                "expected identifier or literal, found `(`"
            );
        });
    }

    #[test]
    fn test_switch_in_assignment() {
        test_parser("y = switch x:\n  a -> 1\nz\n", |parser| {
            let expr = parser.parse(Expr::parse).unwrap();
            assert_eq!(expr.to_string(), "(= y (switch (x) (a -> 1)))");
            assert_eq!(parser.peek().unwrap().text(), "z");
        });
    }
}
