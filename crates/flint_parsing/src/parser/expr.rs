//! Expression parsing by precedence climbing

use crate::parser::blocking::{CouldParse, Parsable, SyntacticParser};
use crate::parser::precedence::{infix_op, prefix_op, InfixOp, PrefixOp, PREFIX_BINDING_POWER};
use crate::parser::{ErrorKind, SyntaxResult};
use flint_ast::expr::{
    Expr, ExprArrayAccess, ExprArrayCreation, ExprAssignment, ExprBinary, ExprCall, ExprCast,
    ExprExtraction, ExprField, ExprGroupedField, ExprInitializer, ExprOptionalChain, ExprRange,
    ExprUnary, ExprUnwrap, ExprUpdate, UpdateOp,
};
use flint_ast::identifier::Identifier;
use flint_ast::literal::{Literal, LiteralKind, StringLiteral, StringPart};
use flint_ast::switch::SwitchExpr;
use flint_ast::types::Type;
use flint_tokens::spanned::{Span, Spanned};
use flint_tokens::token::TokenKind;
use tracing::trace;

impl Parsable for Expr {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        expr_bp(parser, 0)
    }
}

impl CouldParse for Expr {
    fn could_parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<bool> {
        Ok(starts_expr(parser.peek()?.kind()))
    }
}

/// Checks if a token of this kind can begin an expression
pub fn starts_expr(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer(_)
            | TokenKind::Float { .. }
            | TokenKind::Char(_)
            | TokenKind::StringStart
            | TokenKind::True
            | TokenKind::False
            | TokenKind::None
            | TokenKind::Default
            | TokenKind::Identifier
            | TokenKind::LParen
            | TokenKind::Switch
            | TokenKind::DotDot
    ) || prefix_op(kind).is_some()
}

/// Parses an expression whose infix operators all bind at least as tightly as `min_bp`
fn expr_bp(parser: &mut SyntacticParser<'_>, min_bp: u8) -> SyntaxResult<Expr> {
    let mut lhs = operand(parser)?;
    loop {
        if lhs.ends_with_layout() {
            break;
        }
        let Some(op) = infix_op(parser.peek()?.kind()) else {
            break;
        };
        let (l_bp, r_bp) = op.binding_power();
        if l_bp < min_bp {
            break;
        }
        let op_token = parser.consume()?;
        trace!("infix {op:?} at {}", op_token.span());
        lhs = match op {
            InfixOp::Assign(op) => {
                if !lhs.is_assignable() {
                    let span = lhs.span();
                    return Err(parser.error_with_span(ErrorKind::InvalidAssignmentTarget, span));
                }
                let right = expr_bp(parser, r_bp)?;
                Expr::Assignment(ExprAssignment {
                    span: lhs.span().join(right.span()),
                    left: Box::new(lhs),
                    op,
                    right: Box::new(right),
                })
            }
            InfixOp::Binary(op) => {
                let right = expr_bp(parser, r_bp)?;
                Expr::Binary(ExprBinary {
                    span: lhs.span().join(right.span()),
                    left: Box::new(lhs),
                    op,
                    right: Box::new(right),
                })
            }
            InfixOp::Range => {
                let to = range_end(parser, r_bp)?;
                let end = to.as_ref().map_or(op_token.span(), |to| to.span());
                Expr::Range(ExprRange {
                    span: lhs.span().join(end),
                    from: Some(Box::new(lhs)),
                    to,
                })
            }
        };
    }
    Ok(lhs)
}

/// The optional right hand side of a range
fn range_end(parser: &mut SyntacticParser<'_>, r_bp: u8) -> SyntaxResult<Option<Box<Expr>>> {
    if Expr::could_parse(parser)? {
        Ok(Some(Box::new(expr_bp(parser, r_bp)?)))
    } else {
        Ok(None)
    }
}

/// Parses a prefix operation or a primary expression followed by its postfix operators
fn operand(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Expr> {
    let kind = parser.peek_kind()?;
    if let Some(op) = prefix_op(&kind) {
        let op_token = parser.consume()?;
        let operand = expr_bp(parser, PREFIX_BINDING_POWER)?;
        let span = op_token.span().join(operand.span());
        let operand = Box::new(operand);
        return Ok(match op {
            PrefixOp::Unary(op) => Expr::Unary(ExprUnary { op, operand, span }),
            PrefixOp::Update(op) => Expr::Update(ExprUpdate {
                op,
                operand,
                prefix: true,
                span,
            }),
        });
    }
    match kind {
        TokenKind::DotDot => {
            let op_token = parser.consume()?;
            let (_, r_bp) = InfixOp::Range.binding_power();
            let to = range_end(parser, r_bp)?;
            let span = to
                .as_ref()
                .map_or(op_token.span(), |to| op_token.span().join(to.span()));
            Ok(Expr::Range(ExprRange {
                from: None,
                to,
                span,
            }))
        }
        TokenKind::Switch => Ok(Expr::Switch(parser.parse(SwitchExpr::parse)?)),
        _ => {
            let primary = primary(parser)?;
            postfix(parser, primary)
        }
    }
}

fn primary(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Expr> {
    let kind = parser.peek_kind()?;
    match kind {
        TokenKind::Identifier => Ok(Expr::Identifier(parser.parse(Identifier::parse)?)),
        TokenKind::LParen => {
            parser.consume()?;
            let inner = parser.parse(Expr::parse)?;
            parser.expect(TokenKind::RParen)?;
            Ok(inner)
        }
        kind if kind.is_literal() || kind == TokenKind::StringStart => {
            Ok(Expr::Literal(parser.parse(Literal::parse)?))
        }
        _ => {
            let kind = ErrorKind::expected_token(["expression"], parser.peek()?);
            Err(parser.error(kind))
        }
    }
}

/// Applies every postfix operator following `expr`
fn postfix(parser: &mut SyntacticParser<'_>, mut expr: Expr) -> SyntaxResult<Expr> {
    loop {
        let kind = parser.peek_kind()?;
        expr = match kind {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op_token = parser.consume()?;
                let op = if kind == TokenKind::PlusPlus {
                    UpdateOp::Increment
                } else {
                    UpdateOp::Decrement
                };
                Expr::Update(ExprUpdate {
                    op,
                    span: expr.span().join(op_token.span()),
                    operand: Box::new(expr),
                    prefix: false,
                })
            }
            TokenKind::Bang => {
                let bang = parser.consume()?;
                if parser.check(&TokenKind::LParen)? {
                    let (args, args_span) = delimited(parser, TokenKind::LParen, TokenKind::RParen)?;
                    Expr::Unwrap(ExprUnwrap {
                        span: expr.span().join(args_span),
                        value: Box::new(expr),
                        args: Some(args),
                    })
                } else {
                    Expr::Unwrap(ExprUnwrap {
                        span: expr.span().join(bang.span()),
                        value: Box::new(expr),
                        args: None,
                    })
                }
            }
            TokenKind::Question => {
                parser.consume()?;
                let (args, args_span) = delimited(parser, TokenKind::LParen, TokenKind::RParen)?;
                Expr::Extraction(ExprExtraction {
                    span: expr.span().join(args_span),
                    value: Box::new(expr),
                    args,
                })
            }
            TokenKind::QuestionDot => {
                parser.consume()?;
                let field = parser.parse(Identifier::parse)?;
                Expr::OptionalChain(ExprOptionalChain {
                    span: expr.span().join(field.span()),
                    object: Box::new(expr),
                    field,
                })
            }
            TokenKind::Dot => {
                parser.consume()?;
                if parser.consume_kind(&TokenKind::LParen)?.is_some() {
                    let mut fields = vec![parser.parse(Identifier::parse)?];
                    while parser.consume_kind(&TokenKind::Comma)?.is_some() {
                        if parser.check(&TokenKind::RParen)? {
                            break;
                        }
                        fields.push(parser.parse(Identifier::parse)?);
                    }
                    let close = parser.expect(TokenKind::RParen)?;
                    Expr::GroupedFieldAccess(ExprGroupedField {
                        span: expr.span().join(close.span()),
                        object: Box::new(expr),
                        fields,
                    })
                } else {
                    let field = parser.parse(Identifier::parse)?;
                    Expr::FieldAccess(ExprField {
                        span: expr.span().join(field.span()),
                        object: Box::new(expr),
                        field,
                    })
                }
            }
            TokenKind::LBracket => {
                let (indices, indices_span) =
                    delimited(parser, TokenKind::LBracket, TokenKind::RBracket)?;
                if indices.is_empty() {
                    let kind = ErrorKind::ExpectedToken {
                        expected: vec!["expression".to_string()],
                        found: TokenKind::RBracket.to_string(),
                    };
                    return Err(parser.error_with_span(kind, indices_span));
                }
                let has_values = parser.check(&TokenKind::LParen)?;
                match known_type(parser, &expr) {
                    Some(ty) if has_values => {
                        let (init_values, values_span) =
                            delimited(parser, TokenKind::LParen, TokenKind::RParen)?;
                        Expr::ArrayCreation(ExprArrayCreation {
                            span: ty.span().join(values_span),
                            ty,
                            dims: indices,
                            init_values,
                        })
                    }
                    _ => Expr::ArrayAccess(ExprArrayAccess {
                        span: expr.span().join(indices_span),
                        array: Box::new(expr),
                        indices,
                    }),
                }
            }
            TokenKind::LParen => {
                let (mut args, args_span) =
                    delimited(parser, TokenKind::LParen, TokenKind::RParen)?;
                let span = expr.span().join(args_span);
                match known_type(parser, &expr) {
                    Some(ty) if args.len() == 1 => Expr::Cast(ExprCast {
                        ty,
                        value: Box::new(args.remove(0)),
                        span,
                    }),
                    Some(ty) => Expr::Initializer(ExprInitializer {
                        ty,
                        values: args,
                        span,
                    }),
                    None => Expr::Call(ExprCall {
                        callee: Box::new(expr),
                        args,
                        span,
                    }),
                }
            }
            _ => break,
        };
    }
    Ok(expr)
}

/// Gets the type named by `expr` if it is an identifier registered as a known type name
fn known_type(parser: &SyntacticParser<'_>, expr: &Expr) -> Option<Type> {
    match expr {
        Expr::Identifier(id) if parser.config().is_type_name(id.name()) => {
            Some(Type::Simple(id.clone()))
        }
        _ => None,
    }
}

/// Parses a comma separated list of expressions between `open` and `close`. A trailing comma
/// is allowed.
fn delimited(
    parser: &mut SyntacticParser<'_>,
    open: TokenKind,
    close: TokenKind,
) -> SyntaxResult<(Vec<Expr>, Span)> {
    let open = parser.expect(open)?;
    let mut exprs = vec![];
    while !parser.check(&close)? {
        exprs.push(parser.parse(Expr::parse)?);
        if parser.consume_kind(&TokenKind::Comma)?.is_none() {
            break;
        }
    }
    let close = parser.expect(close)?;
    Ok((exprs, open.span().join(close.span())))
}

impl Parsable for Identifier {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let token = parser.expect_identifier()?;
        Ok(Identifier::new(token.text(), token.span()))
    }
}

impl Parsable for Literal {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        if parser.check(&TokenKind::StringStart)? {
            return string_literal(parser);
        }
        let token = parser.consume()?;
        let kind = match token.kind() {
            TokenKind::Integer(value) => LiteralKind::Integer(*value),
            TokenKind::Float { value, suffix } => LiteralKind::Float {
                value: *value,
                suffix: *suffix,
            },
            TokenKind::Char(c) => LiteralKind::Char(*c),
            TokenKind::True => LiteralKind::Boolean(true),
            TokenKind::False => LiteralKind::Boolean(false),
            TokenKind::None => LiteralKind::None,
            TokenKind::Default => LiteralKind::Default,
            _ => {
                let kind = ErrorKind::expected_token(["literal"], &token);
                return Err(parser.error_with_span(kind, token.span()));
            }
        };
        Ok(Literal::new(kind, token.span()))
    }
}

/// Parses the fragments and interpolations between a string's quotes
fn string_literal(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Literal> {
    let start = parser.expect(TokenKind::StringStart)?;
    let mut parts = vec![];
    let end = loop {
        let token = parser.consume()?;
        match token.kind().clone() {
            TokenKind::StringFragment(text) => parts.push(StringPart::Fragment(text)),
            TokenKind::InterpolationStart => {
                let expr = parser.parse(Expr::parse)?;
                parser.expect(TokenKind::InterpolationEnd)?;
                parts.push(StringPart::Interpolation(Box::new(expr)));
            }
            TokenKind::StringEnd => break token,
            _ => {
                let kind = ErrorKind::expected_token(["string fragment", "`{`", "`\"`"], &token);
                return Err(parser.error_with_span(kind, token.span()));
            }
        }
    };
    Ok(Literal::new(
        LiteralKind::String(StringLiteral::new(parts)),
        start.span().join(end.span()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::parser::tests::test_parser;
    use crate::parser::Err;
    use test_log::test;

    fn parse_expr(src: &str) -> String {
        test_parser(src, |parser| {
            let expr = parser.parse(Expr::parse).expect("expression should parse");
            assert_eq!(parser.peek().unwrap().kind(), &TokenKind::Eof);
            expr.to_string()
        })
    }

    fn parse_with_types(src: &str, types: &[&str]) -> String {
        let config = ParseConfig::builder()
            .type_names(types.iter().copied())
            .build()
            .unwrap();
        let mut parser = SyntacticParser::new(src, &config);
        parser
            .parse(Expr::parse)
            .expect("expression should parse")
            .to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse_expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(parse_expr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(parse_expr("a or b and c"), "(or a (and b c))");
        assert_eq!(parse_expr("a < b == c"), "(== (< a b) c)");
        assert_eq!(parse_expr("a + b % c - d"), "(- (+ a (% b c)) d)");
    }

    #[test]
    fn test_power_and_coalesce_are_left_associative() {
        assert_eq!(parse_expr("2 ** 3 ** 2"), "(** (** 2 3) 2)");
        assert_eq!(parse_expr("a ?? b ** c"), "(** (?? a b) c)");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(parse_expr("a = b = 3"), "(= a (= b 3))");
        assert_eq!(parse_expr("a += b or c"), "(+= a (or b c))");
        assert_eq!(parse_expr("x := 1"), "(:= x 1)");
        assert_eq!(parse_expr("a.b[0] = 1"), "(= ([] (. a b) 0) 1)");
    }

    #[test]
    fn test_invalid_assignment_target() {
        test_parser("a + b = 3", |parser| {
            let err = parser.parse(Expr::parse).unwrap_err();
            let Err::Error(err) = err else {
                panic!("expected a recoverable error")
            };
            assert!(matches!(err.kind, ErrorKind::InvalidAssignmentTarget));
            assert_eq!(err.span.start().offset, 0);
            assert_eq!(err.span.end().offset, 5);
        });
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(parse_expr("not a and b"), "(and (not a) b)");
        assert_eq!(parse_expr("- x * y"), "(* (- x) y)");
        assert_eq!(parse_expr("++x"), "(++ x)");
        assert_eq!(parse_expr("-x.y"), "(- (. x y))");
        assert_eq!(parse_expr("a - -1"), "(- a -1)");
    }

    #[test]
    fn test_postfix_operators() {
        assert_eq!(parse_expr("x++"), "(post++ x)");
        assert_eq!(parse_expr("x!"), "(! x)");
        assert_eq!(parse_expr("x!(1, 2)"), "(! x (1 2))");
        assert_eq!(parse_expr("x?(e)"), "(? x (e))");
        assert_eq!(parse_expr("a?.b.c"), "(. (?. a b) c)");
        assert_eq!(parse_expr("a.(b, c)"), "(.() a b c)");
        assert_eq!(parse_expr("a[1, 2]"), "([] a 1 2)");
        assert_eq!(parse_expr("f(1, g(2))(3)"), "(call (call f 1 (call g 2)) 3)");
        assert_eq!(parse_expr("f()"), "(call f)");
    }

    #[test]
    fn test_extraction_requires_arguments() {
        test_parser("x?", |parser| {
            assert!(parser.parse(Expr::parse).is_err());
        });
    }

    #[test]
    fn test_ranges() {
        assert_eq!(parse_expr("1..5"), "(.. 1 5)");
        assert_eq!(parse_expr("..b"), "(.. () b)");
        assert_eq!(parse_expr("a.."), "(.. a ())");
        assert_eq!(parse_expr(".."), "(.. () ())");
        assert_eq!(parse_expr("x = 0..n + 1"), "(= x (.. 0 (+ n 1)))");
    }

    #[test]
    fn test_call_without_type_names() {
        assert_eq!(parse_expr("int(x)"), "(call int x)");
        assert_eq!(parse_expr("int[3](0)"), "(call ([] int 3) 0)");
    }

    #[test]
    fn test_type_name_hints() {
        let types = ["int", "Point"];
        assert_eq!(parse_with_types("int(x)", &types), "(cast int x)");
        assert_eq!(parse_with_types("Point(1, 2)", &types), "(init Point 1 2)");
        assert_eq!(parse_with_types("int[3](0)", &types), "(new int [3] 0)");
        assert_eq!(parse_with_types("int[3]", &types), "([] int 3)");
        assert_eq!(parse_with_types("float(x)", &types), "(call float x)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_expr("'A'"), "'A'");
        assert_eq!(parse_expr("1.5f"), "1.5f");
        assert_eq!(parse_expr("true"), "true");
        assert_eq!(parse_expr("none ?? _"), "(?? none _)");
    }

    #[test]
    fn test_interpolated_string() {
        test_parser("\"x = {1+2} end\"", |parser| {
            let expr = parser.parse(Expr::parse).unwrap();
            let Expr::Literal(Literal {
                kind: LiteralKind::String(string),
                ..
            }) = &expr
            else {
                panic!("expected a string literal, got {expr:?}")
            };
            assert_eq!(string.parts.len(), 3);
            assert_eq!(string.parts[0], StringPart::Fragment("x = ".to_string()));
            let StringPart::Interpolation(inner) = &string.parts[1] else {
                panic!("expected an interpolation")
            };
            assert_eq!(inner.to_string(), "(+ 1 2)");
            assert_eq!(string.parts[2], StringPart::Fragment(" end".to_string()));
            assert_eq!(expr.span().len(), 15);
        });
    }

    #[test]
    fn test_missing_operand() {
        test_parser("1 +", |parser| {
            let err = parser.parse(Expr::parse).unwrap_err().into_inner();
            assert_eq!(
                err.kind.to_string(),
                "expected expression, found end of input"
            );
        });
    }
}
