use crate::parser::blocking::{remove_nl, Parsable, SyntacticParser};
use crate::parser::{Err, ErrorKind, SyntaxResult};
use flint_ast::block::Block;
use flint_ast::expr::Expr;
use flint_ast::statements::{ExpressionStatement, Statement, ThrowStatement};
use flint_tokens::spanned::{Span, Spanned};
use flint_tokens::token::TokenKind;

impl Parsable for Statement {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let kind = parser.peek_kind()?;
        match kind {
            TokenKind::Indent => Ok(Statement::Block(parser.parse(Block::parse)?)),
            TokenKind::Semicolon => {
                let semi = parser.consume()?;
                Ok(Statement::Empty(semi.span()))
            }
            TokenKind::Throw => Ok(Statement::Throw(parser.parse(ThrowStatement::parse)?)),
            kind if kind.is_declaration_keyword() => {
                let keyword = parser.peek()?.text().to_string();
                Err(parser.error(ErrorKind::UnsupportedDeclaration(keyword)))
            }
            _ => Ok(Statement::Expression(
                parser.parse(ExpressionStatement::parse)?,
            )),
        }
    }
}

impl Parsable for Block {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let indent = parser.expect(TokenKind::Indent)?;
        let statements = statements_until(parser, &TokenKind::Dedent)?;
        let dedent = parser.expect(TokenKind::Dedent)?;
        let span = statements
            .iter()
            .fold(indent.span().join(dedent.span()), |span, statement| {
                span.join(statement.span())
            });
        Ok(Block { statements, span })
    }
}

impl Parsable for ExpressionStatement {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let expr = parser.parse(Expr::parse)?;
        let span = match terminator(parser, &expr)? {
            Some(end) => expr.span().join(end),
            None => expr.span(),
        };
        Ok(ExpressionStatement { expr, span })
    }
}

impl Parsable for ThrowStatement {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let throw = parser.expect(TokenKind::Throw)?;
        let value = parser.parse(Expr::parse)?;
        let span = match terminator(parser, &value)? {
            Some(end) => throw.span().join(end),
            None => throw.span().join(value.span()),
        };
        Ok(ThrowStatement { value, span })
    }
}

/// Ends a statement after `expr`. Gets the span of a terminating `;`.
///
/// A `;` or newline is consumed. An indent, dedent or the end of input also end the
/// statement but are left for the enclosing parser, and an expression ending in a switch
/// needs no terminator at all.
fn terminator(parser: &mut SyntacticParser<'_>, expr: &Expr) -> SyntaxResult<Option<Span>> {
    match parser.peek_kind()? {
        TokenKind::Semicolon => Ok(Some(parser.consume()?.span())),
        TokenKind::Newline => {
            parser.consume()?;
            Ok(None)
        }
        TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof => Ok(None),
        _ if expr.ends_with_layout() => Ok(None),
        _ => {
            let kind = ErrorKind::expected_token(["`;`", "newline"], parser.peek()?);
            Err(parser.error(kind))
        }
    }
}

/// Parses statements until `end` or the end of input, recovering from recoverable errors.
///
/// The `end` token is not consumed.
pub fn statements_until(
    parser: &mut SyntacticParser<'_>,
    end: &TokenKind,
) -> SyntaxResult<Vec<Statement>> {
    let mut statements = vec![];
    loop {
        remove_nl(parser)?;
        let next = parser.peek()?;
        if next.kind() == end || next.kind() == &TokenKind::Eof {
            break;
        }
        let start = next.span().start();
        let depth = parser.depth();
        match parser.parse(Statement::parse) {
            Ok(statement) => statements.push(statement),
            Err(Err::Error(error)) => parser.recover(error, depth, start)?,
            Err(failure) => return Err(failure),
        }
    }
    Ok(statements)
}
