use crate::parser::blocking::{Parsable, SyntacticParser};
use crate::parser::statement::statements_until;
use crate::parser::SyntaxResult;
use flint_ast::flint_file::{FlintFile, TopLevelStatement};
use flint_tokens::spanned::{Position, Span, Spanned};
use flint_tokens::token::TokenKind;

impl Parsable for FlintFile {
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self> {
        let statements = statements_until(parser, &TokenKind::Eof)?;
        let eof = parser.expect(TokenKind::Eof)?;
        let start = statements
            .first()
            .map_or(Position::START, |statement| statement.span().start());
        Ok(FlintFile {
            statements: statements
                .into_iter()
                .map(TopLevelStatement::Statement)
                .collect(),
            span: Span::new(start, eof.span().end()),
        })
    }
}
