//! The token-buffering parser every syntax tree part is parsed with

use crate::config::ParseConfig;
use crate::diagnostics::Diagnostics;
use crate::lexer::{Lexer, LexingError};
use crate::parser::{Err, ErrorKind, SyntaxError, SyntaxResult};
use flint_tokens::spanned::{Position, Span, Spanned};
use flint_tokens::token::{Token, TokenKind};
use std::any::type_name;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Parse a syntax tree part
pub trait Parsable: Sized {
    /// Attempt to parse some syntax tree part
    fn parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<Self>;
}

/// A sub trait that determines if this type could be parsed without doing the parsing
pub trait CouldParse: Parsable {
    fn could_parse(parser: &mut SyntacticParser<'_>) -> SyntaxResult<bool>;
}

/// Creates the syntax tree from the token stream of a source buffer.
///
/// Non-fatal lexing errors are collected as diagnostics while tokens are buffered, a fatal
/// lexing error surfaces as an [Err::Failure].
///
/// # Examples
/// ```
/// # use flint_parsing::ParseConfig;
/// # use flint_parsing::parser::SyntacticParser;
/// # use flint_tokens::token::TokenKind;
/// let config = ParseConfig::default();
/// let mut parser = SyntacticParser::new("x + 1", &config);
/// assert_eq!(parser.peek().unwrap().kind(), &TokenKind::Identifier);
/// ```
#[derive(Debug)]
pub struct SyntacticParser<'p> {
    lexer: Lexer<'p>,
    config: &'p ParseConfig,
    buffer: VecDeque<Token<'p>>,
    fatal: Option<LexingError>,
    diagnostics: Diagnostics,
    non_terminals: Vec<&'static str>,
    last_span: Span,
    depth: usize,
}

impl<'p> SyntacticParser<'p> {
    /// Creates a new parser over a source buffer
    pub fn new(source: &'p str, config: &'p ParseConfig) -> Self {
        Self {
            lexer: Lexer::new(source, config),
            config,
            buffer: VecDeque::new(),
            fatal: None,
            diagnostics: Diagnostics::new(),
            non_terminals: vec![],
            last_span: Span::default(),
            depth: 0,
        }
    }

    pub fn config(&self) -> &'p ParseConfig {
        self.config
    }

    /// The number of indentation blocks the consumed tokens have opened
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The span of the last consumed token
    pub fn last_span(&self) -> Span {
        self.last_span
    }

    /// Ensures at least `n` tokens are buffered, unless the stream ends first
    fn fill(&mut self, n: usize) -> SyntaxResult {
        while self.buffer.len() < n {
            if let Some(fatal) = &self.fatal {
                return Err(Err::Failure(SyntaxError::from(fatal.clone())));
            }
            if matches!(self.buffer.back().map(Token::kind), Some(TokenKind::Eof)) {
                break;
            }
            match self.lexer.next() {
                Some(Ok(token)) => {
                    self.buffer.push_back(token);
                }
                Some(Err(error)) if error.is_fatal() => {
                    debug!("fatal lexing error: {error}");
                    self.fatal = Some(error);
                }
                Some(Err(error)) => {
                    self.diagnostics.report_lexing_error(&error);
                }
                None => {
                    // the lexer always ends on eof or a fatal error
                    let at = self.last_span.after();
                    self.buffer.push_back(Token::structural(TokenKind::Eof, at));
                }
            }
        }
        Ok(())
    }

    /// Peeks the current lookahead
    pub fn peek(&mut self) -> SyntaxResult<&Token<'p>> {
        self.peek_nth(0)
    }

    /// Peeks `n` tokens ahead of the current lookahead. Peeking past the end of the stream
    /// gives the eof token.
    pub fn peek_nth(&mut self, n: usize) -> SyntaxResult<&Token<'p>> {
        self.fill(n + 1)?;
        let index = n.min(self.buffer.len().saturating_sub(1));
        self.buffer
            .get(index)
            .ok_or_else(|| self.error_with_span(ErrorKind::UnexpectedEof, self.last_span))
    }

    /// Gets the kind of the current lookahead
    pub fn peek_kind(&mut self) -> SyntaxResult<TokenKind> {
        Ok(self.peek()?.kind().clone())
    }

    /// Checks if the current lookahead is of a given kind
    pub fn check(&mut self, kind: &TokenKind) -> SyntaxResult<bool> {
        Ok(self.peek()?.kind() == kind)
    }

    /// Consumes the current lookahead. The eof token is never removed from the stream.
    pub fn consume(&mut self) -> SyntaxResult<Token<'p>> {
        self.fill(1)?;
        let at_eof = matches!(self.buffer.front().map(Token::kind), Some(TokenKind::Eof));
        let token = if at_eof {
            self.buffer.front().cloned()
        } else {
            self.buffer.pop_front()
        };
        let token = token.ok_or_else(|| self.error(ErrorKind::UnexpectedEof))?;
        match token.kind() {
            TokenKind::Indent => self.depth += 1,
            TokenKind::Dedent => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        trace!("consumed {token:?} at {:?}", token.span());
        self.last_span = token.span();
        Ok(token)
    }

    /// consumes if predicate matches
    pub fn consume_if<F>(&mut self, predicate: F) -> SyntaxResult<Option<Token<'p>>>
    where
        F: FnOnce(&Token<'p>) -> bool,
    {
        if predicate(self.peek()?) {
            self.consume().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consumes the lookahead if it is of the given kind
    pub fn consume_kind(&mut self, kind: &TokenKind) -> SyntaxResult<Option<Token<'p>>> {
        self.consume_if(|token| token.kind() == kind)
    }

    /// Consumes a token of the given kind, otherwise creates an error
    pub fn expect(&mut self, kind: TokenKind) -> SyntaxResult<Token<'p>> {
        let peek = self.peek()?;
        if peek.kind() == &kind {
            self.consume()
        } else {
            let kind = ErrorKind::expected_token([kind.to_string()], peek);
            Err(self.error(kind))
        }
    }

    /// Consumes an identifier, otherwise creates an error
    pub fn expect_identifier(&mut self) -> SyntaxResult<Token<'p>> {
        self.expect(TokenKind::Identifier)
    }

    /// Creates a recoverable error at the current lookahead
    pub fn error(&self, kind: impl Into<ErrorKind>) -> Err<SyntaxError> {
        let span = self
            .buffer
            .front()
            .map(Spanned::span)
            .unwrap_or(self.last_span.after());
        self.error_with_span(kind, span)
    }

    pub fn error_with_span(&self, kind: impl Into<ErrorKind>, span: Span) -> Err<SyntaxError> {
        Err::Error(SyntaxError::new(
            kind.into(),
            span,
            self.non_terminals.clone(),
        ))
    }

    /// Wrapper function for parsing an item
    #[inline]
    pub fn parse<O, F>(&mut self, parser: F) -> SyntaxResult<O>
    where
        F: FnOnce(&mut Self) -> SyntaxResult<O>,
    {
        let non_terminal = type_name::<O>();
        trace!("starting parsing {non_terminal}");
        self.non_terminals.push(non_terminal);
        let result = parser(self);
        trace!("after parsing {non_terminal} ok={}", result.is_ok());
        self.non_terminals.pop();
        result
    }

    /// Wrapper function for parsing an optional item
    pub fn parse_opt<P: CouldParse>(&mut self) -> SyntaxResult<Option<P>> {
        if P::could_parse(self)? {
            Ok(Some(self.parse(P::parse)?))
        } else {
            Ok(None)
        }
    }

    /// Recovers from `error` raised by the statement that started at `start` with the
    /// parser at indentation `depth`.
    ///
    /// Tokens are skipped until a `;` or newline ending the statement, which is consumed, or
    /// until the start of the next statement or the end of the enclosing block. Nested blocks
    /// are skipped whole, including the dedent closing them. The end of input only ends the
    /// statement if the source ended with a line break, otherwise recovery fails.
    ///
    /// `error` is reported exactly once, even when skipping runs into a fatal lexing error.
    pub fn recover(&mut self, error: SyntaxError, depth: usize, start: Position) -> SyntaxResult {
        debug!("recovering from {}", error.kind);
        match self.skip_statement(depth, start) {
            Ok(true) => {
                self.diagnostics.report_syntax_error(&error);
                Ok(())
            }
            Ok(false) => {
                debug!("reached end of input while recovering");
                Err(Err::Failure(error))
            }
            Err(failure) => {
                self.diagnostics.report_syntax_error(&error);
                Err(failure)
            }
        }
    }

    /// Skips the rest of a statement. Gets whether a statement boundary was found.
    fn skip_statement(&mut self, depth: usize, start: Position) -> SyntaxResult<bool> {
        loop {
            let at_depth = self.depth == depth;
            let token = self.peek()?;
            let advanced = token.span().start() > start;
            match token.kind() {
                TokenKind::Eof => return Ok(self.lexer.ended_at_line_break()),
                TokenKind::Semicolon | TokenKind::Newline if at_depth => {
                    self.consume()?;
                    return Ok(true);
                }
                TokenKind::Dedent | TokenKind::Throw | TokenKind::Switch
                    if at_depth && advanced =>
                {
                    return Ok(true);
                }
                kind if kind.is_declaration_keyword() && at_depth && advanced => {
                    return Ok(true);
                }
                _ => {
                    let skipped = self.consume()?;
                    // a dedent back to the statement's level ends its logical line
                    if skipped.kind() == &TokenKind::Dedent && self.depth == depth {
                        return Ok(true);
                    }
                }
            }
        }
    }

    /// Reports an error that did not stop the parse
    pub fn report(&mut self, error: &SyntaxError) {
        self.diagnostics.report_syntax_error(error);
    }

    /// Every diagnostic reported so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Takes every diagnostic reported so far
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Skips newline tokens
pub fn remove_nl(parser: &mut SyntacticParser<'_>) -> SyntaxResult {
    while parser.consume_kind(&TokenKind::Newline)?.is_some() {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::parser::tests::test_parser;
    use test_log::test;

    #[test]
    fn test_peek_and_consume() {
        test_parser("a + b", |parser| {
            assert_eq!(parser.peek_nth(1).unwrap().kind(), &TokenKind::Plus);
            assert_eq!(parser.consume().unwrap().text(), "a");
            assert_eq!(parser.consume().unwrap().kind(), &TokenKind::Plus);
            assert_eq!(parser.consume().unwrap().text(), "b");
            assert_eq!(parser.consume().unwrap().kind(), &TokenKind::Eof);
            assert_eq!(parser.consume().unwrap().kind(), &TokenKind::Eof);
            assert_eq!(parser.peek_nth(5).unwrap().kind(), &TokenKind::Eof);
        });
    }

    #[test]
    fn test_expect() {
        test_parser("a;", |parser| {
            parser.expect_identifier().expect("identifier");
            let err = parser.expect(TokenKind::Comma).unwrap_err();
            let Err::Error(err) = err else {
                panic!("expected a recoverable error")
            };
            assert_eq!(err.kind.to_string(), "expected `,`, found `;`");
            assert_eq!(err.span.start().offset, 1);
        });
    }

    #[test]
    fn test_depth_tracking() {
        test_parser("a\n  b\nc", |parser| {
            let mut depths = vec![];
            loop {
                let token = parser.consume().unwrap();
                depths.push(parser.depth());
                if token.kind() == &TokenKind::Eof {
                    break;
                }
            }
            assert_eq!(depths, [0, 1, 1, 0, 0, 0]);
        });
    }

    #[test]
    fn test_non_terminals_popped() {
        test_parser("a", |parser| {
            let result = parser.parse(|p| p.expect(TokenKind::Comma));
            assert!(result.is_err());
            assert!(parser.non_terminals.is_empty());
        });
    }

    #[test]
    fn test_fatal_lexing_error_is_failure() {
        test_parser("x = \"abc", |parser| {
            let err = loop {
                match parser.consume() {
                    Ok(token) => assert_ne!(token.kind(), &TokenKind::Eof),
                    Err(err) => break err,
                }
            };
            assert!(err.is_failure());
            assert!(parser.peek().is_err());
            assert!(err.into_inner().lexing_error().is_some());
        });
    }

    #[test]
    fn test_recover_skips_nested_blocks() {
        test_parser("a b\n  c\n  d\ne", |parser| {
            parser.consume().unwrap();
            let error = parser.error(ErrorKind::InvalidAssignmentTarget).into_inner();
            parser.recover(error, 0, Position::START).unwrap();
            assert_eq!(parser.peek().unwrap().text(), "e");
            assert_eq!(parser.depth(), 0);
        });
    }

    #[test]
    fn test_recover_at_eof_fails() {
        test_parser("a b c", |parser| {
            let error = parser.error(ErrorKind::InvalidAssignmentTarget).into_inner();
            let result = parser.recover(error, 0, Position::START);
            assert!(matches!(result, Err(Err::Failure(_))));
        });
    }

    #[test]
    fn test_recover_at_trailing_line_break() {
        test_parser("a b )\n", |parser| {
            parser.consume().unwrap();
            let error = parser.error(ErrorKind::InvalidAssignmentTarget).into_inner();
            parser.recover(error, 0, Position::START).unwrap();
            assert_eq!(parser.peek().unwrap().kind(), &TokenKind::Eof);
        });
    }

    #[test]
    fn test_recover_reports_error_before_fatal_lexing_error() {
        test_parser("a ) \"abc", |parser| {
            parser.consume().unwrap();
            let error = parser.error(ErrorKind::InvalidAssignmentTarget).into_inner();
            let result = parser.recover(error, 0, Position::START);
            let failure = result.unwrap_err().into_inner();
            assert!(failure.lexing_error().is_some());
            let diagnostics = parser.diagnostics();
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(
                diagnostics.iter().next().map(|d| d.kind),
                Some(DiagnosticKind::Syntax)
            );
        });
    }
}
