//! Converts flint source text into a stream of tokens

use crate::config::{CancellationFlag, ParseConfig};
use crate::diagnostics::DiagnosticKind;
use flint_tokens::spanned::{Position, Span};
use flint_tokens::token::{Token, TokenKind};
use indent::{IndentState, IndentationError, LineLayout};
use std::collections::VecDeque;
use thiserror::Error;
use token_parsing::{
    char_piece, leading_whitespace, line_break, number, string_piece, symbol, trivia, word,
    StringPiece,
};
use tracing::{debug, trace};

pub mod indent;
pub mod token_parsing;

pub type LexResult<T> = Result<T, LexingError>;

/// An error found while lexing.
///
/// Only [fatal](LexingError::is_fatal) errors stop the lexer, every other error is
/// reported and lexing continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexingError {
    #[error("{error}")]
    Indentation {
        error: IndentationError,
        span: Span,
    },
    #[error("indentation mixes tabs and spaces")]
    MixedIndentation { span: Span },
    #[error("unterminated {what}")]
    UnterminatedLiteral { what: &'static str, span: Span },
    #[error("invalid escape sequence `{text}`")]
    InvalidEscape { text: String, span: Span },
    #[error("invalid number `{text}`: {reason}")]
    InvalidNumber {
        text: String,
        reason: &'static str,
        span: Span,
    },
    #[error("invalid character literal `{text}`: {reason}")]
    InvalidCharacterLiteral {
        text: String,
        reason: &'static str,
        span: Span,
    },
    #[error("unexpected character {c:?}")]
    UnexpectedCharacter { c: char, span: Span },
    #[error("parsing was cancelled")]
    Cancelled { span: Span },
}

impl LexingError {
    pub fn span(&self) -> Span {
        match self {
            LexingError::Indentation { span, .. }
            | LexingError::MixedIndentation { span }
            | LexingError::UnterminatedLiteral { span, .. }
            | LexingError::InvalidEscape { span, .. }
            | LexingError::InvalidNumber { span, .. }
            | LexingError::InvalidCharacterLiteral { span, .. }
            | LexingError::UnexpectedCharacter { span, .. }
            | LexingError::Cancelled { span } => *span,
        }
    }

    /// Fatal errors end the token stream
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LexingError::UnterminatedLiteral { .. } | LexingError::Cancelled { .. }
        )
    }

    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            LexingError::Indentation { .. } | LexingError::MixedIndentation { .. } => {
                DiagnosticKind::Indentation
            }
            LexingError::UnterminatedLiteral { .. } => DiagnosticKind::UnterminatedLiteral,
            LexingError::InvalidEscape { .. } => DiagnosticKind::InvalidEscape,
            LexingError::InvalidNumber { .. } => DiagnosticKind::InvalidNumber,
            LexingError::InvalidCharacterLiteral { .. } => {
                DiagnosticKind::InvalidCharacterLiteral
            }
            LexingError::UnexpectedCharacter { .. } => DiagnosticKind::Syntax,
            LexingError::Cancelled { .. } => DiagnosticKind::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LexMode {
    /// Code outside of any string
    Normal,
    /// Inside a string literal opened at `start`
    String { start: Position },
    /// Code inside `{…}` within a string, with the number of unclosed inner braces
    Interpolation { braces: usize },
}

/// Responsible with converting a source buffer into a token stream.
///
/// The lexer is lazy and single pass. Every stream ends with an [Eof](TokenKind::Eof) token
/// unless a fatal error occurs, in which case that error is the last item.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    position: Position,
    modes: Vec<LexMode>,
    indent: IndentState,
    at_line_start: bool,
    pending: VecDeque<LexResult<Token<'src>>>,
    last_kind: Option<TokenKind>,
    cancellation: Option<CancellationFlag>,
    finished: bool,
    ended_at_line_break: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer
    pub fn new(source: &'src str, config: &ParseConfig) -> Self {
        let position = match source.strip_prefix('\u{feff}') {
            Some(_) => Position::new('\u{feff}'.len_utf8(), 1, 1),
            None => Position::START,
        };
        Self {
            source,
            position,
            modes: vec![LexMode::Normal],
            indent: IndentState::new(config.tab_width()),
            at_line_start: true,
            pending: VecDeque::new(),
            last_kind: None,
            cancellation: config.cancellation().cloned(),
            finished: false,
            ended_at_line_break: false,
        }
    }

    /// How many indentation levels are open at the current position
    pub fn indent_depth(&self) -> usize {
        self.indent.depth()
    }

    /// Checks if the last line of code was ended by a line break outside of any brackets.
    ///
    /// Only meaningful once the [Eof](TokenKind::Eof) token was produced.
    pub fn ended_at_line_break(&self) -> bool {
        self.ended_at_line_break
    }

    fn rest(&self) -> &'src str {
        self.source.get(self.position.offset..).unwrap_or_default()
    }

    /// Consumes `len` bytes of input
    fn take(&mut self, len: usize) -> (&'src str, Span) {
        let rest = self.rest();
        let text = rest.get(..len).unwrap_or(rest);
        let start = self.position;
        self.position = start.advance(text);
        (text, Span::new(start, self.position))
    }

    fn emit(&mut self, kind: TokenKind, text: &'src str, span: Span) {
        trace!("lexed {kind:?} at {span:?}");
        self.last_kind = Some(kind.clone());
        self.pending.push_back(Ok(Token::new(kind, text, span)));
    }

    fn emit_structural(&mut self, kind: TokenKind, span: Span) {
        self.emit(kind, "", span);
    }

    fn report(&mut self, error: LexingError) {
        debug!("lexing error: {error}");
        self.pending.push_back(Err(error));
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationFlag::is_cancelled)
    }

    fn lex_next(&mut self) -> LexResult<()> {
        match self.modes.last() {
            Some(LexMode::String { start }) => {
                let start = *start;
                self.lex_string_part(start)
            }
            _ => self.lex_code(),
        }
    }

    fn lex_code(&mut self) -> LexResult<()> {
        loop {
            if self.at_line_start && !self.indent.in_brackets() {
                self.start_line()?;
                if self.finished {
                    return Ok(());
                }
            }
            self.skip_trivia()?;
            let rest = self.rest();
            if rest.is_empty() {
                return self.finish();
            }
            if let Ok((after, _)) = line_break(rest) {
                self.take(rest.len() - after.len());
                self.at_line_start = !self.indent.in_brackets();
                continue;
            }
            return self.lex_token();
        }
    }

    /// Skips blank and comment-only lines, then emits the layout tokens for the next line
    /// of code.
    fn start_line(&mut self) -> LexResult<()> {
        loop {
            let rest = self.rest();
            let (after_leading, leading) = leading_whitespace(rest).unwrap_or((rest, ""));
            let (after_trivia, _) = trivia(after_leading).unwrap_or((after_leading, ""));
            if after_trivia.is_empty() {
                self.take(rest.len());
                return self.finish();
            }
            if let Ok((after_break, _)) = line_break(after_trivia) {
                self.take(rest.len() - after_break.len());
                continue;
            }

            let line_start = self.position;
            self.take(rest.len() - after_leading.len());
            self.at_line_start = false;
            let indentation = self.indent.measure(leading);
            let leading_span = Span::new(line_start, self.position);
            if indentation.mixed {
                self.report(LexingError::MixedIndentation { span: leading_span });
            }
            let at = Span::empty(self.position);
            match self.indent.line(indentation.width) {
                Ok(layout) => self.emit_layout(layout, at),
                Err(error) => {
                    self.emit_layout(LineLayout::Dedent(error.dedents), at);
                    self.report(LexingError::Indentation {
                        error,
                        span: leading_span,
                    });
                }
            }
            return Ok(());
        }
    }

    fn emit_layout(&mut self, layout: LineLayout, at: Span) {
        match layout {
            LineLayout::Start => {}
            LineLayout::Newline => self.emit_structural(TokenKind::Newline, at),
            LineLayout::Indent => self.emit_structural(TokenKind::Indent, at),
            LineLayout::Dedent(count) => {
                for _ in 0..count {
                    self.emit_structural(TokenKind::Dedent, at);
                }
            }
        }
    }

    fn skip_trivia(&mut self) -> LexResult<()> {
        let rest = self.rest();
        if let Ok((after, _)) = trivia(rest) {
            self.take(rest.len() - after.len());
        }
        let rest = self.rest();
        if rest.starts_with("/*") {
            let (_, span) = self.take(rest.len());
            return Err(LexingError::UnterminatedLiteral {
                what: "block comment",
                span,
            });
        }
        Ok(())
    }

    /// Closes every open indentation level and ends the stream
    fn finish(&mut self) -> LexResult<()> {
        let open_string = self.modes.iter().rev().find_map(|mode| match mode {
            LexMode::String { start } => Some(*start),
            _ => None,
        });
        if let Some(start) = open_string {
            return Err(LexingError::UnterminatedLiteral {
                what: "string literal",
                span: Span::new(start, self.position),
            });
        }
        self.ended_at_line_break = self.at_line_start && self.last_kind.is_some();
        let at = Span::empty(self.position);
        let open = self.indent.finish();
        for _ in 0..open {
            self.emit_structural(TokenKind::Dedent, at);
        }
        self.emit_structural(TokenKind::Eof, at);
        self.finished = true;
        Ok(())
    }

    fn lex_token(&mut self) -> LexResult<()> {
        let rest = self.rest();
        let operand = self
            .last_kind
            .as_ref()
            .map_or(true, |kind| !kind.ends_operand());

        if rest.starts_with('"') || rest.starts_with("$\"") {
            let len = if rest.starts_with('"') { 1 } else { 2 };
            let (text, span) = self.take(len);
            self.modes.push(LexMode::String {
                start: span.start(),
            });
            self.emit(TokenKind::StringStart, text, span);
            return Ok(());
        }
        if rest.starts_with('\'') {
            return self.lex_char();
        }
        if let Ok((after, raw)) = number(operand)(rest) {
            let (text, span) = self.take(rest.len() - after.len());
            let (kind, problem) = raw.evaluate();
            self.emit(kind, text, span);
            if let Some(reason) = problem {
                self.report(LexingError::InvalidNumber {
                    text: text.to_string(),
                    reason,
                    span,
                });
            }
            return Ok(());
        }
        if let Ok((after, kind)) = word(rest) {
            let (text, span) = self.take(rest.len() - after.len());
            self.emit(kind, text, span);
            return Ok(());
        }
        if let Ok((after, kind)) = symbol(rest) {
            let (text, span) = self.take(rest.len() - after.len());
            let kind = self.track_brackets(kind);
            self.emit(kind, text, span);
            return Ok(());
        }

        let c = rest.chars().next().unwrap_or_default();
        let (_, span) = self.take(c.len_utf8());
        self.report(LexingError::UnexpectedCharacter { c, span });
        Ok(())
    }

    /// Updates bracket depth and interpolation state for a bracket symbol
    fn track_brackets(&mut self, kind: TokenKind) -> TokenKind {
        match kind {
            TokenKind::LParen | TokenKind::LBracket => self.indent.open_bracket(),
            TokenKind::RParen | TokenKind::RBracket => self.indent.close_bracket(),
            TokenKind::LCurly => {
                self.indent.open_bracket();
                if let Some(LexMode::Interpolation { braces }) = self.modes.last_mut() {
                    *braces += 1;
                }
            }
            TokenKind::RCurly => {
                self.indent.close_bracket();
                match self.modes.last_mut() {
                    Some(LexMode::Interpolation { braces: 0 }) => {
                        self.modes.pop();
                        return TokenKind::InterpolationEnd;
                    }
                    Some(LexMode::Interpolation { braces }) => *braces -= 1,
                    _ => {}
                }
            }
            _ => {}
        }
        kind
    }

    fn lex_string_part(&mut self, start: Position) -> LexResult<()> {
        let rest = self.rest();
        if rest.starts_with('"') {
            let (text, span) = self.take(1);
            self.modes.pop();
            self.emit(TokenKind::StringEnd, text, span);
            return Ok(());
        }
        if rest.starts_with('{') {
            let (text, span) = self.take(1);
            self.modes.push(LexMode::Interpolation { braces: 0 });
            self.indent.open_bracket();
            self.emit(TokenKind::InterpolationStart, text, span);
            return Ok(());
        }

        let mut value = String::new();
        let mut errors = vec![];
        let mut input = rest;
        let mut cursor = self.position;
        while let Ok((after, piece)) = string_piece(input) {
            let piece_text = &input[..input.len() - after.len()];
            let piece_end = cursor.advance(piece_text);
            match piece {
                StringPiece::Text(text) => value.push_str(text),
                StringPiece::Char(c) => value.push(c),
                StringPiece::Elided => {}
                StringPiece::InvalidEscape(text) => {
                    value.push(char::REPLACEMENT_CHARACTER);
                    errors.push(LexingError::InvalidEscape {
                        text: text.to_string(),
                        span: Span::new(cursor, piece_end),
                    });
                }
            }
            cursor = piece_end;
            input = after;
        }
        if input.len() == rest.len() {
            // a raw line break or the end of input
            return Err(LexingError::UnterminatedLiteral {
                what: "string literal",
                span: Span::new(start, self.position),
            });
        }
        let (text, span) = self.take(rest.len() - input.len());
        self.emit(TokenKind::StringFragment(value), text, span);
        for error in errors {
            self.report(error);
        }
        Ok(())
    }

    fn lex_char(&mut self) -> LexResult<()> {
        let rest = self.rest();
        let start = self.position;
        let mut input = &rest[1..];
        let mut cursor = start.advance("'");
        let mut chars = vec![];
        let mut errors = vec![];
        loop {
            if let Some(after) = input.strip_prefix('\'') {
                input = after;
                break;
            }
            let Ok((after, piece)) = char_piece(input) else {
                return Err(LexingError::UnterminatedLiteral {
                    what: "character literal",
                    span: Span::new(start, cursor),
                });
            };
            let piece_end = cursor.advance(&input[..input.len() - after.len()]);
            match piece {
                StringPiece::Text(text) => chars.extend(text.chars()),
                StringPiece::Char(c) => chars.push(c),
                StringPiece::Elided => {}
                StringPiece::InvalidEscape(text) => {
                    chars.push(char::REPLACEMENT_CHARACTER);
                    errors.push(LexingError::InvalidEscape {
                        text: text.to_string(),
                        span: Span::new(cursor, piece_end),
                    });
                }
            }
            cursor = piece_end;
            input = after;
        }

        let (text, span) = self.take(rest.len() - input.len());
        let kind = match chars.as_slice() {
            [c] => TokenKind::Char(*c),
            other => {
                let reason = if other.is_empty() {
                    "empty character literal"
                } else {
                    "character literals must contain exactly one character"
                };
                errors.push(LexingError::InvalidCharacterLiteral {
                    text: text.to_string(),
                    reason,
                    span,
                });
                TokenKind::Char(char::REPLACEMENT_CHARACTER)
            }
        };
        self.emit(kind, text, span);
        for error in errors {
            self.report(error);
        }
        Ok(())
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LexResult<Token<'src>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && !self.finished {
            let result = if self.is_cancelled() {
                Err(LexingError::Cancelled {
                    span: Span::empty(self.position),
                })
            } else {
                self.lex_next()
            };
            if let Err(error) = result {
                debug!("lexing stopped: {error}");
                self.finished = true;
                self.pending.push_back(Err(error));
            }
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_tokens::spanned::Spanned;
    use flint_tokens::token::FloatSuffix;
    use test_log::test;

    fn lex(src: &str) -> (Vec<Token>, Vec<LexingError>) {
        lex_with(src, &ParseConfig::default())
    }

    fn lex_with<'s>(src: &'s str, config: &ParseConfig) -> (Vec<Token<'s>>, Vec<LexingError>) {
        let mut tokens = vec![];
        let mut errors = vec![];
        for result in Lexer::new(src, config) {
            match result {
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(error),
            }
        }
        (tokens, errors)
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, errors) = lex(src);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind().clone()).collect()
    }

    #[test]
    fn test_simple_statement() {
        assert_eq!(
            kinds("x = 1\n"),
            [
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Integer(1),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), [TokenKind::Eof]);
        assert_eq!(kinds("\n\n   \n// only a comment\n"), [TokenKind::Eof]);
    }

    #[test]
    fn test_indentation_tokens() {
        use TokenKind::*;
        let src = "a\n    b\n\n    c\n        d\n    // comment\n    e\nf\n";
        assert_eq!(
            kinds(src),
            [
                Identifier, Indent, Identifier, Newline, Identifier, Indent, Identifier, Dedent,
                Identifier, Dedent, Identifier, Eof
            ]
        );
    }

    #[test]
    fn test_dedents_at_end_of_input() {
        use TokenKind::*;
        assert_eq!(
            kinds("a\n  b\n    c"),
            [Identifier, Indent, Identifier, Indent, Identifier, Dedent, Dedent, Eof]
        );
    }

    #[test]
    fn test_inconsistent_dedent() {
        use TokenKind::*;
        let (tokens, errors) = lex("a\n    b\n        c\n      d\n");
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [Identifier, Indent, Identifier, Indent, Identifier, Dedent, Identifier, Dedent, Eof]
        );
        assert!(matches!(
            &errors[..],
            [LexingError::Indentation {
                error: IndentationError {
                    width: 6,
                    expected: 4,
                    ..
                },
                ..
            }]
        ));
        assert!(!errors[0].is_fatal());
    }

    #[test]
    fn test_brackets_continue_lines() {
        use TokenKind::*;
        assert_eq!(
            kinds("f(1,\n        2)\nx"),
            [
                Identifier, LParen, Integer(1), Comma, Integer(2), RParen, Newline, Identifier,
                Eof
            ]
        );
    }

    #[test]
    fn test_line_continuation() {
        use TokenKind::*;
        assert_eq!(
            kinds("x = 1 + \\\n    2"),
            [Identifier, Assign, Integer(1), Plus, Integer(2), Eof]
        );
    }

    #[test]
    fn test_sign_absorbed_in_operand_position() {
        use TokenKind::*;
        assert_eq!(kinds("x = -5"), [Identifier, Assign, Integer(-5), Eof]);
        assert_eq!(kinds("x -5"), [Identifier, Minus, Integer(5), Eof]);
        assert_eq!(kinds("x - -5"), [Identifier, Minus, Integer(-5), Eof]);
        assert_eq!(kinds("- 5"), [Minus, Integer(5), Eof]);
        assert_eq!(kinds("(1)-2"), [LParen, Integer(1), RParen, Minus, Integer(2), Eof]);
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            kinds("1.5f")[0],
            TokenKind::Float {
                value: 1.5,
                suffix: Some(FloatSuffix::Float)
            }
        );
        assert_eq!(
            kinds("2D")[0],
            TokenKind::Float {
                value: 2.0,
                suffix: Some(FloatSuffix::Double)
            }
        );
        assert_eq!(
            kinds(".25")[0],
            TokenKind::Float {
                value: 0.25,
                suffix: None
            }
        );
    }

    #[test]
    fn test_range_is_not_a_float() {
        use TokenKind::*;
        assert_eq!(kinds("1..5"), [Integer(1), DotDot, Integer(5), Eof]);
        assert_eq!(kinds("a.b"), [Identifier, Dot, Identifier, Eof]);
    }

    #[test]
    fn test_invalid_numbers_still_produce_tokens() {
        let (tokens, errors) = lex("x = 007\ny = 1_\n");
        assert_eq!(tokens[2].kind(), &TokenKind::Integer(7));
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.diagnostic_kind() == DiagnosticKind::InvalidNumber && !e.is_fatal()));
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(kinds("'A'")[0], TokenKind::Char('A'));
        assert_eq!(kinds("'\\x41'")[0], TokenKind::Char('A'));
        let (tokens, errors) = lex("'ab' ''");
        assert_eq!(tokens.len(), 3);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, LexingError::InvalidCharacterLiteral { .. })));
    }

    #[test]
    fn test_unterminated_char_is_fatal() {
        let (tokens, errors) = lex("'a\n'");
        assert!(tokens.is_empty());
        assert!(matches!(
            &errors[..],
            [LexingError::UnterminatedLiteral {
                what: "character literal",
                ..
            }]
        ));
    }

    #[test]
    fn test_interpolated_string() {
        use TokenKind::*;
        let src = "\"x = {1+2} end\"";
        let (tokens, errors) = lex(src);
        assert!(errors.is_empty());
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                StringStart,
                StringFragment("x = ".to_string()),
                InterpolationStart,
                Integer(1),
                Plus,
                Integer(2),
                InterpolationEnd,
                StringFragment(" end".to_string()),
                StringEnd,
                Eof
            ]
        );
        let joined = tokens.iter().map(|t| t.text()).collect::<String>();
        assert_eq!(joined, src);
    }

    #[test]
    fn test_nested_braces_in_interpolation() {
        use TokenKind::*;
        let kinds = kinds("$\"{ {1} }\"");
        assert_eq!(
            kinds,
            [
                StringStart,
                InterpolationStart,
                LCurly,
                Integer(1),
                RCurly,
                InterpolationEnd,
                StringEnd,
                Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let kinds = kinds("\"a\\tb\\{c\\u{1F600}\\101\\\nz\"");
        assert_eq!(
            kinds[1],
            TokenKind::StringFragment("a\tb{c\u{1F600}Az".to_string())
        );
    }

    #[test]
    fn test_invalid_escape_recovers() {
        let (tokens, errors) = lex("\"\\xZZ\"");
        assert_eq!(
            tokens[1].kind(),
            &TokenKind::StringFragment("\u{FFFD}ZZ".to_string())
        );
        assert_eq!(tokens.last().map(|t| t.kind()), Some(&TokenKind::Eof));
        assert!(matches!(&errors[..], [LexingError::InvalidEscape { .. }]));
    }

    #[test]
    fn test_out_of_range_unicode_escape() {
        let (tokens, errors) = lex("\"\\u{110000}\"");
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                TokenKind::StringStart,
                TokenKind::StringFragment("\u{FFFD}".to_string()),
                TokenKind::StringEnd,
                TokenKind::Eof
            ]
        );
        assert!(matches!(
            &errors[..],
            [LexingError::InvalidEscape { text, .. }] if text == "\\u{110000}"
        ));
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let (tokens, errors) = lex("\"abc");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_fatal());
        assert!(!tokens.iter().any(|t| t.kind() == &TokenKind::Eof));

        let (_, errors) = lex("\"abc\nx = 1\"");
        assert!(errors[0].is_fatal());

        let (_, errors) = lex("\"abc {x");
        assert!(matches!(
            &errors[..],
            [LexingError::UnterminatedLiteral {
                what: "string literal",
                ..
            }]
        ));
    }

    #[test]
    fn test_unterminated_block_comment_is_fatal() {
        let (_, errors) = lex("x /* never closed");
        assert!(matches!(
            &errors[..],
            [LexingError::UnterminatedLiteral {
                what: "block comment",
                ..
            }]
        ));
    }

    #[test]
    fn test_mixed_indentation_warns() {
        let (_, errors) = lex("a\n \tb\n");
        assert!(matches!(
            &errors[..],
            [LexingError::MixedIndentation { .. }]
        ));
    }

    #[test]
    fn test_tab_width() {
        use TokenKind::*;
        let config = ParseConfig::builder().tab_width(4).build().unwrap();
        let (tokens, errors) = lex_with("a\n\tb\n    c\n", &config);
        assert!(errors.is_empty());
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [Identifier, Indent, Identifier, Newline, Identifier, Dedent, Eof]
        );
    }

    #[test]
    fn test_structural_spans_are_empty() {
        let (tokens, _) = lex("a\n  b");
        let indent = &tokens[1];
        assert_eq!(indent.kind(), &TokenKind::Indent);
        assert!(indent.span().is_empty());
        assert_eq!(indent.span().start(), Position::new(4, 2, 3));
    }

    #[test]
    fn test_unexpected_character_is_skipped() {
        use TokenKind::*;
        let (tokens, errors) = lex("a @ b");
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(kinds, [Identifier, Identifier, Eof]);
        assert!(matches!(
            &errors[..],
            [LexingError::UnexpectedCharacter { c: '@', .. }]
        ));
    }

    #[test]
    fn test_ended_at_line_break() {
        for (src, expected) in [
            ("a\n", true),
            ("a\n\n// trailing comment", true),
            ("a", false),
            ("a // comment", false),
            ("f(a,\n", false),
            ("", false),
        ] {
            let mut lexer = Lexer::new(src, &ParseConfig::default());
            for _ in lexer.by_ref() {}
            assert_eq!(lexer.ended_at_line_break(), expected, "for {src:?}");
        }
    }

    #[test]
    fn test_cancelled_lexer_stops() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let config = ParseConfig::builder().cancellation(flag).build().unwrap();
        let mut lexer = Lexer::new("a b c", &config);
        assert!(matches!(lexer.next(), Some(Err(LexingError::Cancelled { .. }))));
        assert!(lexer.next().is_none());
    }
}
