//! nom parsers for the individual pieces of a token

use flint_common::char_class::{
    is_digit, is_hex_digit, is_identifier_continue, is_inline_whitespace, is_octal_digit,
};
use flint_common::nom_helpers::recognize_identifier;
use flint_tokens::token::{FloatSuffix, TokenKind};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_until, take_while, take_while1, take_while_m_n};
use nom::character::complete::{anychar, char, digit1, line_ending, one_of, satisfy};
use nom::combinator::{map, map_opt, not, opt, peek, recognize, value, verify};
use nom::error::{context, VerboseError};
use nom::multi::many0_count;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

pub type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Whitespace, comments and line continuations between tokens. Never consumes a line
/// break that ends a logical line.
pub fn trivia(src: &str) -> Result<&str> {
    context(
        "trivia",
        recognize(many0_count(alt((
            take_while1(|c: char| is_inline_whitespace(c) || c == '\r' || c == '\x0c'),
            line_comment,
            block_comment,
            line_continuation,
        )))),
    )(src)
}

fn line_comment(src: &str) -> Result<&str> {
    context(
        "line comment",
        recognize(pair(tag("//"), take_while(|c: char| c != '\n'))),
    )(src)
}

fn block_comment(src: &str) -> Result<&str> {
    context(
        "block comment",
        recognize(delimited(tag("/*"), take_until("*/"), tag("*/"))),
    )(src)
}

fn line_continuation(src: &str) -> Result<&str> {
    context("line continuation", recognize(pair(char('\\'), line_ending)))(src)
}

/// The whitespace a line starts with
pub fn leading_whitespace(src: &str) -> Result<&str> {
    take_while(|c: char| is_inline_whitespace(c) || c == '\x0c' || c == '\r')(src)
}

/// A line break
pub fn line_break(src: &str) -> Result<&str> {
    line_ending(src)
}

/// Operators and punctuation
pub fn symbol(src: &str) -> Result<TokenKind> {
    context(
        "symbol",
        alt((
            alt((
                value(TokenKind::StarStar, tag("**")),
                value(TokenKind::StarAssign, tag("*=")),
                value(TokenKind::Star, char('*')),
                value(TokenKind::QuestionQuestion, tag("??")),
                value(TokenKind::QuestionDot, tag("?.")),
                value(TokenKind::Question, char('?')),
                value(TokenKind::PlusPlus, tag("++")),
                value(TokenKind::PlusAssign, tag("+=")),
                value(TokenKind::Plus, char('+')),
                value(TokenKind::MinusMinus, tag("--")),
                value(TokenKind::MinusAssign, tag("-=")),
                value(TokenKind::Arrow, tag("->")),
                value(TokenKind::Minus, char('-')),
                value(TokenKind::SlashAssign, tag("/=")),
                value(TokenKind::Slash, char('/')),
                value(TokenKind::Percent, char('%')),
            )),
            alt((
                value(TokenKind::Eq, tag("==")),
                value(TokenKind::Assign, char('=')),
                value(TokenKind::Neq, tag("!=")),
                value(TokenKind::Bang, char('!')),
                value(TokenKind::Gte, tag(">=")),
                value(TokenKind::Gt, char('>')),
                value(TokenKind::Lte, tag("<=")),
                value(TokenKind::Lt, char('<')),
                value(TokenKind::ColonAssign, tag(":=")),
                value(TokenKind::Colon, char(':')),
                value(TokenKind::DotDot, tag("..")),
                value(TokenKind::Dot, char('.')),
                value(TokenKind::Comma, char(',')),
                value(TokenKind::Semicolon, char(';')),
            )),
            alt((
                value(TokenKind::LParen, char('(')),
                value(TokenKind::RParen, char(')')),
                value(TokenKind::LBracket, char('[')),
                value(TokenKind::RBracket, char(']')),
                value(TokenKind::LCurly, char('{')),
                value(TokenKind::RCurly, char('}')),
            )),
        )),
    )(src)
}

/// An identifier, keyword, boolean, `none` or `_`
pub fn word(src: &str) -> Result<TokenKind> {
    context(
        "word",
        map(recognize_identifier, |word: &str| {
            TokenKind::keyword(word).unwrap_or(TokenKind::Identifier)
        }),
    )(src)
}

/// A number literal as it is written, before it is validated
#[derive(Debug, Clone, PartialEq)]
pub struct RawNumber<'a> {
    pub negative: bool,
    /// Empty for `.5`-style floats
    pub int_part: &'a str,
    pub fraction: Option<&'a str>,
    pub suffix: Option<FloatSuffix>,
}

impl RawNumber<'_> {
    pub fn is_float(&self) -> bool {
        self.fraction.is_some() || self.suffix.is_some()
    }

    /// Gets the token kind for this number. Invalid numbers still produce a token, along
    /// with the reason they are invalid.
    pub fn evaluate(&self) -> (TokenKind, Option<&'static str>) {
        let mut problem = None;
        for run in [Some(self.int_part), self.fraction].into_iter().flatten() {
            if run.ends_with('_') || run.contains("__") {
                problem = Some("`_` separators must be surrounded by digits");
            }
        }
        let sign = if self.negative { "-" } else { "" };
        let int_digits = strip_separators(self.int_part);
        if self.is_float() {
            let fraction = strip_separators(self.fraction.unwrap_or("0"));
            let int_digits = if int_digits.is_empty() {
                "0".to_string()
            } else {
                int_digits
            };
            let value = format!("{sign}{int_digits}.{fraction}")
                .parse::<f64>()
                .unwrap_or_default();
            let kind = TokenKind::Float {
                value,
                suffix: self.suffix,
            };
            return (kind, problem);
        }
        if int_digits.len() > 1 && int_digits.starts_with('0') {
            problem = problem.or(Some("integers can not have leading zeros"));
        }
        match format!("{sign}{int_digits}").parse::<i64>() {
            Ok(value) => (TokenKind::Integer(value), problem),
            Err(_) => (
                TokenKind::Integer(0),
                Some("integer does not fit in 64 bits"),
            ),
        }
    }
}

fn strip_separators(digits: &str) -> String {
    digits.chars().filter(|&c| c != '_').collect()
}

fn digit_run(src: &str) -> Result<&str> {
    recognize(pair(digit1, take_while(|c: char| is_digit(c) || c == '_')))(src)
}

fn float_suffix(src: &str) -> Result<FloatSuffix> {
    terminated(
        map_opt(anychar, FloatSuffix::from_char),
        not(satisfy(is_identifier_continue)),
    )(src)
}

fn sign(src: &str) -> Result<Option<char>> {
    opt(terminated(one_of("+-"), peek(satisfy(is_digit))))(src)
}

fn digits_with_fraction(src: &str) -> Result<(&str, Option<&str>)> {
    pair(digit_run, opt(preceded(char('.'), digit_run)))(src)
}

fn fraction_only(src: &str) -> Result<(&str, Option<&str>)> {
    map(preceded(char('.'), digit_run), |fraction| ("", Some(fraction)))(src)
}

/// A number literal.
///
/// In operand position a leading sign directly followed by a digit is part of the
/// literal, and so is a leading `.` for fractional floats.
pub fn number(operand: bool) -> impl FnMut(&str) -> Result<RawNumber> {
    move |src: &str| {
        let (src, sign) = if operand { sign(src)? } else { (src, None) };
        let (src, (int_part, fraction)) = if operand {
            alt((digits_with_fraction, fraction_only))(src)?
        } else {
            digits_with_fraction(src)?
        };
        let (src, suffix) = opt(float_suffix)(src)?;
        Ok((
            src,
            RawNumber {
                negative: sign == Some('-'),
                int_part,
                fraction,
                suffix,
            },
        ))
    }
}

/// A decoded piece of a string or character literal
#[derive(Debug, Clone, PartialEq)]
pub enum StringPiece<'a> {
    Text(&'a str),
    Char(char),
    /// An escaped line break, which decodes to nothing
    Elided,
    InvalidEscape(&'a str),
}

fn hex_char<'a>(min: usize, max: usize) -> impl FnMut(&'a str) -> Result<'a, char> {
    map_opt(take_while_m_n(min, max, is_hex_digit), |digits: &str| {
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
    })
}

fn unicode_escape(src: &str) -> Result<char> {
    preceded(
        char('u'),
        alt((delimited(char('{'), hex_char(1, 6), char('}')), hex_char(4, 4))),
    )(src)
}

fn octal_escape(src: &str) -> Result<char> {
    map_opt(take_while_m_n(1, 3, is_octal_digit), |digits: &str| {
        u32::from_str_radix(digits, 8).ok().and_then(char::from_u32)
    })(src)
}

fn simple_escape(src: &str) -> Result<char> {
    map(
        verify(anychar, |c: &char| {
            !matches!(c, 'x' | 'u' | '0'..='7' | '\n' | '\r')
        }),
        |c| match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            'a' => '\u{07}',
            'e' => '\u{1b}',
            c => c,
        },
    )(src)
}

/// A valid escape sequence. Escaped line breaks decode to `None`.
fn escape(src: &str) -> Result<Option<char>> {
    context(
        "escape",
        preceded(
            char('\\'),
            alt((
                value(None, line_ending),
                map(unicode_escape, Some),
                map(preceded(char('x'), hex_char(2, 2)), Some),
                map(octal_escape, Some),
                map(simple_escape, Some),
            )),
        ),
    )(src)
}

/// A `\u` escape with bad digits, up to the closing brace of a braced escape
fn malformed_unicode(src: &str) -> Result<&str> {
    recognize(preceded(
        char('u'),
        alt((
            recognize(tuple((
                char('{'),
                take_while(|c: char| c != '}' && c != '"' && c != '\'' && c != '\n'),
                opt(char('}')),
            ))),
            take_while_m_n(0, 4, is_hex_digit),
        )),
    ))(src)
}

fn malformed_hex(src: &str) -> Result<&str> {
    recognize(preceded(char('x'), take_while_m_n(0, 2, is_hex_digit)))(src)
}

/// An escape that could not be decoded. Malformed `\u` and `\x` escapes are taken whole.
fn invalid_escape(src: &str) -> Result<&str> {
    recognize(pair(
        char('\\'),
        opt(alt((
            malformed_unicode,
            malformed_hex,
            recognize(satisfy(|c| c != '\n' && c != '\r')),
        ))),
    ))(src)
}

fn decoded_escape(src: &str) -> Result<StringPiece> {
    alt((
        map(escape, |c| c.map_or(StringPiece::Elided, StringPiece::Char)),
        map(invalid_escape, StringPiece::InvalidEscape),
    ))(src)
}

/// A piece of string literal text. Fails at a closing quote, an interpolation, a raw
/// line break or the end of input.
pub fn string_piece(src: &str) -> Result<StringPiece> {
    context(
        "string piece",
        alt((
            decoded_escape,
            map(is_not("\"\\{\n"), StringPiece::Text),
        )),
    )(src)
}

/// A single character of a character literal. Fails at a closing quote, a raw line
/// break or the end of input.
pub fn char_piece(src: &str) -> Result<StringPiece> {
    context(
        "character",
        alt((
            decoded_escape,
            map(satisfy(|c| c != '\'' && c != '\n'), StringPiece::Char),
        )),
    )(src)
}

/// Recognizes an entire well formed character literal
#[cfg(test)]
fn char_literal(src: &str) -> Result<StringPiece> {
    delimited(char('\''), char_piece, char('\''))(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;
    use nom::Finish;
    use test_log::test;

    #[test]
    fn test_trivia() {
        let (rest, _) = trivia("  /* hello */ // world\nx").finish().unwrap();
        assert_eq!(rest, "\nx");
        let (rest, _) = trivia("\\\n  y").finish().unwrap();
        assert_eq!(rest, "y");
        let (rest, _) = trivia("/* unterminated").finish().unwrap();
        assert_eq!(rest, "/* unterminated");
    }

    #[test]
    fn test_symbols_prefer_longest() {
        for (src, expected) in [
            ("**", TokenKind::StarStar),
            ("*=", TokenKind::StarAssign),
            ("??", TokenKind::QuestionQuestion),
            ("?.", TokenKind::QuestionDot),
            ("->", TokenKind::Arrow),
            (":=", TokenKind::ColonAssign),
            ("..", TokenKind::DotDot),
            ("!=", TokenKind::Neq),
            ("!", TokenKind::Bang),
        ] {
            let (_, kind) = all_consuming(symbol)(src).finish().unwrap();
            assert_eq!(kind, expected, "for {src:?}");
        }
    }

    #[test]
    fn test_words() {
        assert_eq!(word("switch x").unwrap().1, TokenKind::Switch);
        assert_eq!(word("switched").unwrap().1, TokenKind::Identifier);
        assert_eq!(word("_").unwrap().1, TokenKind::Default);
        assert_eq!(word("_x").unwrap().1, TokenKind::Identifier);
        assert_eq!(word("$x").unwrap().1, TokenKind::Identifier);
        assert_eq!(word("none").unwrap().1, TokenKind::None);
    }

    #[test]
    fn test_number_forms() {
        let (rest, raw) = number(false)("1_000.25f + 1").unwrap();
        assert_eq!(rest, " + 1");
        assert_eq!(
            raw.evaluate(),
            (
                TokenKind::Float {
                    value: 1000.25,
                    suffix: Some(FloatSuffix::Float)
                },
                None
            )
        );
        let (_, raw) = number(true)("-42").unwrap();
        assert_eq!(raw.evaluate(), (TokenKind::Integer(-42), None));
        let (rest, raw) = number(false)("1..5").unwrap();
        assert_eq!(rest, "..5");
        assert_eq!(raw.evaluate().0, TokenKind::Integer(1));
        let (_, raw) = number(true)(".5").unwrap();
        assert_eq!(
            raw.evaluate().0,
            TokenKind::Float {
                value: 0.5,
                suffix: None
            }
        );
        assert!(number(false)(".5").is_err());
        assert!(number(false)("-5").is_err());
    }

    #[test]
    fn test_suffix_must_end_the_literal() {
        let (rest, raw) = number(false)("2d").unwrap();
        assert_eq!(rest, "");
        assert!(raw.is_float());
        let (rest, raw) = number(false)("2fo").unwrap();
        assert_eq!(rest, "fo");
        assert!(!raw.is_float());
    }

    #[test]
    fn test_invalid_numbers() {
        for src in ["007", "1_", "1__0", "99999999999999999999"] {
            let (_, raw) = number(false)(src).unwrap();
            assert!(raw.evaluate().1.is_some(), "{src} should be invalid");
        }
        let (_, raw) = number(false)("0").unwrap();
        assert_eq!(raw.evaluate(), (TokenKind::Integer(0), None));
        let (_, raw) = number(false)("00.5").unwrap();
        assert!(raw.evaluate().1.is_none());
    }

    #[test]
    fn test_escapes() {
        for (src, expected) in [
            ("'A'", 'A'),
            ("'\\x41'", 'A'),
            ("'\\101'", 'A'),
            ("'\\u0041'", 'A'),
            ("'\\u{1F600}'", '\u{1F600}'),
            ("'\\n'", '\n'),
            ("'\\e'", '\u{1b}'),
            ("'\\''", '\''),
            ("'\\{'", '{'),
        ] {
            let (_, piece) = all_consuming(char_literal)(src).finish().unwrap();
            assert_eq!(piece, StringPiece::Char(expected), "for {src:?}");
        }
    }

    #[test]
    fn test_invalid_escape() {
        let (rest, piece) = string_piece("\\xZZ").unwrap();
        assert_eq!(piece, StringPiece::InvalidEscape("\\x"));
        assert_eq!(rest, "ZZ");
    }

    #[test]
    fn test_malformed_escapes_are_taken_whole() {
        for (src, escape, rest) in [
            ("\\u{110000}x", "\\u{110000}", "x"),
            ("\\u{12", "\\u{12", ""),
            ("\\u12g", "\\u12", "g"),
            ("\\xAZ", "\\xA", "Z"),
        ] {
            let (after, piece) = string_piece(src).unwrap();
            assert_eq!(piece, StringPiece::InvalidEscape(escape), "for {src:?}");
            assert_eq!(after, rest, "for {src:?}");
        }
    }

    #[test]
    fn test_escaped_line_break() {
        let (rest, piece) = string_piece("\\\nabc").unwrap();
        assert_eq!(piece, StringPiece::Elided);
        assert_eq!(rest, "abc");
    }

    #[test]
    fn test_string_piece_stops() {
        let (rest, piece) = string_piece("abc{x}\"").unwrap();
        assert_eq!(piece, StringPiece::Text("abc"));
        assert_eq!(rest, "{x}\"");
        assert!(string_piece("\"").is_err());
        assert!(string_piece("\n").is_err());
        assert!(string_piece("").is_err());
    }
}
