//! A lexical token from a source buffer

use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};

/// A lexical token from a source buffer.
///
/// The text is borrowed from the source the token was lexed from. Structural tokens
/// (`Newline`, `Indent`, `Dedent`, `Eof`) have empty text.
#[derive(Clone)]
pub struct Token<'src> {
    kind: TokenKind,
    text: &'src str,
    span: Span,
}

impl<'src> Token<'src> {
    /// Creates a new token
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Creates a structural token with no text
    pub fn structural(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            text: "",
            span,
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Gets the source text of this token
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Describes this token for error messages
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Identifier => format!("identifier `{}`", self.text),
            kind if kind.is_structural() => kind.to_string(),
            kind if kind.is_literal() => format!("{kind} `{}`", self.text),
            kind => kind.to_string(),
        }
    }
}

impl Debug for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Identifier => write!(f, "Identifier({:?})", self.text),
            kind => Debug::fmt(kind, f),
        }
    }
}

impl Spanned for Token<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

/// The suffix of a floating point literal
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FloatSuffix {
    /// `f` or `F`
    Float,
    /// `d` or `D`
    Double,
}

impl FloatSuffix {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'f' | 'F' => Some(Self::Float),
            'd' | 'D' => Some(Self::Double),
            _ => None,
        }
    }
}

/// The kind for a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // literals
    Integer(i64),
    Float {
        value: f64,
        suffix: Option<FloatSuffix>,
    },
    Char(char),
    /// `"` or `$"`
    StringStart,
    /// Decoded text between string delimiters, interpolations and escapes
    StringFragment(String),
    /// `{` inside a string
    InterpolationStart,
    /// `}` closing an interpolation
    InterpolationEnd,
    /// `"` closing a string
    StringEnd,
    True,
    False,
    None,
    /// `_`
    Default,

    Identifier,

    // keywords
    Def,
    Data,
    Func,
    Entity,
    Enum,
    Variant,
    Error,
    Test,
    Extern,
    Export,
    Throw,
    Switch,
    Or,
    And,
    Not,

    /// =
    Assign,
    /// +=
    PlusAssign,
    /// -=
    MinusAssign,
    /// *=
    StarAssign,
    /// /=
    SlashAssign,
    /// :=
    ColonAssign,
    /// ==
    Eq,
    /// !=
    Neq,
    Gte,
    Lte,
    Gt,
    Lt,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// **
    StarStar,
    /// ??
    QuestionQuestion,
    PlusPlus,
    MinusMinus,
    Bang,
    Question,
    /// ?.
    QuestionDot,
    Dot,
    DotDot,
    Comma,
    Colon,
    Semicolon,
    Arrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LCurly,
    RCurly,

    // structural
    Newline,
    Indent,
    Dedent,
    /// EOF, will only appear as the last token
    Eof,
}

impl TokenKind {
    /// Gets the keyword kind for a word, if it is reserved
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "def" => TokenKind::Def,
            "data" => TokenKind::Data,
            "func" => TokenKind::Func,
            "entity" => TokenKind::Entity,
            "enum" => TokenKind::Enum,
            "variant" => TokenKind::Variant,
            "error" => TokenKind::Error,
            "test" => TokenKind::Test,
            "extern" => TokenKind::Extern,
            "export" => TokenKind::Export,
            "throw" => TokenKind::Throw,
            "switch" => TokenKind::Switch,
            "or" => TokenKind::Or,
            "and" => TokenKind::And,
            "not" => TokenKind::Not,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "none" => TokenKind::None,
            "_" => TokenKind::Default,
            _ => return None,
        };
        Some(kind)
    }

    /// `Newline`, `Indent`, `Dedent` and `Eof`
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// Keywords that start a declaration. Their grammars are not defined yet.
    pub fn is_declaration_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Def
                | TokenKind::Data
                | TokenKind::Func
                | TokenKind::Entity
                | TokenKind::Enum
                | TokenKind::Variant
                | TokenKind::Error
                | TokenKind::Test
                | TokenKind::Extern
                | TokenKind::Export
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer(_)
                | TokenKind::Float { .. }
                | TokenKind::Char(_)
                | TokenKind::StringFragment(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::None
                | TokenKind::Default
        )
    }

    /// Checks if a token of this kind can be the last token of an operand
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer(_)
                | TokenKind::Float { .. }
                | TokenKind::Char(_)
                | TokenKind::StringEnd
                | TokenKind::True
                | TokenKind::False
                | TokenKind::None
                | TokenKind::Default
                | TokenKind::Identifier
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RCurly
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Bang
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::Integer(_) => "integer literal",
            TokenKind::Float { .. } => "float literal",
            TokenKind::Char(_) => "character literal",
            TokenKind::StringStart => "string literal",
            TokenKind::StringFragment(_) => "string fragment",
            TokenKind::InterpolationStart => "`{`",
            TokenKind::InterpolationEnd => "`}`",
            TokenKind::StringEnd => "`\"`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::None => "`none`",
            TokenKind::Default => "`_`",
            TokenKind::Identifier => "identifier",
            TokenKind::Def => "`def`",
            TokenKind::Data => "`data`",
            TokenKind::Func => "`func`",
            TokenKind::Entity => "`entity`",
            TokenKind::Enum => "`enum`",
            TokenKind::Variant => "`variant`",
            TokenKind::Error => "`error`",
            TokenKind::Test => "`test`",
            TokenKind::Extern => "`extern`",
            TokenKind::Export => "`export`",
            TokenKind::Throw => "`throw`",
            TokenKind::Switch => "`switch`",
            TokenKind::Or => "`or`",
            TokenKind::And => "`and`",
            TokenKind::Not => "`not`",
            TokenKind::Assign => "`=`",
            TokenKind::PlusAssign => "`+=`",
            TokenKind::MinusAssign => "`-=`",
            TokenKind::StarAssign => "`*=`",
            TokenKind::SlashAssign => "`/=`",
            TokenKind::ColonAssign => "`:=`",
            TokenKind::Eq => "`==`",
            TokenKind::Neq => "`!=`",
            TokenKind::Gte => "`>=`",
            TokenKind::Lte => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::Lt => "`<`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::StarStar => "`**`",
            TokenKind::QuestionQuestion => "`??`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::MinusMinus => "`--`",
            TokenKind::Bang => "`!`",
            TokenKind::Question => "`?`",
            TokenKind::QuestionDot => "`?.`",
            TokenKind::Dot => "`.`",
            TokenKind::DotDot => "`..`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Arrow => "`->`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LCurly => "`{`",
            TokenKind::RCurly => "`}`",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// A stream of tokens
#[derive(Debug, Default)]
pub struct TokenStream<'src>(Vec<Token<'src>>);

impl<'src> TokenStream<'src> {
    #[inline]
    pub fn new() -> Self {
        Self(vec![])
    }

    /// The kinds of every token, in order
    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> {
        self.0.iter().map(|t| t.kind())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.0.iter()
    }
}

impl<'src> FromIterator<Token<'src>> for TokenStream<'src> {
    fn from_iter<T: IntoIterator<Item = Token<'src>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'src> IntoIterator for TokenStream<'src> {
    type Item = Token<'src>;
    type IntoIter = std::vec::IntoIter<Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
