//! Positions and spans within a source buffer

use std::fmt::{Debug, Display, Formatter};

/// A trait that can provide the [Span] of the complete context of a node or token
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A position in a source buffer.
///
/// `offset` is a byte offset, `line` and `column` are 1-based and the column counts chars.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The start of any source buffer
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Gets the position after `text`, assuming `text` starts at this position
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        for c in text.chars() {
            next.offset += c.len_utf8();
            if c == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A `start..end` range of a source buffer
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    /// Creates a new span
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at a position
    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub const fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Gets an empty span directly after this span
    pub const fn after(&self) -> Self {
        Self::empty(self.end)
    }

    /// Creates a span that encompasses both
    pub fn join(&self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the text this span covers in `source`, if it is in bounds
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start.offset..self.end.offset)
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl<T: Spanned> Spanned for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }
}

/// A line reader struct that's responsible for getting lines around a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after` number
    /// of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines around a given span from `source`, plus the line the span starts on
    pub fn lines<'s>(&self, source: &'s str, span: &Span) -> (Vec<Line<'s>>, usize) {
        let base_line = span.start().line;
        let first = base_line.saturating_sub(self.before).max(1);
        let last = base_line.saturating_add(self.after);

        let mut lines = vec![];
        let mut byte_offset = 0usize;
        for (idx, src) in source.split('\n').enumerate() {
            let line = idx + 1;
            if line > last {
                break;
            }
            if line >= first {
                lines.push(Line {
                    line,
                    col: if line == base_line {
                        span.start().column
                    } else {
                        1
                    },
                    byte_offset,
                    src: src.strip_suffix('\r').unwrap_or(src),
                });
            }
            byte_offset += src.len() + 1;
        }
        (lines, base_line)
    }
}

#[derive(Debug)]
pub struct Line<'s> {
    pub line: usize,
    pub col: usize,
    pub byte_offset: usize,
    pub src: &'s str,
}

#[cfg(test)]
mod tests {
    use crate::spanned::{LineReader, Position, Span, Spanned};

    #[test]
    fn test_advance() {
        let p = Position::START.advance("ab\ncd");
        assert_eq!(p, Position::new(5, 2, 3));
        let p = Position::START.advance("é");
        assert_eq!(p, Position::new(2, 1, 2));
    }

    #[test]
    fn test_span_is_spanned() {
        let p = Span::empty(Position::START).span();
        assert_eq!(p.start(), Position::START);
        assert!(p.is_empty());
    }

    #[test]
    fn test_span_after() {
        let end = Position::START.advance("hello");
        let p = Span::new(Position::START, end).after();
        assert_eq!(p.start(), end);
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn test_join() {
        let a = Position::START;
        let b = a.advance("12345678");
        let c = b.advance("12345678");
        let d = c.advance("12345678");
        let p1 = Span::new(a, b);
        let p2 = Span::new(c, d);
        assert_eq!(p1.join(p2), Span::new(a, d));
        assert_eq!(p2.join(p1), Span::new(a, d));
    }

    #[test]
    fn test_text() {
        let src = "let x";
        let start = Position::START.advance("let ");
        let span = Span::new(start, start.advance("x"));
        assert_eq!(span.text(src), Some("x"));
    }

    #[test]
    fn test_line_reader() {
        let src = "a\nb\nc\nd\ne";
        let start = Position::START.advance("a\nb\n");
        let span = Span::new(start, start.advance("c"));
        let (lines, base) = LineReader::new(1, 1).lines(src, &span);
        assert_eq!(base, 3);
        assert_eq!(
            lines.iter().map(|l| l.src).collect::<Vec<_>>(),
            vec!["b", "c", "d"]
        );
    }
}
