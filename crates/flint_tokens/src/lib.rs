#![doc = include_str!("../README.md")]

use crate::spanned::{LineReader, Span};
use std::fmt::{Display, Formatter};

pub mod spanned;
pub mod token;

/// A message that is displayed along with the lines of source code its span points at.
///
/// ```text
/// unexpected token
///   -> main.fl:2:5
/// 1 | x = 1;
/// 2 | y = = 2;
///         ~
/// ```
#[derive(Debug)]
pub struct SourceSnippet<'a, M> {
    message: M,
    source: &'a str,
    name: &'a str,
    span: Option<Span>,
}

impl<'a, M> SourceSnippet<'a, M> {
    pub fn new(message: M, source: &'a str, name: &'a str, span: impl Into<Option<Span>>) -> Self {
        Self {
            message,
            source,
            name,
            span: span.into(),
        }
    }
}

impl<M: Display> Display for SourceSnippet<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)?;
        if let Some(location) = &self.span {
            writeln!(f, "  -> {}:{}", self.name, location.start())?;
            let (lines, base_line) = LineReader::new(2, 0).lines(self.source, location);
            let width = lines
                .iter()
                .map(|line| line.line)
                .max()
                .unwrap_or(0)
                .to_string()
                .len();
            for line in &lines {
                writeln!(f, "{:>width$} | {}", line.line, line.src.trim_end())?;
                if line.line == base_line {
                    let col = line.col.saturating_sub(1);
                    let on_line = if location.end().line == base_line {
                        location.end().column.saturating_sub(location.start().column)
                    } else {
                        line.src.chars().count().saturating_sub(col)
                    };
                    if on_line > 0 {
                        writeln!(
                            f,
                            "{}{}{}",
                            " ".repeat(width + 3),
                            " ".repeat(col),
                            "~".repeat(on_line)
                        )?;
                    } else {
                        writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(col))?;
                    }
                }
            }
        }
        Ok(())
    }
}
