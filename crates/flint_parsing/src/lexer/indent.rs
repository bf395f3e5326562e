//! Tracks the indentation of logical lines

use thiserror::Error;
use tracing::debug;

/// The measured leading whitespace of a line
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Indentation {
    pub width: usize,
    /// Whether tabs and spaces were both used
    pub mixed: bool,
}

/// The layout tokens a new logical line produces
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineLayout {
    /// The first code line at the current level. Nothing precedes it to terminate.
    Start,
    Newline,
    Indent,
    /// Closes this many levels
    Dedent(usize),
}

/// A dedent that does not land on any enclosing indentation level.
///
/// The levels above `width` were still closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unindent to width {width} does not match any outer indentation level (expected {expected})")]
pub struct IndentationError {
    pub width: usize,
    /// The enclosing level the line continues at
    pub expected: usize,
    pub dedents: usize,
}

/// Indentation state for a single lexing session
#[derive(Debug)]
pub struct IndentState {
    widths: Vec<usize>,
    bracket_depth: usize,
    tab_width: usize,
    seen_code: bool,
}

impl IndentState {
    pub fn new(tab_width: usize) -> Self {
        Self {
            widths: vec![0],
            bracket_depth: 0,
            tab_width,
            seen_code: false,
        }
    }

    /// Measures leading whitespace. Spaces count 1, tabs count the tab width and a form
    /// feed or carriage return resets the width.
    pub fn measure(&self, leading: &str) -> Indentation {
        let mut width = 0;
        let mut spaces = false;
        let mut tabs = false;
        for c in leading.chars() {
            match c {
                ' ' => {
                    width += 1;
                    spaces = true;
                }
                '\t' => {
                    width += self.tab_width;
                    tabs = true;
                }
                '\x0c' | '\r' => {
                    width = 0;
                }
                _ => break,
            }
        }
        Indentation {
            width,
            mixed: spaces && tabs,
        }
    }

    /// Processes the start of a logical line whose code begins at `width`
    pub fn line(&mut self, width: usize) -> Result<LineLayout, IndentationError> {
        let top = self.top();
        let first = !self.seen_code;
        self.seen_code = true;
        if width == top {
            return Ok(if first {
                LineLayout::Start
            } else {
                LineLayout::Newline
            });
        }
        if width > top {
            debug!("indent {top} -> {width}");
            self.widths.push(width);
            return Ok(LineLayout::Indent);
        }
        let mut dedents = 0;
        while self.top() > width {
            self.widths.pop();
            dedents += 1;
        }
        debug!("dedent {top} -> {width} ({dedents} levels)");
        let expected = self.top();
        if expected == width {
            Ok(LineLayout::Dedent(dedents))
        } else {
            Err(IndentationError {
                width,
                expected,
                dedents,
            })
        }
    }

    /// Closes every open level at the end of input, returning how many were closed
    pub fn finish(&mut self) -> usize {
        let open = self.depth();
        self.widths.truncate(1);
        open
    }

    /// Gets how many levels are currently open
    pub fn depth(&self) -> usize {
        self.widths.len() - 1
    }

    fn top(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    pub fn open_bracket(&mut self) {
        self.bracket_depth += 1;
    }

    pub fn close_bracket(&mut self) {
        self.bracket_depth = self.bracket_depth.saturating_sub(1);
    }

    /// While inside brackets lines are continuations and produce no layout tokens
    pub fn in_brackets(&self) -> bool {
        self.bracket_depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_round_trip_depths() {
        let mut state = IndentState::new(8);
        let mut depths = vec![];
        for width in [0, 4, 4, 8, 4, 0] {
            state.line(width).expect("consistent indentation");
            depths.push(state.depth());
        }
        assert_eq!(depths, [0, 1, 1, 2, 1, 0]);
        assert_eq!(state.finish(), 0);
    }

    #[test]
    fn test_layout_tokens() {
        let mut state = IndentState::new(8);
        assert_eq!(state.line(0), Ok(LineLayout::Start));
        assert_eq!(state.line(0), Ok(LineLayout::Newline));
        assert_eq!(state.line(2), Ok(LineLayout::Indent));
        assert_eq!(state.line(6), Ok(LineLayout::Indent));
        assert_eq!(state.line(0), Ok(LineLayout::Dedent(2)));
    }

    #[test]
    fn test_inconsistent_dedent() {
        let mut state = IndentState::new(8);
        for width in [0, 4, 8] {
            state.line(width).unwrap();
        }
        let error = state.line(6).unwrap_err();
        assert_eq!(
            error,
            IndentationError {
                width: 6,
                expected: 4,
                dedents: 1
            }
        );
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn test_finish_closes_open_levels() {
        let mut state = IndentState::new(8);
        state.line(0).unwrap();
        state.line(2).unwrap();
        state.line(4).unwrap();
        assert_eq!(state.finish(), 2);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn test_measure() {
        let state = IndentState::new(4);
        assert_eq!(
            state.measure("  \t"),
            Indentation {
                width: 6,
                mixed: true
            }
        );
        assert_eq!(
            state.measure("\t\t"),
            Indentation {
                width: 8,
                mixed: false
            }
        );
        assert_eq!(state.measure("    \x0c  ").width, 2);
    }

    #[test]
    fn test_brackets() {
        let mut state = IndentState::new(8);
        assert!(!state.in_brackets());
        state.open_bracket();
        state.open_bracket();
        state.close_bracket();
        assert!(state.in_brackets());
        state.close_bracket();
        state.close_bracket();
        assert!(!state.in_brackets());
    }
}
