//! parsers used for creating the AST

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod blocking;
pub mod error;
pub mod expr;
pub mod flint_file;
pub mod precedence;
pub mod statement;
pub mod switch;

pub use blocking::{remove_nl, CouldParse, Parsable, SyntacticParser};
pub use error::{ErrorKind, SyntaxError, SyntaxResult};

/// Err enum used to represent recoverable and non-recoverable errors
#[derive(Debug)]
pub enum Err<E> {
    /// a recoverable error
    Error(E),
    /// a non-recoverable error
    Failure(E),
}

impl<E> Err<E> {
    pub fn cut(self) -> Self {
        match self {
            Err::Error(e) => Err::Failure(e),
            e @ Err::Failure(_) => e,
        }
    }

    pub fn convert<E2>(self) -> Err<E2>
    where
        E: Into<E2>,
    {
        match self {
            Err::Error(e) => Err::Error(e.into()),
            Err::Failure(e) => Err::Failure(e.into()),
        }
    }

    /// Gets the inner error, regardless of whether it is recoverable
    pub fn into_inner(self) -> E {
        match self {
            Err::Error(e) | Err::Failure(e) => e,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Err::Failure(_))
    }
}

impl<E: Error> Display for Err<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Err::Error(e) => {
                write!(f, "recoverable error: {e}")
            }
            Err::Failure(e) => {
                write!(f, "unrecoverable error: {e}")
            }
        }
    }
}

impl<E: Error> Error for Err<E> {}

impl From<SyntaxError> for Err<SyntaxError> {
    fn from(value: SyntaxError) -> Self {
        Err::Error(value)
    }
}
