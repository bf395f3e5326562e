#![doc = include_str!("../README.md")]

use flint_ast::flint_file::FlintFile;
use flint_tokens::token::TokenStream;
use tracing::{debug_span, info};

pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

pub use config::{BuildConfigError, CancellationFlag, ParseConfig, ParseConfigBuilder};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};

use crate::diagnostics::Diagnostics;
use crate::lexer::Lexer;
use crate::parser::{Err, Parsable, SyntacticParser};

/// The result of parsing a source buffer
#[derive(Debug)]
pub struct ParseOutput {
    /// The syntax tree, unless a fatal error stopped the parse
    pub ast: Option<FlintFile>,
    /// Every problem found, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Checks if any diagnostic has error severity
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parses a source buffer into a [FlintFile].
///
/// This never fails. Errors the parser recovered from are reported as diagnostics next to
/// the syntax tree, fatal errors leave `ast` empty.
pub fn parse(source: &str, config: &ParseConfig) -> ParseOutput {
    let span = debug_span!("parse", len = source.len());
    let _enter = span.enter();

    let mut parser = SyntacticParser::new(source, config);
    let result = parser.parse(FlintFile::parse);
    let mut diagnostics = parser.into_diagnostics();
    let ast = match result {
        Ok(file) => Some(file),
        Err(Err::Error(error) | Err::Failure(error)) => {
            diagnostics.report_syntax_error(&error);
            None
        }
    };
    info!(
        statements = ast.as_ref().map_or(0, |file| file.statements.len()),
        diagnostics = diagnostics.len(),
        "parsed source"
    );
    ParseOutput {
        ast,
        diagnostics: diagnostics.into_sorted_vec(),
    }
}

/// The result of tokenizing a source buffer
#[derive(Debug)]
pub struct TokenizeOutput<'src> {
    pub tokens: TokenStream<'src>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lexes a source buffer without parsing it.
///
/// Lexing stops at the first fatal error, so the stream only ends in an eof token if there
/// was none.
pub fn tokenize<'src>(source: &'src str, config: &ParseConfig) -> TokenizeOutput<'src> {
    let span = debug_span!("tokenize", len = source.len());
    let _enter = span.enter();

    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new(source, config)
        .filter_map(|result| match result {
            Ok(token) => Some(token),
            Err(error) => {
                diagnostics.report_lexing_error(&error);
                None
            }
        })
        .collect::<TokenStream>();
    TokenizeOutput {
        tokens,
        diagnostics: diagnostics.into_sorted_vec(),
    }
}
