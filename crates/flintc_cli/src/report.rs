//! Renders diagnostics for the terminal

use crate::driver::ParsedFile;
use flint_parsing::{Diagnostic, Severity};
use flint_tokens::SourceSnippet;
use owo_colors::{OwoColorize, Stream};
use std::fmt::{Display, Formatter};

/// The first line of a rendered diagnostic, coloured by severity when `stream` supports it
struct Headline<'a> {
    diagnostic: &'a Diagnostic,
    stream: Stream,
}

impl Display for Headline<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let severity = self.diagnostic.severity.to_string();
        let severity = match self.diagnostic.severity {
            Severity::Error => severity
                .if_supports_color(self.stream, |text| text.bright_red())
                .to_string(),
            Severity::Warning => severity
                .if_supports_color(self.stream, |text| text.bright_yellow())
                .to_string(),
        };
        write!(
            f,
            "{severity}[{}]: {}",
            self.diagnostic.kind,
            self.diagnostic
                .message
                .if_supports_color(self.stream, |text| text.bold())
        )
    }
}

/// Renders a diagnostic of `file` with the source lines it points at
pub fn render(diagnostic: &Diagnostic, file: &ParsedFile, stream: Stream) -> String {
    let name = file.name();
    let headline = Headline { diagnostic, stream };
    SourceSnippet::new(headline, &file.source, &name, diagnostic.span).to_string()
}

/// Summarizes the diagnostics of every file
pub fn summary(files: &[ParsedFile]) -> Option<String> {
    let (errors, warnings) = files
        .iter()
        .flat_map(|file| &file.output.diagnostics)
        .fold((0, 0), |(errors, warnings), diagnostic| {
            match diagnostic.severity {
                Severity::Error => (errors + 1, warnings),
                Severity::Warning => (errors, warnings + 1),
            }
        });
    match (errors, warnings) {
        (0, 0) => None,
        (errors, warnings) => Some(format!(
            "{errors} error{} and {warnings} warning{} in {} file{}",
            plural(errors),
            plural(warnings),
            files.len(),
            plural(files.len())
        )),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
