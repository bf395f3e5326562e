use eyre::eyre;
use flint_ast::flint_file::FlintFile;
use flint_parsing::{parse, ParseConfig, ParseOutput};

/// Parses `source` with the default configuration, failing if the parse produced no tree
pub fn parse_file(source: &str) -> eyre::Result<(FlintFile, ParseOutput)> {
    let mut output = parse(source, &ParseConfig::default());
    let file = output
        .ast
        .take()
        .ok_or_else(|| eyre!("no ast for {source:?}: {:?}", output.diagnostics))?;
    Ok((file, output))
}

/// Parses `source` and renders it, one statement per line
pub fn render(source: &str) -> eyre::Result<String> {
    let (file, output) = parse_file(source)?;
    if !output.diagnostics.is_empty() {
        return Err(eyre!("unexpected diagnostics: {:?}", output.diagnostics));
    }
    Ok(file.to_string())
}
