//! Parses many source files at once

use eyre::WrapErr;
use flint_parsing::{ParseConfig, ParseOutput};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, instrument};

/// A source file and the result of parsing it
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub output: ParseOutput,
}

impl ParsedFile {
    /// The name diagnostics refer to this file by
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads and parses a single file
#[instrument(skip(config))]
pub fn parse_file(path: &Path, config: &ParseConfig) -> eyre::Result<ParsedFile> {
    let source = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    let output = flint_parsing::parse(&source, config);
    debug!(
        "parsed {} with {} diagnostics",
        path.display(),
        output.diagnostics.len()
    );
    Ok(ParsedFile {
        path: path.to_path_buf(),
        source,
        output,
    })
}

/// Parses every file on the blocking thread pool. Files are returned in the order they were
/// given.
pub async fn parse_all(
    paths: Vec<PathBuf>,
    config: Arc<ParseConfig>,
) -> eyre::Result<Vec<ParsedFile>> {
    let mut tasks = JoinSet::new();
    for (index, path) in paths.into_iter().enumerate() {
        let config = config.clone();
        tasks.spawn_blocking(move || parse_file(&path, &config).map(|parsed| (index, parsed)));
    }

    let mut parsed = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        parsed.push(joined??);
    }
    parsed.sort_by_key(|(index, _)| *index);
    Ok(parsed.into_iter().map(|(_, file)| file).collect())
}
