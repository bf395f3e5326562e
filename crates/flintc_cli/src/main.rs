use crate::args::{Args, Emit};
use crate::driver::ParsedFile;
use crate::stats::NodeStats;
use clap::Parser;
use eyre::eyre;
use flint_parsing::{tokenize, CancellationFlag, ParseConfig};
use flint_tokens::spanned::Spanned;
use owo_colors::Stream;
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use std::sync::Arc;
use tracing::metadata::LevelFilter;
use tracing::{debug, trace, warn, Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

mod args;
mod driver;
mod report;
mod stats;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting flintc with args: {args:?}");
    debug!("flintc version: {}", env!("CARGO_PKG_VERSION"));

    let cancellation = CancellationFlag::new();
    let config = Arc::new(args.parse_config(cancellation.clone())?);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            cancellation.cancel();
        }
    });

    let files = driver::parse_all(args.files.clone(), config.clone()).await?;
    for file in &files {
        emit(args.emit, file, &config);
        for diagnostic in &file.output.diagnostics {
            eprint!("{}", report::render(diagnostic, file, Stream::Stderr));
        }
    }

    if let Some(summary) = report::summary(&files) {
        eprintln!("{summary}");
    }
    let failed = files.iter().filter(|file| file.output.has_errors()).count();
    if failed > 0 {
        return Err(eyre!("{failed} file(s) could not be parsed"));
    }
    Ok(())
}

/// Prints the requested output for a parsed file
fn emit(emit: Option<Emit>, file: &ParsedFile, config: &ParseConfig) {
    match emit {
        None => {}
        Some(Emit::Ast) => {
            if let Some(ast) = &file.output.ast {
                println!("// {}", file.name());
                print!("{ast}");
            }
        }
        Some(Emit::Tokens) => {
            println!("// {}", file.name());
            for token in tokenize(&file.source, config).tokens {
                println!("{} {token:?}", token.span().start());
            }
        }
        Some(Emit::Stats) => {
            if let Some(ast) = &file.output.ast {
                println!("// {}", file.name());
                println!("{}", NodeStats::of(ast));
            }
        }
    }
}

struct StdioWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl io::Write for StdioLock<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write_all(buf),
            StdioLock::Stderr(stderr) => stderr.write_all(buf),
        }
    }
}

impl<'a> MakeWriter<'a> for StdioWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stdout(self.stdout.lock())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        // warnings and errors go to stderr
        if meta.level() <= &Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(StdioWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
