//! the args for running flintc

use flint_cli_common::LoggingArgs;
use flint_parsing::config::DEFAULT_TAB_WIDTH;
use flint_parsing::{BuildConfigError, CancellationFlag, ParseConfig};
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Parses flint source files and reports their diagnostics")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Specify which source files to parse
    #[clap(required = true, value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
    /// How many columns a tab advances the indentation width by
    #[clap(long, default_value_t = DEFAULT_TAB_WIDTH, env = "FLINT_TAB_WIDTH")]
    pub tab_width: usize,
    /// Registers a known type name, so that `Name(x)` parses as a cast.
    ///
    /// Can be used multiple times.
    #[clap(long = "type", value_name = "NAME")]
    pub type_names: Vec<String>,
    /// What to print for every parsed file
    #[clap(long, value_enum)]
    pub emit: Option<Emit>,
}

/// Output that can be printed for a parsed file
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Emit {
    /// The syntax tree in s-expression form
    Ast,
    /// The raw token stream
    Tokens,
    /// Counts of syntax tree nodes
    Stats,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    /// Creates the parse configuration these args describe
    pub fn parse_config(
        &self,
        cancellation: CancellationFlag,
    ) -> Result<ParseConfig, BuildConfigError> {
        ParseConfig::builder()
            .tab_width(self.tab_width)
            .type_names(self.type_names.iter().cloned())
            .cancellation(cancellation)
            .build()
    }
}
