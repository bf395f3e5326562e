#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LoggingArgs {
    /// Log more, can be repeated
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, can be repeated
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// The difference between `-v` and `-q` counts, clamped to `-2..=2`
    pub fn verbosity(&self) -> i8 {
        (self.verbose.min(2) as i8) - (self.quiet.min(2) as i8)
    }

    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.verbosity() {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[command(flatten)]
        logging: LoggingArgs,
    }

    #[test]
    fn test_verbosity() {
        let args = TestArgs::try_parse_from(["test", "-vv"]).unwrap();
        assert_eq!(args.logging.verbosity(), 2);
        let args = TestArgs::try_parse_from(["test", "-q"]).unwrap();
        assert_eq!(args.logging.verbosity(), -1);
        let args = TestArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args.logging.verbosity(), 0);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(TestArgs::try_parse_from(["test", "-v", "-q"]).is_err());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_level_filter() {
        use tracing::level_filters::LevelFilter;
        let args = TestArgs::try_parse_from(["test", "-qq"]).unwrap();
        assert_eq!(args.logging.log_level_filter(), LevelFilter::OFF);
        let args = TestArgs::try_parse_from(["test", "-v"]).unwrap();
        assert_eq!(args.logging.log_level_filter(), LevelFilter::DEBUG);
    }
}
