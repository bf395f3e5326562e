//! Configuration of a parse

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// The default number of columns a tab advances the indentation width by
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Configures how a source buffer is lexed and parsed.
///
/// Must be created with a [ParseConfigBuilder] unless the defaults are fine.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    tab_width: usize,
    type_names: HashSet<String>,
    cancellation: Option<CancellationFlag>,
}

impl ParseConfig {
    /// Creates the default ParseConfigBuilder
    #[inline]
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder::new()
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Checks if `name` was registered as a known type name
    pub fn is_type_name(&self, name: &str) -> bool {
        self.type_names.contains(name)
    }

    pub fn cancellation(&self) -> Option<&CancellationFlag> {
        self.cancellation.as_ref()
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            type_names: HashSet::new(),
            cancellation: None,
        }
    }
}

/// Builder for creating a [ParseConfig] instance.
#[derive(Debug, Default)]
pub struct ParseConfigBuilder {
    tab_width: Option<usize>,
    type_names: HashSet<String>,
    cancellation: Option<CancellationFlag>,
}

impl ParseConfigBuilder {
    /// Creates a ParseConfigBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many columns a tab counts for when measuring indentation
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = Some(tab_width);
        self
    }

    /// Registers a known type name. `Name(x)` parses as a cast for these.
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_names.insert(name.into());
        self
    }

    /// Registers many known type names
    pub fn type_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.type_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the flag that can be used to cancel the parse from another thread
    pub fn cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Builds a [ParseConfig] from this builder
    pub fn build(self) -> Result<ParseConfig, BuildConfigError> {
        let tab_width = self.tab_width.unwrap_or(DEFAULT_TAB_WIDTH);
        if tab_width == 0 {
            return Err(BuildConfigError::ZeroTabWidth);
        }
        Ok(ParseConfig {
            tab_width,
            type_names: self.type_names,
            cancellation: self.cancellation,
        })
    }
}

/// An error occurred while building a [ParseConfig] instance
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildConfigError {
    #[error("tab width must be at least 1")]
    ZeroTabWidth,
}

/// A shared flag used to cooperatively cancel a parse.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every parse using this flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::builder().build().expect("default is valid");
        assert_eq!(config.tab_width(), DEFAULT_TAB_WIDTH);
        assert!(!config.is_type_name("int"));
        assert!(config.cancellation().is_none());
    }

    #[test]
    fn test_zero_tab_width_rejected() {
        let result = ParseConfig::builder().tab_width(0).build();
        assert_eq!(result.unwrap_err(), BuildConfigError::ZeroTabWidth);
    }

    #[test]
    fn test_type_names() {
        let config = ParseConfig::builder()
            .type_name("i32")
            .type_names(["f64", "str"])
            .build()
            .unwrap();
        assert!(config.is_type_name("i32"));
        assert!(config.is_type_name("str"));
        assert!(!config.is_type_name("foo"));
    }

    #[test]
    fn test_cancellation_is_shared() {
        let flag = CancellationFlag::new();
        let config = ParseConfig::builder()
            .cancellation(flag.clone())
            .build()
            .unwrap();
        assert!(!config.cancellation().unwrap().is_cancelled());
        flag.cancel();
        assert!(config.cancellation().unwrap().is_cancelled());
    }
}
