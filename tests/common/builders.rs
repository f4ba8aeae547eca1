//! Test builders — ergonomic constructors for `Config` and `RawLine`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use logdex::{Config, LogSource};
use logdex_core::RawLine;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Config`] fixtures, starting from the built-in
/// defaults.
///
/// # Example
///
/// ```rust
/// let config = ConfigBuilder::new()
///     .source(LogSource::new(dir.path()))
///     .batch_size(10)
///     .excluded(&["/health", "/metrics"])
///     .build();
/// ```
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::defaults(),
        }
    }

    /// Shorthand for a builder with one recursive `*.log` source at `dir`.
    pub fn for_dir(dir: &Path) -> Self {
        Self::new().source(LogSource::new(dir))
    }

    pub fn source(mut self, source: LogSource) -> Self {
        self.config.log_sources.push(source);
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.indexing.batch_size = batch_size;
        self
    }

    pub fn tail_lines(mut self, tail_lines: usize) -> Self {
        self.config.indexing.tail_lines = tail_lines;
        self
    }

    pub fn auto_index(mut self, auto_index: bool) -> Self {
        self.config.indexing.auto_index = auto_index;
        self
    }

    pub fn excluded(mut self, patterns: &[&str]) -> Self {
        self.config.indexing.excluded_patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn build(self) -> Config {
        self.config.validate().expect("test config must be valid");
        self.config
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A raw line from a fixed fake file.
pub fn raw_line(text: &str) -> RawLine {
    raw_line_at("/var/log/app.log", 1, text)
}

pub fn raw_line_at(path: impl Into<PathBuf>, line_number: u64, text: &str) -> RawLine {
    RawLine {
        path: path.into(),
        line_number,
        byte_offset: 0,
        text: text.to_string(),
    }
}
