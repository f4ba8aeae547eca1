//! Configuration types for logdex.
//!
//! [`Config::load`] reads the user's `config.toml` layered on top of the
//! embedded defaults, creating `~/.config/logdex/config.toml` with those
//! defaults if no explicit file was given and it does not yet exist.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
log_sources = []

[indexing]
auto_index        = true
batch_size        = 100
tail_lines        = 50
excluded_patterns = ["/health", "/metrics", "/ping"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration: where to find logs and how to index them.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log_sources: Vec<LogSource>,
    #[serde(default)]
    pub indexing: IndexingConfig,
}

/// One `[[log_sources]]` entry. `path` may name a file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSource {
    pub path: PathBuf,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

impl LogSource {
    /// A source using the default pattern (`*.log`), recursive.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pattern: default_pattern(),
            recursive: default_recursive(),
        }
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

fn default_pattern() -> String { "*.log".to_string() }
fn default_recursive() -> bool { true }

/// `[indexing]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexingConfig {
    #[serde(default = "default_auto_index")]
    pub auto_index: bool,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Number of trailing lines read per file on automatic runs.
    #[serde(default = "default_tail_lines")]
    pub tail_lines: usize,
    #[serde(default = "default_excluded_patterns")]
    pub excluded_patterns: Vec<String>,
}

fn default_auto_index() -> bool { true }
fn default_batch_size() -> usize { 100 }
fn default_tail_lines() -> usize { 50 }
fn default_excluded_patterns() -> Vec<String> {
    vec!["/health".to_string(), "/metrics".to_string(), "/ping".to_string()]
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            auto_index: default_auto_index(),
            batch_size: default_batch_size(),
            tail_lines: default_tail_lines(),
            excluded_patterns: default_excluded_patterns(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// With `Some(path)` the file must exist. With `None` the per-user file
    /// is used and created with defaults if it does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => {
                let p = config_path();
                if !p.exists() {
                    if let Some(parent) = p.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&p, DEFAULT_CONFIG.trim_start())?;
                }
                (p, false)
            }
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a TOML document layered on top of the defaults, without touching
    /// the filesystem.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject settings no run could start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indexing.batch_size == 0 {
            return Err(ConfigError::Invalid("indexing.batch_size must be at least 1".into()));
        }
        if self.indexing.tail_lines == 0 {
            return Err(ConfigError::Invalid("indexing.tail_lines must be at least 1".into()));
        }
        for (i, source) in self.log_sources.iter().enumerate() {
            if source.path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("log_sources[{i}].path must not be empty")));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logdex")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
