//! Source resolver — expands configured [`LogSource`]s into concrete,
//! readable log files.
//!
//! A source whose `path` is a file is yielded as-is. A directory is walked in
//! file-name order, recursing only when `recursive` is set, and every regular
//! file matching the glob `pattern` is yielded. Patterns without a `/` are
//! matched against the file name, patterns with a `/` against the path
//! relative to the source directory.
//!
//! Discovery is lazy and never fails as a whole: missing paths and bad
//! patterns are logged and contribute nothing, and files that cannot be
//! opened for reading are dropped before they reach the tailer.

use globset::{GlobBuilder, GlobMatcher};
use logdex_core::LogSource;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Why a source contributed no files.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("log source {} is not accessible: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("log source {} is neither a file nor a directory", path.display())]
    Unsupported { path: PathBuf },
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Compiled form of a source pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    matcher: GlobMatcher,
    relative: bool,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, DiscoveryError> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|source| DiscoveryError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            matcher,
            relative: pattern.contains('/'),
        })
    }

    /// Match `path`, found while walking `root`.
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        if self.relative {
            path.strip_prefix(root)
                .map(|rel| self.matcher.is_match(rel))
                .unwrap_or(false)
        } else {
            path.file_name()
                .map(|name| self.matcher.is_match(Path::new(name)))
                .unwrap_or(false)
        }
    }
}

/// Expands a list of sources, optionally with every pattern replaced.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    sources: Vec<LogSource>,
    pattern_override: Option<String>,
}

impl SourceResolver {
    pub fn new(sources: &[LogSource]) -> Self {
        Self {
            sources: sources.to_vec(),
            pattern_override: None,
        }
    }

    /// Use `pattern` instead of each source's configured pattern.
    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern_override = pattern;
        self
    }

    /// Lazily yield readable files from every source, in source order. A file
    /// reachable through more than one source is yielded once.
    pub fn resolve(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut seen = HashSet::new();
        self.sources
            .iter()
            .flat_map(move |source| {
                let files: Box<dyn Iterator<Item = PathBuf>> = match self.expand(source) {
                    Ok(files) => files,
                    Err(e) => {
                        tracing::debug!("skipping log source: {e}");
                        Box::new(std::iter::empty())
                    }
                };
                files
            })
            .filter(|path| is_readable(path))
            .filter(move |path| seen.insert(path.clone()))
    }

    /// Expand one source without the readability check.
    pub fn expand(
        &self,
        source: &LogSource,
    ) -> Result<Box<dyn Iterator<Item = PathBuf>>, DiscoveryError> {
        let meta = std::fs::metadata(&source.path).map_err(|e| DiscoveryError::Inaccessible {
            path: source.path.clone(),
            source: e,
        })?;

        if meta.is_file() {
            return Ok(Box::new(std::iter::once(source.path.clone())));
        }
        if !meta.is_dir() {
            return Err(DiscoveryError::Unsupported {
                path: source.path.clone(),
            });
        }

        let pattern = self.pattern_override.as_deref().unwrap_or(&source.pattern);
        let matcher = PatternMatcher::new(pattern)?;
        let root = source.path.clone();

        let mut walker = WalkDir::new(&root).min_depth(1).sort_by_file_name();
        if !source.recursive {
            walker = walker.max_depth(1);
        }

        Ok(Box::new(
            walker
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::debug!("skipping unreadable directory entry: {e}");
                        None
                    }
                })
                .filter(|entry| {
                    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
                })
                .filter(move |entry| matcher.matches(&root, entry.path()))
                .map(walkdir::DirEntry::into_path),
        ))
    }
}

/// A file is readable if it can be opened for reading right now.
pub fn is_readable(path: &Path) -> bool {
    match File::open(path) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!("excluding unreadable file {}: {e}", path.display());
            false
        }
    }
}
