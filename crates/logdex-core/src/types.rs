//! Core types for logdex-core.
//!
//! This module defines the data structures shared across all pipeline
//! stages: the transient [`RawLine`] read from a file, the [`ClassifiedEntry`]
//! forwarded downstream, and its [`LogLevel`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One line as read from a log file, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// File the line was read from.
    pub path: PathBuf,
    /// 1-based line number. In tail mode this counts from the first line of
    /// the tail window, not from the start of the file.
    pub line_number: u64,
    /// Absolute byte offset of the first byte of the line.
    pub byte_offset: u64,
    /// Line text (UTF-8 lossy converted, line terminator stripped).
    pub text: String,
}

/// A structured record derived from one raw log line.
///
/// `level` and `category` are always resolved; the classifier falls back to
/// [`LogLevel::Unknown`] and `"general"` rather than leaving them empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedEntry {
    pub id: uuid::Uuid,
    /// The full original line text.
    pub message: String,
    pub level: LogLevel,
    pub category: String,
    /// Parsed from the line when possible, otherwise the classification time.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Always carries `source_file`, `line_number`, `byte_offset` and
    /// `auto_indexed`. For auto-indexed entries `line_number` counts from the
    /// start of the tail window, so `byte_offset` is the stable position.
    pub context: BTreeMap<String, serde_json::Value>,
}

impl ClassifiedEntry {
    /// The `source_file` context value, if present.
    pub fn source_file(&self) -> Option<&str> {
        self.context.get("source_file").and_then(|v| v.as_str())
    }

    /// The `line_number` context value, if present.
    ///
    /// 1-based within what was read: the whole file for explicit runs, the
    /// tail window when [`auto_indexed`](Self::auto_indexed) is set. Use
    /// [`byte_offset`](Self::byte_offset) to locate a line across runs.
    pub fn line_number(&self) -> Option<u64> {
        self.context.get("line_number").and_then(|v| v.as_u64())
    }

    /// The `byte_offset` context value: absolute in every read mode.
    pub fn byte_offset(&self) -> Option<u64> {
        self.context.get("byte_offset").and_then(|v| v.as_u64())
    }

    pub fn auto_indexed(&self) -> bool {
        self.context
            .get("auto_indexed")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Log severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Unknown,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Unknown => "unknown",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered group of entries forwarded to the [`Processor`](crate::Processor)
/// in one call.
pub type Batch = Vec<ClassifiedEntry>;
