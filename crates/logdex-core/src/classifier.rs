//! Classifier — turns a [`RawLine`] into a [`ClassifiedEntry`].
//!
//! Level and category are resolved with the same strategy: an ordered
//! [`KeywordTable`] evaluated top to bottom against the lowercased line, first
//! matching row wins, and a fixed fallback when nothing matches. The
//! timestamp is the first ISO-like date/time token in the line, or the
//! classification time if there is none.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::collections::BTreeMap;

use crate::types::{ClassifiedEntry, LogLevel, RawLine};

/// Category assigned when no category keyword matches.
pub const GENERAL_CATEGORY: &str = "general";

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

/// One row of a [`KeywordTable`]: any of `keywords` appearing in the line
/// selects `value`.
#[derive(Debug, Clone)]
pub struct Rule<T> {
    pub keywords: &'static [&'static str],
    pub value: T,
}

impl<T> Rule<T> {
    /// `lowered` must already be lowercase; keywords are stored lowercase.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// An ordered list of rules with a fallback. Total by construction.
#[derive(Debug, Clone)]
pub struct KeywordTable<T> {
    rules: Vec<Rule<T>>,
    fallback: T,
}

impl<T: Clone> KeywordTable<T> {
    pub fn new(rules: Vec<Rule<T>>, fallback: T) -> Self {
        Self { rules, fallback }
    }

    pub fn lookup(&self, lowered: &str) -> T {
        self.rules
            .iter()
            .find(|rule| rule.matches(lowered))
            .map(|rule| rule.value.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

fn level_table() -> KeywordTable<LogLevel> {
    KeywordTable::new(
        vec![
            Rule { keywords: &["error", "critical"], value: LogLevel::Error },
            Rule { keywords: &["warning", "warn"], value: LogLevel::Warning },
            Rule { keywords: &["info"], value: LogLevel::Info },
            Rule { keywords: &["debug"], value: LogLevel::Debug },
        ],
        LogLevel::Unknown,
    )
}

fn category_table() -> KeywordTable<&'static str> {
    KeywordTable::new(
        vec![
            Rule { keywords: &["database", "db", "sql"], value: "database" },
            Rule { keywords: &["payment", "billing"], value: "payment" },
            Rule { keywords: &["auth", "login"], value: "authentication" },
            Rule { keywords: &["api", "endpoint", "request"], value: "api" },
            Rule { keywords: &["security", "breach"], value: "security" },
        ],
        GENERAL_CATEGORY,
    )
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Stateless line classifier. Build once per run and reuse.
#[derive(Debug, Clone)]
pub struct Classifier {
    levels: KeywordTable<LogLevel>,
    categories: KeywordTable<&'static str>,
    timestamp: Regex,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            levels: level_table(),
            categories: category_table(),
            timestamp: Regex::new(
                r"(\d{4}-\d{2}-\d{2})(?:[T ](\d{2}:\d{2}:\d{2}(?:[.,]\d+)?)(Z|[+-]\d{2}:?\d{2})?)?",
            )
            .expect("timestamp pattern must compile"),
        }
    }

    pub fn level(&self, text: &str) -> LogLevel {
        self.levels.lookup(&text.to_lowercase())
    }

    pub fn category(&self, text: &str) -> &'static str {
        self.categories.lookup(&text.to_lowercase())
    }

    /// First parseable date/time token in `text`, interpreted as UTC when it
    /// carries no offset. A valid date with an unparseable time is kept as
    /// midnight of that date.
    pub fn timestamp(&self, text: &str) -> Option<DateTime<Utc>> {
        self.timestamp.captures_iter(text).find_map(|caps| {
            let date = caps.get(1)?.as_str();
            let with_time = match (caps.get(2), caps.get(3)) {
                (Some(time), Some(offset)) => {
                    let time = time.as_str().replace(',', ".");
                    let offset = normalize_offset(offset.as_str());
                    DateTime::parse_from_rfc3339(&format!("{date}T{time}{offset}"))
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                }
                (Some(time), None) => {
                    let time = time.as_str().replace(',', ".");
                    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S%.f")
                        .ok()
                        .map(|dt| dt.and_utc())
                }
                _ => None,
            };
            with_time.or_else(|| midnight(date))
        })
    }

    /// Classify a line, using the current time when the line carries no
    /// timestamp.
    pub fn classify(&self, line: &RawLine, auto_indexed: bool) -> ClassifiedEntry {
        self.classify_at(line, auto_indexed, Utc::now())
    }

    /// Classify a line with an explicit fallback time.
    pub fn classify_at(&self, line: &RawLine, auto_indexed: bool, now: DateTime<Utc>) -> ClassifiedEntry {
        let lowered = line.text.to_lowercase();
        let source_file = line.path.display().to_string();

        let mut context = BTreeMap::new();
        context.insert("source_file".to_string(), source_file.clone().into());
        context.insert("line_number".to_string(), line.line_number.into());
        context.insert("byte_offset".to_string(), line.byte_offset.into());
        context.insert("auto_indexed".to_string(), auto_indexed.into());

        ClassifiedEntry {
            id: entry_id(&source_file, line.byte_offset, &line.text),
            message: line.text.clone(),
            level: self.levels.lookup(&lowered),
            category: self.categories.lookup(&lowered).to_string(),
            timestamp: self.timestamp(&line.text).unwrap_or(now),
            context,
        }
    }
}

/// Content-derived id: the same line at the same position always maps to the
/// same id, so re-forwarded tail lines can be upserted downstream.
fn entry_id(source_file: &str, byte_offset: u64, text: &str) -> uuid::Uuid {
    let name = format!("{source_file}:{byte_offset}:{text}");
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, name.as_bytes())
}

fn midnight(date: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `+0100` → `+01:00`; RFC 3339 requires the colon.
fn normalize_offset(offset: &str) -> String {
    if offset.len() == 5 && !offset.contains(':') {
        format!("{}:{}", &offset[..3], &offset[3..])
    } else {
        offset.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
