//! Exclusion filter — drops entries whose message contains a configured
//! substring (health checks, metrics scrapes and similar noise).

use crate::types::ClassifiedEntry;

/// Case-sensitive substring exclusion.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<String>,
}

impl ExclusionFilter {
    /// Empty patterns are discarded; an empty substring would match every line.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// The first pattern found in `message`, if any.
    pub fn matching_pattern(&self, message: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| message.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn is_excluded(&self, entry: &ClassifiedEntry) -> bool {
        self.matching_pattern(&entry.message).is_some()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
