//! Run summary — what one invocation of the orchestrator did.

use logdex_core::FileError;
use std::fmt;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunOutcome {
    /// At least one file was discovered and attempted.
    #[default]
    Completed,
    /// Discovery found nothing; no file was read.
    Empty,
    /// An automatic run that did not start.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `indexing.auto_index` is off.
    AutoIndexDisabled,
    /// The trigger was the indexing command itself.
    SelfTriggered,
}

/// Counters and per-file failures for one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    /// Entries handed to the processor (after exclusion).
    pub entries_indexed: usize,
    /// Entries dropped by the exclusion filter.
    pub entries_excluded: usize,
    pub batches_forwarded: usize,
    pub warnings: Vec<FileError>,
}

impl RunSummary {
    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            outcome: RunOutcome::Skipped(reason),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outcome == RunOutcome::Empty
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            RunOutcome::Empty => {
                writeln!(f, "No log files found to index!")?;
                return writeln!(f, "Make sure your log sources are configured correctly.");
            }
            RunOutcome::Skipped(SkipReason::AutoIndexDisabled) => {
                return writeln!(f, "Automatic indexing is disabled.");
            }
            RunOutcome::Skipped(SkipReason::SelfTriggered) => {
                return writeln!(f, "Skipped: triggered by the indexing command itself.");
            }
            RunOutcome::Completed => {}
        }

        for warning in &self.warnings {
            writeln!(f, "Failed to process {}: {}", warning.path().display(), warning.detail())?;
        }
        writeln!(f, "Log indexing completed!")?;
        writeln!(f, "  Total files found     {:>8}", self.files_found)?;
        writeln!(f, "  Files processed       {:>8}", self.files_processed)?;
        writeln!(f, "  Files skipped         {:>8}", self.files_skipped)?;
        writeln!(f, "  Log entries indexed   {:>8}", self.entries_indexed)?;
        writeln!(f, "  Log entries excluded  {:>8}", self.entries_excluded)
    }
}
