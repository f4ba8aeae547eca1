//! Indexing orchestrator — composes the pipeline stages into one run.
//!
//! ```text
//! Discovering ──► Reading ──► Classifying ──► Filtering ──► Batching ──► Forwarding ──► Done
//!      │                                                                               ▲
//!      └──────────────────────────── no files ─────────────────────────────────────────┘
//! ```
//!
//! A run is strictly sequential: each batch is forwarded and acknowledged
//! before the next one is built. Failures are contained per file. A read
//! error or a rejected batch ends that file's contribution, is reported
//! through the optional [`WarningLog`], and the run moves on to the next file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use logdex_core::{
    BatchAccumulator, Classifier, ClassifiedEntry, Config, ExclusionFilter, FileError,
    IndexingConfig, LogSource, Processor, RawLine, ReadError, WarningLog,
};
use logdex_feeds::{LogTailer, ReadMode, SourceResolver};

use crate::summary::{RunOutcome, RunSummary, SkipReason};
use crate::trigger::TriggerEvent;

/// Pipeline stage, traced as runs progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Discovering,
    Reading,
    Classifying,
    Filtering,
    Batching,
    Forwarding,
    Done,
}

/// Options for an explicit (manual) run.
#[derive(Debug, Clone, Default)]
pub struct IndexRequest {
    /// Index only this file, bypassing source discovery.
    pub path: Option<PathBuf>,
    /// Replace every configured source pattern.
    pub pattern: Option<String>,
    /// Accepted for compatibility; every discovered file is always processed.
    pub force: bool,
}

/// Per-file counters, kept even when the file fails part way.
#[derive(Debug, Default, Clone, Copy)]
struct FileStats {
    indexed: usize,
    excluded: usize,
    batches: usize,
}

/// Drives explicit and automatic runs against one [`Processor`].
pub struct Indexer<P> {
    sources: Vec<LogSource>,
    settings: IndexingConfig,
    processor: P,
    warnings: Option<Box<dyn WarningLog>>,
    classifier: Classifier,
    filter: ExclusionFilter,
    tailer: LogTailer,
}

impl<P: Processor> Indexer<P> {
    pub fn new(config: &Config, processor: P) -> Self {
        Self {
            sources: config.log_sources.clone(),
            settings: config.indexing.clone(),
            processor,
            warnings: None,
            classifier: Classifier::new(),
            filter: ExclusionFilter::new(config.indexing.excluded_patterns.iter().cloned()),
            tailer: LogTailer::new(),
        }
    }

    /// Report per-file failures to `log`. Without one, failures are only
    /// recorded in the [`RunSummary`].
    pub fn with_warning_log(mut self, log: impl WarningLog + 'static) -> Self {
        self.warnings = Some(Box::new(log));
        self
    }

    pub fn with_tailer(mut self, tailer: LogTailer) -> Self {
        self.tailer = tailer;
        self
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn into_processor(self) -> P {
        self.processor
    }

    /// Manual run: full reads of every discovered file, or of `request.path`
    /// alone.
    pub fn run_explicit(&mut self, request: &IndexRequest) -> RunSummary {
        let _span = tracing::info_span!("index", mode = "explicit").entered();
        if request.force {
            tracing::debug!("force requested; nothing is skipped as already indexed");
        }

        match &request.path {
            Some(path) => self.run(std::iter::once(path.clone()), ReadMode::Full, false),
            None => {
                let resolver =
                    SourceResolver::new(&self.sources).with_pattern(request.pattern.clone());
                self.run(resolver.resolve(), ReadMode::Full, false)
            }
        }
    }

    /// Post-request / post-command run: tails every discovered file.
    ///
    /// No-op when `auto_index` is off or when `event` is the indexing
    /// command itself. Never fails; per-file errors end up in the summary
    /// and the warning log.
    pub fn run_automatic(&mut self, event: &TriggerEvent) -> RunSummary {
        let _span = tracing::info_span!("index", mode = "automatic", unit = event.unit_name()).entered();
        if !self.settings.auto_index {
            tracing::debug!("automatic indexing disabled");
            return RunSummary::skipped(SkipReason::AutoIndexDisabled);
        }
        if event.is_indexing_run() {
            tracing::debug!("skipping automatic run triggered by the indexing command");
            return RunSummary::skipped(SkipReason::SelfTriggered);
        }

        let resolver = SourceResolver::new(&self.sources);
        self.run(resolver.resolve(), ReadMode::Tail(self.settings.tail_lines), true)
    }

    fn run(
        &mut self,
        files: impl Iterator<Item = PathBuf>,
        mode: ReadMode,
        auto_indexed: bool,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        trace_phase(RunPhase::Discovering, None);

        for path in files {
            summary.files_found += 1;
            let mut stats = FileStats::default();
            let result = self.index_file(&path, mode, auto_indexed, &mut stats);

            summary.entries_indexed += stats.indexed;
            summary.entries_excluded += stats.excluded;
            summary.batches_forwarded += stats.batches;
            match result {
                Ok(()) => summary.files_processed += 1,
                Err(e) => {
                    summary.files_skipped += 1;
                    self.warn(&e);
                    summary.warnings.push(e);
                }
            }
        }

        if summary.files_found == 0 {
            summary.outcome = RunOutcome::Empty;
        }
        trace_phase(RunPhase::Done, None);
        tracing::info!(
            files_found = summary.files_found,
            files_processed = summary.files_processed,
            files_skipped = summary.files_skipped,
            entries_indexed = summary.entries_indexed,
            entries_excluded = summary.entries_excluded,
            "indexing run finished"
        );
        summary
    }

    fn index_file(
        &mut self,
        path: &Path,
        mode: ReadMode,
        auto_indexed: bool,
        stats: &mut FileStats,
    ) -> Result<(), FileError> {
        trace_phase(RunPhase::Reading, Some(path));
        let lines = self.tailer.read(path, mode)?;
        let mut batches = BatchAccumulator::new(self.settings.batch_size);

        let result = self.stream(path, lines, auto_indexed, &mut batches, stats);
        if result.is_err() {
            let dropped = batches.discard();
            if dropped > 0 {
                tracing::debug!(file = %path.display(), dropped, "discarded pending entries");
            }
        }
        result
    }

    fn stream(
        &mut self,
        path: &Path,
        lines: impl Iterator<Item = Result<RawLine, ReadError>>,
        auto_indexed: bool,
        batches: &mut BatchAccumulator,
        stats: &mut FileStats,
    ) -> Result<(), FileError> {
        for line in lines {
            let line = line?;
            if line.text.trim().is_empty() {
                continue;
            }

            tracing::trace!(phase = ?RunPhase::Classifying, line = line.line_number);
            let entry = self.classifier.classify(&line, auto_indexed);

            tracing::trace!(phase = ?RunPhase::Filtering, line = line.line_number);
            if let Some(pattern) = self.filter.matching_pattern(&entry.message) {
                tracing::trace!(line = line.line_number, pattern, "excluded");
                stats.excluded += 1;
                continue;
            }

            tracing::trace!(phase = ?RunPhase::Batching, line = line.line_number);
            if let Some(batch) = batches.push(entry) {
                self.forward(path, &batch, stats)?;
            }
        }

        if let Some(batch) = batches.flush() {
            self.forward(path, &batch, stats)?;
        }
        Ok(())
    }

    fn forward(
        &mut self,
        path: &Path,
        batch: &[ClassifiedEntry],
        stats: &mut FileStats,
    ) -> Result<(), FileError> {
        trace_phase(RunPhase::Forwarding, Some(path));
        self.processor
            .process(batch)
            .map_err(|e| FileError::Forward {
                path: path.to_path_buf(),
                message: format!("{e:#}"),
            })?;
        stats.indexed += batch.len();
        stats.batches += 1;
        Ok(())
    }

    fn warn(&self, error: &FileError) {
        let Some(log) = &self.warnings else {
            return;
        };
        let source_file = error.path().display().to_string();
        let mut context = BTreeMap::new();
        context.insert("error".to_string(), error.detail());
        context.insert("source_file".to_string(), source_file.clone());
        log.warning(&format!("Failed to index log file {source_file}"), &context);
    }
}

fn trace_phase(phase: RunPhase, path: Option<&Path>) {
    match path {
        Some(path) => tracing::debug!(?phase, file = %path.display()),
        None => tracing::debug!(?phase),
    }
}
