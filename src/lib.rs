//! logdex — log indexing pipeline.
//!
//! Reads application log files from configured sources, classifies each line
//! (level, category, timestamp), drops excluded noise and forwards bounded,
//! order-preserving batches to a downstream [`Processor`]. This crate holds
//! the orchestrator and the CLI-side collaborators; the stages themselves live
//! in `logdex-core` and `logdex-feeds` so integration tests can import them
//! directly.
//!
//! # Architecture
//!
//! ```text
//! SourceResolver ──► LogTailer ──► Classifier ──► ExclusionFilter ──► BatchAccumulator ──► Processor
//!   (discovery)      (full/tail)
//! ```
//!
//! Explicit runs ([`Indexer::run_explicit`]) read whole files. Automatic runs
//! ([`Indexer::run_automatic`]) are driven by [`TriggerEvent`]s and only read
//! the last `indexing.tail_lines` lines of each file.

pub mod orchestrator;
pub mod processor;
pub mod summary;
pub mod trigger;

pub use logdex_core::{
    ClassifiedEntry, Config, IndexingConfig, LogLevel, LogSource, Processor, TracingWarnings,
    WarningLog,
};
pub use orchestrator::{IndexRequest, Indexer, RunPhase};
pub use processor::JsonLinesProcessor;
pub use summary::{RunOutcome, RunSummary, SkipReason};
pub use trigger::{TriggerEvent, INDEX_UNIT_NAME};
