//! logdex-core — core library for the logdex log indexer.
//!
//! This crate exposes the in-memory pipeline stages as public modules, plus
//! the shared types, configuration and collaborator traits used by the
//! feeds crate and the orchestrator.
//!
//! # Architecture
//!
//! ```text
//! Resolve ──► Read ──► Classify ──► Filter ──► Batch ──► Processor
//!  (feeds)   (feeds)   (core)       (core)     (core)
//! ```
//!
//! Everything runs synchronously on the caller's thread; at most one batch is
//! resident at a time.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod sink;
pub mod types;

pub use batch::BatchAccumulator;
pub use classifier::Classifier;
pub use config::{Config, IndexingConfig, LogSource};
pub use error::{ConfigError, FileError, ReadError};
pub use filter::ExclusionFilter;
pub use sink::{Processor, TracingWarnings, WarningLog};
pub use types::{Batch, ClassifiedEntry, LogLevel, RawLine};
