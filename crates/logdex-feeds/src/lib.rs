//! logdex-feeds — file-system side of the logdex pipeline.
//!
//! [`SourceResolver`] turns configured sources into readable files and
//! [`LogTailer`] turns a file into [`logdex_core::RawLine`]s, either in full or
//! as a bounded tail.

pub mod resolver;
pub mod tailer;

pub use resolver::{DiscoveryError, PatternMatcher, SourceResolver};
pub use tailer::{FullScan, LogTailer, ReadMode};
