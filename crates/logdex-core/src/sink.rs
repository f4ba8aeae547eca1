//! Collaborator seams: the downstream [`Processor`] that receives batches and
//! the optional [`WarningLog`] that receives per-file failure diagnostics.

use std::collections::BTreeMap;

use crate::types::ClassifiedEntry;

/// Downstream indexing collaborator. Called once per batch, sequentially;
/// the next batch is not built until this returns.
pub trait Processor {
    fn process(&mut self, batch: &[ClassifiedEntry]) -> anyhow::Result<()>;
}

impl<P: Processor + ?Sized> Processor for &mut P {
    fn process(&mut self, batch: &[ClassifiedEntry]) -> anyhow::Result<()> {
        (**self).process(batch)
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn process(&mut self, batch: &[ClassifiedEntry]) -> anyhow::Result<()> {
        (**self).process(batch)
    }
}

/// Receiver for non-fatal diagnostics. Context keys are `error` and
/// `source_file`.
pub trait WarningLog {
    fn warning(&self, message: &str, context: &BTreeMap<String, String>);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarnings;

impl WarningLog for TracingWarnings {
    fn warning(&self, message: &str, context: &BTreeMap<String, String>) {
        tracing::warn!(
            source_file = context.get("source_file").map(String::as_str).unwrap_or(""),
            error = context.get("error").map(String::as_str).unwrap_or(""),
            "{message}"
        );
    }
}
