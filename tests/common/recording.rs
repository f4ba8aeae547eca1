//! Recording collaborators — a `Processor` and a `WarningLog` that keep
//! everything they receive so harnesses can assert on it afterwards.

use logdex::{ClassifiedEntry, Processor, WarningLog};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Records every batch. Optionally rejects chosen calls (1-based).
#[derive(Default)]
pub struct RecordingProcessor {
    pub batches: Vec<Vec<ClassifiedEntry>>,
    calls: usize,
    fail_all: bool,
    fail_calls: Vec<usize>,
    fail_message: String,
}

impl RecordingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every call.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_all: true,
            fail_message: message.to_string(),
            ..Self::default()
        }
    }

    /// Reject only the listed calls.
    pub fn failing_on(calls: &[usize], message: &str) -> Self {
        Self {
            fail_calls: calls.to_vec(),
            fail_message: message.to_string(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.iter().map(Vec::len).collect()
    }

    pub fn entries(&self) -> Vec<&ClassifiedEntry> {
        self.batches.iter().flatten().collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries().into_iter().map(|e| e.message.as_str()).collect()
    }
}

impl Processor for RecordingProcessor {
    fn process(&mut self, batch: &[ClassifiedEntry]) -> anyhow::Result<()> {
        self.calls += 1;
        if self.fail_all || self.fail_calls.contains(&self.calls) {
            anyhow::bail!("{}", self.fail_message);
        }
        self.batches.push(batch.to_vec());
        Ok(())
    }
}

/// One recorded `warning(message, context)` call.
#[derive(Debug, Clone)]
pub struct RecordedWarning {
    pub message: String,
    pub context: BTreeMap<String, String>,
}

/// Shared handle; clone it before handing it to the indexer.
#[derive(Clone, Default)]
pub struct RecordingWarnings(Rc<RefCell<Vec<RecordedWarning>>>);

impl RecordingWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<RecordedWarning> {
        self.0.borrow().clone()
    }
}

impl WarningLog for RecordingWarnings {
    fn warning(&self, message: &str, context: &BTreeMap<String, String>) {
        self.0.borrow_mut().push(RecordedWarning {
            message: message.to_string(),
            context: context.clone(),
        });
    }
}
