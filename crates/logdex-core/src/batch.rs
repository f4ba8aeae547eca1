//! Batch accumulator — partitions an ordered stream of entries into batches
//! of at most `batch_size`, preserving order.

use crate::types::{Batch, ClassifiedEntry};

#[derive(Debug)]
pub struct BatchAccumulator {
    batch_size: usize,
    current: Batch,
}

impl BatchAccumulator {
    /// `batch_size` is clamped to at least 1.
    pub fn new(batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            batch_size,
            current: Vec::with_capacity(batch_size),
        }
    }

    /// Append an entry. Returns the completed batch when it reaches
    /// `batch_size`.
    pub fn push(&mut self, entry: ClassifiedEntry) -> Option<Batch> {
        self.current.push(entry);
        if self.current.len() >= self.batch_size {
            Some(std::mem::replace(&mut self.current, Vec::with_capacity(self.batch_size)))
        } else {
            None
        }
    }

    /// Hand back the partial batch, if it holds anything.
    pub fn flush(&mut self) -> Option<Batch> {
        if self.current.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.current))
        }
    }

    /// Drop the pending partial batch without forwarding it.
    pub fn discard(&mut self) -> usize {
        let dropped = self.current.len();
        self.current.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.current.len()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}
