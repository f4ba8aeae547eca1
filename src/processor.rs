//! JSON-lines processor — writes each forwarded entry as one JSON object per
//! line. Used by the CLI as the downstream collaborator.

use std::io::Write;

use logdex_core::{ClassifiedEntry, Processor};

pub struct JsonLinesProcessor<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesProcessor<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Entries written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Processor for JsonLinesProcessor<W> {
    fn process(&mut self, batch: &[ClassifiedEntry]) -> anyhow::Result<()> {
        for entry in batch {
            serde_json::to_writer(&mut self.writer, entry)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        self.written += batch.len();
        Ok(())
    }
}
