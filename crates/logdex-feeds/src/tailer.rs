//! Log tailer — reads a file either in full or as a bounded tail.
//!
//! Full mode streams the file forward with [`BufRead::read_until`], so memory
//! is bounded by the longest line. Tail mode seeks to end-of-file and reads
//! backward in fixed-size chunks until enough newlines have been seen, so its
//! cost depends on the tail length, not on the file size.
//!
//! Both modes decode bytes as lossy UTF-8 and strip `\n` / `\r\n`
//! terminators. A newline at end-of-file terminates the last line; it does
//! not start an extra empty one.

use logdex_core::{RawLine, ReadError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Default backward read size in tail mode.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Which read strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Every line from the start of the file.
    Full,
    /// Only the last `n` lines.
    Tail(usize),
}

#[derive(Debug, Clone)]
pub struct LogTailer {
    chunk_size: usize,
}

impl Default for LogTailer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogTailer {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the backward read size (clamped to at least 1 byte).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Read `path` with the given mode as a single line stream.
    pub fn read(
        &self,
        path: &Path,
        mode: ReadMode,
    ) -> Result<Box<dyn Iterator<Item = Result<RawLine, ReadError>>>, ReadError> {
        match mode {
            ReadMode::Full => Ok(Box::new(self.read_full(path)?)),
            ReadMode::Tail(n) => {
                let lines = self.read_tail(path, n)?;
                Ok(Box::new(lines.into_iter().map(Ok::<RawLine, ReadError>)))
            }
        }
    }

    /// Stream every line of `path` from the start.
    pub fn read_full(&self, path: &Path) -> Result<FullScan, ReadError> {
        let file = File::open(path).map_err(|e| ReadError::new(path, e))?;
        Ok(FullScan {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_number: 0,
            offset: 0,
            done: false,
        })
    }

    /// Read the last `max_lines` lines of `path` without scanning the rest of
    /// the file. Line numbers count from the first returned line.
    pub fn read_tail(&self, path: &Path, max_lines: usize) -> Result<Vec<RawLine>, ReadError> {
        let err = |e| ReadError::new(path, e);
        let mut file = File::open(path).map_err(err)?;
        let len = file.metadata().map_err(err)?.len();
        if len == 0 || max_lines == 0 {
            return Ok(Vec::new());
        }

        // Chunks are collected back to front; bytes [pos, len) are buffered.
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut pos = len;
        let mut separators = 0usize;
        while pos > 0 && separators < max_lines {
            let read = (self.chunk_size as u64).min(pos) as usize;
            pos -= read as u64;
            let mut chunk = vec![0u8; read];
            file.seek(SeekFrom::Start(pos)).map_err(err)?;
            file.read_exact(&mut chunk).map_err(err)?;

            // The final byte of the file never separates two lines.
            let counted = if pos + read as u64 == len { &chunk[..read - 1] } else { &chunk[..] };
            separators += counted.iter().filter(|&&b| b == b'\n').count();
            chunks.push(chunk);
        }

        let mut buffered: Vec<u8> = chunks.into_iter().rev().flatten().collect();
        if buffered.last() == Some(&b'\n') {
            buffered.pop();
        }

        let mut pieces = Vec::new();
        let mut cursor = pos;
        for piece in buffered.split(|&b| b == b'\n') {
            pieces.push((cursor, piece));
            cursor += piece.len() as u64 + 1;
        }

        // When the read stopped before the file start, the first piece may be
        // a partial line; it is always among the skipped ones.
        let skip = pieces.len().saturating_sub(max_lines);
        Ok(pieces[skip..]
            .iter()
            .enumerate()
            .map(|(i, (offset, bytes))| RawLine {
                path: path.to_path_buf(),
                line_number: i as u64 + 1,
                byte_offset: *offset,
                text: decode(bytes),
            })
            .collect())
    }
}

/// Forward line stream over one file. Stops after the first read error.
#[derive(Debug)]
pub struct FullScan {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_number: u64,
    offset: u64,
    done: bool,
}

impl Iterator for FullScan {
    type Item = Result<RawLine, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) => {
                let byte_offset = self.offset;
                self.offset += n as u64;
                self.line_number += 1;
                Some(Ok(RawLine {
                    path: self.path.clone(),
                    line_number: self.line_number,
                    byte_offset,
                    text: decode(&self.buf),
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(ReadError::new(&self.path, e)))
            }
        }
    }
}

fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
