//! Per-file diagnostic state threaded through parsing.
//!
//! A [`ParseContext`] is owned by exactly one file's parse and is passed
//! `&mut` into every recursive call, so errors raised deep in recursion
//! carry the true line of the offending construct. The line counter only
//! advances when newline tokens are consumed or skipped -- it is never
//! guessed -- and is monotonically non-decreasing within one file's parse.

use crate::error::{CompileError, ErrorKind};

#[derive(Debug, Clone)]
pub struct ParseContext {
    pub file: String,
    pub line: u32,
}

impl ParseContext {
    pub fn new(file: &str) -> Self {
        ParseContext::at(file, 1)
    }

    /// Start a context at a given line -- used when re-parsing string
    /// interpolation content, which begins mid-file.
    pub fn at(file: &str, line: u32) -> Self {
        ParseContext {
            file: file.to_owned(),
            line,
        }
    }

    /// Record one consumed or skipped newline token.
    pub fn bump(&mut self) {
        self.line += 1;
    }

    /// Stamp an error with the current file and line.
    pub fn error(&self, kind: ErrorKind) -> CompileError {
        CompileError::new(kind, &self.file, self.line)
    }
}
