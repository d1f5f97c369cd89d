//! Error types for the VM translator
//!
//! A closed set of error kinds distinguishing malformed VM input from
//! I/O failure. Each variant carries enough context to locate the
//! offending line without a debugger.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VmError {
    #[error("{path}: not a .vm file")]
    BadExtension { path: PathBuf },

    #[error("{path}: no such file or directory")]
    MissingPath { path: PathBuf },

    #[error("{path}: directory contains no .vm files")]
    EmptyDirectory { path: PathBuf },

    #[error("line {line}: invalid command {command:?}")]
    InvalidCommand { line: usize, command: String },

    #[error("line {line}: unknown segment {segment:?}")]
    UnknownSegment { line: usize, segment: String },

    #[error("line {line}: pointer index must be 0 or 1, got {index}")]
    InvalidPointerIndex { line: usize, index: i32 },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
