//! Error types for the Hack assembler
//!
//! A closed set of error kinds distinguishing malformed input from I/O
//! failure. Each variant carries enough context to locate the offending
//! line without a debugger.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AsmError {
    #[error("{path}: not a .asm file")]
    BadExtension { path: PathBuf },

    #[error("{path}: no such file")]
    MissingPath { path: PathBuf },

    #[error("line {line}: invalid command {command:?}")]
    InvalidCommand { line: usize, command: String },

    #[error("line {line}: address {value} out of range 0..=32767")]
    AddressOutOfRange { line: usize, value: i64 },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
