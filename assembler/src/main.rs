//! Hack Assembler - command-line entry point
//!
//! A two-pass assembler for the Hack assembly language (`Nand2Tetris` Project 6).
//!
//! # Usage
//! ```bash
//! hack-assembler [-v] <input.asm>...
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use hack_assembler::assemble_lines;
use hack_assembler::error::AsmError;

/// Translates Hack assembly (`.asm`) files into Hack machine code (`.hack`).
#[derive(Parser)]
#[command(name = "hack-assembler", version, about)]
struct Cli {
    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// One or more `.asm` source files to assemble
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn output_path(input: &Path) -> PathBuf {
    input.with_extension("hack")
}

fn assemble_file(input: &Path) -> Result<(), AsmError> {
    if input.extension().and_then(|e| e.to_str()) != Some("asm") {
        return Err(AsmError::BadExtension {
            path: input.to_path_buf(),
        });
    }

    let source = fs::read_to_string(input).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            AsmError::MissingPath {
                path: input.to_path_buf(),
            }
        } else {
            AsmError::Io {
                path: input.to_path_buf(),
                source,
            }
        }
    })?;

    let lines: Vec<String> = source.lines().map(str::to_string).collect();
    let binary = assemble_lines(&lines)?;

    let output = output_path(input);
    let contents = binary.join("\n") + "\n";
    fs::write(&output, contents).map_err(|source| AsmError::Io {
        path: output.clone(),
        source,
    })?;

    info!("wrote {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut failed = false;
    for input in &cli.inputs {
        if let Err(err) = assemble_file(input) {
            error!("{err}");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_generation() {
        assert_eq!(output_path(Path::new("test.asm")), PathBuf::from("test.hack"));
        assert_eq!(
            output_path(Path::new("dir/file.asm")),
            PathBuf::from("dir/file.hack")
        );
    }

    #[test]
    fn test_rejects_non_asm_extension() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("txt");
        assert!(matches!(
            assemble_file(&path),
            Err(AsmError::BadExtension { .. })
        ));
    }

    #[test]
    fn test_reports_missing_file() {
        let path = PathBuf::from("/nonexistent/path/to/file.asm");
        assert!(matches!(
            assemble_file(&path),
            Err(AsmError::MissingPath { .. })
        ));
    }

    #[test]
    fn test_end_to_end_file_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Add.asm");
        fs::write(&input, "@2\nD=A\n@3\nD=D+A\n@0\nM=D\n").unwrap();

        assemble_file(&input).unwrap();

        let output = fs::read_to_string(output_path(&input)).unwrap();
        let expected = "0000000000000010\n1110110000010000\n0000000000000011\n1110000010010000\n0000000000000000\n1110001100001000\n";
        assert_eq!(output, expected);
    }
}
