//! VM Translator - command-line entry point
//!
//! Compiles Hack VM code (`.vm`) into Hack assembly (`.asm`)
//! (`Nand2Tetris` Project 7/8).
//!
//! A single file translates to a `.asm` file of the same name. A
//! directory translates every `.vm` file within it (visited in sorted
//! order) into one `.asm` file named after the directory, sharing
//! comparison and call-site counters across all of them.
//!
//! # Usage
//! ```bash
//! hack-vmc [-v] <input.vm | input-dir>
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::{error, info};

use hack_vmc::error::VmError;
use hack_vmc::{Unit, translate_unit, translate_units};

/// Translates Hack VM code into Hack assembly.
#[derive(ClapParser)]
#[command(name = "hack-vmc", version, about)]
struct Cli {
    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// One or more `.vm` files or directories of `.vm` files
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

fn read_lines(path: &Path) -> Result<Vec<String>, VmError> {
    let source = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            VmError::MissingPath {
                path: path.to_path_buf(),
            }
        } else {
            VmError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(source.lines().map(str::to_string).collect())
}

fn translate_single_file(path: &Path) -> Result<(PathBuf, String), VmError> {
    if path.extension().and_then(|e| e.to_str()) != Some("vm") {
        return Err(VmError::BadExtension {
            path: path.to_path_buf(),
        });
    }

    let lines = read_lines(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown");
    let asm = translate_unit(name, &lines)?;
    Ok((path.with_extension("asm"), asm))
}

fn translate_directory(dir: &Path) -> Result<(PathBuf, String), VmError> {
    let mut vm_files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| VmError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("vm"))
        .collect();
    vm_files.sort();

    if vm_files.is_empty() {
        return Err(VmError::EmptyDirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut names = Vec::with_capacity(vm_files.len());
    let mut all_lines = Vec::with_capacity(vm_files.len());
    for path in &vm_files {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();
        names.push(name);
        all_lines.push(read_lines(path)?);
    }

    let units: Vec<Unit> = names
        .iter()
        .zip(all_lines.iter())
        .map(|(name, lines)| Unit { name, lines })
        .collect();

    let dir_name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("Output");

    let asm = translate_units(dir_name, &units)?;
    let output = dir.join(format!("{dir_name}.asm"));
    Ok((output, asm))
}

fn run(input: &Path) -> Result<(), VmError> {
    let (output, asm) = if input.is_dir() {
        translate_directory(input)?
    } else {
        translate_single_file(input)?
    };

    fs::write(&output, asm).map_err(|source| VmError::Io {
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
        if let Err(err) = run(input) {
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
