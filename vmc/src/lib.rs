//! VM Translator for the `Nand2Tetris` platform
//!
//! Compiles stack-based VM commands into Hack assembly: arithmetic and
//! logical operations, push/pop across all eight memory segments,
//! branching, and the function call/return protocol.
//!
//! # Architecture
//!
//! - [`parser`]: Classifies VM commands and exposes their arguments
//! - [`codegen`]: Emits Hack assembly for each command family
//! - [`translator`]: Drives parser and codegen over one or more units
//! - [`error`]: Error types shared across the crate
//!
//! # Example
//!
//! ```rust
//! use hack_vmc::translate_unit;
//!
//! let lines = vec!["push constant 7".to_string(), "push constant 8".to_string(), "add".to_string()];
//! let asm = translate_unit("Add", &lines).unwrap();
//! assert!(asm.contains("@7"));
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod codegen;
pub mod error;
pub mod parser;
pub mod translator;

pub use codegen::CodeWriter;
pub use error::VmError;
pub use parser::{CommandType, Parser};
pub use translator::{Unit, translate_unit, translate_units};
