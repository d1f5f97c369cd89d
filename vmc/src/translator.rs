//! Translation driver tying the parser and code generator together
//!
//! A single [`CodeWriter`] accumulates output across every unit handed
//! to it, so directory-mode translation shares one set of comparison
//! and call-site counters the same way a single file would.

use log::debug;

use crate::codegen::CodeWriter;
use crate::error::VmError;
use crate::parser::{CommandType, Parser};

/// One source unit: a `.vm` file's basename (used for static scope and
/// top-level labels) paired with its lines.
pub struct Unit<'a> {
    pub name: &'a str,
    pub lines: &'a [String],
}

fn translate_one(writer: &mut CodeWriter, unit: &Unit) -> Result<(), VmError> {
    writer.set_filename(unit.name);
    let mut parser = Parser::from_lines(unit.lines);

    while parser.advance() {
        let line = parser.line_number();
        match parser.command_type()? {
            CommandType::Arithmetic => {
                writer.write_arithmetic(parser.arg1()?, line)?;
            }
            CommandType::Push => {
                writer.write_push_pop("push", parser.arg1()?, parser.arg2()?, line)?;
            }
            CommandType::Pop => {
                writer.write_push_pop("pop", parser.arg1()?, parser.arg2()?, line)?;
            }
            CommandType::Label => writer.write_label(parser.arg1()?),
            CommandType::Goto => writer.write_goto(parser.arg1()?),
            CommandType::If => writer.write_if_goto(parser.arg1()?),
            CommandType::Function => {
                writer.write_function(parser.arg1()?, parser.arg2()?);
            }
            CommandType::Call => {
                writer.write_call(parser.arg1()?, parser.arg2()?);
            }
            CommandType::Return => writer.write_return(),
        }
    }

    debug!("translated unit {}", unit.name);
    Ok(())
}

/// Translates a single `.vm` unit into Hack assembly, prefixed with the
/// bootstrap sequence (`SP=256`, `call Sys.init 0`).
pub fn translate_unit(name: &str, lines: &[String]) -> Result<String, VmError> {
    let mut writer = CodeWriter::new();
    writer.set_filename(name);
    writer.write_bootstrap();
    translate_one(&mut writer, &Unit { name, lines })?;
    Ok(writer.finish())
}

/// Translates multiple `.vm` units into one Hack assembly program,
/// visiting them in the order given and sharing comparison/call-site
/// counters across all of them. The bootstrap sequence is emitted once,
/// before any unit's code, scoped by `program_name` (conventionally the
/// output directory's name).
pub fn translate_units(program_name: &str, units: &[Unit]) -> Result<String, VmError> {
    let mut writer = CodeWriter::new();
    writer.set_filename(program_name);
    writer.write_bootstrap();
    for unit in units {
        translate_one(&mut writer, unit)?;
    }
    Ok(writer.finish())
}
