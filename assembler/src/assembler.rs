//! Two-pass assembly driver
//!
//! Combines the [`parser`](crate::parser), [`code`](crate::code) and
//! [`symbol_table`](crate::symbol_table) modules into the complete
//! translation from canonical assembly lines to 16-bit binary lines.

use log::debug;

use crate::code;
use crate::error::AsmError;
use crate::parser::{CommandType, ParserLines};
use crate::symbol_table::SymbolTable;

/// First pass: records the ROM address of every label.
///
/// Labels don't generate code, so they don't advance the ROM counter;
/// A- and C-commands do.
fn first_pass(lines: &[String], symbol_table: &mut SymbolTable) -> Result<(), AsmError> {
    let mut rom_address = 0u16;
    let mut parser = ParserLines::from_lines(lines);

    while parser.advance() {
        match parser.command_type() {
            CommandType::LCommand => {
                let symbol = parser.symbol()?;
                symbol_table.add_entry(symbol, rom_address);
            }
            CommandType::ACommand | CommandType::CCommand => {
                rom_address += 1;
            }
        }
    }

    Ok(())
}

/// Second pass: resolves symbols and emits one binary line per A-/C-command.
fn second_pass(
    lines: &[String],
    symbol_table: &mut SymbolTable,
) -> Result<Vec<String>, AsmError> {
    let mut ram_address = 16u16;
    let mut parser = ParserLines::from_lines(lines);
    let mut output = Vec::new();

    while parser.advance() {
        match parser.command_type() {
            CommandType::ACommand => {
                let symbol = parser.symbol()?;
                let address = match symbol.parse::<i64>() {
                    Ok(value) => {
                        if !(0..=32767).contains(&value) {
                            return Err(AsmError::AddressOutOfRange {
                                line: parser.line_number(),
                                value,
                            });
                        }
                        value as u16
                    }
                    Err(_) => {
                        let resolved = symbol_table.get_or_insert(symbol, &mut ram_address);
                        debug!("resolved symbol {symbol} -> {resolved}");
                        resolved
                    }
                };

                output.push(code::encode_a_instruction(address));
            }
            CommandType::CCommand => {
                let instruction =
                    code::encode_c_instruction(parser.dest(), parser.comp(), parser.jump());
                output.push(instruction);
            }
            CommandType::LCommand => {}
        }
    }

    Ok(output)
}

/// Assembles canonical Hack assembly source lines into 16-bit binary lines.
///
/// Runs the label-resolution pass followed by the code-emission pass,
/// sharing one [`SymbolTable`] seeded with the platform's predefined
/// symbols.
pub fn assemble_lines(lines: &[String]) -> Result<Vec<String>, AsmError> {
    let mut symbol_table = SymbolTable::new();

    first_pass(lines, &mut symbol_table)?;
    second_pass(lines, &mut symbol_table)
}
