//! Parser module for the VM language
//!
//! Strips comments and blank lines, classifies each remaining line by
//! command type, and exposes its arguments. Operates on in-memory
//! lines so the caller controls file I/O.

use crate::error::VmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Arithmetic,
    Push,
    Pop,
    Label,
    Goto,
    If,
    Function,
    Return,
    Call,
}

pub struct Parser<'a> {
    lines: std::slice::Iter<'a, String>,
    current_command: &'a str,
    cached_parts: Vec<&'a str>,
    line_number: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn from_lines(lines: &'a [String]) -> Self {
        Self {
            lines: lines.iter(),
            current_command: "",
            cached_parts: Vec::new(),
            line_number: 0,
        }
    }

    #[inline]
    pub fn advance(&mut self) -> bool {
        for (offset, line) in self.lines.by_ref().enumerate() {
            let stripped = match line.find("//") {
                Some(pos) => &line[..pos],
                None => line,
            };
            let trimmed = stripped.trim();

            if !trimmed.is_empty() {
                self.current_command = trimmed;
                self.cached_parts = trimmed.split_whitespace().collect();
                self.line_number += offset + 1;
                return true;
            }
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn invalid_command(&self) -> VmError {
        VmError::InvalidCommand {
            line: self.line_number,
            command: self.current_command.to_string(),
        }
    }

    #[inline]
    pub fn command_type(&self) -> Result<CommandType, VmError> {
        match *self.cached_parts.first().ok_or_else(|| self.invalid_command())? {
            "add" | "sub" | "neg" | "eq" | "gt" | "lt" | "and" | "or" | "not" => {
                Ok(CommandType::Arithmetic)
            }
            "push" => Ok(CommandType::Push),
            "pop" => Ok(CommandType::Pop),
            "label" => Ok(CommandType::Label),
            "goto" => Ok(CommandType::Goto),
            "if-goto" => Ok(CommandType::If),
            "function" => Ok(CommandType::Function),
            "return" => Ok(CommandType::Return),
            "call" => Ok(CommandType::Call),
            _ => Err(self.invalid_command()),
        }
    }

    /// First argument: the arithmetic mnemonic, segment name, label, or
    /// function name. Not valid for [`CommandType::Return`].
    #[inline]
    pub fn arg1(&self) -> Result<&'a str, VmError> {
        match self.command_type()? {
            CommandType::Arithmetic => Ok(self.cached_parts[0]),
            CommandType::Return => Err(self.invalid_command()),
            _ => self
                .cached_parts
                .get(1)
                .copied()
                .ok_or_else(|| self.invalid_command()),
        }
    }

    /// Second argument: the numeric index or arity, for push/pop/function/call.
    #[inline]
    pub fn arg2(&self) -> Result<i32, VmError> {
        self.cached_parts
            .get(2)
            .ok_or_else(|| self.invalid_command())?
            .parse()
            .map_err(|_| self.invalid_command())
    }
}
