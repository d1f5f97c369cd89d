//! Code generation module for the VM-to-Hack-assembly translator
//!
//! Emits Hack assembly into an in-memory buffer. Arithmetic and
//! comparison ops pop operands through scratch registers R13/R14;
//! push/pop address all eight memory segments; branching and function
//! calls implement the stack-frame protocol used across every unit
//! translated by one [`CodeWriter`].

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::error::VmError;

#[derive(Clone, Copy)]
enum Segment {
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
    Constant,
}

impl Segment {
    fn from_str(segment: &str) -> Option<Self> {
        match segment {
            "local" => Some(Segment::Local),
            "argument" => Some(Segment::Argument),
            "this" => Some(Segment::This),
            "that" => Some(Segment::That),
            "temp" => Some(Segment::Temp),
            "pointer" => Some(Segment::Pointer),
            "static" => Some(Segment::Static),
            "constant" => Some(Segment::Constant),
            _ => None,
        }
    }

    fn pointer_symbol(self) -> Option<&'static str> {
        match self {
            Segment::Local => Some("LCL"),
            Segment::Argument => Some("ARG"),
            Segment::This => Some("THIS"),
            Segment::That => Some("THAT"),
            _ => None,
        }
    }
}

/// Translates VM commands to Hack assembly, accumulating output across
/// however many source units (files) are fed to it.
pub struct CodeWriter {
    out: String,
    compare_counters: HashMap<&'static str, usize>,
    call_counters: HashMap<String, usize>,
    current_function: Option<String>,
    filename: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::new(),
            compare_counters: HashMap::new(),
            call_counters: HashMap::new(),
            current_function: None,
            filename: String::new(),
        }
    }

    /// Sets the static-segment and top-level-label scope for subsequent
    /// commands. Call once per source unit before translating its lines.
    pub fn set_filename(&mut self, filename: &str) {
        let name = std::path::Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);
        self.filename.clear();
        self.filename.push_str(name);
        self.current_function = None;
    }

    /// Consumes the writer, returning the accumulated assembly.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn label_scope(&self) -> &str {
        self.current_function.as_deref().unwrap_or(&self.filename)
    }

    pub fn write_bootstrap(&mut self) {
        self.out.push_str("@256\nD=A\n@SP\nM=D\n");
        self.write_call("Sys.init", 0);
    }

    pub fn write_arithmetic(&mut self, command: &str, line: usize) -> Result<(), VmError> {
        writeln!(self.out, "// {command}").unwrap();
        match command {
            "add" => self.write_binary_op("D+M"),
            "sub" => self.write_binary_op("D-M"),
            "and" => self.write_binary_op("D&M"),
            "or" => self.write_binary_op("D|M"),
            "neg" => self.write_unary_op(true),
            "not" => self.write_unary_op(false),
            "eq" => self.write_comparison("JEQ"),
            "gt" => self.write_comparison("JGT"),
            "lt" => self.write_comparison("JLT"),
            _ => {
                return Err(VmError::InvalidCommand {
                    line,
                    command: command.to_string(),
                });
            }
        }
        Ok(())
    }

    fn write_binary_op(&mut self, operation: &str) {
        self.write_pop_to_d();
        self.out.push_str("@R14\nM=D\n");
        self.write_pop_to_d();
        self.out.push_str("@R13\nM=D\n@R13\nD=M\n@R14\n");
        writeln!(self.out, "D={operation}").unwrap();
        self.write_push_d();
    }

    fn write_unary_op(&mut self, is_neg: bool) {
        self.write_pop_to_d();
        if is_neg {
            self.out.push_str("@0\nD=A-D\n");
        } else {
            self.out.push_str("D=!D\n");
        }
        self.write_push_d();
    }

    fn write_comparison(&mut self, jump: &str) {
        let label = match jump {
            "JEQ" => "EQ",
            "JGT" => "GT",
            _ => "LT",
        };
        let id = *self.compare_counters.entry(label).or_insert(0);
        *self.compare_counters.get_mut(label).unwrap() += 1;

        self.write_pop_to_d();
        self.out.push_str("@R14\nM=D\n");
        self.write_pop_to_d();
        self.out.push_str("@R13\nM=D\n@R13\nD=M\n@R14\nD=D-M\n");
        writeln!(self.out, "@{label}.TRUE.{id}").unwrap();
        writeln!(self.out, "D;{jump}").unwrap();
        self.out.push_str("@SP\nA=M\nM=0\n");
        writeln!(self.out, "@{label}.SKIP.{id}").unwrap();
        self.out.push_str("0;JMP\n");
        writeln!(self.out, "({label}.TRUE.{id})").unwrap();
        self.out.push_str("@SP\nA=M\nM=-1\n");
        writeln!(self.out, "({label}.SKIP.{id})").unwrap();
        self.out.push_str("@SP\nM=M+1\n");
    }

    pub fn write_push_pop(
        &mut self,
        command: &str,
        segment: &str,
        index: i32,
        line: usize,
    ) -> Result<(), VmError> {
        writeln!(self.out, "// {command} {segment} {index}").unwrap();
        match command {
            "push" => self.write_push(segment, index, line),
            "pop" => self.write_pop(segment, index, line),
            _ => unreachable!("write_push_pop is only called for push/pop"),
        }
    }

    fn write_push(&mut self, segment: &str, index: i32, line: usize) -> Result<(), VmError> {
        let seg = Segment::from_str(segment).ok_or_else(|| VmError::UnknownSegment {
            line,
            segment: segment.to_string(),
        })?;

        match seg {
            Segment::Constant => {
                if !(0..=32767).contains(&index) {
                    return Err(VmError::InvalidCommand {
                        line,
                        command: format!("push constant {index}"),
                    });
                }
                writeln!(self.out, "@{index}\nD=A").unwrap();
                self.write_push_d();
            }
            Segment::Local | Segment::Argument | Segment::This | Segment::That => {
                let ptr = seg.pointer_symbol().unwrap();
                writeln!(self.out, "@{ptr}\nD=M\n@{index}\nA=D+A\nD=M").unwrap();
                self.write_push_d();
            }
            Segment::Temp => {
                writeln!(self.out, "@{}\nD=M", 5 + index).unwrap();
                self.write_push_d();
            }
            Segment::Pointer => {
                let ptr = pointer_symbol(index, line)?;
                writeln!(self.out, "@{ptr}\nD=M").unwrap();
                self.write_push_d();
            }
            Segment::Static => {
                writeln!(self.out, "@{}.{index}\nD=M", self.filename).unwrap();
                self.write_push_d();
            }
        }
        Ok(())
    }

    fn write_pop(&mut self, segment: &str, index: i32, line: usize) -> Result<(), VmError> {
        let seg = Segment::from_str(segment).ok_or_else(|| VmError::UnknownSegment {
            line,
            segment: segment.to_string(),
        })?;

        match seg {
            Segment::Local | Segment::Argument | Segment::This | Segment::That => {
                let ptr = seg.pointer_symbol().unwrap();
                writeln!(self.out, "@{ptr}\nD=M\n@{index}\nD=D+A\n@R13\nM=D").unwrap();
                self.write_pop_to_d();
                self.out.push_str("@R13\nA=M\nM=D\n");
            }
            Segment::Temp => {
                writeln!(self.out, "@{}\nD=A\n@R13\nM=D", 5 + index).unwrap();
                self.write_pop_to_d();
                self.out.push_str("@R13\nA=M\nM=D\n");
            }
            Segment::Pointer => {
                let ptr = pointer_symbol(index, line)?;
                self.write_pop_to_d();
                writeln!(self.out, "@{ptr}\nM=D").unwrap();
            }
            Segment::Static => {
                self.write_pop_to_d();
                writeln!(self.out, "@{}.{index}\nM=D", self.filename).unwrap();
            }
            Segment::Constant => {
                return Err(VmError::UnknownSegment {
                    line,
                    segment: segment.to_string(),
                });
            }
        }
        Ok(())
    }

    fn write_push_d(&mut self) {
        self.out.push_str("@SP\nA=M\nM=D\n@SP\nM=M+1\n");
    }

    fn write_pop_to_d(&mut self) {
        self.out.push_str("@SP\nM=M-1\nA=M\nD=M\n");
    }

    pub fn write_label(&mut self, label: &str) {
        writeln!(self.out, "({}${label})", self.label_scope()).unwrap();
    }

    pub fn write_goto(&mut self, label: &str) {
        writeln!(self.out, "@{}${label}\n0;JMP", self.label_scope()).unwrap();
    }

    pub fn write_if_goto(&mut self, label: &str) {
        self.write_pop_to_d();
        writeln!(self.out, "@{}${label}\nD;JNE", self.label_scope()).unwrap();
    }

    pub fn write_function(&mut self, name: &str, num_locals: i32) {
        self.current_function = Some(name.to_string());
        writeln!(self.out, "({name})").unwrap();
        self.out.push_str("@SP\nD=M\n@LCL\nM=D\n");
        for _ in 0..num_locals {
            self.out.push_str("@SP\nA=M\nM=0\n@SP\nM=M+1\n");
        }
    }

    pub fn write_return(&mut self) {
        // endFrame (R13) = LCL; retAddr (R14) = *(endFrame - 5)
        self.out.push_str("@LCL\nD=M\n@R13\nM=D\n");
        self.out.push_str("@5\nD=A\n@R13\nA=M-D\nD=M\n@R14\nM=D\n");
        // *ARG = pop()
        self.write_pop_to_d();
        self.out.push_str("@ARG\nA=M\nM=D\n");
        // SP = ARG + 1
        self.out.push_str("@ARG\nD=M\n@SP\nM=D+1\n");
        // THAT = *(endFrame - 1); THIS = *(endFrame - 2)
        self.out.push_str("@R13\nA=M-1\nD=M\n@THAT\nM=D\n");
        self.out.push_str("@2\nD=A\n@R13\nA=M-D\nD=M\n@THIS\nM=D\n");
        // ARG = *(endFrame - 3); LCL = *(endFrame - 4)
        self.out.push_str("@3\nD=A\n@R13\nA=M-D\nD=M\n@ARG\nM=D\n");
        self.out.push_str("@4\nD=A\n@R13\nA=M-D\nD=M\n@LCL\nM=D\n");
        // goto retAddr
        self.out.push_str("@R14\nA=M\n0;JMP\n");
    }

    pub fn write_call(&mut self, function_name: &str, num_args: i32) {
        let prefix = format!("{}$ret.", self.label_scope());
        let counter = self.call_counters.entry(prefix.clone()).or_insert(1);
        let return_label = format!("{prefix}{counter}");
        *counter += 1;

        writeln!(self.out, "@{return_label}\nD=A").unwrap();
        self.write_push_d();
        for segment in ["LCL", "ARG", "THIS", "THAT"] {
            writeln!(self.out, "@{segment}\nD=M").unwrap();
            self.write_push_d();
        }
        writeln!(self.out, "@{}\nD=A\n@SP\nD=M-D\n@ARG\nM=D", 5 + num_args).unwrap();
        self.out.push_str("@SP\nD=M\n@LCL\nM=D\n");
        writeln!(self.out, "@{function_name}\n0;JMP").unwrap();
        writeln!(self.out, "({return_label})").unwrap();
    }
}

fn pointer_symbol(index: i32, line: usize) -> Result<&'static str, VmError> {
    match index {
        0 => Ok("THIS"),
        1 => Ok("THAT"),
        _ => Err(VmError::InvalidPointerIndex { line, index }),
    }
}
