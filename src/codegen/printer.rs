//! Source printer.
//!
//! Turns a (rewritten) program back into JavaScript with Flow annotations.
//! Output is normalised rather than layout preserving: two space
//! indentation, one statement per line, single quoted strings and only the
//! parentheses precedence requires.

use crate::ast::statements::BlockStmt;

use super::stmt::gen_statement;

const INDENT: &str = "  ";

pub fn indentation(level: usize) -> String {
    INDENT.repeat(level)
}

/// Line oriented output buffer.
///
/// Statements are written one line at a time at the current indentation.
/// Text handed to `line` may itself span several lines (a function
/// expression, for example); those lines are expected to carry their own
/// indentation already.
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    pub fn new(indent: usize) -> Self {
        Printer {
            out: String::new(),
            indent,
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn line(&mut self, text: &str) {
        self.out.push_str(&indentation(self.indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Prints a whole program, one top level statement per line.
pub fn print_program(program: &BlockStmt) -> String {
    let mut printer = Printer::new(0);

    for stmt in program.iter() {
        gen_statement(&mut printer, stmt);
    }

    printer.finish()
}
