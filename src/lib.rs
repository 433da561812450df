#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::{
    ast::statements::BlockStmt,
    config::TransformConfig,
    errors::errors::{Error, ErrorTip},
    transform::visitor::{traverse_program, TypeAssertionPass},
};

pub mod ast;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod logging;
pub mod macros;
pub mod parser;
pub mod transform;

extern crate regex;

#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span for nodes synthesised by a pass rather than parsed from source.
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Rewrites every annotated function in an already parsed program.
///
/// Each call runs with fresh per-file state, so the validation library
/// alias never leaks from one program into another.
pub fn transform_program(program: &mut BlockStmt, config: &TransformConfig) -> Result<(), Error> {
    let mut pass = TypeAssertionPass::new(config);
    traverse_program(program, &mut pass)
}

/// Runs the whole pipeline on one file: tokenize, parse, rewrite, print.
pub fn transform_source(source: &str, file: &str, config: &TransformConfig) -> Result<String, Error> {
    let tokens = lexer::lexer::tokenize(source, Some(file.to_string()))?;
    let mut program = parser::parser::parse(tokens, Rc::new(file.to_string()))?;

    transform_program(&mut program, config)?;

    Ok(codegen::printer::print_program(&program))
}

/// Finds the line holding byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within it.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of input, reported after the last character
    let last = content.split_inclusive('\n').last().unwrap_or("");
    Some((line_number.max(2) - 1, last.to_string(), last.len()))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nThis is a test file.\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 44).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("abc", 10).is_none());
    }

    #[test]
    fn test_format_error_points_at_column() {
        let source = "let a = 1;\nlet b = #;\n";
        let error = crate::lexer::lexer::tokenize(source, Some("input.js".to_string())).unwrap_err();

        let rendered = super::format_error(&error, source, "input.js");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: UnrecognisedToken");
        assert_eq!(lines[1], "-> input.js");
        assert_eq!(lines[3], "2 | let b = #;");
        assert!(lines[4].ends_with("--------^"));
    }
}

pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message
        -> input.js
          |
        2 | let b = #;
          | --------^
    */

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        let _ = writeln!(out, "{}", error);
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
