#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use crate::{
    ast::ast::{Expr, Node, Program, Stmt},
    lexer::{lexer::Lexer, tokens::{Token, TokenKind}},
    parser::parser::{parse, Parser},
};

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text (including its newline)
/// and the offset of `position` within that line, or `None` when the
/// position lies past the end of the source.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // Offset sits at the very end of the input (e.g. an EOF token)
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => Some((line_number - 1, last.to_string(), last.len())),
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders an error against the source it was produced from.
///
/// ```text
/// Error: UnexpectedToken (expected next token to be Assignment, got Int instead)
/// -> shell
///   |
/// 1 | let x 5;
///   | ------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    output.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = line_text
        .get(..line_pos)
        .map(|before| before.chars().count())
        .unwrap_or(line_pos);
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::tokens::TokenKind,
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("let x", 5).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "let x");
        assert_eq!(line_pos, 5);

        assert!(super::get_line_at_position("let x", 6).is_none());
    }

    #[test]
    fn test_format_error_points_at_token() {
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::Assignment,
                found: TokenKind::Int,
            },
            Position(6, Rc::new(String::from("test.ark"))),
        );

        let rendered = super::format_error(&error, "let x 5;");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "Error: UnexpectedToken (expected next token to be Assignment, got Int instead)"
        );
        assert_eq!(lines[1], "-> test.ark");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "1 | let x 5;");
        assert_eq!(lines[4], "  | ------^");
    }

    #[test]
    fn test_format_error_counts_characters_not_bytes() {
        // `)` sits at byte 12 but is the twelfth character
        let error = Error::new(
            ErrorImpl::MissingPrefixRule {
                kind: TokenKind::CloseParen,
            },
            Position(12, Rc::new(String::from("test.ark"))),
        );

        let rendered = super::format_error(&error, "é; let x = );");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[3], "1 | é; let x = );");
        assert_eq!(lines[4], "  | -----------^");
    }
}
