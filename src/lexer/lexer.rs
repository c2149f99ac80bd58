use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles a pattern match at the cursor. Returns `None` for input that
/// produces no token (whitespace).
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Patterns are anchored and tried in order, so `==`/`!=` must precede `=`/`!`.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \t\n\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
    ];
}

/// Scans a source string one token per call.
///
/// The only state is the cursor; unrecognised input becomes
/// [`TokenKind::Illegal`] tokens and scanning never fails.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer::with_file(source, None)
    }

    /// Creates a lexer whose token spans carry the given source name.
    pub fn with_file(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: source.to_string(),
            pos: 0,
            file: file_name,
        }
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns an `EOF` token with an empty value.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::new(), self.span_of(0));
            }

            let pattern = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            match pattern {
                Some(pattern) => {
                    if let Some(token) = (pattern.handler)(self, &pattern.regex) {
                        return token;
                    }
                }
                None => return illegal_handler(self),
            }
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Span covering `len` bytes from the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields tokens up to, but not including, `EOF`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            None
        } else {
            Some(token)
        }
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex
        .find(lexer.remainder())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
    None
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = matched_text(lexer, regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    Some(MK_TOKEN!(TokenKind::Int, matched, span))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = matched_text(lexer, regex);
    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Some(MK_TOKEN!(kind, value, span))
}

// Consumes one whole character so multi-byte input never splits a scalar.
fn illegal_handler(lexer: &mut Lexer) -> Token {
    let ch = lexer.at().unwrap_or('\0');
    let span = lexer.span_of(ch.len_utf8());
    lexer.advance_n(ch.len_utf8());

    MK_TOKEN!(TokenKind::Illegal, ch.to_string(), span)
}

/// Scans a whole source string, ending with exactly one `EOF` token.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::with_file(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
