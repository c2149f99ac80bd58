//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry
//! points. The parser reads tokens from a [`Lexer`] through a two-token
//! window (current and peek) and uses a Pratt approach with NUD/LED
//! handlers for expressions.
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Syntax errors never stop a parse. A failed statement is dropped, its
//! error recorded, and parsing resumes at the following token.

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
    },
    stmt::parse_stmt,
};

/// How many expressions may be open at once before parsing gives up on
/// the statement.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens, owned for the parser's lifetime
    lexer: Lexer,
    /// Token under the cursor
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Errors collected so far, in the order they were found
    errors: Vec<Error>,
    /// Number of expressions currently being parsed
    depth: usize,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// Reads the first two tokens into the window and registers the
    /// expression handlers.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            depth: 0,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until end of input.
    ///
    /// Always returns a Program; check [`Parser::errors`] before trusting it.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => self.recover(error),
            }
            self.advance();
        }

        program
    }

    /// Error messages collected during parsing.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// The collected errors with their kinds and positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    pub fn report(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Records an error for a failed statement and steps over the
    /// statement's `;` if it is next, leaving the cursor where the
    /// statement loop can resume.
    pub fn recover(&mut self, error: Error) {
        self.report(error);

        if self.peek_token_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the window by one token and returns the new current token.
    pub fn advance(&mut self) -> &Token {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        &self.current
    }

    /// Advances only if the peek token is of the expected kind.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error positioned at
    /// the peek token. The window is left untouched on error.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_token_is(expected_kind) {
            Ok(self.advance().clone())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ))
        }
    }

    /// Opens one level of expression nesting, failing past
    /// [`MAX_NESTING_DEPTH`]. Pair every `Ok` with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Binding power of the peek token, `Default` for tokens with none.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power(self.peek.kind)
    }

    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }
}

/// Parses a source string into a Program.
///
/// This is the main entry point for parsing. It creates a lexer and a
/// parser and parses every statement until EOF.
///
/// # Arguments
///
/// * `source` - The complete source text
/// * `file` - Optional source name attached to positions (defaults to `shell`)
///
/// # Returns
///
/// The Program and the errors found. A non-empty error list means the
/// Program is partial and must not be evaluated.
pub fn parse(source: &str, file: Option<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::with_file(source, file));
    let program = parser.parse_program();

    (program, parser.errors)
}
