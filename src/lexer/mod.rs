//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens for parsing. It handles:
//!
//! - Tokenization of source text using anchored regex patterns
//! - Recognition of keywords, identifiers, integer literals and operators
//! - Token span tracking for error reporting
//! - Degrading unrecognised characters to illegal tokens

pub mod lexer;
pub mod tokens;
