//! Error types for the front end.
//!
//! This module defines the syntax errors collected while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for structural, grammar and literal failures
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
