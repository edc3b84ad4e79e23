//! Lexical analysis module for the Mgol front end.
//!
//! This module contains the scanner that converts a character stream
//! into classified tokens. It handles:
//!
//! - Pulling characters with single-character lookahead and line/column tracking
//! - Recognition of numbers, identifiers, keywords, string literals and comments
//! - Operators and punctuation
//! - Reporting malformed constructs and resuming the scan after each one

pub mod lexer;
pub mod source;
pub mod tokens;
