#![allow(clippy::module_inception)]

use std::fmt::Display;

pub mod errors;
pub mod lexer;
pub mod logging;
pub mod symbols;

pub use errors::errors::{CollectingReporter, Diagnostic, Error, LexicalError, Reporter, WriterReporter};
pub use lexer::lexer::{tokenize, Scanner, ScannerConfig, Tokenized};
pub use lexer::source::CharSource;
pub use lexer::tokens::{ArithOp, NumKind, RelOp, Token, TokenKind};
pub use symbols::symbols::{fill_symbol_table, Entry, SymbolTable, KEYWORDS};

/// A 1-based line/column pair in the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
