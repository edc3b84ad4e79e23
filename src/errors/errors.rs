use std::{fmt::Display, io::Write};

use thiserror::Error;
use tracing::warn;

use crate::Position;

/// A malformed construct found while scanning. Each variant carries the
/// offending text exactly as it was consumed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("palavra {lexeme} inexistente na linguagem")]
    IllegalWord { lexeme: String },
    #[error("número {lexeme} inválido")]
    MalformedNumber { lexeme: String },
    #[error("literal {lexeme} inválido")]
    MalformedLiteral { lexeme: String },
    #[error("comentário {lexeme} inválido")]
    MalformedComment { lexeme: String },
}

impl LexicalError {
    pub fn get_error_name(&self) -> &str {
        match self {
            LexicalError::IllegalWord { .. } => "IllegalWord",
            LexicalError::MalformedNumber { .. } => "MalformedNumber",
            LexicalError::MalformedLiteral { .. } => "MalformedLiteral",
            LexicalError::MalformedComment { .. } => "MalformedComment",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            LexicalError::IllegalWord { .. } => "palavra",
            LexicalError::MalformedNumber { .. } => "número",
            LexicalError::MalformedLiteral { .. } => "literal",
            LexicalError::MalformedComment { .. } => "comentário",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            LexicalError::IllegalWord { .. } => "inexistente na linguagem",
            _ => "inválido",
        }
    }

    pub fn lexeme(&self) -> &str {
        match self {
            LexicalError::IllegalWord { lexeme }
            | LexicalError::MalformedNumber { lexeme }
            | LexicalError::MalformedLiteral { lexeme }
            | LexicalError::MalformedComment { lexeme } => lexeme,
        }
    }
}

/// A lexical error pinned to the position where it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    error: LexicalError,
    position: Position,
}

impl Diagnostic {
    pub fn new(error: LexicalError, position: Position) -> Self {
        Diagnostic { error, position }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_error(&self) -> &LexicalError {
        &self.error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "erro na linha {} coluna {}, {}",
            self.position.line, self.position.column, self.error
        )
    }
}

/// Sink for lexical diagnostics. Reporting never fails and never stops the scan.
pub trait Reporter {
    fn report(&mut self, position: Position, error: &LexicalError);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, position: Position, error: &LexicalError) {
        (**self).report(position, error)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, position: Position, error: &LexicalError) {
        (**self).report(position, error)
    }
}

/// Writes one formatted line per diagnostic.
pub struct WriterReporter<W: Write> {
    writer: W,
}

impl<W: Write> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        WriterReporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterReporter<std::io::Stderr> {
    pub fn stderr() -> Self {
        WriterReporter::new(std::io::stderr())
    }
}

impl<W: Write> Reporter for WriterReporter<W> {
    fn report(&mut self, position: Position, error: &LexicalError) {
        let diagnostic = Diagnostic::new(error.clone(), position);

        if let Err(err) = writeln!(self.writer, "{}", diagnostic) {
            warn!(target: "mgol::lexer", "failed to write diagnostic: {}", err);
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        CollectingReporter::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Diagnostics rendered as output lines.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, position: Position, error: &LexicalError) {
        self.diagnostics.push(Diagnostic::new(error.clone(), position));
    }
}

/// Failures outside the lexical error taxonomy: reading input and loading
/// configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("keyword {word:?} can never be scanned as a word")]
    InvalidKeyword { word: String },
}
