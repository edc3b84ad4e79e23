use std::{io::BufRead, mem, sync::Arc};

use tracing::{debug, trace};

use crate::{
    errors::errors::{CollectingReporter, Diagnostic, LexicalError, Reporter},
    symbols::symbols::{Entry, SymbolTable},
    Position,
};

use super::{
    source::CharSource,
    tokens::{ArithOp, NumKind, RelOp, Token},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Insert every new identifier into the symbol table on first sighting.
    pub cache_identifiers: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            cache_identifiers: true,
        }
    }
}

/// States of the scanning automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Start,
    Integer,
    Fraction,
    /// After `E`/`e`: an optional sign, then at least one digit.
    ExponentSign,
    ExponentDigits,
    Word,
    Literal,
    Comment,
    /// The next character ends the pending word illegally.
    WordError,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Next(State),
    Emit(Token),
    Fail(LexicalError, Position),
}

pub struct Scanner<R, E> {
    source: CharSource<R>,
    table: Arc<SymbolTable>,
    reporter: E,
    config: ScannerConfig,
    lexeme: String,
    num_kind: NumKind,
    start: Position,
    errors: usize,
}

impl<R: BufRead, E: Reporter> Scanner<R, E> {
    pub fn new(source: CharSource<R>, table: Arc<SymbolTable>, reporter: E) -> Self {
        Scanner::with_config(source, table, reporter, ScannerConfig::default())
    }

    pub fn with_config(
        source: CharSource<R>,
        table: Arc<SymbolTable>,
        reporter: E,
        config: ScannerConfig,
    ) -> Self {
        Scanner {
            source,
            table,
            reporter,
            config,
            lexeme: String::new(),
            num_kind: NumKind::Integer,
            start: Position::start(),
            errors: 0,
        }
    }

    /// Scans the next token.
    ///
    /// Always yields exactly one token. A malformed construct is reported
    /// through the reporter and comes back as `Token::Error` at the error
    /// position; once input is exhausted every call returns `Token::EOF`.
    pub fn scan(&mut self) -> (Token, Position) {
        let mut state = State::Start;

        loop {
            match self.step(state) {
                Step::Next(next) => state = next,
                Step::Emit(token) => {
                    trace!(target: "mgol::lexer", "{} {}", self.start, token);
                    return (token, self.start);
                }
                Step::Fail(error, position) => {
                    self.errors += 1;
                    debug!(target: "mgol::lexer", "{}", Diagnostic::new(error.clone(), position));
                    self.reporter.report(position, &error);
                    return (Token::Error, position);
                }
            }
        }
    }

    pub(crate) fn step(&mut self, state: State) -> Step {
        match state {
            State::Start => self.start_state(),
            State::Integer => self.integer(),
            State::Fraction => self.fraction(),
            State::ExponentSign => self.exponent_sign(),
            State::ExponentDigits => self.exponent_digits(),
            State::Word => self.word(),
            State::Literal => self.literal(),
            State::Comment => self.comment(),
            State::WordError => self.word_error(),
        }
    }

    fn start_state(&mut self) -> Step {
        self.lexeme.clear();
        self.num_kind = NumKind::Integer;
        self.start = self.source.position();

        let c = match self.source.peek() {
            Some(c) => c,
            None => return Step::Emit(Token::EOF),
        };

        if c.is_whitespace() {
            self.source.advance();
            return Step::Next(State::Start);
        }

        if c.is_ascii_digit() {
            self.bump();
            return Step::Next(State::Integer);
        }

        if c.is_alphabetic() {
            self.bump();
            return Step::Next(State::Word);
        }

        if let Some(op) = ArithOp::from_char(c) {
            self.bump();
            return Step::Emit(Token::ArithOp(op));
        }

        match c {
            '"' => {
                self.bump();
                Step::Next(State::Literal)
            }
            '{' => {
                self.bump();
                Step::Next(State::Comment)
            }
            '<' => {
                self.bump();
                let token = match self.source.peek() {
                    Some('=') => Token::RelOp(RelOp::LessEquals),
                    Some('>') => Token::RelOp(RelOp::NotEquals),
                    Some('-') => Token::Attr,
                    _ => return Step::Emit(Token::RelOp(RelOp::Less)),
                };
                self.bump();
                Step::Emit(token)
            }
            '>' => {
                self.bump();
                if self.source.peek() == Some('=') {
                    self.bump();
                    return Step::Emit(Token::RelOp(RelOp::GreaterEquals));
                }
                Step::Emit(Token::RelOp(RelOp::Greater))
            }
            '=' => {
                self.bump();
                Step::Emit(Token::RelOp(RelOp::Equals))
            }
            '(' => {
                self.bump();
                Step::Emit(Token::OpenPar)
            }
            ')' => {
                self.bump();
                Step::Emit(Token::ClosePar)
            }
            ';' => {
                self.bump();
                Step::Emit(Token::Semicolon)
            }
            _ => Step::Next(State::WordError),
        }
    }

    fn integer(&mut self) -> Step {
        match self.source.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.bump();
                Step::Next(State::Integer)
            }
            Some('.') => {
                self.bump();
                match self.source.peek() {
                    Some(c) if c.is_ascii_digit() => {
                        self.num_kind = NumKind::Real;
                        Step::Next(State::Fraction)
                    }
                    _ => self.malformed_number(),
                }
            }
            Some('E' | 'e') => {
                self.bump();
                Step::Next(State::ExponentSign)
            }
            _ => self.emit_number(),
        }
    }

    fn fraction(&mut self) -> Step {
        match self.source.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.bump();
                Step::Next(State::Fraction)
            }
            Some('E' | 'e') => {
                self.bump();
                Step::Next(State::ExponentSign)
            }
            _ => self.emit_number(),
        }
    }

    fn exponent_sign(&mut self) -> Step {
        if matches!(self.source.peek(), Some('+' | '-')) {
            self.bump();
        }

        match self.source.peek() {
            Some(c) if c.is_ascii_digit() => Step::Next(State::ExponentDigits),
            _ => self.malformed_number(),
        }
    }

    fn exponent_digits(&mut self) -> Step {
        match self.source.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.bump();
                Step::Next(State::ExponentDigits)
            }
            _ => self.emit_number(),
        }
    }

    fn word(&mut self) -> Step {
        match self.source.peek() {
            Some(c) if is_word_char(c) => {
                self.bump();
                Step::Next(State::Word)
            }
            Some(c) if !is_delimiter(c) => Step::Next(State::WordError),
            _ => self.emit_word(),
        }
    }

    fn literal(&mut self) -> Step {
        match self.source.advance() {
            Some((c, _)) => {
                self.lexeme.push(c);
                if c == '"' {
                    return Step::Emit(Token::LiteralConst(self.take_lexeme()));
                }
                Step::Next(State::Literal)
            }
            None => Step::Fail(
                LexicalError::MalformedLiteral {
                    lexeme: self.take_lexeme(),
                },
                self.source.last_position(),
            ),
        }
    }

    fn comment(&mut self) -> Step {
        match self.source.advance() {
            Some((c, _)) => {
                self.lexeme.push(c);
                if c == '}' {
                    return Step::Emit(Token::Comment(self.take_lexeme()));
                }
                Step::Next(State::Comment)
            }
            None => Step::Fail(
                LexicalError::MalformedComment {
                    lexeme: self.take_lexeme(),
                },
                self.source.last_position(),
            ),
        }
    }

    fn word_error(&mut self) -> Step {
        match self.source.advance() {
            Some((c, position)) => {
                self.lexeme.push(c);
                Step::Fail(
                    LexicalError::IllegalWord {
                        lexeme: self.take_lexeme(),
                    },
                    position,
                )
            }
            None => Step::Next(State::Start),
        }
    }

    /// The examined character stays in the stream to seed the next token,
    /// but its column is counted as consumed.
    fn malformed_number(&mut self) -> Step {
        let position = self.source.position();
        self.source.skip_column();

        Step::Fail(
            LexicalError::MalformedNumber {
                lexeme: self.take_lexeme(),
            },
            position,
        )
    }

    fn emit_number(&mut self) -> Step {
        Step::Emit(Token::Num(self.take_lexeme(), self.num_kind))
    }

    fn emit_word(&mut self) -> Step {
        let lexeme = self.take_lexeme();

        match self.table.lookup(&lexeme) {
            Some(Entry::Keyword) => Step::Emit(Token::Keyword(lexeme)),
            Some(Entry::Identifier) => Step::Emit(Token::Identifier(lexeme)),
            None => {
                if self.config.cache_identifiers {
                    self.table.insert(&lexeme, Entry::Identifier);
                }
                Step::Emit(Token::Identifier(lexeme))
            }
        }
    }

    fn bump(&mut self) {
        if let Some((c, _)) = self.source.advance() {
            self.lexeme.push(c);
        }
    }

    fn take_lexeme(&mut self) -> String {
        mem::take(&mut self.lexeme)
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// Number of lexical errors reported so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn table(&self) -> &Arc<SymbolTable> {
        &self.table
    }

    pub fn reporter(&self) -> &E {
        &self.reporter
    }

    pub fn into_reporter(self) -> E {
        self.reporter
    }

    pub fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.source.take_io_error()
    }
}

/// Iterating borrows the scanner, so `scan` stays callable afterwards.
impl<R: BufRead, E: Reporter> Iterator for &mut Scanner<R, E> {
    type Item = (Token, Position);

    /// Yields every token before `EOF`, error sentinels included.
    fn next(&mut self) -> Option<Self::Item> {
        let (token, position) = Scanner::scan(self);
        if token.is_eof() {
            return None;
        }

        Some((token, position))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '_'
}

/// Characters that legally end a word.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | '=' | '+' | '-' | '*' | '/' | '(' | ')' | ';')
}

pub struct Tokenized {
    /// Every scanned token, ending with `EOF`.
    pub tokens: Vec<(Token, Position)>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn tokenize(source: &str, table: Arc<SymbolTable>) -> Tokenized {
    let mut scanner = Scanner::new(CharSource::from_text(source), table, CollectingReporter::new());
    let mut tokens = vec![];

    loop {
        let (token, position) = scanner.scan();
        let done = token.is_eof();
        tokens.push((token, position));

        if done {
            break;
        }
    }

    Tokenized {
        tokens,
        diagnostics: scanner.into_reporter().into_diagnostics(),
    }
}
