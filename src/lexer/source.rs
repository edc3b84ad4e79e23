//! Character source with single-character lookahead.
//!
//! Input is pulled from a `BufRead` one line at a time, so a scan over a
//! large file never holds more than the current line in memory. Bytes that
//! are not valid UTF-8 are decoded as U+FFFD rather than ending the input.

use std::io::{self, BufRead, Cursor};

use tracing::error;

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionTracker {
    position: Position,
}

impl PositionTracker {
    pub fn new() -> Self {
        PositionTracker {
            position: Position::start(),
        }
    }

    /// Position of the next character to be consumed.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
    }

    /// Counts one column as consumed without reading anything.
    pub fn skip_column(&mut self) {
        self.position.column += 1;
    }
}

pub struct CharSource<R> {
    reader: R,
    line: Vec<char>,
    cursor: usize,
    exhausted: bool,
    tracker: PositionTracker,
    last: Position,
    io_error: Option<io::Error>,
}

impl CharSource<Cursor<Vec<u8>>> {
    pub fn from_text(text: &str) -> Self {
        CharSource::new(Cursor::new(text.as_bytes().to_vec()))
    }
}

impl<R: BufRead> CharSource<R> {
    pub fn new(reader: R) -> Self {
        CharSource {
            reader,
            line: vec![],
            cursor: 0,
            exhausted: false,
            tracker: PositionTracker::new(),
            last: Position::start(),
            io_error: None,
        }
    }

    pub fn peek(&mut self) -> Option<char> {
        if !self.fill() {
            return None;
        }

        Some(self.line[self.cursor])
    }

    pub fn advance(&mut self) -> Option<(char, Position)> {
        if !self.fill() {
            return None;
        }

        let c = self.line[self.cursor];
        let position = self.tracker.position();

        self.cursor += 1;
        self.tracker.advance(c);
        self.last = position;

        Some((c, position))
    }

    pub fn at_end(&mut self) -> bool {
        !self.fill()
    }

    pub fn position(&self) -> Position {
        self.tracker.position()
    }

    /// Position of the most recently consumed character.
    pub fn last_position(&self) -> Position {
        self.last
    }

    pub fn skip_column(&mut self) {
        self.tracker.skip_column();
    }

    /// The read failure that ended the input early, if any.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    fn fill(&mut self) -> bool {
        while self.cursor >= self.line.len() {
            if self.exhausted {
                return false;
            }

            let mut buffer = Vec::new();
            match self.reader.read_until(b'\n', &mut buffer) {
                Ok(0) => self.exhausted = true,
                Ok(_) => {
                    // Undecodable bytes become U+FFFD and are scanned like any other character.
                    self.line = String::from_utf8_lossy(&buffer).chars().collect();
                    self.cursor = 0;
                }
                Err(err) => {
                    error!(target: "mgol::lexer", "failed to read source: {}", err);
                    self.io_error = Some(err);
                    self.exhausted = true;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, BufRead, Read};

    use super::{CharSource, PositionTracker};
    use crate::Position;

    #[test]
    fn test_tracker_advance() {
        let mut tracker = PositionTracker::new();
        tracker.advance('a');
        tracker.advance('b');
        assert_eq!(tracker.position(), Position::new(1, 3));

        tracker.advance('\n');
        assert_eq!(tracker.position(), Position::new(2, 1));

        tracker.skip_column();
        assert_eq!(tracker.position(), Position::new(2, 2));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut source = CharSource::from_text("ab");
        assert_eq!(source.peek(), Some('a'));
        assert_eq!(source.peek(), Some('a'));
        assert_eq!(source.position(), Position::new(1, 1));
    }

    #[test]
    fn test_advance_across_lines() {
        let mut source = CharSource::from_text("a\nb");
        assert_eq!(source.advance(), Some(('a', Position::new(1, 1))));
        assert_eq!(source.advance(), Some(('\n', Position::new(1, 2))));
        assert_eq!(source.advance(), Some(('b', Position::new(2, 1))));
        assert_eq!(source.last_position(), Position::new(2, 1));
        assert!(source.at_end());
        assert_eq!(source.advance(), None);
        assert_eq!(source.peek(), None);
    }

    #[test]
    fn test_multibyte_characters_count_one_column() {
        let mut source = CharSource::from_text("çã%");
        source.advance();
        source.advance();
        assert_eq!(source.advance(), Some(('%', Position::new(1, 3))));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_dropped() {
        let mut source = CharSource::new(io::Cursor::new(b"a\xffb\nc".to_vec()));
        let mut chars = String::new();
        while let Some((c, _)) = source.advance() {
            chars.push(c);
        }

        assert_eq!(chars, "a\u{FFFD}b\nc");
        assert_eq!(source.last_position(), Position::new(2, 1));
        assert!(source.take_io_error().is_none());
    }

    #[test]
    fn test_empty_input() {
        let mut source = CharSource::from_text("");
        assert!(source.at_end());
        assert_eq!(source.peek(), None);
        assert!(source.take_io_error().is_none());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    impl BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_read_error_ends_input() {
        let mut source = CharSource::new(FailingReader);
        assert!(source.at_end());
        let err = source.take_io_error().unwrap();
        assert_eq!(err.to_string(), "disk on fire");
        assert!(source.take_io_error().is_none());
    }
}
