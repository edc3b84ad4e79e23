use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Num,
    Identifier,
    LiteralConst,
    Keyword,

    Attr,
    ArithOp,
    RelOp,

    OpenPar,
    ClosePar,
    Semicolon,

    Comment,
    Error,
    EOF,
}

impl TokenKind {
    /// Class name used in the `<CLASS, lexeme, SUBTYPE>` rendering.
    /// Keywords have no fixed class name, their class is their own text.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Num => "NUM",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LiteralConst => "LITERAL_CONST",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Attr => "ATTR",
            TokenKind::ArithOp => "ARIT_OP",
            TokenKind::RelOp => "REL_OP",
            TokenKind::OpenPar => "OPEN_PAR",
            TokenKind::ClosePar => "CLOSE_PAR",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comment => "COMMENT",
            TokenKind::Error => "ERROR",
            TokenKind::EOF => "EOF",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NumKind {
    Integer,
    Real,
}

impl NumKind {
    pub fn name(&self) -> &'static str {
        match self {
            NumKind::Integer => "INTEGER",
            NumKind::Real => "REAL",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ArithOp {
    Plus,
    Minus,
    Star,
    Slash,
}

impl ArithOp {
    pub fn from_char(c: char) -> Option<ArithOp> {
        match c {
            '+' => Some(ArithOp::Plus),
            '-' => Some(ArithOp::Minus),
            '*' => Some(ArithOp::Star),
            '/' => Some(ArithOp::Slash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithOp::Plus => "+",
            ArithOp::Minus => "-",
            ArithOp::Star => "*",
            ArithOp::Slash => "/",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RelOp {
    Less,       // <
    LessEquals, // <=
    NotEquals,  // <>
    Greater,    // >
    GreaterEquals,
    Equals,
}

impl RelOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelOp::Less => "<",
            RelOp::LessEquals => "<=",
            RelOp::NotEquals => "<>",
            RelOp::Greater => ">",
            RelOp::GreaterEquals => ">=",
            RelOp::Equals => "=",
        }
    }
}

/// A classified token.
///
/// Variable-lexeme tokens own their text. `Attr`, `OpenPar`, `ClosePar`,
/// `Semicolon`, `Error` and `EOF` are sentinels with a constant lexeme.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Token {
    Num(String, NumKind),
    Identifier(String),
    /// Lexeme includes both delimiting quotes.
    LiteralConst(String),
    Keyword(String),
    Attr,
    ArithOp(ArithOp),
    RelOp(RelOp),
    OpenPar,
    ClosePar,
    Semicolon,
    /// Full bracketed text, braces included.
    Comment(String),
    Error,
    EOF,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Num(..) => TokenKind::Num,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::LiteralConst(_) => TokenKind::LiteralConst,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Attr => TokenKind::Attr,
            Token::ArithOp(_) => TokenKind::ArithOp,
            Token::RelOp(_) => TokenKind::RelOp,
            Token::OpenPar => TokenKind::OpenPar,
            Token::ClosePar => TokenKind::ClosePar,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Comment(_) => TokenKind::Comment,
            Token::Error => TokenKind::Error,
            Token::EOF => TokenKind::EOF,
        }
    }

    /// The token class; for keywords this is the keyword text itself.
    pub fn class_name(&self) -> &str {
        match self {
            Token::Keyword(word) => word,
            _ => self.kind().name(),
        }
    }

    pub fn lexeme(&self) -> &str {
        match self {
            Token::Num(lexeme, _)
            | Token::Identifier(lexeme)
            | Token::LiteralConst(lexeme)
            | Token::Keyword(lexeme)
            | Token::Comment(lexeme) => lexeme,
            Token::ArithOp(op) => op.as_str(),
            Token::RelOp(op) => op.as_str(),
            Token::Attr => "<-",
            Token::OpenPar => "(",
            Token::ClosePar => ")",
            Token::Semicolon => ";",
            Token::Error => "ERROR",
            Token::EOF => "EOF",
        }
    }

    pub fn subtype(&self) -> Option<&str> {
        match self {
            Token::Num(_, kind) => Some(kind.name()),
            Token::LiteralConst(_) => Some("LITERAL"),
            Token::Keyword(word) => Some(word),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::EOF)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Token::Error)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_))
    }

    /// Whether the lexeme is source text rather than a placeholder.
    /// Only `Error` and `EOF` fail this; every other lexeme matches the input.
    pub fn is_source_text(&self) -> bool {
        !matches!(self, Token::Error | Token::EOF)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{}, {}, {}>",
            self.class_name(),
            self.lexeme(),
            self.subtype().unwrap_or("NULL")
        )
    }
}
