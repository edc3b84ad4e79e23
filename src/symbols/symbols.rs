use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::errors::errors::Error;

/// Reserved words of Mgol.
pub const KEYWORDS: &[&str] = &[
    "inicio",
    "varinicio",
    "varfim",
    "escreva",
    "leia",
    "se",
    "entao",
    "fimse",
    "repita",
    "fimrepita",
    "fim",
    "inteiro",
    "literal",
    "real",
];

lazy_static! {
    static ref KEYWORD_PATTERN: Regex =
        Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}0-9_]*$").expect("keyword pattern is valid");
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Entry {
    Keyword,
    Identifier,
}

/// Lexeme table shared by every scanner of a compilation.
///
/// Entries are append-only: the first insert of a lexeme wins, so reserved
/// words loaded before scanning can never be shadowed by identifiers.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: RwLock<HashMap<String, Entry>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn lookup(&self, lexeme: &str) -> Option<Entry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(lexeme).copied()
    }

    /// Returns whether the lexeme was added.
    pub fn insert(&self, lexeme: &str, entry: Entry) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(lexeme) {
            return false;
        }

        entries.insert(lexeme.to_string(), entry);
        true
    }

    pub fn fill_with<'a, I>(&self, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for word in words {
            self.insert(word, Entry::Keyword);
        }
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn fill_symbol_table(table: &SymbolTable) {
    table.fill_with(KEYWORDS.iter().copied());
}

/// Parses a whitespace separated reserved-word list.
pub fn parse_keywords(text: &str) -> Result<Vec<String>, Error> {
    text.split_whitespace()
        .map(|word| {
            if KEYWORD_PATTERN.is_match(word) {
                Ok(word.to_string())
            } else {
                Err(Error::InvalidKeyword {
                    word: word.to_string(),
                })
            }
        })
        .collect()
}
