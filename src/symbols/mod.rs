//! Symbol table for reserved words and identifiers.
//!
//! The table is an explicit context object: it is created by the caller,
//! pre-loaded with reserved words, handed to each scanner and torn down
//! with `clear` when compilation ends.

pub mod symbols;
