//! Error types and diagnostic reporting.
//!
//! This module defines:
//!
//! - The lexical error taxonomy (illegal words, malformed numbers, literals and comments)
//! - Diagnostics pairing an error with the position it was detected at
//! - Reporter sinks that emit one formatted line per diagnostic
//! - The crate-level error for input and configuration failures

pub mod errors;
