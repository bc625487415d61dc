// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the keyword trie.
//!
//! This module defines the error types that can occur while inserting or
//! removing keywords.

/// Errors that can occur in keyword trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TrieError {
    /// An empty keyword was provided.
    #[error("Empty keyword not allowed")]
    EmptyKeyword,

    /// The keyword contains a symbol that is not part of the declared alphabet.
    #[error("Symbol {symbol:?} in keyword '{keyword}' is outside the declared alphabet")]
    SymbolOutsideAlphabet {
        /// The offending symbol.
        symbol: char,
        /// The keyword containing it.
        keyword: String,
    },

    /// The keyword exceeds the configured maximum length.
    #[error("Keyword '{keyword}' exceeds maximum keyword length of {max_len}")]
    KeywordTooLong {
        /// The keyword that was too long.
        keyword: String,
        /// The maximum allowed length in symbols.
        max_len: usize,
    },

    /// The keyword is not currently a complete inserted keyword.
    #[error("Keyword not found: {0}")]
    NotFound(String),
}

impl TrieError {
    /// Returns `true` for errors caused by a malformed keyword, as opposed to
    /// a keyword that is well-formed but absent.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, TrieError::NotFound(_))
    }
}

/// Result type for keyword trie operations.
pub type TrieResult<T> = std::result::Result<T, TrieError>;
