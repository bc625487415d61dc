// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Aho-Corasick automaton.

use crate::data_structures::keyword_trie::TrieError;

/// Error types for automaton operations
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum AutomatonError {
    /// Keyword insertion or removal failed
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),

    /// The trie changed since failure links were last computed
    #[error("Automaton is stale: built at revision {built:?}, trie is at revision {current}")]
    StaleAutomaton {
        /// Trie revision of the most recent build, if any
        built: Option<u64>,
        /// Current trie revision
        current: u64,
    },
}

/// Result type for automaton operations
pub type AutomatonResult<T> = std::result::Result<T, AutomatonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutomatonError::StaleAutomaton {
            built: Some(2),
            current: 3,
        };
        assert_eq!(
            err.to_string(),
            "Automaton is stale: built at revision Some(2), trie is at revision 3"
        );

        let err: AutomatonError = TrieError::NotFound("hers".to_string()).into();
        assert_eq!(err.to_string(), "Trie error: Keyword not found: hers");
    }
}
