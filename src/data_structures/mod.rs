//! Data structures for keyword matching.
//!
//! - [`keyword_trie`]: reference-counted prefix trie holding the keyword set
//! - [`aho_corasick`]: failure-link construction and scanning over that trie

pub mod aho_corasick;
pub mod keyword_trie;

// Re-export common data structures
pub use aho_corasick::{Automaton, AutomatonError, AutomatonResult, Match, StalePolicy};
pub use keyword_trie::{KeywordTrie, NodeId, TrieError, TrieResult};
