// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Aho-Corasick automaton over a dynamic keyword trie.
//!
//! The automaton owns a [`KeywordTrie`] and annotates it on demand with
//! failure links and output sets. Keywords can be inserted and removed at any
//! time; any mutation makes the annotations stale until the next
//! [`build`](Automaton::build). No incremental repair is attempted.
//!
//! # Features
//!
//! - Reports every occurrence of every keyword, overlapping and nested ones included
//! - Single left-to-right pass, linear in the input plus the number of matches
//! - Works on `char` symbols, so multi-byte UTF-8 text is handled per character
//! - Explicit staleness tracking with a configurable [`StalePolicy`]
//!
//! # Example
//!
//! ```
//! use keyword_automaton_lib::data_structures::aho_corasick::Automaton;
//!
//! let mut automaton = Automaton::from_keywords(["he", "she", "his", "hers"]).unwrap();
//!
//! let found: Vec<(&str, usize)> = automaton
//!     .find_iter("ahishers")
//!     .unwrap()
//!     .map(|m| (m.keyword, m.end))
//!     .collect();
//! assert_eq!(found, vec![("his", 4), ("she", 6), ("he", 6), ("hers", 8)]);
//!
//! // Mutations invalidate the failure links; `scan` rebuilds by default.
//! automaton.remove("she").unwrap();
//! assert!(automaton.is_stale());
//! assert_eq!(automaton.scan("ahishers").unwrap().len(), 3);
//! ```
//!
//! # Performance Characteristics
//!
//! - Insert/remove: O(k) for a keyword of k symbols
//! - Build: O(n · σ) worst case over n trie nodes, σ distinct symbols per chase
//! - Scan: O(t + z) for a text of t symbols with z matches

mod builder;
mod error;
mod graph;
mod scanner;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data_structures::keyword_trie::{KeywordTrie, KeywordTrieConfig, NodeId};

// Re-exports
pub use builder::BuildStats;
pub use error::{AutomatonError, AutomatonResult};
pub use graph::{FailureEdge, GraphEdge, GraphNode, NodeKind, TrieGraph};
pub use scanner::{Match, MatchIterator};

/// What a scan does when the trie changed since the last build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Fail with [`AutomatonError::StaleAutomaton`]
    Reject,

    /// Rebuild the failure links before scanning
    #[default]
    Rebuild,
}

/// Options for configuring the automaton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomatonOptions {
    /// Options of the underlying trie
    pub trie: KeywordTrieConfig,

    /// Behaviour of [`Automaton::scan`] on a stale automaton
    pub stale_policy: StalePolicy,
}

impl AutomatonOptions {
    /// Creates a new options object with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trie configuration.
    pub fn trie_config(mut self, config: KeywordTrieConfig) -> Self {
        self.trie = config;
        self
    }

    /// Sets the stale policy.
    pub fn stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }
}

/// Dynamic Aho-Corasick automaton.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// The keyword trie carrying the derived annotations
    trie: KeywordTrie,

    /// Trie revision of the most recent build
    built_revision: Option<u64>,

    /// Staleness behaviour of `scan`
    stale_policy: StalePolicy,
}

impl Automaton {
    /// Creates an empty automaton with default options.
    pub fn new() -> Self {
        Self::with_options(AutomatonOptions::default())
    }

    /// Creates an empty automaton with the given options.
    pub fn with_options(options: AutomatonOptions) -> Self {
        Self {
            trie: KeywordTrie::with_config(options.trie),
            built_revision: None,
            stale_policy: options.stale_policy,
        }
    }

    /// Creates an automaton holding `keywords` and builds it.
    ///
    /// # Errors
    ///
    /// Returns the first keyword error encountered.
    pub fn from_keywords<I, K>(keywords: I) -> AutomatonResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        Self::from_keywords_with_options(keywords, AutomatonOptions::default())
    }

    /// Creates an automaton with the given options holding `keywords` and builds it.
    pub fn from_keywords_with_options<I, K>(
        keywords: I,
        options: AutomatonOptions,
    ) -> AutomatonResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut automaton = Self::with_options(options);
        for keyword in keywords {
            automaton.insert(keyword)?;
        }
        automaton.build();
        Ok(automaton)
    }

    /// Inserts a keyword. Makes the automaton stale.
    pub fn insert<K>(&mut self, keyword: K) -> AutomatonResult<NodeId>
    where
        K: AsRef<str>,
    {
        Ok(self.trie.insert(keyword)?)
    }

    /// Removes one copy of a keyword. Makes the automaton stale.
    pub fn remove<K>(&mut self, keyword: K) -> AutomatonResult<()>
    where
        K: AsRef<str>,
    {
        Ok(self.trie.remove(keyword)?)
    }

    /// Removes every keyword. Makes the automaton stale.
    pub fn clear(&mut self) {
        self.trie.clear();
    }

    /// Recomputes failure links and output sets over the current trie.
    pub fn build(&mut self) -> BuildStats {
        let stats = builder::build_failure_links(&mut self.trie);
        self.built_revision = Some(stats.revision);
        stats
    }

    /// Whether the trie changed since the last build (or was never built).
    pub fn is_stale(&self) -> bool {
        self.built_revision != Some(self.trie.revision())
    }

    /// Fails with [`AutomatonError::StaleAutomaton`] if the automaton is stale.
    pub fn ensure_fresh(&self) -> AutomatonResult<()> {
        if self.is_stale() {
            return Err(AutomatonError::StaleAutomaton {
                built: self.built_revision,
                current: self.trie.revision(),
            });
        }
        Ok(())
    }

    /// Applies the stale policy: rebuilds if needed and allowed.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(BuildStats))` - If a rebuild happened.
    /// * `Ok(None)` - If the automaton was already fresh.
    /// * `Err(AutomatonError)` - If stale under [`StalePolicy::Reject`].
    pub fn refresh(&mut self) -> AutomatonResult<Option<BuildStats>> {
        if !self.is_stale() {
            return Ok(None);
        }
        match self.stale_policy {
            StalePolicy::Rebuild => {
                warn!(
                    built = ?self.built_revision,
                    current = self.trie.revision(),
                    "rebuilding stale automaton"
                );
                Ok(Some(self.build()))
            }
            StalePolicy::Reject => self.ensure_fresh().map(|()| None),
        }
    }

    /// The underlying trie.
    pub fn trie(&self) -> &KeywordTrie {
        &self.trie
    }

    /// The configured stale policy.
    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    /// Failure link of `id`, or `None` if `id` is not a live node.
    pub fn failure_link(&self, id: NodeId) -> AutomatonResult<Option<NodeId>> {
        self.ensure_fresh()?;
        Ok(self.trie.node(id).and_then(|node| node.failure()))
    }

    /// Keywords reported when a scan reaches `id`, longest first.
    pub fn outputs(&self, id: NodeId) -> AutomatonResult<Vec<&str>> {
        self.ensure_fresh()?;
        let outputs = self.trie.node(id).map(|node| node.outputs()).unwrap_or_default();
        Ok(outputs
            .iter()
            .filter_map(|&keyword_id| self.trie[keyword_id].keyword())
            .collect())
    }

    /// Lazily iterates over all matches in `text`.
    ///
    /// Never rebuilds: a stale automaton is rejected regardless of the policy.
    pub fn find_iter<'a, 't>(&'a self, text: &'t str) -> AutomatonResult<MatchIterator<'a, 't>> {
        self.ensure_fresh()?;
        Ok(MatchIterator::new(&self.trie, text))
    }

    /// Collects all matches in `text`, applying the stale policy first.
    ///
    /// The returned matches borrow `text` only; the automaton is free for
    /// further use while they are held.
    pub fn scan<'t>(&mut self, text: &'t str) -> AutomatonResult<Vec<Match<'t>>> {
        self.refresh()?;
        Ok(self.find_iter(text)?.collect())
    }

    /// First match in `text` by end position.
    pub fn find_first<'t>(&self, text: &'t str) -> AutomatonResult<Option<Match<'t>>> {
        Ok(self.find_iter(text)?.next())
    }

    /// Whether any keyword occurs in `text`.
    pub fn is_match(&self, text: &str) -> AutomatonResult<bool> {
        Ok(self.find_first(text)?.is_some())
    }

    /// Read-only graph snapshot for external renderers.
    pub fn graph(&self) -> TrieGraph {
        TrieGraph::from_automaton(self)
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}
