// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Keyword Trie Implementation
//!
//! This module provides a prefix-sharing trie over `char` symbols that stores
//! a dynamic keyword set. Nodes are reference counted by the number of live
//! keywords passing through them and are pruned bottom-up as soon as no
//! keyword uses them any more.
//!
//! The trie is the structure the Aho-Corasick automaton annotates with
//! failure links and output sets; see
//! [`aho_corasick`](crate::data_structures::aho_corasick).
//!
//! # Example
//!
//! ```
//! use keyword_automaton_lib::data_structures::keyword_trie::KeywordTrie;
//!
//! let mut trie = KeywordTrie::new();
//! trie.insert("ab").unwrap();
//! trie.insert("ac").unwrap();
//!
//! let a = trie.find("a").unwrap();
//! assert_eq!(trie[a].refcount(), 2);
//!
//! trie.remove("ab").unwrap();
//! assert_eq!(trie[a].refcount(), 1);
//! assert!(trie.find("ab").is_none());
//! ```

mod error;
mod node;
mod traversal;

use std::collections::BTreeSet;
use std::ops::Index;

use tracing::{debug, trace};

pub use error::{TrieError, TrieResult};
pub use node::{NodeId, TrieNode};
pub use traversal::{BreadthFirst, Preorder};

/// Configuration options for the keyword trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTrieConfig {
    /// Declared alphabet; `None` means the alphabet is inferred from the keywords
    pub alphabet: Option<BTreeSet<char>>,

    /// Maximum keyword length in symbols; `None` means unbounded
    pub max_keyword_len: Option<usize>,
}

impl KeywordTrieConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts keywords to the symbols of `alphabet`.
    pub fn with_alphabet<I>(mut self, alphabet: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.alphabet = Some(alphabet.into_iter().collect());
        self
    }

    /// Caps keywords at `max_keyword_len` symbols.
    pub fn with_max_keyword_len(mut self, max_keyword_len: usize) -> Self {
        self.max_keyword_len = Some(max_keyword_len);
        self
    }
}

/// A dynamic, reference-counted keyword trie.
///
/// Nodes are stored in an arena and addressed by [`NodeId`]. Slot 0 always
/// holds the root, which is never removed. Slots of pruned nodes are recycled.
///
/// Every successful mutation bumps [`revision`](Self::revision), which lets
/// the automaton detect that its failure links are stale.
#[derive(Debug, Clone)]
pub struct KeywordTrie {
    /// Node arena; `None` marks a free slot
    slots: Vec<Option<TrieNode>>,

    /// Free slot indices available for reuse
    free: Vec<usize>,

    /// Number of live nodes, root included
    node_count: usize,

    /// Number of distinct live keywords
    keyword_count: usize,

    /// Mutation counter
    revision: u64,

    /// Configuration options
    config: KeywordTrieConfig,
}

impl KeywordTrie {
    /// Creates a new empty trie with default configuration.
    pub fn new() -> Self {
        Self::with_config(KeywordTrieConfig::default())
    }

    /// Creates a new empty trie with the specified configuration.
    pub fn with_config(config: KeywordTrieConfig) -> Self {
        Self {
            slots: vec![Some(TrieNode::root())],
            free: Vec::new(),
            node_count: 1,
            keyword_count: 0,
            revision: 0,
            config,
        }
    }

    /// Returns the configuration of this trie.
    pub fn config(&self) -> &KeywordTrieConfig {
        &self.config
    }

    /// Inserts a keyword, creating nodes for prefixes not yet present.
    ///
    /// Every node on the keyword's path (root excluded) has its reference
    /// count incremented. Inserting the same keyword twice increments the
    /// counts twice and must be balanced by two removals.
    ///
    /// # Returns
    ///
    /// * `Ok(NodeId)` - The node the keyword terminates at.
    /// * `Err(TrieError)` - If the keyword is empty, too long, or uses a
    ///   symbol outside the declared alphabet. The trie is left unchanged.
    pub fn insert<K>(&mut self, keyword: K) -> TrieResult<NodeId>
    where
        K: AsRef<str>,
    {
        let keyword = keyword.as_ref();
        let symbols = self.validate(keyword)?;

        let mut current = NodeId::ROOT;
        for (depth, &symbol) in symbols.iter().enumerate() {
            let next = match self.slot(current).child_on(symbol) {
                Some(child) => child,
                None => {
                    let child = self.alloc(TrieNode::child(symbol, current, depth + 1));
                    self.slot_mut(current).children.insert(symbol, child);
                    trace!(node = %child, symbol = ?symbol, "created trie node");
                    child
                }
            };
            self.slot_mut(next).refcount += 1;
            current = next;
        }

        let terminal = self.slot_mut(current);
        let is_new = terminal.terminal_count == 0;
        if is_new {
            terminal.keyword = Some(keyword.into());
        }
        terminal.terminal_count += 1;
        if is_new {
            self.keyword_count += 1;
        }
        self.revision += 1;

        debug!(
            keyword,
            node = %current,
            nodes = self.node_count,
            revision = self.revision,
            "inserted keyword"
        );
        Ok(current)
    }

    /// Removes one previously inserted copy of a keyword.
    ///
    /// Reference counts along the path are decremented from the terminal node
    /// up to (not including) the root; every node whose count reaches zero is
    /// unlinked from its parent. Nodes still used by another keyword are kept.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the keyword was removed.
    /// * `Err(TrieError::NotFound)` - If the keyword is not a complete inserted
    ///   keyword (missing path or a mere prefix of a longer keyword).
    /// * `Err(TrieError)` - For invalid input, as for [`insert`](Self::insert).
    pub fn remove<K>(&mut self, keyword: K) -> TrieResult<()>
    where
        K: AsRef<str>,
    {
        let keyword = keyword.as_ref();
        let symbols = self.validate(keyword)?;

        let mut path = Vec::with_capacity(symbols.len());
        let mut current = NodeId::ROOT;
        for &symbol in &symbols {
            match self.slot(current).child_on(symbol) {
                Some(child) => {
                    path.push(child);
                    current = child;
                }
                None => return Err(TrieError::NotFound(keyword.to_string())),
            }
        }
        if !self.slot(current).is_keyword_end() {
            return Err(TrieError::NotFound(keyword.to_string()));
        }

        let terminal = self.slot_mut(current);
        terminal.terminal_count -= 1;
        let cleared = terminal.terminal_count == 0;
        if cleared {
            terminal.keyword = None;
            self.keyword_count -= 1;
        }

        let mut pruned = 0;
        for &id in path.iter().rev() {
            let node = self.slot_mut(id);
            node.refcount -= 1;
            if node.refcount > 0 {
                continue;
            }
            if let (Some(parent), Some(symbol)) = (node.parent, node.symbol) {
                self.slot_mut(parent).children.remove(&symbol);
            }
            self.release(id);
            pruned += 1;
            trace!(node = %id, "pruned trie node");
        }
        self.revision += 1;

        debug!(
            keyword,
            pruned,
            cleared,
            nodes = self.node_count,
            revision = self.revision,
            "removed keyword"
        );
        Ok(())
    }

    /// Finds the node whose path is exactly `prefix`.
    ///
    /// The empty string maps to the root.
    pub fn find<P>(&self, prefix: P) -> Option<NodeId>
    where
        P: AsRef<str>,
    {
        prefix
            .as_ref()
            .chars()
            .try_fold(NodeId::ROOT, |current, symbol| self.slot(current).child_on(symbol))
    }

    /// Checks whether `keyword` is currently a complete inserted keyword.
    pub fn contains<K>(&self, keyword: K) -> bool
    where
        K: AsRef<str>,
    {
        let keyword = keyword.as_ref();
        !keyword.is_empty() && self.find(keyword).map_or(false, |id| self.is_keyword(id))
    }

    /// Returns the node for `id`, or `None` if the id is not live.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Whether `id` is the root.
    pub fn is_root(&self, id: NodeId) -> bool {
        id == NodeId::ROOT
    }

    /// Whether `id` is a live node without children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).map_or(false, |node| node.children.is_empty())
    }

    /// Whether a live keyword terminates at `id`.
    pub fn is_keyword(&self, id: NodeId) -> bool {
        self.node(id).map_or(false, TrieNode::is_keyword_end)
    }

    /// Reconstructs the path string of `id` by following parent links.
    ///
    /// Returns an empty string for the root and for ids that are not live.
    pub fn path(&self, id: NodeId) -> String {
        let mut symbols = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            match (node.symbol, node.parent) {
                (Some(symbol), Some(parent)) => {
                    symbols.push(symbol);
                    current = self.node(parent);
                }
                _ => break,
            }
        }
        symbols.iter().rev().collect()
    }

    /// All live keywords in canonical (pre-order, ascending symbol) order.
    pub fn keywords(&self) -> Vec<&str> {
        self.preorder().filter_map(|(_, node)| node.keyword()).collect()
    }

    /// Number of distinct live keywords.
    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether the trie holds no keyword (only the root remains).
    pub fn is_empty(&self) -> bool {
        self.slot(NodeId::ROOT).children.is_empty()
    }

    /// Mutation counter, bumped by every successful insert, remove or clear.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes every keyword, leaving only the root.
    pub fn clear(&mut self) {
        self.slots = vec![Some(TrieNode::root())];
        self.free.clear();
        self.node_count = 1;
        self.keyword_count = 0;
        self.revision += 1;
        debug!(revision = self.revision, "cleared trie");
    }

    /// Lazy pre-order traversal with children in ascending symbol order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self)
    }

    /// Lazy breadth-first traversal with children in ascending symbol order.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(self)
    }

    /// Stores the derived failure link and output set of `id`.
    pub(crate) fn annotate(&mut self, id: NodeId, failure: NodeId, outputs: Vec<NodeId>) {
        let node = self.slot_mut(id);
        node.failure = Some(failure);
        node.outputs = outputs;
    }

    /// Checks a keyword against the configuration and splits it into symbols.
    fn validate(&self, keyword: &str) -> TrieResult<Vec<char>> {
        if keyword.is_empty() {
            return Err(TrieError::EmptyKeyword);
        }

        let symbols: Vec<char> = keyword.chars().collect();
        if let Some(max_len) = self.config.max_keyword_len {
            if symbols.len() > max_len {
                return Err(TrieError::KeywordTooLong {
                    keyword: keyword.to_string(),
                    max_len,
                });
            }
        }

        if let Some(alphabet) = &self.config.alphabet {
            if let Some(&symbol) = symbols.iter().find(|&&s| !alphabet.contains(&s)) {
                return Err(TrieError::SymbolOutsideAlphabet {
                    symbol,
                    keyword: keyword.to_string(),
                });
            }
        }

        Ok(symbols)
    }

    fn alloc(&mut self, node: TrieNode) -> NodeId {
        self.node_count += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.slots[id.0] = None;
        self.free.push(id.0);
        self.node_count -= 1;
    }

    fn slot(&self, id: NodeId) -> &TrieNode {
        &self[id]
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut TrieNode {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("trie node {id} is not live"),
        }
    }
}

impl Default for KeywordTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Indexing panics if `id` is not live, like slice indexing out of bounds.
impl Index<NodeId> for KeywordTrie {
    type Output = TrieNode;

    fn index(&self, id: NodeId) -> &TrieNode {
        match self.node(id) {
            Some(node) => node,
            None => panic!("trie node {id} is not live"),
        }
    }
}
