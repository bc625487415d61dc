//! Lazy, read-only traversals over a [`KeywordTrie`].
//!
//! Both traversals visit children in ascending symbol order, so the sequence
//! they produce is deterministic for a given keyword set. They borrow the trie
//! immutably and can be restarted by asking the trie for a new one.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::node::{NodeId, TrieNode};
use super::KeywordTrie;

/// Depth-first pre-order traversal starting at the root.
#[derive(Debug)]
pub struct Preorder<'a> {
    trie: &'a KeywordTrie,
    stack: Vec<NodeId>,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(trie: &'a KeywordTrie) -> Self {
        Self {
            trie,
            stack: vec![NodeId::ROOT],
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a TrieNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.trie.node(id)?;
        // Reverse so the smallest symbol is popped first.
        self.stack
            .extend(node.sorted_children().into_iter().rev().map(|(_, child)| child));
        Some((id, node))
    }
}

impl FusedIterator for Preorder<'_> {}

/// Breadth-first traversal starting at the root, in non-decreasing depth order.
#[derive(Debug)]
pub struct BreadthFirst<'a> {
    trie: &'a KeywordTrie,
    queue: VecDeque<NodeId>,
}

impl<'a> BreadthFirst<'a> {
    pub(crate) fn new(trie: &'a KeywordTrie) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(NodeId::ROOT);
        Self { trie, queue }
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (NodeId, &'a TrieNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = self.trie.node(id)?;
        self.queue
            .extend(node.sorted_children().into_iter().map(|(_, child)| child));
        Some((id, node))
    }
}

impl FusedIterator for BreadthFirst<'_> {}
