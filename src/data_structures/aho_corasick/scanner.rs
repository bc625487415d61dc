// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Single-pass scan over a built automaton.
//!
//! The scanner keeps a current node, follows failure links on a transition
//! miss and reports the output set of every node it lands on. Total work is
//! linear in the input length plus the number of matches.

use std::iter::FusedIterator;
use std::str::CharIndices;

use serde::Serialize;

use crate::data_structures::keyword_trie::{KeywordTrie, NodeId};

/// A keyword occurrence in the scanned text.
///
/// Positions count symbols (`char`s). `end` is exclusive, so it equals the
/// 1-based position of the last matched symbol.
///
/// A match borrows only the scanned text, never the automaton, so it can be
/// kept while the automaton is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match<'t> {
    /// The matched keyword, as a slice of the scanned text
    pub keyword: &'t str,

    /// Terminal node of the keyword
    pub keyword_id: NodeId,

    /// Symbol index of the first matched symbol
    pub start: usize,

    /// Symbol index one past the last matched symbol
    pub end: usize,

    /// Byte offset of the first matched symbol
    pub byte_start: usize,

    /// Byte offset one past the last matched symbol
    pub byte_end: usize,
}

impl Match<'_> {
    /// The byte range of the match, for slicing the scanned text.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.byte_start..self.byte_end
    }
}

/// Iterator over all keyword occurrences in a text, overlapping ones included.
///
/// Matches are yielded by increasing end position; matches sharing an end
/// position are yielded longest keyword first. The iterator borrows the trie
/// for `'a`; yielded matches borrow the text for `'t`.
#[derive(Debug)]
pub struct MatchIterator<'a, 't> {
    /// The annotated trie
    trie: &'a KeywordTrie,

    /// The scanned text
    text: &'t str,

    /// Remaining input
    chars: CharIndices<'t>,

    /// Current automaton state
    state: NodeId,

    /// Number of symbols consumed so far
    consumed: usize,

    /// Byte offset just past the last consumed symbol
    byte_end: usize,

    /// Outputs of the current state not yet reported
    pending: &'a [NodeId],
}

impl<'a, 't> MatchIterator<'a, 't> {
    pub(crate) fn new(trie: &'a KeywordTrie, text: &'t str) -> Self {
        Self {
            trie,
            text,
            chars: text.char_indices(),
            state: NodeId::ROOT,
            consumed: 0,
            byte_end: 0,
            pending: &[],
        }
    }

    fn make_match(&self, keyword_id: NodeId) -> Match<'t> {
        let node = &self.trie[keyword_id];
        let byte_start = self.byte_end - node.keyword().map_or(0, str::len);
        Match {
            keyword: &self.text[byte_start..self.byte_end],
            keyword_id,
            start: self.consumed - node.depth(),
            end: self.consumed,
            byte_start,
            byte_end: self.byte_end,
        }
    }
}

impl<'t> Iterator for MatchIterator<'_, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((&keyword_id, rest)) = self.pending.split_first() {
                self.pending = rest;
                return Some(self.make_match(keyword_id));
            }

            let (offset, symbol) = self.chars.next()?;
            self.state = transition(self.trie, self.state, symbol);
            self.consumed += 1;
            self.byte_end = offset + symbol.len_utf8();
            self.pending = self.trie[self.state].outputs();
        }
    }
}

impl FusedIterator for MatchIterator<'_, '_> {}

/// Moves from `state` on `symbol`, following failure links on a miss.
///
/// Lands on the root when no suffix of the current path can be extended.
pub(crate) fn transition(trie: &KeywordTrie, mut state: NodeId, symbol: char) -> NodeId {
    loop {
        if let Some(next) = trie[state].child_on(symbol) {
            return next;
        }
        if state == NodeId::ROOT {
            return NodeId::ROOT;
        }
        state = trie[state].failure().unwrap_or(NodeId::ROOT);
    }
}
