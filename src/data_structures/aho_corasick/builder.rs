// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Failure-link and output-set construction.
//!
//! Nodes are processed breadth-first, so when a node is reached its parent and
//! every shallower node already carry their final failure link and output set.
//! Failure links strictly decrease depth, which keeps the chase loop finite.

use fnv::FnvHashMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::data_structures::keyword_trie::{KeywordTrie, NodeId};

/// Summary of a single build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BuildStats {
    /// Trie revision the annotations belong to
    pub revision: u64,

    /// Number of nodes annotated, root included
    pub nodes: usize,

    /// Number of distinct keywords
    pub keywords: usize,

    /// Depth of the deepest node
    pub max_depth: usize,

    /// Longest chain of failure links from any node down to the root
    pub longest_failure_chain: usize,
}

/// Computes failure links and output sets for every node of `trie`.
///
/// Never creates or destroys nodes. Building a trie that only holds the root
/// succeeds and annotates the root alone.
pub(crate) fn build_failure_links(trie: &mut KeywordTrie) -> BuildStats {
    let order: Vec<(NodeId, Option<(NodeId, char)>)> = trie
        .breadth_first()
        .map(|(id, node)| (id, node.parent().zip(node.symbol())))
        .collect();

    let mut chain_len: FnvHashMap<NodeId, usize> = FnvHashMap::default();
    chain_len.insert(NodeId::ROOT, 0);

    let mut stats = BuildStats {
        revision: trie.revision(),
        nodes: order.len(),
        keywords: trie.keyword_count(),
        ..BuildStats::default()
    };

    for (id, edge) in order {
        let Some((parent, symbol)) = edge else {
            // Self-referential sentinel, only used as the base case for depth 1.
            trie.annotate(NodeId::ROOT, NodeId::ROOT, Vec::new());
            continue;
        };

        let failure = if parent == NodeId::ROOT {
            NodeId::ROOT
        } else {
            resolve_failure(trie, parent, symbol, id)
        };

        let mut outputs = Vec::new();
        if trie[id].is_keyword_end() {
            outputs.push(id);
        }
        outputs.extend_from_slice(trie[failure].outputs());

        let chain = 1 + chain_len.get(&failure).copied().unwrap_or(0);
        chain_len.insert(id, chain);
        stats.longest_failure_chain = stats.longest_failure_chain.max(chain);
        stats.max_depth = stats.max_depth.max(trie[id].depth());

        trace!(node = %id, failure = %failure, outputs = outputs.len(), "assigned failure link");
        trie.annotate(id, failure, outputs);
    }

    debug!(
        revision = stats.revision,
        nodes = stats.nodes,
        keywords = stats.keywords,
        max_depth = stats.max_depth,
        longest_failure_chain = stats.longest_failure_chain,
        "built failure links"
    );
    stats
}

/// Finds the failure target of `node`, reached from `parent` on `symbol`.
///
/// Starts at the parent's failure link and follows failure links until a node
/// with a transition on `symbol` is found or the root is reached.
fn resolve_failure(trie: &KeywordTrie, parent: NodeId, symbol: char, node: NodeId) -> NodeId {
    let mut candidate = trie[parent].failure().unwrap_or(NodeId::ROOT);
    loop {
        if let Some(child) = trie[candidate].child_on(symbol) {
            return if child == node { NodeId::ROOT } else { child };
        }
        if candidate == NodeId::ROOT {
            return NodeId::ROOT;
        }
        candidate = trie[candidate].failure().unwrap_or(NodeId::ROOT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(keywords: &[&str]) -> (KeywordTrie, BuildStats) {
        let mut trie = KeywordTrie::new();
        for keyword in keywords {
            trie.insert(keyword).unwrap();
        }
        let stats = build_failure_links(&mut trie);
        (trie, stats)
    }

    fn failure_path(trie: &KeywordTrie, path: &str) -> String {
        let id = trie.find(path).unwrap();
        trie.path(trie[id].failure().unwrap())
    }

    #[test]
    fn test_classic_failure_links() {
        let (trie, _) = built(&["he", "she", "his", "hers"]);

        assert_eq!(failure_path(&trie, "h"), "");
        assert_eq!(failure_path(&trie, "s"), "");
        assert_eq!(failure_path(&trie, "he"), "");
        assert_eq!(failure_path(&trie, "hi"), "");
        assert_eq!(failure_path(&trie, "his"), "s");
        assert_eq!(failure_path(&trie, "sh"), "h");
        assert_eq!(failure_path(&trie, "she"), "he");
        assert_eq!(failure_path(&trie, "her"), "");
        assert_eq!(failure_path(&trie, "hers"), "s");
    }

    #[test]
    fn test_output_sets_follow_failure_links() {
        let (trie, _) = built(&["he", "she", "his", "hers"]);

        let she = trie.find("she").unwrap();
        let outputs: Vec<&str> = trie[she]
            .outputs()
            .iter()
            .filter_map(|&id| trie[id].keyword())
            .collect();
        assert_eq!(outputs, vec!["she", "he"]);

        let sh = trie.find("sh").unwrap();
        assert!(trie[sh].outputs().is_empty());
    }

    #[test]
    fn test_failure_without_separate_suffix() {
        let (trie, _) = built(&["a", "ab"]);
        assert_eq!(failure_path(&trie, "ab"), "");

        let (trie, _) = built(&["a", "ab", "b"]);
        assert_eq!(failure_path(&trie, "ab"), "b");
    }

    #[test]
    fn test_repeated_symbol_chain() {
        let (trie, stats) = built(&["aaa"]);
        assert_eq!(failure_path(&trie, "a"), "");
        assert_eq!(failure_path(&trie, "aa"), "a");
        assert_eq!(failure_path(&trie, "aaa"), "aa");
        assert_eq!(stats.longest_failure_chain, 3);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_empty_trie_build() {
        let (trie, stats) = built(&[]);
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.keywords, 0);
        assert_eq!(trie[NodeId::ROOT].failure(), Some(NodeId::ROOT));
        assert!(trie[NodeId::ROOT].outputs().is_empty());
    }

    #[test]
    fn test_stats_reflect_trie() {
        let (trie, stats) = built(&["he", "she", "his", "hers"]);
        assert_eq!(stats.nodes, trie.node_count());
        assert_eq!(stats.keywords, 4);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.revision, trie.revision());
    }
}
