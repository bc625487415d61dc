// Copyright (c) 2025 Keyword Automaton Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Read-only graph snapshot of the trie and its failure transitions.
//!
//! Renderers draw the trie as a directed tree and overlay the failure
//! transitions. The snapshot carries no layout or styling state; it can be
//! serialized with serde or printed as Graphviz DOT through [`Display`].

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::Automaton;
use crate::data_structures::keyword_trie::{KeywordTrie, NodeId};

/// Structural classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The root
    Root,
    /// A node without children
    Leaf,
    /// Any other node
    Interior,
}

/// A node of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Node identifier
    pub id: NodeId,
    /// `root` for the root, otherwise the edge symbol
    pub label: String,
    /// Structural classification
    pub kind: NodeKind,
    /// Whether a keyword terminates here
    pub keyword: bool,
    /// Parent node
    pub parent: Option<NodeId>,
    /// Depth from the root
    pub depth: usize,
}

/// A parent-to-child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Parent node
    pub from: NodeId,
    /// Child node
    pub to: NodeId,
    /// Symbol labelling the edge
    pub symbol: char,
}

/// A failure transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailureEdge {
    /// Node the link starts at
    pub from: NodeId,
    /// Longest proper suffix of `from` present in the trie
    pub to: NodeId,
}

/// Snapshot of the trie structure and failure transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrieGraph {
    /// Nodes in pre-order, children ascending by symbol
    pub nodes: Vec<GraphNode>,
    /// Tree edges in the same order as their child nodes
    pub tree_edges: Vec<GraphEdge>,
    /// One failure edge per non-root node; empty when `stale`
    pub failure_edges: Vec<FailureEdge>,
    /// Whether failure edges were left out because the keywords changed
    /// since the last build, or the automaton was never built
    pub stale: bool,
}

impl TrieGraph {
    /// Snapshot of the tree structure only.
    ///
    /// A bare trie carries no current failure links, so the snapshot is
    /// marked `stale`.
    pub fn from_trie(trie: &KeywordTrie) -> Self {
        let mut nodes = Vec::with_capacity(trie.node_count());
        let mut tree_edges = Vec::with_capacity(trie.node_count().saturating_sub(1));

        for (id, node) in trie.preorder() {
            let kind = if trie.is_root(id) {
                NodeKind::Root
            } else if trie.is_leaf(id) {
                NodeKind::Leaf
            } else {
                NodeKind::Interior
            };
            let label = match node.symbol() {
                Some(symbol) => symbol.to_string(),
                None => "root".to_string(),
            };
            if let (Some(parent), Some(symbol)) = (node.parent(), node.symbol()) {
                tree_edges.push(GraphEdge {
                    from: parent,
                    to: id,
                    symbol,
                });
            }
            nodes.push(GraphNode {
                id,
                label,
                kind,
                keyword: node.is_keyword_end(),
                parent: node.parent(),
                depth: node.depth(),
            });
        }

        Self {
            nodes,
            tree_edges,
            failure_edges: Vec::new(),
            stale: true,
        }
    }

    /// Snapshot including failure edges when the automaton is freshly built.
    ///
    /// A stale automaton yields the tree only, with `stale` set.
    pub fn from_automaton(automaton: &Automaton) -> Self {
        let trie = automaton.trie();
        let mut graph = Self::from_trie(trie);
        if automaton.is_stale() {
            return graph;
        }

        graph.stale = false;
        graph.failure_edges = trie
            .preorder()
            .filter(|&(id, _)| !trie.is_root(id))
            .filter_map(|(id, node)| node.failure().map(|to| FailureEdge { from: id, to }))
            .collect();
        graph
    }

    /// Graphviz DOT rendering.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl Display for TrieGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        writeln!(f, "  rankdir=LR;")?;
        if self.stale {
            writeln!(f, "  // stale: failure links omitted")?;
        }
        for node in &self.nodes {
            let shape = match (node.kind, node.keyword) {
                (NodeKind::Root, _) => "box",
                (_, true) => "doublecircle",
                (_, false) => "circle",
            };
            writeln!(
                f,
                "  {} [label=\"{}\" shape={}];",
                node.id,
                escape(&node.label),
                shape
            )?;
        }
        for edge in &self.tree_edges {
            writeln!(
                f,
                "  {} -> {} [label=\"{}\"];",
                edge.from,
                edge.to,
                escape(&edge.symbol.to_string())
            )?;
        }
        for edge in &self.failure_edges {
            writeln!(
                f,
                "  {} -> {} [style=dashed color=red constraint=false];",
                edge.from, edge.to
            )?;
        }
        write!(f, "}}")
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_classification() {
        let automaton = Automaton::from_keywords(["a", "ab"]).unwrap();
        let graph = automaton.graph();

        let summary: Vec<(&str, NodeKind, bool)> = graph
            .nodes
            .iter()
            .map(|n| (n.label.as_str(), n.kind, n.keyword))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("root", NodeKind::Root, false),
                ("a", NodeKind::Interior, true),
                ("b", NodeKind::Leaf, true),
            ]
        );
        assert_eq!(graph.tree_edges.len(), 2);
        assert_eq!(graph.failure_edges.len(), 2);
        assert!(graph.failure_edges.iter().all(|e| e.to == NodeId::ROOT));
    }

    #[test]
    fn test_stale_graph_has_no_failure_edges() {
        let mut automaton = Automaton::from_keywords(["he", "she"]).unwrap();
        automaton.insert("his").unwrap();

        let graph = automaton.graph();
        assert!(graph.stale);
        assert!(graph.failure_edges.is_empty());
        assert_eq!(graph.nodes.len(), automaton.trie().node_count());
        assert!(graph.to_dot().contains("// stale: failure links omitted"));

        automaton.build();
        let graph = automaton.graph();
        assert!(!graph.stale);
        assert_eq!(graph.failure_edges.len(), graph.nodes.len() - 1);
        assert!(!graph.to_dot().contains("stale"));
    }

    #[test]
    fn test_graph_of_empty_built_automaton_is_fresh() {
        let graph = Automaton::from_keywords(Vec::<String>::new()).unwrap().graph();
        assert!(!graph.stale);
        assert!(graph.failure_edges.is_empty());
        assert_eq!(graph.nodes.len(), 1);
    }

    #[test]
    fn test_dot_output() {
        let automaton = Automaton::from_keywords(["ab", "b"]).unwrap();
        let dot = automaton.graph().to_dot();

        assert!(dot.starts_with("digraph {\n  rankdir=LR;\n"));
        assert!(dot.contains("n0 [label=\"root\" shape=box];"));
        assert!(dot.contains("[label=\"b\" shape=doublecircle];"));
        assert!(dot.contains("style=dashed"));
        assert!(dot.ends_with('}'));

        let ab = automaton.trie().find("ab").unwrap();
        let b = automaton.trie().find("b").unwrap();
        assert!(dot.contains(&format!("{ab} -> {b} [style=dashed")));
    }

    #[test]
    fn test_dot_escapes_quotes() {
        let automaton = Automaton::from_keywords(["\"\\"]).unwrap();
        let dot = automaton.graph().to_dot();
        assert!(dot.contains("label=\"\\\"\""));
        assert!(dot.contains("label=\"\\\\\""));
    }

    #[test]
    fn test_graph_serializes_to_json() {
        let automaton = Automaton::from_keywords(["a"]).unwrap();
        let json = serde_json::to_value(automaton.graph()).unwrap();
        assert_eq!(json["nodes"][0]["kind"], "root");
        assert_eq!(json["nodes"][1]["label"], "a");
        assert_eq!(json["failure_edges"][0]["to"], 0);
        assert_eq!(json["stale"], false);
    }
}
