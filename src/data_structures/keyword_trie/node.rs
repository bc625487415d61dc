//! Node implementation for the keyword trie.
//!
//! Nodes live in an arena owned by [`KeywordTrie`](super::KeywordTrie) and
//! refer to each other through [`NodeId`] indices. The parent owns its
//! children through the arena; the `parent` field is a back-reference only.

use fnv::FnvHashMap;
use serde::Serialize;

/// Stable identifier of a node in the trie arena.
///
/// Identifiers of pruned nodes are recycled by later insertions, so an id
/// is only meaningful for the trie revision it was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Identifier of the root node.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node in the keyword trie, representing one prefix of the inserted keywords.
#[derive(Debug, Clone)]
pub struct TrieNode {
    /// Symbol labelling the edge from the parent (`None` for the root)
    pub(crate) symbol: Option<char>,

    /// Back-reference to the parent node (`None` for the root)
    pub(crate) parent: Option<NodeId>,

    /// Map of symbols to child nodes
    pub(crate) children: FnvHashMap<char, NodeId>,

    /// Number of live keywords whose path passes through this node
    pub(crate) refcount: usize,

    /// Number of live copies of the keyword ending exactly here
    pub(crate) terminal_count: usize,

    /// Distance from the root
    pub(crate) depth: usize,

    /// Text of the keyword ending here, if any
    pub(crate) keyword: Option<Box<str>>,

    /// Failure transition computed by the automaton builder
    pub(crate) failure: Option<NodeId>,

    /// Terminal nodes of the keywords reported when a scan reaches this node
    pub(crate) outputs: Vec<NodeId>,
}

impl TrieNode {
    /// Creates the root node.
    pub(crate) fn root() -> Self {
        Self::new(None, None, 0)
    }

    /// Creates a node reached from `parent` on `symbol`.
    pub(crate) fn child(symbol: char, parent: NodeId, depth: usize) -> Self {
        Self::new(Some(symbol), Some(parent), depth)
    }

    fn new(symbol: Option<char>, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            symbol,
            parent,
            children: FnvHashMap::default(),
            refcount: 0,
            terminal_count: 0,
            depth,
            keyword: None,
            failure: None,
            outputs: Vec::new(),
        }
    }

    /// Symbol on the edge from the parent, `None` for the root.
    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child reached on `symbol`, if any.
    pub fn child_on(&self, symbol: char) -> Option<NodeId> {
        self.children.get(&symbol).copied()
    }

    /// Children sorted ascending by symbol.
    pub fn sorted_children(&self) -> Vec<(char, NodeId)> {
        let mut entries: Vec<(char, NodeId)> =
            self.children.iter().map(|(&c, &id)| (c, id)).collect();
        entries.sort_unstable_by_key(|&(c, _)| c);
        entries
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of live keywords passing through this node.
    pub fn refcount(&self) -> usize {
        self.refcount
    }

    /// Depth of this node (root is 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether a live keyword terminates exactly at this node.
    pub fn is_keyword_end(&self) -> bool {
        self.terminal_count > 0
    }

    /// The keyword terminating at this node, if any.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Failure transition from the most recent build.
    pub fn failure(&self) -> Option<NodeId> {
        self.failure
    }

    /// Output set from the most recent build.
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }
}
