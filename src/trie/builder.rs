//! Insertion-only suffix trie used while building rule sets.

use std::collections::BTreeMap;

use super::matcher::SuffixMatcher;
use super::writer::CompactTrieWriter;
use crate::Result;

/// Arena index of the root node.
pub(crate) const ROOT_INDEX: usize = 0;

/// A node of the mutable trie.
///
/// Children are kept in a `BTreeMap` so the encoder sees them in ascending
/// label order without sorting.
#[derive(Debug, Default, Clone)]
pub(crate) struct Node {
    pub(crate) children: BTreeMap<u8, usize>,
    pub(crate) terminal: bool,
    pub(crate) tag: u8,
}

/// Mutable suffix trie over reversed suffix bytes.
///
/// Nodes live in an arena and refer to each other by index; nothing is
/// ever removed. Build one, feed it suffixes, encode it, drop it.
///
/// # Example
///
/// ```
/// use pubsuffix::trie::{SuffixMatcher, SuffixTrieBuilder};
///
/// let mut trie = SuffixTrieBuilder::new();
/// trie.insert(".com", 0);
/// trie.insert(".example.com", 1);
///
/// let found = trie.find_longest_suffix("www.example.com").unwrap();
/// assert_eq!(found.suffix, ".example.com");
/// assert_eq!(found.tag, 1);
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTrieBuilder {
    nodes: Vec<Node>,
    suffix_count: usize,
}

impl SuffixTrieBuilder {
    /// Create a trie holding only an unflagged root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            suffix_count: 0,
        }
    }

    /// Insert `suffix` with `tag`.
    ///
    /// Re-inserting an existing suffix overwrites its tag.
    pub fn insert(&mut self, suffix: &str, tag: u8) {
        self.insert_bytes(suffix.as_bytes(), tag);
    }

    /// Insert a raw byte suffix. Labels are bytes, not characters.
    pub fn insert_bytes(&mut self, suffix: &[u8], tag: u8) {
        let mut current = ROOT_INDEX;

        for &byte in suffix.iter().rev() {
            current = match self.nodes[current].children.get(&byte) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].children.insert(byte, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        if !node.terminal {
            self.suffix_count += 1;
        }
        node.terminal = true;
        node.tag = tag;
    }

    /// Number of distinct suffixes inserted.
    pub fn len(&self) -> usize {
        self.suffix_count
    }

    /// Whether no suffix has been inserted.
    pub fn is_empty(&self) -> bool {
        self.suffix_count == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Encode into the compact byte layout.
    pub fn encode(&self) -> Result<Vec<u8>> {
        CompactTrieWriter::new().write(self)
    }

    pub(crate) fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

impl Default for SuffixTrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixMatcher for SuffixTrieBuilder {
    type Node = usize;

    fn root(&self) -> Option<usize> {
        Some(ROOT_INDEX)
    }

    fn child(&self, node: usize, label: u8) -> Option<usize> {
        self.nodes[node].children.get(&label).copied()
    }

    fn terminal_tag(&self, node: usize) -> Option<u8> {
        let node = &self.nodes[node];
        node.terminal.then_some(node.tag)
    }
}
