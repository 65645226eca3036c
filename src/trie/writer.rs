//! Compact trie writer.

use super::builder::{SuffixTrieBuilder, ROOT_INDEX};
use super::format::*;
use crate::{Error, Result};

/// Encodes a [`SuffixTrieBuilder`] into the compact layout.
///
/// Each node is written as soon as it is reached: header first, then a
/// zeroed slot for its child records. Children follow in ascending label
/// order, depth first, and their offsets are patched into the parent's
/// slot as they land. An explicit stack replaces recursion so long
/// suffix chains cannot exhaust the call stack.
pub struct CompactTrieWriter {
    buffer: Vec<u8>,
}

impl CompactTrieWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(64 * 1024),
        }
    }

    /// Encode `trie` and return the finished buffer.
    pub fn write(&mut self, trie: &SuffixTrieBuilder) -> Result<Vec<u8>> {
        self.buffer.clear();

        // (arena index, position of the parent's record to patch)
        let mut pending: Vec<(usize, Option<usize>)> = vec![(ROOT_INDEX, None)];

        while let Some((index, record)) = pending.pop() {
            let offset = self.buffer.len();
            let offset32 = u32::try_from(offset).map_err(|_| Error::BufferTooLarge { size: offset })?;

            if let Some(record) = record {
                self.buffer[record + 1..record + CHILD_RECORD_SIZE]
                    .copy_from_slice(&offset32.to_le_bytes());
            }

            let node = trie.node(index);
            let child_count = node.children.len();
            if child_count > MAX_CHILDREN {
                return Err(Error::TooManyChildren {
                    label_count: child_count,
                });
            }

            self.buffer.push(node.terminal as u8);
            self.buffer.push(node.tag);
            self.buffer.push(child_count as u8);

            let records_start = self.buffer.len();
            self.buffer
                .resize(records_start + child_count * CHILD_RECORD_SIZE, 0);

            // Reverse push so the smallest label is popped, and laid out, first.
            for (i, (&label, &child)) in node.children.iter().enumerate().rev() {
                let record = records_start + i * CHILD_RECORD_SIZE;
                self.buffer[record] = label;
                pending.push((child, Some(record)));
            }
        }

        log::debug!(
            "Encoded {} suffixes, {} nodes into {} bytes",
            trie.len(),
            trie.node_count(),
            self.buffer.len()
        );

        Ok(std::mem::take(&mut self.buffer))
    }
}

impl Default for CompactTrieWriter {
    fn default() -> Self {
        Self::new()
    }
}
