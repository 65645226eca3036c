//! Zero-copy reader over an encoded trie.

use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use super::format::*;
use super::matcher::SuffixMatcher;
use crate::{Error, Result};

/// Read-only view of an encoded suffix trie.
///
/// The buffer is used as is: no copy, no index, no allocation per lookup.
/// `B` is anything that derefs to bytes, typically a `Vec<u8>`, a
/// `&'static [u8]` baked into the binary, or an [`Mmap`].
#[derive(Debug, Clone)]
pub struct CompactTrie<B = Vec<u8>> {
    data: B,
}

impl<B: AsRef<[u8]>> CompactTrie<B> {
    /// Wrap an encoded buffer without inspecting it.
    ///
    /// The buffer is trusted: a malformed one is not detected here and
    /// simply yields wrong or missing matches. Use
    /// [`decode_checked`](Self::decode_checked) for data of unknown
    /// provenance.
    pub fn decode(data: B) -> Self {
        Self { data }
    }

    /// Wrap an encoded buffer after validating its whole structure.
    pub fn decode_checked(data: B) -> Result<Self> {
        let trie = Self { data };
        trie.validate()?;
        Ok(trie)
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    /// Whether the buffer is empty (no root at all).
    pub fn is_empty(&self) -> bool {
        self.data.as_ref().is_empty()
    }

    /// Offset of the root node.
    pub fn root_offset(&self) -> usize {
        ROOT_OFFSET
    }

    /// Whether a suffix ends at the node at `offset`.
    #[inline]
    pub fn is_terminal(&self, offset: usize) -> bool {
        self.byte_at(offset + END_FLAG_POS).map_or(false, |flag| flag != 0)
    }

    /// Tag byte of the node at `offset`.
    #[inline]
    pub fn tag(&self, offset: usize) -> Option<u8> {
        self.byte_at(offset + TAG_POS)
    }

    /// Number of children of the node at `offset`.
    #[inline]
    pub fn child_count(&self, offset: usize) -> usize {
        self.byte_at(offset + COUNT_POS).map_or(0, usize::from)
    }

    /// Offset of the child of `node_offset` reached through `label`.
    ///
    /// Child records are sorted by label, so this is a binary search.
    pub fn find_child_offset(&self, node_offset: usize, label: u8) -> Option<usize> {
        let records = self.records(node_offset)?;

        let mut lo = 0;
        let mut hi = records.len() / CHILD_RECORD_SIZE;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let start = mid * CHILD_RECORD_SIZE;
            let (mid_label, offset) = read_record(&records[start..start + CHILD_RECORD_SIZE]);
            match mid_label.cmp(&label) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Some(offset),
            }
        }

        None
    }

    /// Walk every node once and check that the buffer is a well-formed
    /// tree: headers and records in range, flags 0 or 1, labels strictly
    /// ascending, every node reachable exactly once. Children may sit
    /// before or after their parent.
    pub fn validate(&self) -> Result<()> {
        let data = self.data.as_ref();
        if data.len() < NODE_HEADER_SIZE {
            return Err(Error::Corrupt {
                offset: ROOT_OFFSET,
                reason: "buffer shorter than a node header",
            });
        }

        let mut seen = vec![false; data.len()];
        let mut pending = vec![ROOT_OFFSET];
        let mut nodes = 0usize;

        while let Some(offset) = pending.pop() {
            if seen[offset] {
                return Err(Error::Corrupt {
                    offset,
                    reason: "node referenced more than once",
                });
            }
            seen[offset] = true;
            nodes += 1;

            if data[offset + END_FLAG_POS] > 1 {
                return Err(Error::Corrupt {
                    offset,
                    reason: "end flag is neither 0 nor 1",
                });
            }

            let records = self.records(offset).ok_or(Error::Corrupt {
                offset,
                reason: "child records run past the end of the buffer",
            })?;

            let mut previous: Option<u8> = None;
            for record in records.chunks_exact(CHILD_RECORD_SIZE) {
                let (label, child) = read_record(record);
                if previous.map_or(false, |p| p >= label) {
                    return Err(Error::Corrupt {
                        offset,
                        reason: "child labels not strictly ascending",
                    });
                }
                previous = Some(label);

                if child + NODE_HEADER_SIZE > data.len() {
                    return Err(Error::Corrupt {
                        offset,
                        reason: "child offset out of range",
                    });
                }
                pending.push(child);
            }
        }

        log::debug!("Validated trie: {} nodes in {} bytes", nodes, data.len());
        Ok(())
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.data.as_ref().get(pos).copied()
    }

    /// The child record block of the node at `offset`.
    #[inline]
    fn records(&self, offset: usize) -> Option<&[u8]> {
        let count = usize::from(self.byte_at(offset + COUNT_POS)?);
        let start = offset + NODE_HEADER_SIZE;
        self.data
            .as_ref()
            .get(start..start + count * CHILD_RECORD_SIZE)
    }
}

impl CompactTrie<Mmap> {
    /// Memory-map a persisted trie file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        log::debug!("Mapped {:?} ({} bytes)", path, mmap.len());
        Ok(Self::decode(mmap))
    }
}

impl<B: AsRef<[u8]>> SuffixMatcher for CompactTrie<B> {
    type Node = usize;

    #[inline]
    fn root(&self) -> Option<usize> {
        (self.len() >= NODE_HEADER_SIZE).then_some(ROOT_OFFSET)
    }

    #[inline]
    fn child(&self, node: usize, label: u8) -> Option<usize> {
        self.find_child_offset(node, label)
    }

    #[inline]
    fn terminal_tag(&self, node: usize) -> Option<u8> {
        if self.is_terminal(node) {
            self.tag(node)
        } else {
            None
        }
    }
}
