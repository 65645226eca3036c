//! Compact trie layout constants.
//!
//! A persisted trie is a headerless byte stream. Byte 0 starts the root.
//!
//! ```text
//! node:
//! +-----------+---------+-------------+---------------------------------+
//! | end: u8   | tag: u8 | count: u8   | count x child record            |
//! +-----------+---------+-------------+---------------------------------+
//!
//! child record (5 bytes), sorted ascending by label:
//! +-----------+----------------------+
//! | label: u8 | offset: u32 LE       |
//! +-----------+----------------------+
//! ```
//!
//! Offsets are absolute positions in the same buffer. The encoder always
//! writes a child after its parent.

/// Offset of the root node.
pub const ROOT_OFFSET: usize = 0;

/// Bytes in a node header (end flag, tag, child count).
pub const NODE_HEADER_SIZE: usize = 3;

/// Bytes in one child record (label + u32 offset).
pub const CHILD_RECORD_SIZE: usize = 5;

/// Largest child count a node header can hold.
pub const MAX_CHILDREN: usize = u8::MAX as usize;

pub(crate) const END_FLAG_POS: usize = 0;
pub(crate) const TAG_POS: usize = 1;
pub(crate) const COUNT_POS: usize = 2;

/// Total encoded size of a node with `child_count` children.
#[inline]
pub const fn node_size(child_count: usize) -> usize {
    NODE_HEADER_SIZE + child_count * CHILD_RECORD_SIZE
}

/// Decode a child record into `(label, offset)`.
#[inline]
pub(crate) fn read_record(record: &[u8]) -> (u8, usize) {
    let offset = u32::from_le_bytes([record[1], record[2], record[3], record[4]]);
    (record[0], offset as usize)
}
