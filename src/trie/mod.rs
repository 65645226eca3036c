//! Suffix tries keyed by reversed bytes.
//!
//! Rules are accumulated in a [`SuffixTrieBuilder`] at build time, encoded
//! once by [`CompactTrieWriter`] into a flat, pointer-free buffer, and read
//! back through [`CompactTrie`] without copying. Both tries answer
//! [`SuffixMatcher::find_longest_suffix`] identically.
//!
//! # Node Layout
//!
//! ```text
//! +--------+-------+---------+----------------------------------+
//! | end u8 | tag u8| count u8| count x (label u8, offset u32 LE) |
//! +--------+-------+---------+----------------------------------+
//! ```
//!
//! See [`format`] for the constants.

mod builder;
pub mod format;
mod matcher;
mod reader;
mod writer;


pub use builder::SuffixTrieBuilder;
pub use matcher::{SuffixMatch, SuffixMatcher};
pub use reader::CompactTrie;
pub use writer::CompactTrieWriter;
