//! pubsuffix - public suffix and registrable domain lookup.
//!
//! This crate answers "what is the public suffix of this hostname?" (the
//! part under which independent parties register names, like `com` or
//! `co.uk`) and "what is its registrable domain?" (eTLD+1), at high
//! throughput and with no parsing at startup.
//!
//! # Features
//!
//! - **Compact tries**: rules are stored as flat, pointer-free byte buffers
//!   that are memory-mapped and queried in place
//! - **Allocation-free matching**: lookups walk the buffer with binary
//!   search per node and return slices of the input
//! - **Exact list semantics**: ordinary, wildcard and exception rules are
//!   combined with the same precedence as the public suffix list
//! - **Thread-safe**: loaded rules are immutable and shared without locks
//!
//! # Quick Start
//!
//! ```ignore
//! use pubsuffix::{DataConfig, MappedSuffixList};
//!
//! let list = MappedSuffixList::load(&DataConfig::new("data"))?;
//!
//! let found = list.parse_public_suffix("www.example.co.uk").unwrap();
//! assert_eq!(found.suffix, "co.uk");
//! assert!(found.icann);
//!
//! assert_eq!(list.effective_tld_plus_one("www.example.co.uk").as_deref(), Some("example.co.uk"));
//! ```
//!
//! Or through the process-wide instance, loaded on first use from
//! `$PUBSUFFIX_DATA_DIR`:
//!
//! ```ignore
//! let etld1 = pubsuffix::effective_tld_plus_one("sub.example.com");
//! ```
//!
//! # Building Rule Data
//!
//! The `pubsuffix-gen` binary turns a `public_suffix_list.dat` into the
//! three trie files (`common.bin`, `negated.bin`, `asterisk.bin`) plus a
//! `manifest.json` with their checksums.
//!
//! # Input
//!
//! Hostnames must be lowercase and IDN labels already converted to
//! punycode. No normalization or syntax validation is done.

mod error;
mod global;

pub mod config;
pub mod list;
pub mod manifest;
pub mod rules;
pub mod trie;

// Re-export core types
pub use config::DataConfig;
pub use error::{Error, Result};
pub use list::{closest_next_domain, MappedSuffixList, PublicSuffix, PublicSuffixList};
pub use rules::{RuleKind, Section};
pub use trie::{CompactTrie, SuffixMatcher, SuffixTrieBuilder};

// Re-export global API functions
pub use global::{effective_tld_plus_one, global_list, init, is_initialized, parse_public_suffix};
