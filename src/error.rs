//! Error types for pubsuffix.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for pubsuffix operations.
///
/// Lookups never produce an error; these cover building, loading and
/// verifying rule data.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A node has more children than a one-byte count can describe
    #[error("node has {label_count} children, at most 255 fit in a node header")]
    TooManyChildren { label_count: usize },

    /// Encoded trie no longer addressable with 32-bit offsets
    #[error("encoded trie is {size} bytes, offsets are limited to 32 bits")]
    BufferTooLarge { size: usize },

    /// Structural problem found by the checked decoder
    #[error("corrupt trie at offset {offset}: {reason}")]
    Corrupt { offset: usize, reason: &'static str },

    /// Persisted file does not match the manifest checksum
    #[error("checksum mismatch for {file}")]
    ChecksumMismatch { file: String },

    /// Manifest could not be read or written
    #[error("manifest error: {0}")]
    Manifest(String),

    /// One of the three rule files is absent
    #[error("missing rule file: {0}")]
    MissingRuleFile(PathBuf),

    /// Download error
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),
}

/// Result type alias for pubsuffix operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Manifest(e.to_string())
    }
}
