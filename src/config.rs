//! Location of the persisted rule tries.

use std::env;
use std::path::PathBuf;

use crate::rules::RuleKind;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PUBSUFFIX_DATA_DIR";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Name of the manifest written next to the tries.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Where the three rule tries live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Directory holding the files
    pub data_dir: PathBuf,
    /// Common rule trie file name
    pub common_file: String,
    /// Negated rule trie file name
    pub negated_file: String,
    /// Asterisk rule trie file name
    pub asterisk_file: String,
}

impl DataConfig {
    /// Default file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            common_file: default_file_name(RuleKind::Common),
            negated_file: default_file_name(RuleKind::Negated),
            asterisk_file: default_file_name(RuleKind::Asterisk),
        }
    }

    /// Use `$PUBSUFFIX_DATA_DIR`, falling back to `./data`.
    pub fn from_env() -> Self {
        match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    /// File name for `kind`.
    pub fn file_name(&self, kind: RuleKind) -> &str {
        match kind {
            RuleKind::Common => &self.common_file,
            RuleKind::Negated => &self.negated_file,
            RuleKind::Asterisk => &self.asterisk_file,
        }
    }

    /// Full path for `kind`.
    pub fn path_for(&self, kind: RuleKind) -> PathBuf {
        self.data_dir.join(self.file_name(kind))
    }

    /// Full path of the manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(MANIFEST_FILE)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

fn default_file_name(kind: RuleKind) -> String {
    format!("{}.bin", kind.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = DataConfig::new("/srv/psl");
        assert_eq!(config.path_for(RuleKind::Common), PathBuf::from("/srv/psl/common.bin"));
        assert_eq!(config.path_for(RuleKind::Negated), PathBuf::from("/srv/psl/negated.bin"));
        assert_eq!(config.path_for(RuleKind::Asterisk), PathBuf::from("/srv/psl/asterisk.bin"));
        assert_eq!(config.manifest_path(), PathBuf::from("/srv/psl/manifest.json"));
    }

    #[test]
    fn test_custom_file_name() {
        let mut config = DataConfig::default();
        config.asterisk_file = "wildcard.bin".to_string();
        assert_eq!(config.path_for(RuleKind::Asterisk), PathBuf::from("data/wildcard.bin"));
    }
}
