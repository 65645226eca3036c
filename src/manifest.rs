//! Build manifest written next to the rule tries.
//!
//! The trie files themselves carry no header. The manifest records where
//! they came from and their SHA-256 so a loader can tell a stale or
//! damaged file apart from a good one.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::rules::{EncodedRules, ParsedRules, RuleKind};

/// Per-file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// File name relative to the data directory
    pub name: String,
    /// Number of distinct rules encoded
    pub rules: usize,
    /// Encoded size in bytes
    pub size: usize,
    /// Lowercase hex SHA-256 of the file
    pub sha256: String,
}

/// Manifest for one generated rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Manifest {
    /// Unix timestamp of generation
    pub generated_at: u64,
    /// Where the rule list came from (path or URL)
    pub source: String,
    /// Entries keyed by rule kind name
    pub files: BTreeMap<String, ManifestFile>,
}

impl Manifest {
    /// Describe freshly encoded rules.
    pub fn build(
        source: impl Into<String>,
        parsed: &ParsedRules,
        encoded: &EncodedRules,
        file_name: impl Fn(RuleKind) -> String,
    ) -> Self {
        let files = RuleKind::ALL
            .iter()
            .map(|&kind| {
                let data = encoded.get(kind);
                let entry = ManifestFile {
                    name: file_name(kind),
                    rules: parsed.count(kind),
                    size: data.len(),
                    sha256: sha256_hex(data),
                };
                (kind.name().to_string(), entry)
            })
            .collect();

        Self {
            generated_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            source: source.into(),
            files,
        }
    }

    /// Entry for `kind`, if recorded.
    pub fn file(&self, kind: RuleKind) -> Option<&ManifestFile> {
        self.files.get(kind.name())
    }

    /// Check `data` against the recorded checksum for `kind`.
    ///
    /// A manifest without an entry for `kind` is an error.
    pub fn verify(&self, kind: RuleKind, data: &[u8]) -> Result<()> {
        let entry = self
            .file(kind)
            .ok_or_else(|| Error::Manifest(format!("no entry for {} rules", kind)))?;
        if entry.sha256 != sha256_hex(data) {
            return Err(Error::ChecksumMismatch {
                file: entry.name.clone(),
            });
        }
        Ok(())
    }

    /// Load a manifest.
    ///
    /// Returns `None` if the file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Save the manifest.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleListParser;
    use tempfile::tempdir;

    fn sample() -> (ParsedRules, EncodedRules) {
        let parsed = RuleListParser::parse_str("com\n*.kobe.jp\n!city.kobe.jp\n").unwrap();
        let encoded = parsed.encode().unwrap();
        (parsed, encoded)
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_manifest_save_load() {
        let (parsed, encoded) = sample();
        let manifest = Manifest::build("test", &parsed, &encoded, |k| format!("{}.bin", k));

        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap().unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.file(RuleKind::Common).unwrap().rules, 1);
        assert_eq!(loaded.file(RuleKind::Asterisk).unwrap().name, "asterisk.bin");
    }

    #[test]
    fn test_manifest_missing_file() {
        assert!(Manifest::load("/nonexistent/manifest.json").unwrap().is_none());
    }

    #[test]
    fn test_verify() {
        let (parsed, encoded) = sample();
        let manifest = Manifest::build("test", &parsed, &encoded, |k| format!("{}.bin", k));

        assert!(manifest.verify(RuleKind::Negated, &encoded.negated).is_ok());
        assert!(matches!(
            manifest.verify(RuleKind::Negated, &encoded.common),
            Err(Error::ChecksumMismatch { .. })
        ));

        let mut partial = manifest.clone();
        partial.files.remove(RuleKind::Common.name());
        assert!(matches!(
            partial.verify(RuleKind::Common, &encoded.common),
            Err(Error::Manifest(_))
        ));
    }
}
