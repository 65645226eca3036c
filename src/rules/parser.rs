//! Public suffix list text format parser.

use std::io::{BufRead, BufReader, Read};

use super::{RuleKind, Section};
use crate::trie::SuffixTrieBuilder;
use crate::Result;

/// Marker that switches the rest of the list to private rules.
pub const PRIVATE_SECTION_MARKER: &str = "===BEGIN PRIVATE DOMAINS===";

/// Rules split into their three tries.
#[derive(Debug, Default)]
pub struct ParsedRules {
    pub common: SuffixTrieBuilder,
    pub negated: SuffixTrieBuilder,
    pub asterisk: SuffixTrieBuilder,
}

/// Encoded buffers, one per rule kind.
#[derive(Debug, Clone)]
pub struct EncodedRules {
    pub common: Vec<u8>,
    pub negated: Vec<u8>,
    pub asterisk: Vec<u8>,
}

impl ParsedRules {
    /// Create empty rule tries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule line body (`co.uk`, `!city.kobe.jp`, `*.kobe.jp`).
    ///
    /// The stored suffix is dot-prefixed so lookups can prepend a dot to
    /// the hostname uniformly.
    pub fn add_rule(&mut self, rule: &str, section: Section) {
        let (kind, body) = classify(rule);
        let suffix = format!(".{}", body);
        self.trie_mut(kind).insert(&suffix, section.as_u8());
    }

    /// The trie for `kind`.
    pub fn trie(&self, kind: RuleKind) -> &SuffixTrieBuilder {
        match kind {
            RuleKind::Common => &self.common,
            RuleKind::Negated => &self.negated,
            RuleKind::Asterisk => &self.asterisk,
        }
    }

    fn trie_mut(&mut self, kind: RuleKind) -> &mut SuffixTrieBuilder {
        match kind {
            RuleKind::Common => &mut self.common,
            RuleKind::Negated => &mut self.negated,
            RuleKind::Asterisk => &mut self.asterisk,
        }
    }

    /// Number of distinct rules of `kind`.
    pub fn count(&self, kind: RuleKind) -> usize {
        self.trie(kind).len()
    }

    /// Total number of distinct rules.
    pub fn total(&self) -> usize {
        RuleKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// Encode all three tries.
    pub fn encode(&self) -> Result<EncodedRules> {
        Ok(EncodedRules {
            common: self.common.encode()?,
            negated: self.negated.encode()?,
            asterisk: self.asterisk.encode()?,
        })
    }
}

impl EncodedRules {
    /// The buffer for `kind`.
    pub fn get(&self, kind: RuleKind) -> &[u8] {
        match kind {
            RuleKind::Common => &self.common,
            RuleKind::Negated => &self.negated,
            RuleKind::Asterisk => &self.asterisk,
        }
    }
}

/// Split a rule into its kind and the suffix to store.
fn classify(rule: &str) -> (RuleKind, &str) {
    if let Some(body) = rule.strip_prefix('!') {
        (RuleKind::Negated, body)
    } else if rule.contains('*') {
        (RuleKind::Asterisk, rule.strip_prefix("*.").unwrap_or(rule))
    } else {
        (RuleKind::Common, rule)
    }
}

/// Public suffix list text parser.
///
/// ```text
/// // comment
/// com
/// *.kobe.jp
/// !city.kobe.jp
/// // ===BEGIN PRIVATE DOMAINS===
/// blogspot.com
/// ```
pub struct RuleListParser;

impl RuleListParser {
    /// Parse rules from a reader.
    pub fn parse<R: Read>(reader: R) -> Result<ParsedRules> {
        let mut rules = ParsedRules::new();
        let buf_reader = BufReader::new(reader);
        let mut section = Section::Icann;

        for line in buf_reader.lines() {
            let line = line?;

            // The marker lives inside a comment in the published list.
            if line.contains(PRIVATE_SECTION_MARKER) {
                section = Section::Private;
                continue;
            }

            // Remove comments
            let line = match line.find("//") {
                Some(idx) => &line[..idx],
                None => &line,
            };

            // Only the first token is the rule.
            let rule = match line.split_whitespace().next() {
                Some(rule) => rule,
                None => continue,
            };

            rules.add_rule(rule, section);
        }

        log::debug!(
            "Parsed {} rules: {} common, {} negated, {} asterisk",
            rules.total(),
            rules.count(RuleKind::Common),
            rules.count(RuleKind::Negated),
            rules.count(RuleKind::Asterisk)
        );

        Ok(rules)
    }

    /// Parse rules from a string.
    pub fn parse_str(text: &str) -> Result<ParsedRules> {
        Self::parse(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::SuffixMatcher;

    const LIST: &str = r#"
// ===BEGIN ICANN DOMAINS===
com
co.uk   // inline comment
*.kobe.jp
!city.kobe.jp

// ===END ICANN DOMAINS===
// ===BEGIN PRIVATE DOMAINS===
blogspot.com
*.compute.example
"#;

    #[test]
    fn test_classify() {
        assert_eq!(classify("com"), (RuleKind::Common, "com"));
        assert_eq!(classify("!city.kobe.jp"), (RuleKind::Negated, "city.kobe.jp"));
        assert_eq!(classify("*.kobe.jp"), (RuleKind::Asterisk, "kobe.jp"));
    }

    #[test]
    fn test_parse_counts() {
        let rules = RuleListParser::parse_str(LIST).unwrap();

        assert_eq!(rules.count(RuleKind::Common), 3);
        assert_eq!(rules.count(RuleKind::Negated), 1);
        assert_eq!(rules.count(RuleKind::Asterisk), 2);
        assert_eq!(rules.total(), 6);
    }

    #[test]
    fn test_suffixes_are_dot_prefixed() {
        let rules = RuleListParser::parse_str(LIST).unwrap();

        let found = rules.common.find_longest_suffix(".www.example.co.uk").unwrap();
        assert_eq!(found.suffix, ".co.uk");

        let found = rules.negated.find_longest_suffix(".city.kobe.jp").unwrap();
        assert_eq!(found.suffix, ".city.kobe.jp");

        let found = rules.asterisk.find_longest_suffix("c.kobe.jp").unwrap();
        assert_eq!(found.suffix, ".kobe.jp");
    }

    #[test]
    fn test_private_section_tagging() {
        let rules = RuleListParser::parse_str(LIST).unwrap();

        let icann = rules.common.find_longest_suffix(".example.com").unwrap();
        assert_eq!(icann.tag, Section::Icann.as_u8());

        let private = rules.common.find_longest_suffix(".me.blogspot.com").unwrap();
        assert_eq!(private.suffix, ".blogspot.com");
        assert_eq!(private.tag, Section::Private.as_u8());

        let private = rules.asterisk.find_longest_suffix("a.compute.example").unwrap();
        assert_eq!(private.tag, Section::Private.as_u8());
    }

    #[test]
    fn test_encode_all() {
        let rules = RuleListParser::parse_str(LIST).unwrap();
        let encoded = rules.encode().unwrap();

        for kind in RuleKind::ALL {
            assert!(!encoded.get(kind).is_empty());
        }
    }
}
