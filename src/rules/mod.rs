//! Rule categories and the public suffix list text parser.

mod fetch;
mod parser;

pub use fetch::{download_list, read_list_file};
pub use parser::{EncodedRules, ParsedRules, RuleListParser, PRIVATE_SECTION_MARKER};

use std::fmt;

/// Which part of the list a rule came from. Stored as the trie tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Section {
    /// ICANN-managed suffix
    #[default]
    Icann = 0,
    /// Privately managed suffix
    Private = 1,
}

impl Section {
    /// Convert from a tag byte.
    ///
    /// Returns `None` for invalid values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Section::Icann),
            1 => Some(Section::Private),
            _ => None,
        }
    }

    /// Convert to a tag byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a trie tag denotes an ICANN rule.
    pub fn is_icann_tag(tag: u8) -> bool {
        tag == Section::Icann.as_u8()
    }
}

/// The three disjoint rule categories, each persisted as its own trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Ordinary suffix (`co.uk`)
    Common,
    /// Exception rule (`!city.kobe.jp`)
    Negated,
    /// Wildcard rule (`*.kobe.jp`)
    Asterisk,
}

impl RuleKind {
    /// All kinds, in file order.
    pub const ALL: [RuleKind; 3] = [RuleKind::Common, RuleKind::Negated, RuleKind::Asterisk];

    /// Lowercase name, also the default file stem.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Common => "common",
            RuleKind::Negated => "negated",
            RuleKind::Asterisk => "asterisk",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_u8() {
        assert_eq!(Section::from_u8(0), Some(Section::Icann));
        assert_eq!(Section::from_u8(1), Some(Section::Private));
        assert_eq!(Section::from_u8(2), None);
    }

    #[test]
    fn test_icann_tag() {
        assert!(Section::is_icann_tag(0));
        assert!(!Section::is_icann_tag(1));
        assert!(!Section::is_icann_tag(2));
    }

    #[test]
    fn test_rule_kind_display() {
        assert_eq!(RuleKind::Common.to_string(), "common");
        assert_eq!(RuleKind::Negated.to_string(), "negated");
        assert_eq!(RuleKind::Asterisk.to_string(), "asterisk");
    }
}
