//! Public suffix resolution over the three rule tries.

use memmap2::Mmap;

use crate::config::DataConfig;
use crate::manifest::Manifest;
use crate::rules::{EncodedRules, ParsedRules, RuleKind, Section};
use crate::trie::{CompactTrie, SuffixMatcher, SuffixTrieBuilder};
use crate::{Error, Result};

/// The public suffix of a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicSuffix<'a> {
    /// Tail of the queried hostname, without a leading dot.
    pub suffix: &'a str,
    /// Whether the deciding rule is in the ICANN section.
    pub icann: bool,
}

/// Rule set loaded from memory-mapped files.
pub type MappedSuffixList = PublicSuffixList<CompactTrie<Mmap>>;

/// Resolves public suffixes and registrable domains.
///
/// Holds one trie per rule kind. Lookups borrow the hostname, touch only
/// immutable data, and never fail: a hostname with no matching rule
/// falls back to its last label.
///
/// Hostnames must already be lowercase ASCII (punycode for IDN labels);
/// nothing is normalized here.
///
/// # Example
///
/// ```
/// use pubsuffix::rules::RuleListParser;
/// use pubsuffix::PublicSuffixList;
///
/// let rules = RuleListParser::parse_str("uk\nco.uk\n").unwrap();
/// let list = PublicSuffixList::from_encoded(rules.encode().unwrap());
///
/// let found = list.parse_public_suffix("www.example.co.uk").unwrap();
/// assert_eq!(found.suffix, "co.uk");
/// assert!(found.icann);
/// assert_eq!(
///     list.effective_tld_plus_one("www.example.co.uk").as_deref(),
///     Some("example.co.uk")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PublicSuffixList<M> {
    common: M,
    negated: M,
    asterisk: M,
}

impl<M: SuffixMatcher> PublicSuffixList<M> {
    /// Assemble a list from its three tries.
    pub fn new(common: M, negated: M, asterisk: M) -> Self {
        Self {
            common,
            negated,
            asterisk,
        }
    }

    /// The trie holding rules of `kind`.
    pub fn trie(&self, kind: RuleKind) -> &M {
        match kind {
            RuleKind::Common => &self.common,
            RuleKind::Negated => &self.negated,
            RuleKind::Asterisk => &self.asterisk,
        }
    }

    /// Public suffix of `hostname`, or `None` for an empty hostname.
    ///
    /// Precedence:
    /// 1. a wildcard rule matching the raw hostname, narrowed by any
    ///    exception rule;
    /// 2. the longest ordinary rule;
    /// 3. a wildcard rule with at least one label in front of it;
    /// 4. the last label, flagged as non-ICANN.
    pub fn parse_public_suffix<'h>(&self, hostname: &'h str) -> Option<PublicSuffix<'h>> {
        if let Some(wild) = self.asterisk.find_longest_suffix(hostname) {
            let icann = Section::is_icann_tag(wild.tag);

            if self.negated.find_longest_dotted_suffix(hostname).is_none() {
                let suffix = closest_next_domain(hostname, wild.suffix).unwrap_or(hostname);
                return Some(PublicSuffix { suffix, icann });
            }

            let suffix = wild.suffix.strip_prefix('.').unwrap_or(wild.suffix);
            return Some(PublicSuffix { suffix, icann });
        }

        if let Some(common) = self.common.find_longest_dotted_suffix(hostname) {
            return Some(PublicSuffix {
                suffix: common.suffix,
                icann: Section::is_icann_tag(common.tag),
            });
        }

        if let Some(wild) = self.asterisk.find_longest_dotted_suffix(hostname) {
            if label_count(hostname) > label_count(wild.suffix) {
                return Some(PublicSuffix {
                    suffix: wild.suffix,
                    icann: Section::is_icann_tag(wild.tag),
                });
            }
        }

        if hostname.is_empty() {
            return None;
        }

        let tld = match hostname.rfind('.') {
            Some(idx) => &hostname[idx + 1..],
            None => hostname,
        };
        Some(PublicSuffix {
            suffix: tld,
            icann: false,
        })
    }

    /// Registrable domain (eTLD+1) of `hostname`.
    ///
    /// `None` when the hostname is itself a public suffix or no label
    /// precedes the suffix.
    pub fn effective_tld_plus_one(&self, hostname: &str) -> Option<String> {
        let public = self.parse_public_suffix(hostname)?;
        if public.suffix == hostname {
            return None;
        }

        let rest = hostname.strip_suffix(public.suffix)?;
        let label = rest.rsplit('.').find(|label| !label.is_empty())?;
        Some(format!("{}.{}", label, public.suffix))
    }
}

/// The hostname tail exactly one label deeper than `suffix`.
///
/// `suffix` is a dot-prefixed tail of `hostname`. Returns `None` when no
/// label boundary exists in front of it: the hostname is no longer than
/// the suffix, the part in front has no dot, or that dot is its last
/// character.
pub fn closest_next_domain<'h>(hostname: &'h str, suffix: &str) -> Option<&'h str> {
    if hostname.len() <= suffix.len() {
        return None;
    }

    let prefix = hostname.strip_suffix(suffix)?;
    let dot = prefix.rfind('.')?;
    if dot + 1 == prefix.len() {
        return None;
    }

    Some(&hostname[dot + 1..])
}

fn label_count(name: &str) -> usize {
    name.split('.').count()
}

impl<B: AsRef<[u8]>> PublicSuffixList<CompactTrie<B>> {
    /// Wrap three encoded buffers (trusted, not validated).
    pub fn from_buffers(common: B, negated: B, asterisk: B) -> Self {
        Self::new(
            CompactTrie::decode(common),
            CompactTrie::decode(negated),
            CompactTrie::decode(asterisk),
        )
    }

    /// Structurally validate all three tries.
    pub fn validate(&self) -> Result<()> {
        for kind in RuleKind::ALL {
            self.trie(kind).validate()?;
        }
        Ok(())
    }
}

impl PublicSuffixList<CompactTrie> {
    /// Use freshly encoded rules directly.
    pub fn from_encoded(encoded: EncodedRules) -> Self {
        Self::from_buffers(encoded.common, encoded.negated, encoded.asterisk)
    }
}

impl PublicSuffixList<SuffixTrieBuilder> {
    /// Query parsed rules without encoding them.
    pub fn from_parsed(parsed: ParsedRules) -> Self {
        Self::new(parsed.common, parsed.negated, parsed.asterisk)
    }
}

impl MappedSuffixList {
    /// Memory-map the three rule files named by `config`.
    ///
    /// Every file must exist. When a manifest sits next to them, each file
    /// must match its recorded checksum.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let manifest = Manifest::load(config.manifest_path())?;
        if manifest.is_none() {
            log::debug!("No manifest in {:?}, skipping checksums", config.data_dir);
        }

        let open = |kind: RuleKind| -> Result<CompactTrie<Mmap>> {
            let path = config.path_for(kind);
            if !path.is_file() {
                return Err(Error::MissingRuleFile(path));
            }
            let trie = CompactTrie::open(&path)?;
            if let Some(manifest) = &manifest {
                manifest.verify(kind, trie.as_bytes())?;
            }
            Ok(trie)
        };

        let list = Self::new(
            open(RuleKind::Common)?,
            open(RuleKind::Negated)?,
            open(RuleKind::Asterisk)?,
        );

        log::info!(
            "Loaded public suffix data from {:?} ({} + {} + {} bytes)",
            config.data_dir,
            list.common.len(),
            list.negated.len(),
            list.asterisk.len()
        );

        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleListParser;

    const LIST: &str = "\
// ===BEGIN ICANN DOMAINS===
com
uk
co.uk
jp
*.kobe.jp
!city.kobe.jp
*.bd
// ===END ICANN DOMAINS===
// ===BEGIN PRIVATE DOMAINS===
blogspot.com
*.compute.example
";

    fn compact() -> PublicSuffixList<CompactTrie> {
        let rules = RuleListParser::parse_str(LIST).unwrap();
        PublicSuffixList::from_encoded(rules.encode().unwrap())
    }

    fn mutable() -> PublicSuffixList<SuffixTrieBuilder> {
        PublicSuffixList::from_parsed(RuleListParser::parse_str(LIST).unwrap())
    }

    fn ps(suffix: &str, icann: bool) -> Option<PublicSuffix<'_>> {
        Some(PublicSuffix { suffix, icann })
    }

    #[test]
    fn test_closest_next_domain() {
        assert_eq!(closest_next_domain("a.b.kobe.jp", ".kobe.jp"), Some("b.kobe.jp"));
        assert_eq!(closest_next_domain("c.kobe.jp", ".kobe.jp"), None);
        assert_eq!(closest_next_domain("a..kobe.jp", ".kobe.jp"), None);
        assert_eq!(closest_next_domain(".kobe.jp", ".kobe.jp"), None);
        assert_eq!(closest_next_domain("jp", ".kobe.jp"), None);
    }

    #[test]
    fn test_common_rules() {
        let list = compact();
        assert_eq!(list.parse_public_suffix("example.com"), ps("com", true));
        assert_eq!(list.parse_public_suffix("www.example.co.uk"), ps("co.uk", true));
        assert_eq!(list.parse_public_suffix("co.uk"), ps("co.uk", true));
    }

    #[test]
    fn test_private_rule() {
        let list = compact();
        assert_eq!(list.parse_public_suffix("me.blogspot.com"), ps("blogspot.com", false));
        assert_eq!(list.parse_public_suffix("a.b.compute.example"), ps("b.compute.example", false));
    }

    #[test]
    fn test_wildcard_and_exception() {
        let list = compact();
        assert_eq!(list.parse_public_suffix("city.kobe.jp"), ps("kobe.jp", true));
        assert_eq!(list.parse_public_suffix("www.city.kobe.jp"), ps("kobe.jp", true));
        assert_eq!(list.parse_public_suffix("c.kobe.jp"), ps("c.kobe.jp", true));
        assert_eq!(list.parse_public_suffix("a.c.kobe.jp"), ps("c.kobe.jp", true));
        assert_eq!(list.parse_public_suffix("kobe.jp"), ps("jp", true));
    }

    #[test]
    fn test_wildcard_tld() {
        let list = compact();
        assert_eq!(list.parse_public_suffix("bd"), ps("bd", false));
        assert_eq!(list.parse_public_suffix("zzz.bd"), ps("zzz.bd", true));
        assert_eq!(list.parse_public_suffix("www.zzz.bd"), ps("zzz.bd", true));
    }

    #[test]
    fn test_fallback_to_last_label() {
        let list = compact();
        assert_eq!(list.parse_public_suffix(""), None);
        assert_eq!(list.parse_public_suffix("cromulent"), ps("cromulent", false));
        assert_eq!(list.parse_public_suffix("example.cromulent"), ps("cromulent", false));
    }

    #[test]
    fn test_effective_tld_plus_one() {
        let list = compact();
        assert_eq!(
            list.effective_tld_plus_one("sub.www.example.co.uk").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(list.effective_tld_plus_one("example.com").as_deref(), Some("example.com"));
        assert_eq!(list.effective_tld_plus_one("a.city.kobe.jp").as_deref(), Some("city.kobe.jp"));
        assert_eq!(list.effective_tld_plus_one("x.zzz.bd").as_deref(), Some("x.zzz.bd"));
        assert_eq!(list.effective_tld_plus_one("co.uk"), None);
        assert_eq!(list.effective_tld_plus_one("com"), None);
        assert_eq!(list.effective_tld_plus_one("c.kobe.jp"), None);
        assert_eq!(list.effective_tld_plus_one(""), None);
    }

    #[test]
    fn test_effective_tld_plus_one_skips_empty_labels() {
        let list = compact();
        assert_eq!(list.effective_tld_plus_one("example..com").as_deref(), Some("example.com"));
        assert_eq!(list.effective_tld_plus_one(".com"), None);
    }

    #[test]
    fn test_mutable_and_compact_agree() {
        let compact = compact();
        let mutable = mutable();

        for host in [
            "",
            "com",
            "example.com",
            "me.blogspot.com",
            "www.example.co.uk",
            "city.kobe.jp",
            "c.kobe.jp",
            "a.b.c.kobe.jp",
            "bd",
            "zzz.bd",
            "cromulent",
            "x.y.compute.example",
        ] {
            assert_eq!(
                compact.parse_public_suffix(host),
                mutable.parse_public_suffix(host),
                "{}",
                host
            );
        }
    }
}
