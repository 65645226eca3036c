//! Longest-suffix matching shared by the mutable and compact tries.

/// A suffix found at the end of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch<'a> {
    /// The matched bytes, always a tail of the query text.
    pub suffix: &'a str,
    /// Tag stored with the rule.
    pub tag: u8,
}

/// A trie keyed by reversed suffix bytes.
///
/// Implementors only describe how to step through their nodes; the walk
/// itself lives in [`longest_match`](Self::longest_match) so the mutable
/// builder and the compact buffer answer every query the same way.
pub trait SuffixMatcher {
    /// Node handle (an arena index or a buffer offset).
    type Node: Copy;

    /// The root node, or `None` for an empty/unreadable trie.
    fn root(&self) -> Option<Self::Node>;

    /// Follow the edge labelled `label` out of `node`.
    fn child(&self, node: Self::Node, label: u8) -> Option<Self::Node>;

    /// Tag of `node` if a suffix ends there.
    fn terminal_tag(&self, node: Self::Node) -> Option<u8>;

    /// Walk `reversed` (query bytes, last byte first) and return how many
    /// bytes led to the deepest end-of-suffix node reached, with its tag.
    ///
    /// The walk follows a single path and stops at the first byte with no
    /// matching edge.
    fn longest_match<I>(&self, reversed: I) -> Option<(usize, u8)>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut node = self.root()?;
        let mut best = self.terminal_tag(node).map(|tag| (0, tag));

        for (consumed, byte) in reversed.into_iter().enumerate() {
            node = match self.child(node, byte) {
                Some(next) => next,
                None => break,
            };
            if let Some(tag) = self.terminal_tag(node) {
                best = Some((consumed + 1, tag));
            }
        }

        best
    }

    /// Byte length and tag of the longest stored suffix of `text`.
    fn find_longest_suffix_bytes(&self, text: &[u8]) -> Option<(usize, u8)> {
        self.longest_match(text.iter().rev().copied())
    }

    /// Longest stored suffix of `text`, as a slice of `text`.
    fn find_longest_suffix<'t>(&self, text: &'t str) -> Option<SuffixMatch<'t>> {
        let (len, tag) = self.find_longest_suffix_bytes(text.as_bytes())?;
        // Stored suffixes are whole strings, so a match always starts on a
        // char boundary; `get` only fails on a corrupt trie.
        let suffix = text.get(text.len() - len..)?;
        Some(SuffixMatch { suffix, tag })
    }

    /// Longest stored suffix of `"." + text`, with that leading byte
    /// dropped from the result.
    ///
    /// Rule suffixes are stored dot-prefixed, so this is the lookup used
    /// for whole hostnames. The dotted string is never built.
    fn find_longest_dotted_suffix<'t>(&self, text: &'t str) -> Option<SuffixMatch<'t>> {
        let bytes = text.as_bytes();
        let reversed = bytes.iter().rev().copied().chain(std::iter::once(b'.'));
        let (len, tag) = self.longest_match(reversed)?;
        let start = (bytes.len() + 1).saturating_sub(len).min(bytes.len());
        let suffix = text.get(start..)?;
        Some(SuffixMatch { suffix, tag })
    }
}

impl<M: SuffixMatcher + ?Sized> SuffixMatcher for &M {
    type Node = M::Node;

    fn root(&self) -> Option<Self::Node> {
        (**self).root()
    }

    fn child(&self, node: Self::Node, label: u8) -> Option<Self::Node> {
        (**self).child(node, label)
    }

    fn terminal_tag(&self, node: Self::Node) -> Option<u8> {
        (**self).terminal_tag(node)
    }
}
