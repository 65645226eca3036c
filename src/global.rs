//! Process-wide rule set and the free-function query API.

use once_cell::sync::OnceCell;

use crate::config::DataConfig;
use crate::error::Result;
use crate::list::{MappedSuffixList, PublicSuffix};

/// Global rule set, loaded at most once.
static GLOBAL_LIST: OnceCell<MappedSuffixList> = OnceCell::new();

/// Load the global rule set from `config`.
///
/// Only the first successful call loads anything; later calls are no-ops
/// and keep the rules already in place.
pub fn init(config: &DataConfig) -> Result<()> {
    GLOBAL_LIST
        .get_or_try_init(|| MappedSuffixList::load(config))
        .map(|_| ())
}

/// Check if the global rule set is loaded.
pub fn is_initialized() -> bool {
    GLOBAL_LIST.get().is_some()
}

/// The global rule set, loading it from [`DataConfig::from_env`] on first
/// use.
///
/// # Panics
///
/// Panics if the rule files cannot be loaded. Without them no query can
/// be answered correctly, so there is nothing to fall back to.
pub fn global_list() -> &'static MappedSuffixList {
    match GLOBAL_LIST.get_or_try_init(|| MappedSuffixList::load(&DataConfig::from_env())) {
        Ok(list) => list,
        Err(e) => {
            log::error!("Failed to load public suffix data: {}", e);
            panic!("public suffix data unavailable: {}", e);
        }
    }
}

/// Public suffix of `hostname` using the global rule set.
///
/// See [`PublicSuffixList::parse_public_suffix`](crate::PublicSuffixList::parse_public_suffix).
pub fn parse_public_suffix(hostname: &str) -> Option<PublicSuffix<'_>> {
    global_list().parse_public_suffix(hostname)
}

/// Registrable domain of `hostname` using the global rule set.
///
/// # Examples
/// ```ignore
/// use pubsuffix::effective_tld_plus_one;
///
/// assert_eq!(effective_tld_plus_one("www.example.co.uk").as_deref(), Some("example.co.uk"));
/// ```
pub fn effective_tld_plus_one(hostname: &str) -> Option<String> {
    global_list().effective_tld_plus_one(hostname)
}
