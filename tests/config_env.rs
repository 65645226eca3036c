//! Data directory selection from the environment. Kept in its own test
//! binary since it mutates process environment.

use pubsuffix::config::{DATA_DIR_ENV, DEFAULT_DATA_DIR};
use pubsuffix::{DataConfig, RuleKind};
use std::path::PathBuf;

#[test]
fn test_data_dir_from_env() {
    std::env::set_var(DATA_DIR_ENV, "/srv/psl");
    let config = DataConfig::from_env();
    assert_eq!(config.data_dir, PathBuf::from("/srv/psl"));
    assert_eq!(config.path_for(RuleKind::Common), PathBuf::from("/srv/psl/common.bin"));

    std::env::set_var(DATA_DIR_ENV, "");
    assert_eq!(DataConfig::from_env().data_dir, PathBuf::from(DEFAULT_DATA_DIR));

    std::env::remove_var(DATA_DIR_ENV);
    assert_eq!(DataConfig::from_env(), DataConfig::default());
}
