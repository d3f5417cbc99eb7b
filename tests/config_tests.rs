//! tests/config_tests.rs

use std::path::Path;

use checkmygrade::consts::{DEFAULT_CIPHER_KEY, DEFAULT_SYNTHETIC_STUDENTS};
use checkmygrade::{Config, CoreError};

#[test]
fn empty_toml_gives_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.paths.data_dir, Path::new("."));
    assert_eq!(config.cipher.key, DEFAULT_CIPHER_KEY);
    assert!(config.features.autosave);
    assert!(!config.features.strict_course_refs);
    assert_eq!(config.selftest.synthetic_students, DEFAULT_SYNTHETIC_STUDENTS);
    assert_eq!(config.selftest.rng_seed, None);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = Config::from_toml_str(
        r#"
        [paths]
        data_dir = "/tmp/grades"

        [features]
        strict_course_refs = true

        [selftest]
        rng_seed = 7
        "#,
    )
    .unwrap();
    assert_eq!(config.paths.data_dir, Path::new("/tmp/grades"));
    assert!(config.features.strict_course_refs);
    assert!(config.features.autosave);
    assert_eq!(config.selftest.rng_seed, Some(7));
    assert_eq!(config.cipher.key, DEFAULT_CIPHER_KEY);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let err = Config::from_toml_str("[features]\nautosave = \"yes\"").unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn from_path_reads_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkmygrade.toml");
    std::fs::write(&path, "[cipher]\nkey = \"another-key\"\n").unwrap();
    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.cipher.key, "another-key");
}
