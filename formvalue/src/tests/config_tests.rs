//! Tests for validator configuration.

use proptest::prelude::*;

use crate::config::{
    ConfigValidationError, ValidatorConfig, DEFAULT_MAX_CONTENT_BYTES, DEFAULT_MAX_TABLE_DEPTH,
};

#[test]
fn test_default_config_is_valid() {
    let config = ValidatorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_table_depth, DEFAULT_MAX_TABLE_DEPTH);
    assert_eq!(config.max_content_bytes, DEFAULT_MAX_CONTENT_BYTES);
}

#[test]
fn test_builders_set_fields() {
    let config = ValidatorConfig::new()
        .with_max_table_depth(8)
        .with_max_content_bytes(256 * 1024);
    assert_eq!(config.max_table_depth, 8);
    assert_eq!(config.max_content_bytes, 256 * 1024);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_depth_rejected() {
    let config = ValidatorConfig::default().with_max_table_depth(0);
    assert_eq!(
        config.validate(),
        Err(ConfigValidationError::InvalidMaxTableDepth)
    );
}

#[test]
fn test_zero_content_size_rejected() {
    let config = ValidatorConfig::default().with_max_content_bytes(0);
    assert_eq!(
        config.validate(),
        Err(ConfigValidationError::InvalidMaxContentBytes)
    );
}

#[test]
fn test_config_serde_round_trip() {
    let config = ValidatorConfig::new().with_max_table_depth(4);
    let text = serde_json::to_string(&config).unwrap();
    let back: ValidatorConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
}

proptest! {
    /// Any configuration with non-zero caps validates.
    #[test]
    fn prop_non_zero_caps_are_valid(depth in 1usize..10_000, bytes in 1usize..100_000_000) {
        let config = ValidatorConfig::new()
            .with_max_table_depth(depth)
            .with_max_content_bytes(bytes);
        prop_assert!(config.validate().is_ok());
    }
}
