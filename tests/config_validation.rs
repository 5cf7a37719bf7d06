//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used)]

use awe::config::{
    CodecConfig, Config, LoggingConfig, HEADER_SIZE, MAX_PACKET_SIZE,
    MAX_REPRESENTABLE_PACKET_SIZE,
};
use awe::error::ProtocolError;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = Config::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert_eq!(config.codec.max_packet_size, MAX_PACKET_SIZE);
}

#[test]
fn test_max_packet_size_below_header() {
    let codec = CodecConfig {
        max_packet_size: HEADER_SIZE - 1,
    };
    let errors = codec.validate();
    assert!(errors.iter().any(|e| e.contains("too small")));
}

#[test]
fn test_max_packet_size_exactly_header_is_valid() {
    let codec = CodecConfig {
        max_packet_size: HEADER_SIZE,
    };
    assert!(codec.validate().is_empty());
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_max_packet_size_above_representable() {
    let codec = CodecConfig {
        max_packet_size: MAX_REPRESENTABLE_PACKET_SIZE as usize + 1,
    };
    let errors = codec.validate();
    assert!(errors.iter().any(|e| e.contains("too large")));
}

#[test]
fn test_empty_app_name() {
    let mut config = Config::default();
    config.logging.app_name = String::new();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be empty")));
}

#[test]
fn test_long_app_name() {
    let logging = LoggingConfig {
        app_name: "x".repeat(65),
        ..LoggingConfig::default()
    };
    assert!(logging.validate().iter().any(|e| e.contains("too long")));
}

#[test]
fn test_validate_strict_collects_all_errors() {
    let mut config = Config::default();
    config.codec.max_packet_size = 0;
    config.logging.app_name = String::new();

    match config.validate_strict() {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("too small"));
            assert!(msg.contains("cannot be empty"));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_from_toml() {
    let config = Config::from_toml(
        r#"
        [codec]
        max_packet_size = 65536

        [logging]
        app_name = "broker"
        log_level = "debug"
        json_format = true
        "#,
    )
    .expect("valid TOML");

    assert_eq!(config.codec.max_packet_size, 65536);
    assert_eq!(config.logging.app_name, "broker");
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);
}

#[test]
fn test_from_toml_rejects_bad_level() {
    let result = Config::from_toml(
        r#"
        [logging]
        app_name = "broker"
        log_level = "loud"
        json_format = false
        "#,
    );
    assert!(matches!(result, Err(ProtocolError::ConfigError(_))));
}

#[test]
fn test_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("awe-config-{}.toml", std::process::id()));

    let mut config = Config::default();
    config.codec.max_packet_size = 1 << 20;
    config.save_to_file(&path).expect("save");

    let loaded = Config::from_file(&path).expect("load");
    std::fs::remove_file(&path).expect("cleanup");

    assert_eq!(loaded.codec, config.codec);
}

#[test]
fn test_missing_file() {
    let result = Config::from_file("/nonexistent/awe.toml");
    assert!(matches!(result, Err(ProtocolError::ConfigError(_))));
}
