use std::fs;
use std::path::PathBuf;

use ktlint_hook::config::{
    find_config_file, get_config, load_config, parse_config, parse_version, Configuration,
    RawConfig,
};
use ktlint_hook::constants::CONFIG_FILES;
use ktlint_hook::error::Error;
use ktlint_hook::ktlint::{CodeStyle, ErrorLimit, ProjectType};
use semver::Version;
use tempfile::TempDir;

fn raw(version: &str) -> RawConfig {
    RawConfig {
        version: Some(version.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_defaults() {
    let config = Configuration::try_from(raw("1.0.1")).unwrap();

    assert_eq!(config.ktlint_version, Version::new(1, 0, 1));
    assert_eq!(config.options.code_style, CodeStyle::Default);
    assert_eq!(config.options.error_limit, ErrorLimit::None);
    assert!(!config.options.experimental);
    assert_eq!(config.options.project_type, ProjectType::Other);
    assert!(config.classpath.is_empty());
    assert_eq!(config.main_class, None);
}

#[test]
fn test_missing_version() {
    match Configuration::try_from(RawConfig::default()) {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("No ktlint version")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_version_with_leading_v() {
    match parse_version("v1.0.1") {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("\"1.0.1\"")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_invalid_version() {
    for version in ["", "1.0", "latest", "vv1.0.0"] {
        match parse_version(version) {
            Err(Error::ConfigError(msg)) => assert!(msg.contains("github.com/pinterest/ktlint")),
            other => panic!("Expected ConfigError for {version:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_negative_limit() {
    let config = RawConfig {
        limit: Some(-1),
        ..raw("1.0.0")
    };
    assert!(matches!(Configuration::try_from(config), Err(Error::ConfigError(_))));
}

#[test]
fn test_zero_limit() {
    let config = RawConfig {
        limit: Some(0),
        ..raw("1.0.0")
    };
    assert_eq!(
        Configuration::try_from(config).unwrap().options.error_limit,
        ErrorLimit::Max(0)
    );
}

#[test]
fn test_android_and_code_style_are_both_kept() {
    let config = RawConfig {
        android: Some(true),
        code_style: Some("ktlint_official".to_string()),
        ..raw("1.0.0")
    };
    let config = Configuration::try_from(config).unwrap();

    assert_eq!(config.options.project_type, ProjectType::Android);
    assert_eq!(
        config.options.code_style,
        CodeStyle::Specific("ktlint_official".to_string())
    );
}

#[test]
fn test_parse_json_config() {
    let config = parse_config(
        r#"{"version": "0.50.0", "limit": 5, "experimental": true, "classpath": ["ktlint.jar"]}"#,
    )
    .unwrap();

    assert_eq!(config.version.as_deref(), Some("0.50.0"));
    assert_eq!(config.limit, Some(5));
    assert_eq!(config.experimental, Some(true));
    assert_eq!(config.classpath, Some(vec![PathBuf::from("ktlint.jar")]));
}

#[test]
fn test_parse_yaml_config() {
    let config = parse_config("version: 1.0.1\ncode_style: android_studio\n").unwrap();

    assert_eq!(config.version.as_deref(), Some("1.0.1"));
    assert_eq!(config.code_style.as_deref(), Some("android_studio"));
}

#[test]
fn test_parse_config_rejects_unknown_keys() {
    assert!(matches!(
        parse_config("version: 1.0.1\nunknown: true\n"),
        Err(Error::ConfigError(_))
    ));
}

#[test]
fn test_find_config_file() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(find_config_file(temp_dir.path(), &CONFIG_FILES), None);

    fs::write(temp_dir.path().join("ktlint-hook.yaml"), "version: 1.0.0\n").unwrap();
    fs::write(temp_dir.path().join("ktlint-hook.yml"), "version: 1.0.0\n").unwrap();

    assert_eq!(
        find_config_file(temp_dir.path(), &CONFIG_FILES),
        Some(temp_dir.path().join("ktlint-hook.yml"))
    );
}

#[test]
fn test_load_config_resolves_classpath_relative_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ktlint-hook.json");
    fs::write(
        &config_path,
        r#"{"version": "1.0.0", "classpath": ["lib/ktlint.jar", "/opt/ktlint/extra.jar"]}"#,
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();

    assert_eq!(
        config.classpath,
        Some(vec![
            temp_dir.path().join("lib/ktlint.jar"),
            PathBuf::from("/opt/ktlint/extra.jar"),
        ])
    );
}

#[test]
fn test_get_config_command_line_wins() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ktlint-hook.yml");
    fs::write(&config_path, "version: 0.50.0\nlimit: 3\nandroid: true\n").unwrap();

    let overrides = RawConfig {
        version: Some("1.0.0".to_string()),
        ..Default::default()
    };
    let config = get_config(Some(&config_path), overrides).unwrap();

    assert_eq!(config.ktlint_version, Version::new(1, 0, 0));
    assert_eq!(config.options.error_limit, ErrorLimit::Max(3));
    assert_eq!(config.options.project_type, ProjectType::Android);
}

#[test]
fn test_get_config_without_file() {
    let config = get_config(None, raw("0.48.2")).unwrap();
    assert_eq!(config.ktlint_version, Version::new(0, 48, 2));
}

#[test]
fn test_version_below_minimum_is_rejected() {
    match Configuration::try_from(raw("0.47.1")) {
        Err(Error::ConfigError(msg)) => {
            assert!(msg.contains("0.47.1"));
            assert!(msg.contains("minimum supported ktlint version (0.48.0)"));
        }
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let config = RawConfig {
        android: Some(true),
        ..raw("0.47.1")
    };
    assert!(matches!(get_config(None, config), Err(Error::ConfigError(_))));
}

#[test]
fn test_minimum_version_is_accepted() {
    let config = Configuration::try_from(raw("0.48.0")).unwrap();
    assert_eq!(config.ktlint_version, Version::new(0, 48, 0));
}

#[test]
fn test_limit_messages() {
    let negative = RawConfig {
        limit: Some(-5),
        ..raw("1.0.0")
    };
    match Configuration::try_from(negative) {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("non-negative")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let too_large = RawConfig {
        limit: Some(5_000_000_000),
        ..raw("1.0.0")
    };
    match Configuration::try_from(too_large) {
        Err(Error::ConfigError(msg)) => {
            assert!(msg.contains("5000000000"));
            assert!(msg.contains("too large"));
            assert!(!msg.contains("non-negative"));
        }
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let largest = RawConfig {
        limit: Some(i64::from(u32::MAX)),
        ..raw("1.0.0")
    };
    assert_eq!(
        Configuration::try_from(largest).unwrap().options.error_limit,
        ErrorLimit::Max(u32::MAX)
    );
}
