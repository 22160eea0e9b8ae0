/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use viewlingo::app_config::{split_list, Config, LogLevel, MAX_CONCURRENT_REQUESTS};
use viewlingo::language_utils::default_cultures;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_languages, default_cultures());
    assert_eq!(config.translation.max_concurrent_requests, 4);
    assert_eq!(config.translation.max_chunk_length, 1000);
    assert!(config.translation.cache_enabled);
    assert_eq!(config.views.skip_files, vec!["_ViewStart", "_ViewImports"]);
    assert_eq!(config.folder.extensions, vec!["md", "html", "txt"]);
    assert!(config.folder.recursive);
    assert!(!config.folder.skip_existing);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.target_languages = vec![];
    assert!(config.validate().is_err());

    config.target_languages = vec!["fr-FR".to_string(), "qq-ZZ".to_string()];
    assert!(config.validate().is_err());

    config.target_languages = vec!["fr-FR".to_string()];
    assert!(config.validate().is_ok());

    config.translation.max_concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.max_concurrent_requests = MAX_CONCURRENT_REQUESTS + 1;
    assert!(config.validate().is_err());
    config.translation.max_concurrent_requests = MAX_CONCURRENT_REQUESTS;
    assert!(config.validate().is_ok());

    config.translation.max_chunk_length = 0;
    assert!(config.validate().is_err());
    config.translation.max_chunk_length = 10;

    config.folder.extensions = vec![" ".to_string()];
    assert!(config.validate().is_err());
}

/// Partial documents fall back to defaults field by field
#[test]
fn test_from_json_withPartialDocument_shouldFillDefaults() {
    let json = r#"{
        "target_languages": ["de-DE", "ja-JP"],
        "translation": { "max_concurrent_requests": 8 },
        "log_level": "debug"
    }"#;

    let config = Config::from_json(json).unwrap();

    assert_eq!(config.target_languages, vec!["de-DE", "ja-JP"]);
    assert_eq!(config.translation.max_concurrent_requests, 8);
    assert_eq!(config.translation.max_chunk_length, 1000);
    assert!(config.translation.cache_enabled);
    assert_eq!(config.folder.extensions, vec!["md", "html", "txt"]);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_from_json_withInvalidDocument_shouldFail() {
    assert!(Config::from_json("{ not json").is_err());
}

/// A missing file is created with the defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert_eq!(Config::load_or_create(&path).unwrap(), config);
}

#[test]
fn test_save_withCustomValues_shouldRoundTrip() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("custom.json");
    let mut config = Config::default();
    config.target_languages = vec!["ko-KR".to_string()];
    config.folder.skip_existing = true;
    config.log_level = LogLevel::Warn;

    config.save(&path).unwrap();

    assert_eq!(Config::load_or_create(&path).unwrap(), config);
}

#[test]
fn test_log_level_fromStr_withKnownNames_shouldParse() {
    assert_eq!(LogLevel::from_str("ERROR").unwrap(), LogLevel::Error);
    assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
    assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
    assert!(LogLevel::from_str("loud").is_err());
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_split_list_withCulturesAndExtensions_shouldTrimAndDropEmpties() {
    assert_eq!(split_list(" zh-CN, ,ja-JP,"), vec!["zh-CN", "ja-JP"]);
    assert_eq!(split_list("md, .html"), vec!["md", ".html"]);
    assert!(split_list(" , ").is_empty());
}
