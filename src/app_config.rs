use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::Path;

use crate::language_utils::{default_cultures, validate_culture_code};

/// Application configuration module
///
/// This module handles loading, validating and saving the JSON
/// configuration shared by every command.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Cultures to generate resource stores for
    #[serde(default = "default_cultures")]
    pub target_languages: Vec<String>,

    /// Translation settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// View discovery settings
    #[serde(default)]
    pub views: ViewsConfig,

    /// Folder translation settings
    #[serde(default)]
    pub folder: FolderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    // @field: Keys translated at the same time for one file
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    // @field: Character budget per translated chunk
    #[serde(default = "default_max_chunk_length")]
    pub max_chunk_length: usize,

    // @field: Memoize translations within a run
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent_requests(),
            max_chunk_length: default_max_chunk_length(),
            cache_enabled: default_true(),
        }
    }
}

/// View discovery settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ViewsConfig {
    // @field: File name fragments of views that are never localized
    #[serde(default = "default_skip_files")]
    pub skip_files: Vec<String>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self { skip_files: default_skip_files() }
    }
}

/// Folder translation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FolderConfig {
    // @field: Extensions of files to translate, without dot
    #[serde(default = "default_folder_extensions")]
    pub extensions: Vec<String>,

    // @field: Descend into subfolders
    #[serde(default = "default_true")]
    pub recursive: bool,

    // @field: Leave existing destination files alone
    #[serde(default)]
    pub skip_existing: bool,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            extensions: default_folder_extensions(),
            recursive: default_true(),
            skip_existing: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

/// Upper bound for `max_concurrent_requests`
pub const MAX_CONCURRENT_REQUESTS: usize = 16;

/// Split a comma-separated override value, trimming entries and dropping empties
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.to_string())
        .collect()
}

fn default_max_concurrent_requests() -> usize {
    4
}

fn default_max_chunk_length() -> usize {
    crate::shredder::DEFAULT_MAX_LENGTH
}

fn default_true() -> bool {
    true
}

fn default_skip_files() -> Vec<String> {
    vec!["_ViewStart".to_string(), "_ViewImports".to_string()]
}

fn default_folder_extensions() -> Vec<String> {
    vec!["md".to_string(), "html".to_string(), "txt".to_string()]
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }
        for language in &self.target_languages {
            validate_culture_code(language)?;
        }

        let concurrency = self.translation.max_concurrent_requests;
        if !(1..=MAX_CONCURRENT_REQUESTS).contains(&concurrency) {
            return Err(anyhow!(
                "max_concurrent_requests must be between 1 and {}, got {}",
                MAX_CONCURRENT_REQUESTS,
                concurrency
            ));
        }

        if self.translation.max_chunk_length == 0 {
            return Err(anyhow!("max_chunk_length must be greater than 0"));
        }

        if self.folder.extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(anyhow!("At least one folder extension is required"));
        }

        Ok(())
    }

    /// Parse a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration")
    }

    /// Load the configuration, writing a default one when the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            return Self::from_json(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()));
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_languages: default_cultures(),
            translation: TranslationConfig::default(),
            views: ViewsConfig::default(),
            folder: FolderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
