//! Run configuration.
//!
//! Loaded from a TOML file given on the command line or through
//! `$SPAM_FEATURES_CONFIG`; every field falls back to a built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::nlp::DEFAULT_SUSPICIOUS_WORDS;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "SPAM_FEATURES_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of spam emails, one message per file.
    pub spam_dir: PathBuf,
    /// Directory of ham emails, one message per file.
    pub ham_dir: PathBuf,
    /// Destination of the feature table.
    pub output: PathBuf,
    /// Linguistic resources for the extractor.
    pub extractor: ExtractorConfig,
}

/// Linguistic resources for the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Spam-indicative lexicon, matched per token.
    pub suspicious_words: Vec<String>,
    /// Stop-word list to load: "english", "en-iso", "german", ...
    pub stop_word_language: String,
    /// Words removed in addition to the language list.
    pub extra_stop_words: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spam_dir: PathBuf::from("raw_data/spam_emails"),
            ham_dir: PathBuf::from("raw_data/ham_emails"),
            output: PathBuf::from("processed_emails.csv"),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            suspicious_words: DEFAULT_SUSPICIOUS_WORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            stop_word_language: "english".to_string(),
            extra_stop_words: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FeatureError::Config(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FeatureError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Resolve the configuration file: explicit path, then `$SPAM_FEATURES_CONFIG`,
    /// then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}
