use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LexiconError;

#[cfg(test)]
mod tests;

/// Top-level lexicon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub bundles: BundlesConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Which language to render and what to do when a key is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Active language (e.g. "pt", "ptBr", "en").
    #[serde(default = "default_language")]
    pub language: String,
    /// Bundle consulted when the active one lacks a key or does not exist.
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default)]
    pub missing_key: MissingKeyPolicy,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            default_language: default_language(),
            missing_key: MissingKeyPolicy::default(),
        }
    }
}

/// Extra bundle documents and validation strictness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundlesConfig {
    /// JSON documents merged after the built-in ones, in order.
    #[serde(default)]
    pub paths: Vec<String>,
    /// Fail loading on any data-quality issue instead of warning.
    #[serde(default)]
    pub strict: bool,
}

/// What a lookup returns when no bundle has the key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// The dotted key path itself, e.g. `nope.nothere`.
    #[default]
    KeyPath,
    /// The key path behind a visible marker, e.g. `MISSING: nope.nothere`.
    Marked,
}

impl MissingKeyPolicy {
    /// Text shown for an unresolved key. A blank key always gets the marker,
    /// since its path alone would render as nothing.
    pub fn fallback(&self, path: &str) -> String {
        if path.trim().is_empty() {
            return "MISSING: <empty>".to_string();
        }
        match self {
            Self::KeyPath => path.to_string(),
            Self::Marked => format!("MISSING: {path}"),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::KeyPath => "key_path",
            Self::Marked => "marked",
        }
    }
}

// --- Default value functions ---

fn default_log_level() -> String {
    "info".to_string()
}
fn default_language() -> String {
    "pt".to_string()
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file, or defaults if the file is absent.
pub fn load(path: &str) -> Result<Config, LexiconError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LexiconError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| LexiconError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
