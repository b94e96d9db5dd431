use thiserror::Error;

use crate::bundle::BundleIssue;

/// Top-level error type for loading catalogs and configuration.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A bundle failed validation under strict loading.
    #[error("validation failed with {} issue(s): {}", .0.len(), summarize(.0))]
    Validation(Vec<BundleIssue>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a lookup could not produce a fully rendered string.
///
/// `Localizer::resolve` recovers from every variant; only
/// `Localizer::try_resolve` surfaces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The key path does not end on a string in any candidate bundle.
    #[error("missing key: {path}")]
    MissingKey { path: String },

    /// The template has placeholders with no supplied value.
    #[error("missing variable(s) for {path}: {}", names.join(", "))]
    MissingVariable { path: String, names: Vec<String> },

    /// Neither the requested nor the default language has a bundle.
    #[error("missing language: {language}")]
    MissingLanguage { language: String },
}

fn summarize(issues: &[BundleIssue]) -> String {
    let mut parts: Vec<String> = issues.iter().take(3).map(ToString::to_string).collect();
    if issues.len() > 3 {
        parts.push(format!("and {} more", issues.len() - 3));
    }
    parts.join("; ")
}
