//! Key-path lookup with interpolation, plural variants, and fallback.
//!
//! A [`Localizer`] pairs a shared, immutable [`Catalog`] with an active
//! language. Lookups never mutate anything, so a localizer can be cloned
//! into every thread or view that renders text.
//!
//! Resolution order for a key:
//! 1. the active language's bundle (negotiated, see [`Catalog::negotiate`]),
//! 2. each fallback language's bundle, in order,
//! 3. the [`MissingKeyPolicy`] fallback string.
//!
//! Inside each bundle, when the arguments carry a numeric `count`, the
//! plural variants `<key>_one` / `<key>_other` (and `<key>_plural` for the
//! `other` category) are tried before the plain key.

use std::sync::Arc;
use tracing::debug;

use crate::bundle::Bundle;
use crate::catalog::Catalog;
use crate::config::{LocaleConfig, MissingKeyPolicy};
use crate::error::ResolveError;
use crate::key::{IntoKey, KeyPath};
use crate::language::{Language, PluralCategory};
use crate::template::{Args, Template};

#[derive(Debug, Clone)]
pub struct Localizer {
    catalog: Arc<Catalog>,
    language: Language,
    fallbacks: Vec<Language>,
    policy: MissingKeyPolicy,
}

impl Localizer {
    /// A localizer with no fallback languages and the key-path policy.
    pub fn new(catalog: Arc<Catalog>, language: impl Into<Language>) -> Self {
        Self {
            catalog,
            language: language.into(),
            fallbacks: Vec::new(),
            policy: MissingKeyPolicy::default(),
        }
    }

    pub fn from_config(catalog: Arc<Catalog>, config: &LocaleConfig) -> Self {
        Self::new(catalog, config.language.as_str())
            .with_fallback(config.default_language.as_str())
            .with_policy(config.missing_key)
    }

    /// Append a fallback language. Duplicates of the active language or of
    /// an earlier fallback are ignored.
    pub fn with_fallback(mut self, language: impl Into<Language>) -> Self {
        let language = language.into();
        if language != self.language && !self.fallbacks.contains(&language) {
            self.fallbacks.push(language);
        }
        self
    }

    pub fn with_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Same catalog, fallbacks and policy, different active language.
    pub fn with_language(&self, language: impl Into<Language>) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            language: language.into(),
            fallbacks: self.fallbacks.clone(),
            policy: self.policy,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a key with no arguments.
    pub fn t(&self, key: impl IntoKey) -> String {
        self.resolve(key, &Args::new())
    }

    /// Resolve and interpolate. Never fails: a missing key or language
    /// yields the policy fallback, a missing argument leaves its
    /// `{{name}}` token in place.
    pub fn resolve(&self, key: impl IntoKey, args: &Args) -> String {
        let key = match key.into_key() {
            Ok(key) => key,
            Err(raw) => {
                debug!("invalid key path {raw:?}");
                return self.policy.fallback(&raw);
            }
        };
        match self.find(&key, args) {
            Ok(template) => template.render(args).text,
            Err(e) => {
                debug!("{e}");
                self.policy.fallback(&key.to_string())
            }
        }
    }

    /// Like [`Localizer::resolve`] but reports every recoverable problem.
    pub fn try_resolve(&self, key: impl IntoKey, args: &Args) -> Result<String, ResolveError> {
        let key = key
            .into_key()
            .map_err(|path| ResolveError::MissingKey { path })?;
        let rendered = self.find(&key, args)?.render(args);
        if !rendered.missing.is_empty() {
            return Err(ResolveError::MissingVariable {
                path: key.to_string(),
                names: rendered.missing,
            });
        }
        Ok(rendered.text)
    }

    /// Whether any candidate bundle has a string at `key`.
    pub fn contains(&self, key: impl IntoKey) -> bool {
        match key.into_key() {
            Ok(key) => self.find(&key, &Args::new()).is_ok(),
            Err(_) => false,
        }
    }

    fn candidates(&self) -> Vec<&Bundle> {
        let mut bundles: Vec<&Bundle> = Vec::new();
        for language in std::iter::once(&self.language).chain(&self.fallbacks) {
            if let Some(bundle) = self.catalog.negotiate(language) {
                if !bundles.iter().any(|b| b.language() == bundle.language()) {
                    bundles.push(bundle);
                }
            }
        }
        bundles
    }

    fn find(&self, key: &KeyPath, args: &Args) -> Result<&Template, ResolveError> {
        let bundles = self.candidates();
        if bundles.is_empty() {
            return Err(ResolveError::MissingLanguage {
                language: self.language.to_string(),
            });
        }
        for bundle in bundles {
            for variant in variants(key, args, bundle.language()) {
                if let Some(template) = bundle.get(&variant) {
                    return Ok(template);
                }
            }
        }
        Err(ResolveError::MissingKey {
            path: key.to_string(),
        })
    }
}

/// Keys to try in one bundle, most specific first.
fn variants(key: &KeyPath, args: &Args, language: &Language) -> Vec<KeyPath> {
    let Some(count) = args.count() else {
        return vec![key.clone()];
    };
    let category = language.plural_category(count);
    let last = key.last();
    let mut keys = vec![key.with_last(&format!("{last}_{}", category.suffix()))];
    if category == PluralCategory::Other {
        keys.push(key.with_last(&format!("{last}_plural")));
    }
    keys.push(key.clone());
    keys
}
