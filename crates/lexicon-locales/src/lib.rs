//! # lexicon-locales
//!
//! Locale bundles shipped with lexicon, embedded at compile time.


use lexicon_core::catalog::CatalogBuilder;
use lexicon_core::config::Config;
use lexicon_core::error::LexiconError;
use lexicon_core::{Catalog, Localizer};
use std::sync::Arc;
use tracing::info;

/// Bundled Portuguese strings, embedded at compile time.
const BUNDLED_PT: &str = include_str!("../locales/pt.json");

/// Every bundled document as `(file name, contents)`.
pub const BUNDLED: &[(&str, &str)] = &[("pt.json", BUNDLED_PT)];

/// A builder pre-loaded with every bundled document.
pub fn builtin_builder() -> Result<CatalogBuilder, LexiconError> {
    let mut builder = Catalog::builder();
    for (name, json) in BUNDLED {
        builder.add_json(name, json)?;
    }
    Ok(builder)
}

/// The bundled catalog, loaded leniently.
pub fn builtin_catalog() -> Result<Catalog, LexiconError> {
    builtin_builder()?.build(false)
}

/// Bundled documents followed by the configured extra files.
pub fn load_catalog(config: &Config) -> Result<Catalog, LexiconError> {
    let mut builder = builtin_builder()?;
    for path in &config.bundles.paths {
        builder.add_file(path)?;
    }
    let catalog = builder.build(config.bundles.strict)?;
    info!(
        "catalog ready: {} language(s), {} issue(s)",
        catalog.languages().count(),
        catalog.issues().len()
    );
    Ok(catalog)
}

/// A localizer over [`load_catalog`] using the configured locale settings.
pub fn localizer(config: &Config) -> Result<Localizer, LexiconError> {
    let catalog = Arc::new(load_catalog(config)?);
    Ok(Localizer::from_config(catalog, &config.locale))
}
