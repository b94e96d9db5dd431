//! # lexicon-core
//!
//! Locale bundles, key paths, templates, and lookup for lexicon.
//!
//! ```ignore
//! let catalog = Arc::new(Catalog::from_json(json)?);
//! let l10n = Localizer::new(catalog, "pt").with_fallback("en");
//! let text = l10n.resolve("companies.deleteDialog.message", &Args::new().with("name", "Acme"));
//! ```

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod key;
pub mod language;
pub mod localizer;
pub mod template;

pub use catalog::Catalog;
pub use key::KeyPath;
pub use language::Language;
pub use localizer::Localizer;
pub use template::{Arg, Args};
