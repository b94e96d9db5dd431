//! Every loaded bundle, keyed by language.
//!
//! Input documents have the shape `{"translations": {"<lang>": {...}}}`.
//! A catalog is assembled once through [`CatalogBuilder`] and is read-only
//! afterwards; share it as `Arc<Catalog>`.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::bundle::{Bundle, BundleIssue, RawNode};
use crate::config::shellexpand;
use crate::error::LexiconError;
use crate::language::Language;

/// Top-level key that holds the per-language objects.
pub const NAMESPACE: &str = "translations";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bundles: BTreeMap<Language, Bundle>,
    issues: Vec<BundleIssue>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Lenient single-document catalog.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let mut builder = Self::builder();
        builder.add_json("<inline>", json)?;
        builder.build(false)
    }

    pub fn get(&self, language: &Language) -> Option<&Bundle> {
        self.bundles.get(language)
    }

    /// Find the bundle that best serves `requested`.
    ///
    /// Tries, in order: the exact tag; the same tag ignoring case and
    /// separators (`pt-BR` = `ptBr`); a bundle whose tag is the requested
    /// primary subtag (`pt-PT` -> `pt`); any bundle sharing the primary
    /// subtag (`pt` -> `ptBr`).
    pub fn negotiate(&self, requested: &Language) -> Option<&Bundle> {
        if let Some(bundle) = self.bundles.get(requested) {
            return Some(bundle);
        }
        let folded = requested.folded();
        let primary = requested.primary();
        self.find(|lang| lang.folded() == folded)
            .or_else(|| self.find(|lang| lang.folded() == primary))
            .or_else(|| self.find(|lang| lang.primary() == primary))
    }

    fn find(&self, pred: impl Fn(&Language) -> bool) -> Option<&Bundle> {
        self.bundles.values().find(|b| pred(b.language()))
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.bundles.keys()
    }

    pub fn bundles(&self) -> impl Iterator<Item = &Bundle> {
        self.bundles.values()
    }

    /// Data-quality issues found while loading, in discovery order.
    pub fn issues(&self) -> &[BundleIssue] {
        &self.issues
    }
}

/// Collects input documents into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    bundles: BTreeMap<Language, Bundle>,
    issues: Vec<BundleIssue>,
}

impl CatalogBuilder {
    /// Add one JSON document. `origin` names it in logs and issues.
    ///
    /// Malformed JSON is an error; schema problems are recorded as issues.
    pub fn add_json(&mut self, origin: &str, json: &str) -> Result<&mut Self, LexiconError> {
        let raw: RawNode = serde_json::from_str(json)?;
        let entries = match raw {
            RawNode::Map(entries) => entries,
            other => {
                self.issues.push(BundleIssue::MissingNamespace {
                    detail: format!("{origin}: document is a {}, expected an object", other.kind()),
                });
                return Ok(self);
            }
        };

        let mut found = false;
        for (key, value) in entries {
            if key != NAMESPACE {
                continue;
            }
            if found {
                self.issues.push(BundleIssue::MissingNamespace {
                    detail: format!("{origin}: '{NAMESPACE}' appears more than once"),
                });
            }
            found = true;
            let languages = match value {
                RawNode::Map(languages) => languages,
                other => {
                    self.issues.push(BundleIssue::MissingNamespace {
                        detail: format!("{origin}: '{NAMESPACE}' is a {}", other.kind()),
                    });
                    continue;
                }
            };
            for (tag, body) in languages {
                let language = Language::new(tag);
                let body = match body {
                    RawNode::Map(body) => body,
                    other => {
                        self.issues.push(BundleIssue::MissingNamespace {
                            detail: format!(
                                "{origin}: '{NAMESPACE}.{language}' is a {}, expected an object",
                                other.kind()
                            ),
                        });
                        continue;
                    }
                };
                let bundle = Bundle::from_raw(language, body, &mut self.issues);
                info!(
                    "loaded {} string(s) for '{}' from {origin}",
                    bundle.len(),
                    bundle.language()
                );
                insert_bundle(&mut self.bundles, bundle, &mut self.issues);
            }
        }

        if !found {
            self.issues.push(BundleIssue::MissingNamespace {
                detail: format!("{origin}: no '{NAMESPACE}' key"),
            });
        }
        Ok(self)
    }

    /// Add a JSON document from disk. `~/` is expanded.
    pub fn add_file(&mut self, path: &str) -> Result<&mut Self, LexiconError> {
        let expanded = shellexpand(path);
        let content = std::fs::read_to_string(Path::new(&expanded)).map_err(|e| {
            LexiconError::Config(format!("failed to read bundle {expanded}: {e}"))
        })?;
        self.add_json(&expanded, &content)
    }

    /// Freeze into a catalog. With `strict`, any recorded issue fails the build.
    pub fn build(self, strict: bool) -> Result<Catalog, LexiconError> {
        if strict && !self.issues.is_empty() {
            return Err(LexiconError::Validation(self.issues));
        }
        for issue in &self.issues {
            warn!("bundle issue: {issue}");
        }
        Ok(Catalog {
            bundles: self.bundles,
            issues: self.issues,
        })
    }
}

fn insert_bundle(
    bundles: &mut BTreeMap<Language, Bundle>,
    bundle: Bundle,
    issues: &mut Vec<BundleIssue>,
) {
    match bundles.get_mut(bundle.language()) {
        Some(existing) => existing.merge(bundle, issues),
        None => {
            bundles.insert(bundle.language().clone(), bundle);
        }
    }
}
