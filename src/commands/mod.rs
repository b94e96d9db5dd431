//! CLI subcommands, thin wrappers over the catalog and localizer.

#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use lexicon_core::bundle::Bundle;
use lexicon_core::config::{Config, LocaleConfig};
use lexicon_core::template::normalize_value;
use lexicon_core::{Arg, Args, Catalog, KeyPath, Language};
use tracing::info;

/// Print one resolved string.
pub fn get(
    cfg: &Config,
    key: &str,
    vars: &[String],
    lang: Option<&str>,
    strict: bool,
) -> anyhow::Result<()> {
    let mut l10n = lexicon_locales::localizer(cfg)?;
    if let Some(lang) = lang {
        l10n = l10n.with_language(lang);
    }
    let args = parse_vars(vars)?;
    let text = if strict {
        l10n.try_resolve(key, &args)?
    } else {
        l10n.resolve(key, &args)
    };
    println!("{text}");
    Ok(())
}

/// Print every key path (optionally under a prefix) with its template.
pub fn keys(cfg: &Config, prefix: Option<&str>, lang: Option<&str>) -> anyhow::Result<()> {
    let catalog = lexicon_locales::load_catalog(cfg)?;
    let language = Language::from(lang.unwrap_or(cfg.locale.language.as_str()));
    let Some(bundle) = catalog.negotiate(&language) else {
        bail!("no bundle for language '{language}'");
    };
    let prefix = match prefix {
        Some(p) => Some(KeyPath::parse(p).with_context(|| format!("invalid key prefix {p:?}"))?),
        None => None,
    };
    for line in key_lines(bundle, prefix.as_ref()) {
        println!("{line}");
    }
    Ok(())
}

/// Report data-quality issues and cross-language gaps. Fails when any issue
/// was found; coverage gaps and placeholder mismatches are informational.
pub fn check(cfg: &Config) -> anyhow::Result<()> {
    // Always load leniently so every issue can be listed.
    let mut lenient = cfg.clone();
    lenient.bundles.strict = false;
    let catalog = lexicon_locales::load_catalog(&lenient)?;

    let base = Language::from(cfg.locale.default_language.as_str());
    let report = check_report(&catalog, &base);
    for line in &report.lines {
        println!("{line}");
    }
    if report.issues > 0 {
        bail!("{} issue(s) found", report.issues);
    }
    println!("ok");
    Ok(())
}

/// Print a document with every placeholder in canonical form.
pub fn normalize(file: &str) -> anyhow::Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;

    // Surfaces duplicates and schema problems through the build warnings.
    let mut builder = Catalog::builder();
    builder.add_json(file, &content)?;
    builder.build(false)?;

    let (text, changed) = normalized_document(&content)?;
    info!("normalized {changed} string(s) in {file}");
    println!("{text}");
    Ok(())
}

/// Pretty-printed document with canonical placeholders, in source key
/// order, plus the number of strings rewritten.
pub fn normalized_document(content: &str) -> anyhow::Result<(String, usize)> {
    let mut doc: serde_json::Value = serde_json::from_str(content)?;
    let changed = normalize_value(&mut doc);
    Ok((serde_json::to_string_pretty(&doc)?, changed))
}

/// Print loaded languages; the active one is starred.
pub fn languages(cfg: &Config) -> anyhow::Result<()> {
    let catalog = lexicon_locales::load_catalog(cfg)?;
    for line in language_lines(&catalog, &cfg.locale) {
        println!("{line}");
    }
    Ok(())
}

pub fn language_lines(catalog: &Catalog, locale: &LocaleConfig) -> Vec<String> {
    let active = catalog
        .negotiate(&Language::from(locale.language.as_str()))
        .map(|b| b.language().clone());
    let mut lines: Vec<String> = catalog
        .bundles()
        .map(|bundle| {
            let mark = if Some(bundle.language()) == active.as_ref() {
                "*"
            } else {
                " "
            };
            format!("{mark} {}\t{} string(s)", bundle.language(), bundle.len())
        })
        .collect();
    lines.push(format!("fallback: {}", locale.default_language));
    lines.push(format!("missing keys: {}", locale.missing_key.display_name()));
    lines
}

/// Parse `name=value` pairs. Values that read back identically as integers
/// or floats become numbers (so `count` drives plural selection).
pub fn parse_vars(vars: &[String]) -> anyhow::Result<Args> {
    let mut args = Args::new();
    for var in vars {
        let Some((name, value)) = var.split_once('=') else {
            bail!("expected NAME=VALUE, got {var:?}");
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("empty variable name in {var:?}");
        }
        args.insert(name, parse_arg(value));
    }
    Ok(args)
}

pub fn parse_arg(value: &str) -> Arg {
    if let Ok(n) = value.parse::<i64>() {
        if n.to_string() == value {
            return Arg::Int(n);
        }
    }
    if let Ok(x) = value.parse::<f64>() {
        if x.is_finite() && x.to_string() == value {
            return Arg::Float(x);
        }
    }
    Arg::Text(value.to_string())
}

pub fn key_lines(bundle: &Bundle, prefix: Option<&KeyPath>) -> Vec<String> {
    bundle
        .leaves()
        .into_iter()
        .filter(|(key, _)| prefix.map_or(true, |p| key.starts_with(p)))
        .map(|(key, template)| format!("{key}\t{template}"))
        .collect()
}

/// Result of checking a catalog.
pub struct CheckReport {
    pub lines: Vec<String>,
    /// Load-time issues; these fail the check.
    pub issues: usize,
}

pub fn check_report(catalog: &Catalog, base: &Language) -> CheckReport {
    let mut lines: Vec<String> = catalog
        .issues()
        .iter()
        .map(|issue| format!("issue: {issue}"))
        .collect();
    let issues = lines.len();

    let Some(reference) = catalog.negotiate(base) else {
        lines.push(format!("note: default language '{base}' has no bundle"));
        return CheckReport { lines, issues };
    };
    let reference_leaves = reference.leaves();

    for bundle in catalog.bundles() {
        if bundle.language() == reference.language() {
            continue;
        }
        let mut translated = 0;
        for (key, template) in &reference_leaves {
            let Some(other) = bundle.get(key) else {
                continue;
            };
            translated += 1;
            let mut expected = template.placeholders();
            let mut found = other.placeholders();
            expected.sort_unstable();
            found.sort_unstable();
            if expected != found {
                lines.push(format!(
                    "warning: [{}] '{key}' placeholders {found:?} differ from [{}] {expected:?}",
                    bundle.language(),
                    reference.language()
                ));
            }
        }
        lines.push(format!(
            "coverage: [{}] {translated}/{} keys of [{}]",
            bundle.language(),
            reference_leaves.len(),
            reference.language()
        ));
    }
    CheckReport { lines, issues }
}
