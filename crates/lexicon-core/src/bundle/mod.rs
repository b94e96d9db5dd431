//! Locale bundles. Each holds one language's validated tree of string templates.

mod raw;


pub use raw::RawNode;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

use crate::key::KeyPath;
use crate::language::Language;
use crate::template::Template;

/// A node in a bundle: either a string template or a nested mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(Template),
    Map(BTreeMap<String, Node>),
}

/// A data-quality problem found while building a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleIssue {
    /// A key appears more than once under the same parent. The last
    /// occurrence wins; if it was skipped, the key is absent.
    DuplicateKey { language: Language, path: String },
    /// A value that is neither a string nor an object. Skipped.
    NonStringLeaf {
        language: Language,
        path: String,
        kind: &'static str,
    },
    /// A blank string value. Skipped so lookups fall back.
    EmptyValue { language: Language, path: String },
    /// An empty key or one containing `.`, which no key path can address. Skipped.
    InvalidKey {
        language: Language,
        parent: String,
        key: String,
    },
    /// The document has no `translations` object of language objects.
    MissingNamespace { detail: String },
}

impl fmt::Display for BundleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { language, path } => {
                write!(f, "[{language}] duplicate key '{path}' (last occurrence wins)")
            }
            Self::NonStringLeaf {
                language,
                path,
                kind,
            } => write!(f, "[{language}] '{path}' is a {kind}, expected string or object"),
            Self::EmptyValue { language, path } => write!(f, "[{language}] '{path}' is empty"),
            Self::InvalidKey {
                language,
                parent,
                key,
            } => {
                let at = if parent.is_empty() { "<root>" } else { parent };
                write!(f, "[{language}] invalid key {key:?} under '{at}'")
            }
            Self::MissingNamespace { detail } => write!(f, "missing translations namespace: {detail}"),
        }
    }
}

/// Why a key path did not land on a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Segment `at` (0-based) does not exist.
    #[error("no entry at segment {at}")]
    NotFound { at: usize },
    /// A string was reached at segment `at` with segments left over.
    #[error("string reached at segment {at} before the end of the path")]
    LeafReached { at: usize },
    /// The full path names a mapping, not a string.
    #[error("path names a group of keys, not a string")]
    NotALeaf,
}

/// One language's validated, immutable string tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    language: Language,
    root: BTreeMap<String, Node>,
}

impl Bundle {
    /// Validate raw entries into a bundle, appending every issue found.
    pub fn from_raw(
        language: Language,
        entries: Vec<(String, RawNode)>,
        issues: &mut Vec<BundleIssue>,
    ) -> Self {
        let root = build_map(&language, None, entries, issues);
        Self { language, root }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn lookup(&self, key: &KeyPath) -> Result<&Template, LookupError> {
        let mut level = &self.root;
        let last = key.segments().len() - 1;
        for (i, seg) in key.segments().iter().enumerate() {
            match level.get(seg) {
                None => return Err(LookupError::NotFound { at: i }),
                Some(Node::Text(t)) if i == last => return Ok(t),
                Some(Node::Text(_)) => return Err(LookupError::LeafReached { at: i }),
                Some(Node::Map(_)) if i == last => return Err(LookupError::NotALeaf),
                Some(Node::Map(children)) => level = children,
            }
        }
        Err(LookupError::NotALeaf)
    }

    pub fn get(&self, key: &KeyPath) -> Option<&Template> {
        self.lookup(key).ok()
    }

    /// Every string leaf with its full key path, in key order.
    pub fn leaves(&self) -> Vec<(KeyPath, &Template)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut out);
        out
    }

    pub fn len(&self) -> usize {
        count_leaves(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overlay `other` onto this bundle. Groups merge recursively; any other
    /// collision replaces the existing node and is reported as a duplicate.
    pub fn merge(&mut self, other: Bundle, issues: &mut Vec<BundleIssue>) {
        merge_maps(&self.language, None, &mut self.root, other.root, issues);
    }
}

fn join(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(p) => format!("{p}.{key}"),
        None => key.to_string(),
    }
}

fn build_map(
    language: &Language,
    parent: Option<&str>,
    entries: Vec<(String, RawNode)>,
    issues: &mut Vec<BundleIssue>,
) -> BTreeMap<String, Node> {
    let mut map = BTreeMap::new();
    let mut seen = HashSet::new();
    for (key, raw) in entries {
        if key.is_empty() || key.contains('.') {
            issues.push(BundleIssue::InvalidKey {
                language: language.clone(),
                parent: parent.unwrap_or_default().to_string(),
                key,
            });
            continue;
        }
        let path = join(parent, &key);
        let node = match raw {
            RawNode::Text(s) if s.trim().is_empty() => {
                issues.push(BundleIssue::EmptyValue {
                    language: language.clone(),
                    path: path.clone(),
                });
                None
            }
            RawNode::Text(s) => Some(Node::Text(Template::parse(&s))),
            RawNode::Map(children) => Some(Node::Map(build_map(
                language,
                Some(&path),
                children,
                issues,
            ))),
            RawNode::Other(kind) => {
                issues.push(BundleIssue::NonStringLeaf {
                    language: language.clone(),
                    path: path.clone(),
                    kind,
                });
                None
            }
        };
        if !seen.insert(key.clone()) {
            issues.push(BundleIssue::DuplicateKey {
                language: language.clone(),
                path,
            });
        }
        // The last occurrence decides, even when it was skipped.
        match node {
            Some(node) => map.insert(key, node),
            None => map.remove(&key),
        };
    }
    map
}

fn merge_maps(
    language: &Language,
    parent: Option<&str>,
    into: &mut BTreeMap<String, Node>,
    from: BTreeMap<String, Node>,
    issues: &mut Vec<BundleIssue>,
) {
    for (key, node) in from {
        let path = join(parent, &key);
        let Some(slot) = into.get_mut(&key) else {
            into.insert(key, node);
            continue;
        };
        match (slot, node) {
            (Node::Map(existing), Node::Map(incoming)) => {
                merge_maps(language, Some(&path), existing, incoming, issues);
            }
            (slot, node) => {
                issues.push(BundleIssue::DuplicateKey {
                    language: language.clone(),
                    path,
                });
                *slot = node;
            }
        }
    }
}

fn collect_leaves<'a>(
    map: &'a BTreeMap<String, Node>,
    prefix: &mut Vec<String>,
    out: &mut Vec<(KeyPath, &'a Template)>,
) {
    for (key, node) in map {
        prefix.push(key.clone());
        match node {
            Node::Text(t) => {
                if let Some(path) = KeyPath::from_segments(prefix.iter().cloned()) {
                    out.push((path, t));
                }
            }
            Node::Map(children) => collect_leaves(children, prefix, out),
        }
        prefix.pop();
    }
}

fn count_leaves(map: &BTreeMap<String, Node>) -> usize {
    map.values()
        .map(|node| match node {
            Node::Text(_) => 1,
            Node::Map(children) => count_leaves(children),
        })
        .sum()
}
