//! String templates with `{{name}}` placeholders.
//!
//! Source strings may use either `{{name}}` or `{name}`. Both are parsed
//! into the same segments and the template keeps only the canonical
//! double-brace form. A brace that does not open a well-formed
//! placeholder is literal text.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed, normalized string template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

/// Output of rendering a template against a set of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholder names that had no value and were left verbatim.
    pub missing: Vec<String>,
}

impl Template {
    pub fn parse(raw: &str) -> Self {
        let segments = parse_segments(raw);
        let source = canonical(&segments);
        Self { source, segments }
    }

    /// Canonical source text (`{{name}}` placeholders only).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for seg in &self.segments {
            if let Segment::Placeholder(name) = seg {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn render(&self, args: &Args) -> Rendered {
        let mut text = String::with_capacity(self.source.len());
        let mut missing: Vec<String> = Vec::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => text.push_str(s),
                Segment::Placeholder(name) => match args.get(name) {
                    Some(value) => text.push_str(&value.to_string()),
                    None => {
                        text.push_str("{{");
                        text.push_str(name);
                        text.push_str("}}");
                        if !missing.contains(name) {
                            missing.push(name.clone());
                        }
                    }
                },
            }
        }
        Rendered { text, missing }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Rewrite single-brace placeholders to the canonical `{{name}}` form.
///
/// Borrows the input when it is already canonical.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    let canonical = canonical(&parse_segments(raw));
    if canonical == raw {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(canonical)
    }
}

/// Normalize every string inside a JSON document in place.
/// Returns how many strings changed.
pub fn normalize_value(value: &mut serde_json::Value) -> usize {
    match value {
        serde_json::Value::String(s) => {
            let fixed = normalize(s).into_owned();
            if fixed == *s {
                return 0;
            }
            *s = fixed;
            1
        }
        serde_json::Value::Object(map) => map.values_mut().map(normalize_value).sum(),
        serde_json::Value::Array(items) => items.iter_mut().map(normalize_value).sum(),
        _ => 0,
    }
}

fn canonical(segments: &[Segment]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Literal(s) => out.push_str(s),
            Segment::Placeholder(name) => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
    }
    out
}

fn parse_segments(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let tail = &rest[open..];

        if let Some((name, consumed)) = match_placeholder(tail) {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            rest = &tail[consumed..];
        } else {
            literal.push('{');
            rest = &tail[1..];
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Match a placeholder at the start of `s` (which begins with `{`).
/// Returns the trimmed name and the number of bytes consumed.
fn match_placeholder(s: &str) -> Option<(&str, usize)> {
    let (open, close) = if s.starts_with("{{") {
        ("{{", "}}")
    } else {
        ("{", "}")
    };
    let body = &s[open.len()..];
    let end = body.find(close)?;
    let name = body[..end].trim();
    if !is_placeholder_name(name) {
        return None;
    }
    Some((name, open.len() + end + close.len()))
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// A displayable interpolation value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Arg {
    /// Numeric value, for plural selection.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Arg::Text(_) => None,
            Arg::Int(n) => Some(*n as f64),
            Arg::Float(f) => Some(*f),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(s) => f.write_str(s),
            Arg::Int(n) => write!(f, "{n}"),
            Arg::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Int(n.into())
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Arg::Int(n.into())
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        i64::try_from(n).map(Arg::Int).unwrap_or(Arg::Float(n as f64))
    }
}

impl From<f64> for Arg {
    fn from(x: f64) -> Self {
        Arg::Float(x)
    }
}

/// Named interpolation values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: HashMap<String, Arg>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Arg>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.values.get(name)
    }

    /// The numeric `count` argument, if any.
    pub fn count(&self) -> Option<f64> {
        self.get("count").and_then(Arg::as_number)
    }
}

impl<K: Into<String>, V: Into<Arg>> FromIterator<(K, V)> for Args {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
