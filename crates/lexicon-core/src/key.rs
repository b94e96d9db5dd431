//! Key paths: the address of one string inside a nested bundle.

use std::fmt;

/// A non-empty sequence of non-empty key segments, e.g. `ticket.buttons.cancel`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Build a key path from a dotted string.
    ///
    /// Returns `None` for an empty string or when any segment is empty
    /// (`"a..b"`, `".a"`, `"a."`).
    pub fn parse(dotted: &str) -> Option<Self> {
        Self::from_segments(dotted.split('.'))
    }

    /// Build a key path from explicit segments.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment.
    pub fn last(&self) -> &str {
        // Non-empty by construction.
        &self.segments[self.segments.len() - 1]
    }

    /// Same path with the last segment replaced by `last`.
    pub fn with_last(&self, last: &str) -> Self {
        let mut segments = self.segments.clone();
        let idx = segments.len() - 1;
        segments[idx] = last.to_string();
        Self { segments }
    }

    /// Whether `prefix` is a leading run of this path's segments.
    pub fn starts_with(&self, prefix: &KeyPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Anything that can name a key: dotted strings, segment slices, or a
/// ready-made [`KeyPath`].
///
/// Conversion is fallible; an invalid key is reported with its raw text so
/// the fallback string stays legible.
pub trait IntoKey {
    fn into_key(self) -> Result<KeyPath, String>;
}

impl IntoKey for KeyPath {
    fn into_key(self) -> Result<KeyPath, String> {
        Ok(self)
    }
}

impl IntoKey for &KeyPath {
    fn into_key(self) -> Result<KeyPath, String> {
        Ok(self.clone())
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Result<KeyPath, String> {
        KeyPath::parse(self).ok_or_else(|| self.to_string())
    }
}

impl IntoKey for &String {
    fn into_key(self) -> Result<KeyPath, String> {
        self.as_str().into_key()
    }
}

impl IntoKey for &[&str] {
    fn into_key(self) -> Result<KeyPath, String> {
        KeyPath::from_segments(self.iter().copied()).ok_or_else(|| self.join("."))
    }
}

impl<const N: usize> IntoKey for &[&str; N] {
    fn into_key(self) -> Result<KeyPath, String> {
        self.as_slice().into_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let key = KeyPath::parse("ticket.buttons.cancel").unwrap();
        assert_eq!(key.segments(), ["ticket", "buttons", "cancel"]);
        assert_eq!(key.last(), "cancel");
        assert_eq!(key.to_string(), "ticket.buttons.cancel");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(KeyPath::parse("").is_none());
        assert!(KeyPath::parse("a..b").is_none());
        assert!(KeyPath::parse(".a").is_none());
        assert!(KeyPath::parse("a.").is_none());
        assert!(KeyPath::from_segments(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_segment_slice_matches_dotted() {
        let from_slice = (&["tasks", "daysOverdue"]).into_key().unwrap();
        let from_str = "tasks.daysOverdue".into_key().unwrap();
        assert_eq!(from_slice, from_str);
    }

    #[test]
    fn test_invalid_key_keeps_raw_text() {
        assert_eq!("a..b".into_key().unwrap_err(), "a..b");
        let empty: &[&str] = &[];
        assert_eq!(empty.into_key().unwrap_err(), "");
    }

    #[test]
    fn test_with_last_and_prefix() {
        let key = KeyPath::parse("tickets.count").unwrap();
        assert_eq!(key.with_last("count_one").to_string(), "tickets.count_one");
        assert!(key.starts_with(&KeyPath::parse("tickets").unwrap()));
        assert!(!key.starts_with(&KeyPath::parse("ticket").unwrap()));
    }
}
