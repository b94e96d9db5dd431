//! Loss-free view of an input document.
//!
//! `serde_json::Value` collapses repeated object keys, which would hide
//! exactly the authoring mistakes validation must report. `RawNode` keeps
//! every entry in input order so duplicates survive until validation.

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Text(String),
    Map(Vec<(String, RawNode)>),
    /// Any JSON value that is neither a string nor an object.
    Other(&'static str),
}

impl RawNode {
    pub fn kind(&self) -> &'static str {
        match self {
            RawNode::Text(_) => "string",
            RawNode::Map(_) => "object",
            RawNode::Other(kind) => kind,
        }
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an object of translations")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawNode, E> {
        Ok(RawNode::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawNode, E> {
        Ok(RawNode::Text(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawNode, A::Error> {
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<RawNode>()?;
            entries.push((key, value));
        }
        Ok(RawNode::Map(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawNode, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawNode::Other("array"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawNode, E> {
        Ok(RawNode::Other("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawNode, E> {
        Ok(RawNode::Other("number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawNode, E> {
        Ok(RawNode::Other("number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawNode, E> {
        Ok(RawNode::Other("number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Other("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Other("null"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_survive_parsing() {
        let raw: RawNode =
            serde_json::from_str(r#"{"files": {"a": "1"}, "files": {"b": "2"}}"#).unwrap();
        let RawNode::Map(entries) = raw else {
            panic!("expected object");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "files");
        assert_eq!(entries[1].0, "files");
    }

    #[test]
    fn test_non_string_values_are_tagged() {
        let raw: RawNode =
            serde_json::from_str(r#"{"a": [1, 2], "b": 3, "c": true, "d": null}"#).unwrap();
        let RawNode::Map(entries) = raw else {
            panic!("expected object");
        };
        let kinds: Vec<&str> = entries.iter().map(|(_, v)| v.kind()).collect();
        assert_eq!(kinds, vec!["array", "number", "boolean", "null"]);
    }
}
