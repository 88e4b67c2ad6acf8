//! Payloads for the `typo` channel.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Sentinel answered to `check` while no dictionary is loaded.
pub const NOT_READY: &str = "not-ready";

/// Kind of spell-check query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypoKind {
    /// Is the term spelled correctly?
    Check,
    /// Which spellings are suggested for the term?
    Suggest,
}

/// Request on the `typo` channel: `{ "type": "check", "term": "teh" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypoQuery {
    /// Query kind.
    #[serde(rename = "type")]
    pub kind: TypoKind,
    /// Word to look up.
    pub term: String,
}

/// Reply on the `typo` channel.
///
/// `NotReady` is a third state, distinct from a negative verdict. On the
/// wire it is the string `"not-ready"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypoReply {
    /// Answer to `check`.
    Verdict(bool),
    /// `check` asked before the dictionary finished loading.
    NotReady,
    /// Answer to `suggest`; empty while the dictionary is loading.
    Suggestions(Vec<String>),
}

impl TypoReply {
    /// Decodes a reply received by the frontend.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(verdict) => Some(Self::Verdict(*verdict)),
            Value::String(text) if text == NOT_READY => Some(Self::NotReady),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self::Suggestions),
            _ => None,
        }
    }

    /// Encodes the reply as its wire value.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Verdict(verdict) => Value::Bool(verdict),
            Self::NotReady => Value::String(NOT_READY.to_owned()),
            Self::Suggestions(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
        }
    }
}

impl Serialize for TypoReply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Verdict(verdict) => serializer.serialize_bool(*verdict),
            Self::NotReady => serializer.serialize_str(NOT_READY),
            Self::Suggestions(items) => items.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_check_query() {
        let query: TypoQuery =
            serde_json::from_value(json!({"type": "check", "term": "teh"})).expect("query");
        assert_eq!(query.kind, TypoKind::Check);
        assert_eq!(query.term, "teh");
    }

    #[test]
    fn rejects_unknown_query_kind() {
        let result = serde_json::from_value::<TypoQuery>(json!({"type": "learn", "term": "x"}));
        assert!(result.is_err());
    }

    #[rstest]
    #[case::verdict(TypoReply::Verdict(false), json!(false))]
    #[case::not_ready(TypoReply::NotReady, json!("not-ready"))]
    #[case::suggestions(TypoReply::Suggestions(vec!["the".into()]), json!(["the"]))]
    #[case::pending_suggestions(TypoReply::Suggestions(Vec::new()), json!([]))]
    fn replies_have_stable_wire_form(#[case] reply: TypoReply, #[case] expected: Value) {
        assert_eq!(serde_json::to_value(&reply).expect("serialise"), expected);
        assert_eq!(TypoReply::from_value(&expected), Some(reply.clone()));
        assert_eq!(reply.into_value(), expected);
    }

    #[test]
    fn sentinel_is_not_a_boolean() {
        assert_ne!(
            TypoReply::from_value(&json!("not-ready")),
            Some(TypoReply::Verdict(false))
        );
    }
}
