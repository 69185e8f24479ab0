//! List value helpers
//!
//! List-typed values travel as JSON arrays. Editors work on the items.

use serde_json::Value;

/// Items of a JSON array value; anything else yields no items
///
/// Object items are shown by their `id` when present.
pub fn parse_list_value(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.into_iter().map(item_to_string).collect(),
        _ => Vec::new(),
    }
}

/// JSON array of the non-blank items
pub fn encode_list_value<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect();
    // A Vec<&str> always serializes.
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

fn item_to_string(item: Value) -> String {
    match item {
        Value::String(s) => s,
        Value::Object(ref obj) => match obj.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => item.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_value() {
        assert_eq!(parse_list_value(r#"["a","b"]"#), ["a", "b"]);
        assert_eq!(parse_list_value("[1, 2.5]"), ["1", "2.5"]);
        assert_eq!(
            parse_list_value(r#"[{"id":"gid://shopify/MediaImage/1"}]"#),
            ["gid://shopify/MediaImage/1"]
        );
        assert!(parse_list_value("").is_empty());
        assert!(parse_list_value("not json").is_empty());
        assert!(parse_list_value(r#"{"a":1}"#).is_empty());
    }

    #[test]
    fn test_encode_list_value_drops_blank_items() {
        assert_eq!(encode_list_value(&["a", " ", "b "]), r#"["a","b"]"#);
        assert_eq!(encode_list_value::<&str>(&[]), "[]");
    }
}
