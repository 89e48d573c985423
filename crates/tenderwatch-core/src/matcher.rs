//! Case-insensitive keyword search over arbitrarily nested JSON.
//!
//! A keyword matches a release if it appears, as a substring and ignoring
//! case, in any object key or any scalar value at any depth. Buyer names,
//! party addresses, and document titles are all searched the same way.

use serde_json::Value;

/// Return `true` if `keyword` occurs anywhere in `node`.
pub fn contains_keyword(node: &Value, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    node_matches(node, &needle)
}

fn node_matches(node: &Value, needle: &str) -> bool {
    match node {
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| text_matches(key, needle) || node_matches(value, needle)),
        Value::Array(items) => items.iter().any(|item| node_matches(item, needle)),
        scalar => scalar_text(scalar).is_some_and(|text| text_matches(&text, needle)),
    }
}

/// Text form of a scalar. `null` has none and is never searched.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn text_matches(text: &str, needle: &str) -> bool {
    !text.is_empty() && text.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_scalar_string_ignoring_case() {
        assert!(contains_keyword(&json!("NHS BNSSG ICB"), "bnssg"));
        assert!(contains_keyword(&json!("nhs bnssg icb"), "BNSSG"));
        assert!(!contains_keyword(&json!("NHS Somerset"), "BNSSG"));
    }

    #[test]
    fn substring_of_larger_token_matches() {
        assert!(contains_keyword(&json!("XBNSSGX-2026"), "bnssg"));
    }

    #[test]
    fn null_never_matches() {
        assert!(!contains_keyword(&json!(null), "null"));
        assert!(!contains_keyword(&json!({ "buyer": null }), "null"));
    }

    #[test]
    fn matches_object_key() {
        let node = json!({ "bnssgReference": 17 });
        assert!(contains_keyword(&node, "BNSSG"));
    }

    #[test]
    fn matches_deeply_nested_value() {
        let node = json!({
            "tender": {
                "documents": [
                    { "title": "Spec" },
                    { "title": "Annex", "notes": [["", { "author": "Bnssg ICB" }]] }
                ]
            }
        });
        assert!(contains_keyword(&node, "BNSSG"));
    }

    #[test]
    fn matches_any_array_element() {
        let node = json!(["alpha", 12, { "x": "beta" }, ["gamma", "BNSSG"]]);
        assert!(contains_keyword(&node, "bnssg"));
        assert!(!contains_keyword(&node, "delta"));
    }

    #[test]
    fn numbers_match_on_their_display_form() {
        assert!(contains_keyword(&json!({ "amount": 12345.5 }), "345.5"));
        assert!(contains_keyword(&json!({ "amount": 0 }), "0"));
    }

    #[test]
    fn false_and_zero_match_on_their_text_form() {
        let release = json!({
            "tag": ["tender"],
            "tender": { "flags": { "urgent": false }, "value": { "amount": 0 } }
        });
        assert!(contains_keyword(&release, "FALSE"));
        assert!(contains_keyword(&release, "0"));
        assert!(contains_keyword(&json!(true), "true"));
        assert!(!contains_keyword(&json!({ "note": "" }), "x"));
    }

    #[test]
    fn empty_structures_do_not_match() {
        assert!(!contains_keyword(&json!({}), "bnssg"));
        assert!(!contains_keyword(&json!([]), "bnssg"));
        assert!(!contains_keyword(&json!({ "a": [], "b": {} }), "bnssg"));
    }
}
