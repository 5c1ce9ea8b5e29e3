//! Normalization of free-form model output into a [`ClassificationRecord`].
//!
//! The model is told to answer with a bare JSON object but routinely wraps it
//! in markdown fences, adds commentary, or answers in prose. [`normalize`]
//! turns any of those into the fixed four-field record:
//!
//! 1. parse the whole text as JSON;
//! 2. otherwise parse the span from the first `{` to the last `}`;
//! 3. otherwise fall back to a record whose description is the trimmed text.
//!
//! Step 2 is greedy. Text holding several separate objects yields a span
//! covering all of them (and whatever sits between), which usually fails to
//! parse and lands in step 3. Braces are not balanced.

use serde_json::{Map, Value};

use crate::types::{ClassificationRecord, NO_DESCRIPTION, UNKNOWN};

/// Convert raw model text into a [`ClassificationRecord`]. Never fails.
pub fn normalize(raw: &str) -> ClassificationRecord {
    match extract_object(raw) {
        Some(obj) => from_object(&obj),
        None => ClassificationRecord {
            fish_type: UNKNOWN.to_string(),
            description: raw.trim().to_string(),
            habitat: UNKNOWN.to_string(),
            edibility: UNKNOWN.to_string(),
        },
    }
}

/// Find a JSON object in `raw`, first as the whole document, then as the
/// greedy `{ ... }` span.
fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    if let Some(obj) = parse_object(raw) {
        return Some(obj);
    }
    brace_span(raw).and_then(parse_object)
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

/// Substring from the first `{` to the last `}`, inclusive.
fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn from_object(obj: &Map<String, Value>) -> ClassificationRecord {
    ClassificationRecord {
        fish_type: string_field(obj, "fish_type", UNKNOWN),
        description: string_field(obj, "description", NO_DESCRIPTION),
        habitat: string_field(obj, "habitat", UNKNOWN),
        edibility: string_field(obj, "edibility", UNKNOWN),
    }
}

// Non-string values count as absent.
fn string_field(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fish_type: &str, description: &str, habitat: &str, edibility: &str) -> ClassificationRecord {
        ClassificationRecord {
            fish_type: fish_type.to_string(),
            description: description.to_string(),
            habitat: habitat.to_string(),
            edibility: edibility.to_string(),
        }
    }

    #[test]
    fn test_well_formed_object_passes_through() {
        let raw = r#"{"fish_type":"Clownfish","description":"Orange with white bands","habitat":"Coral reefs","edibility":"Not edible"}"#;
        assert_eq!(
            normalize(raw),
            record("Clownfish", "Orange with white bands", "Coral reefs", "Not edible")
        );
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let raw = "```json\n{\"fish_type\":\"Salmon\",\"description\":\"d\",\"habitat\":\"river\",\"edibility\":\"Edible\"}\n```";
        assert_eq!(normalize(raw), record("Salmon", "d", "river", "Edible"));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let raw = "Sure! Here is the result:\n{\"fish_type\": \"Tuna\", \"description\": \"Fast\", \"habitat\": \"Ocean\", \"edibility\": \"Edible\"}\nHope that helps.";
        assert_eq!(normalize(raw), record("Tuna", "Fast", "Ocean", "Edible"));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        assert_eq!(
            normalize(r#"{"fish_type":"Trout"}"#),
            record("Trout", "No description available.", "Unknown", "Unknown")
        );
    }

    #[test]
    fn test_unparseable_text_falls_back() {
        assert_eq!(
            normalize("I cannot identify this image."),
            record("Unknown", "I cannot identify this image.", "Unknown", "Unknown")
        );
    }

    #[test]
    fn test_fallback_trims_whitespace() {
        let rec = normalize("  \n no fish here \t\n");
        assert_eq!(rec.description, "no fish here");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), record("Unknown", "", "Unknown", "Unknown"));
    }

    #[test]
    fn test_non_string_values_are_treated_as_absent() {
        let raw = r#"{"fish_type":123,"description":null,"habitat":["sea"],"edibility":{"v":"Edible"}}"#;
        assert_eq!(
            normalize(raw),
            record("Unknown", "No description available.", "Unknown", "Unknown")
        );
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let raw = r#"{"fish_type":"Cod","confidence":0.9,"latin_name":"Gadus morhua"}"#;
        let value = serde_json::to_value(normalize(raw)).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 4);
        assert_eq!(value["fish_type"], "Cod");
    }

    #[test]
    fn test_top_level_array_is_not_an_object() {
        let raw = r#"[{"fish_type":"Carp"}]"#;
        // The brace span `{"fish_type":"Carp"}` is itself a valid object.
        assert_eq!(normalize(raw).fish_type, "Carp");

        let raw = "[1, 2, 3]";
        assert_eq!(normalize(raw), record("Unknown", "[1, 2, 3]", "Unknown", "Unknown"));
    }

    #[test]
    fn test_top_level_scalar_falls_back() {
        assert_eq!(normalize("\"Salmon\"").description, "\"Salmon\"");
        assert_eq!(normalize("42").fish_type, "Unknown");
        assert_eq!(normalize("null").description, "null");
    }

    #[test]
    fn test_greedy_span_over_multiple_objects() {
        // First `{` to last `}` covers both objects and the prose between,
        // which is not valid JSON.
        let raw = r#"Option A: {"fish_type":"Bass"} or option B: {"fish_type":"Perch"}"#;
        assert_eq!(normalize(raw), record("Unknown", raw, "Unknown", "Unknown"));
    }

    #[test]
    fn test_greedy_span_with_nested_braces() {
        let raw = r#"Result: {"fish_type":"Pike","details":{"len":"1m"}} end"#;
        assert_eq!(normalize(raw).fish_type, "Pike");
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let raw = r#"{"fish_type": "Eel", "description": }"#;
        assert_eq!(normalize(raw).fish_type, "Unknown");
        assert_eq!(normalize(raw).description, raw);
    }

    #[test]
    fn test_reversed_braces_do_not_panic() {
        let raw = "} nothing here {";
        assert_eq!(normalize(raw).description, raw);
    }

    #[test]
    fn test_adversarial_inputs_never_panic() {
        let inputs = [
            "{",
            "}",
            "{}",
            "{{{{}}}}",
            "\u{0}\u{1}\u{7f}",
            "{\"fish_type\": \"\u{1F41F}\"}",
            "```",
            "```json\n```",
            "{\"a\":",
        ];
        for input in inputs {
            let value = serde_json::to_value(normalize(input)).unwrap();
            assert!(value.as_object().unwrap().values().all(Value::is_string));
        }
        assert_eq!(normalize("{}"), record("Unknown", "No description available.", "Unknown", "Unknown"));
        assert_eq!(normalize("{\"fish_type\": \"\u{1F41F}\"}").fish_type, "\u{1F41F}");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let first = normalize(r#"{"fish_type":"Koi","description":"d","habitat":"pond","edibility":"Edible"}"#);
        let reserialized = serde_json::to_string(&first).unwrap();
        assert_eq!(normalize(&reserialized), first);
    }
}
