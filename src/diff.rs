//! One-directional structural comparison of materialized records.
//!
//! Only keys present in `expected` are checked — extra keys in `actual` are
//! never reported. Lists pass on membership, not positional equality. This is
//! a fixture-verification utility, not a generic deep-equality law.

use serde_json::{Map, Value};

use crate::models::Record;

/// A value found where the expected structure wanted something else.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub path: String,
    pub actual: Value,
    pub expected: Value,
}

/// Outcome of [`compare`]: every expected key that is absent from the actual
/// structure, and every value that differs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDiff {
    pub missing: Vec<String>,
    pub mismatches: Vec<Mismatch>,
}

impl RecordDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.mismatches.is_empty()
    }
}

/// Compare `actual` against `expected`, both rooted at an empty path.
///
/// Non-object roots compare as equal iff `Value` equality holds.
pub fn compare(actual: &Value, expected: &Value) -> RecordDiff {
    let mut diff = RecordDiff::default();
    match (actual, expected) {
        (Value::Object(actual_map), Value::Object(expected_map)) => {
            walk(actual_map, expected_map, &mut diff, "");
        }
        _ => {
            if actual != expected {
                diff.mismatches.push(Mismatch {
                    path: String::new(),
                    actual: actual.clone(),
                    expected: expected.clone(),
                });
            }
        }
    }
    diff
}

/// Serialize both records and compare their representations.
pub fn compare_records(actual: &Record, expected: &Record) -> Result<RecordDiff, serde_json::Error> {
    Ok(compare(
        &serde_json::to_value(actual)?,
        &serde_json::to_value(expected)?,
    ))
}

fn walk(actual: &Map<String, Value>, expected: &Map<String, Value>, diff: &mut RecordDiff, path: &str) {
    for (key, expected_value) in expected {
        let key_path = format!("{path}[\"{key}\"]");
        let Some(actual_value) = actual.get(key) else {
            diff.missing.push(key_path);
            continue;
        };

        match expected_value {
            Value::Object(expected_map) if is_associative(expected_map) => {
                match actual_value {
                    Value::Object(actual_map) => {
                        walk(actual_map, expected_map, diff, &key_path);
                    }
                    _ => diff.mismatches.push(Mismatch {
                        path: key_path,
                        actual: actual_value.clone(),
                        expected: expected_value.clone(),
                    }),
                }
            }
            // A JSON array, or an object whose keys are "0".."n-1". The
            // latter reproduces the inherited list heuristic: contiguous
            // zero-based keys mean "ordered list", everything else is
            // associative.
            Value::Array(_) | Value::Object(_) => {
                let expected_elements = list_elements(expected_value);
                // An empty expected list constrains nothing, not even the
                // shape of the actual value.
                if expected_elements.is_empty() {
                    continue;
                }
                match actual_value {
                    // Any collection on the actual side participates in the
                    // membership check over its values; an index-keyed
                    // object is a list here too.
                    Value::Array(_) | Value::Object(_) => {
                        let actual_elements = list_elements(actual_value);
                        for element in expected_elements {
                            if !actual_elements.contains(&element) {
                                diff.missing.push(format!("{key_path}[] = {}", render(element)));
                            }
                        }
                    }
                    _ => diff.mismatches.push(Mismatch {
                        path: key_path,
                        actual: actual_value.clone(),
                        expected: expected_value.clone(),
                    }),
                }
            }
            _ => {
                // Scalar: exact type-and-value comparison.
                if actual_value != expected_value {
                    diff.mismatches.push(Mismatch {
                        path: key_path,
                        actual: actual_value.clone(),
                        expected: expected_value.clone(),
                    });
                }
            }
        }
    }
}

/// An object is associative unless its keys form the contiguous sequence
/// "0", "1", ..., "n-1". An empty object counts as a (zero-element) list.
fn is_associative(map: &Map<String, Value>) -> bool {
    map.keys()
        .enumerate()
        .any(|(index, key)| key != &index.to_string())
}

fn list_elements(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(elements) => elements.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Compact single-line rendering for diff reports: bare strings, JSON for
/// everything else, lists as `Array[a,b]`.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(elements) => {
            let inner: Vec<String> = elements.iter().map(render).collect();
            format!("Array[{}]", inner.join(","))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_structures_produce_an_empty_diff() {
        let value = json!({
            "id": "21438481",
            "price": 2450000.0,
            "location": { "city": "Warszawa", "district": "Sielce" },
            "images": ["a.jpg", "b.jpg"],
        });
        assert!(compare(&value, &value).is_empty());
    }

    #[test]
    fn expected_key_absent_from_actual_is_reported_as_missing() {
        let actual = json!({ "id": "1" });
        let expected = json!({ "id": "1", "price": 100.0 });
        let diff = compare(&actual, &expected);
        assert_eq!(diff.missing, vec![r#"["price"]"#.to_string()]);
        assert!(diff.mismatches.is_empty());
    }

    #[test]
    fn extra_actual_keys_are_never_reported() {
        let actual = json!({ "id": "1", "bonus": true });
        let expected = json!({ "id": "1" });
        assert!(compare(&actual, &expected).is_empty());
    }

    #[test]
    fn scalar_mismatch_includes_both_values() {
        let actual = json!({ "city": "Warszawa" });
        let expected = json!({ "city": "Kraków" });
        let diff = compare(&actual, &expected);
        assert_eq!(
            diff.mismatches,
            vec![Mismatch {
                path: r#"["city"]"#.to_string(),
                actual: json!("Warszawa"),
                expected: json!("Kraków"),
            }]
        );
    }

    #[test]
    fn scalar_comparison_is_type_strict() {
        // "6" (string) against 6 (number) is a mismatch, not an equality.
        let actual = json!({ "rooms": "6" });
        let expected = json!({ "rooms": 6 });
        assert_eq!(compare(&actual, &expected).mismatches.len(), 1);
    }

    #[test]
    fn nested_maps_recurse_with_extended_paths() {
        let actual = json!({ "otherDetails": { "details": { "Rynek": "wtórny" } } });
        let expected = json!({ "otherDetails": { "details": { "Rynek": "pierwotny", "Typ": "dom" } } });
        let diff = compare(&actual, &expected);
        assert_eq!(diff.missing, vec![r#"["otherDetails"]["details"]["Typ"]"#.to_string()]);
        assert_eq!(diff.mismatches.len(), 1);
        assert_eq!(diff.mismatches[0].path, r#"["otherDetails"]["details"]["Rynek"]"#);
    }

    #[test]
    fn list_membership_is_order_independent_and_subset_tolerant() {
        let actual = json!({ "images": ["b.jpg", "a.jpg", "c.jpg"] });
        let expected = json!({ "images": ["a.jpg", "b.jpg"] });
        assert!(compare(&actual, &expected).is_empty());
    }

    #[test]
    fn missing_list_elements_become_synthetic_missing_entries() {
        let actual = json!({ "images": ["a.jpg"] });
        let expected = json!({ "images": ["a.jpg", "b.jpg", "c.jpg"] });
        let diff = compare(&actual, &expected);
        assert_eq!(
            diff.missing,
            vec![
                r#"["images"][] = b.jpg"#.to_string(),
                r#"["images"][] = c.jpg"#.to_string(),
            ]
        );
    }

    #[test]
    fn expected_list_against_non_list_actual_is_one_mismatch() {
        let actual = json!({ "images": "a.jpg" });
        let expected = json!({ "images": ["a.jpg", "b.jpg"] });
        let diff = compare(&actual, &expected);
        assert!(diff.missing.is_empty());
        assert_eq!(diff.mismatches.len(), 1);
        assert_eq!(diff.mismatches[0].path, r#"["images"]"#);
    }

    #[test]
    fn zero_based_index_keyed_object_is_treated_as_a_list() {
        // Inherited heuristic: {"0": .., "1": ..} is a list, not a map.
        let actual = json!({ "images": ["b.jpg", "a.jpg"] });
        let expected = json!({ "images": { "0": "a.jpg", "1": "b.jpg" } });
        assert!(compare(&actual, &expected).is_empty());

        // A non-contiguous integer keying stays associative, so the actual
        // array no longer matches its shape.
        let expected_sparse = json!({ "images": { "0": "a.jpg", "2": "b.jpg" } });
        let diff = compare(&actual, &expected_sparse);
        assert_eq!(diff.mismatches.len(), 1);
        assert_eq!(diff.mismatches[0].path, r#"["images"]"#);
    }

    #[test]
    fn index_keyed_object_on_the_actual_side_is_a_list_too() {
        // Reflexivity: a structure is never different from itself, even
        // when a list is carried as a {"0": .., "1": ..} object.
        let value = json!({ "images": { "0": "a.jpg", "1": "b.jpg" } });
        assert!(compare(&value, &value).is_empty());

        // And membership checks run over the object's values.
        let actual = json!({ "images": { "0": "b.jpg", "1": "a.jpg", "2": "c.jpg" } });
        let expected = json!({ "images": ["a.jpg", "b.jpg"] });
        assert!(compare(&actual, &expected).is_empty());

        let diff = compare(&actual, &json!({ "images": ["z.jpg"] }));
        assert_eq!(diff.missing, vec![r#"["images"][] = z.jpg"#.to_string()]);
    }

    #[test]
    fn empty_expected_collections_constrain_nothing() {
        // {} classifies as a zero-element list; it must pass against an
        // empty map, an empty list, and anything else.
        let expected = json!({ "localization": {} });
        assert!(compare(&json!({ "localization": {} }), &expected).is_empty());
        assert!(compare(&json!({ "localization": [] }), &expected).is_empty());
        assert!(compare(&json!({ "localization": "brak" }), &expected).is_empty());
    }

    #[test]
    fn renders_values_for_reports() {
        assert_eq!(render(&json!("a.jpg")), "a.jpg");
        assert_eq!(render(&json!(14)), "14");
        assert_eq!(render(&json!(["a", "b"])), "Array[a,b]");
    }
}
