//! Object-key rewriting
//!
//! Some datastores reject certain characters in document keys (dots,
//! dollar signs). [`replace_in_keys`] rewrites every object key at every
//! nesting depth, leaving values untouched, so keys can be round-tripped
//! through such a store.

use serde_json::Value;

/// Returns a copy of the value with every occurrence of `from` in any
/// object key replaced by `to`.
///
/// Values are never altered. An empty `from` passes the value through
/// unchanged.
pub fn replace_in_keys(data: &Value, from: &str, to: &str) -> Value {
    if from.is_empty() {
        return data.clone();
    }

    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.replace(from, to), replace_in_keys(value, from, to)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| replace_in_keys(item, from, to))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replaces_at_every_depth() {
        let data = json!({
            "a.b": 1,
            "nested": { "c.d.e": { "f.g": 2 } },
            "list": [ { "h.i": 3 } ]
        });

        let rewritten = replace_in_keys(&data, ".", "_");
        assert_eq!(
            rewritten,
            json!({
                "a_b": 1,
                "nested": { "c_d_e": { "f_g": 2 } },
                "list": [ { "h_i": 3 } ]
            })
        );
    }

    #[test]
    fn test_values_are_untouched() {
        let data = json!({ "key": "a.b.c" });
        let rewritten = replace_in_keys(&data, ".", "_");
        assert_eq!(rewritten["key"], "a.b.c");
    }

    #[test]
    fn test_multicharacter_fragments() {
        let data = json!({ "foo__bar": 1 });
        assert_eq!(replace_in_keys(&data, "__", "-"), json!({ "foo-bar": 1 }));
    }

    #[test]
    fn test_empty_fragment_is_a_passthrough() {
        let data = json!({ "a": 1 });
        assert_eq!(replace_in_keys(&data, "", "_"), data);
    }

    #[test]
    fn test_non_objects_pass_through() {
        assert_eq!(replace_in_keys(&json!("a.b"), ".", "_"), json!("a.b"));
        assert_eq!(replace_in_keys(&json!(5), ".", "_"), json!(5));
    }
}
