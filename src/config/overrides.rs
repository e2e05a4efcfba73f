use serde::Serialize;
use serde_json::Value;

/// Serialize CLI overrides, dropping every value the user did not set.
///
/// Unset `Option` flags serialize as `null` and would otherwise overwrite
/// lower config layers; empty arrays and objects are dropped for the same
/// reason.
pub fn prune_unset<T: Serialize>(input: T) -> Value {
    let mut value = serde_json::to_value(input).unwrap_or(Value::Null);
    prune_recursive(&mut value);
    value
}

fn prune_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                prune_recursive(v);
            }
            map.retain(|_, v| !is_unset(v));
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                prune_recursive(item);
            }
        }
        _ => {}
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(arr) => arr.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nulls_and_empties_removed() {
        let pruned = prune_unset(json!({
            "evaluation": { "strength_threshold": null },
            "parallel": { "max_threads": 4, "progress_interval": null },
            "tags": [],
        }));
        assert_eq!(pruned, json!({ "parallel": { "max_threads": 4 } }));
    }

    #[test]
    fn test_falsy_values_are_kept() {
        let pruned = prune_unset(json!({ "input": { "trim": false, "encoding": "utf-8" } }));
        assert_eq!(pruned["input"]["trim"], false);
    }
}
