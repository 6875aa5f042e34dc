//! Depth-first search for the item sub-tree inside an arbitrary JSON value.

use serde_json::Value;

/// Key whose object value is taken to be the item record.
pub(crate) const ITEM_KEY: &str = "item";

/// Returns the first object stored under an `item` key, walking maps and
/// arrays in document order.
///
/// A map that holds `item` pointing at an object matches immediately; any
/// other map or array is searched child by child and the first hit wins.
/// Scalars never match. Depth is bounded by `serde_json`'s parser recursion
/// limit, so every value reaching this function is finite and shallow enough
/// for the stack.
pub(crate) fn find_item(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if let Some(item @ Value::Object(_)) = map.get(ITEM_KEY) {
                return Some(item);
            }
            map.values().find_map(find_item)
        }
        Value::Array(elements) => elements.iter().find_map(find_item),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn matches_item_key_at_top_level() {
        let doc = json!({"item": {"id": 1}});
        assert_eq!(find_item(&doc), Some(&json!({"id": 1})));
    }

    #[test]
    fn matches_item_nested_in_arrays_and_maps() {
        let doc = json!(["$", "div", null, {"children": [["$", "x", {"item": {"id": 7}}]]}]);
        assert_eq!(find_item(&doc), Some(&json!({"id": 7})));
    }

    #[test]
    fn first_match_in_encounter_order_wins() {
        let doc = json!([
            {"props": {"item": {"id": 1}}},
            {"item": {"id": 2}}
        ]);
        assert_eq!(find_item(&doc), Some(&json!({"id": 1})));
    }

    #[test]
    fn sibling_keys_are_searched_in_document_order() {
        let doc: Value =
            serde_json::from_str(r#"{"z": {"item": {"id": "z"}}, "a": {"item": {"id": "a"}}}"#)
                .unwrap();
        assert_eq!(find_item(&doc), Some(&json!({"id": "z"})));
    }

    #[test]
    fn non_object_item_value_is_not_a_match() {
        let doc = json!({"item": "$L1f", "other": {"item": {"id": 3}}});
        assert_eq!(find_item(&doc), Some(&json!({"id": 3})));
    }

    #[test]
    fn scalars_and_missing_key_yield_none() {
        assert_eq!(find_item(&json!("item")), None);
        assert_eq!(find_item(&json!(42)), None);
        assert_eq!(find_item(&json!({"items": [{"id": 1}]})), None);
    }
}
