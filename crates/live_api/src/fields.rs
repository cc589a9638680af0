use serde_json::Value;

/// Looks up the first key from an ordered alias list that is present and
/// non-null. Upstream payloads vary field spellings across versions, so
/// every mapped field consults its aliases in order before defaulting.
pub fn pick<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| obj.get(key).filter(|v| !v.is_null()))
}

pub fn pick_i64(obj: &Value, keys: &[&str], default: i64) -> i64 {
    pick(obj, keys).and_then(Value::as_i64).unwrap_or(default)
}

pub fn pick_str(obj: &Value, keys: &[&str], default: &str) -> String {
    pick(obj, keys)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

pub fn pick_opt_i64(obj: &Value, keys: &[&str]) -> Option<i64> {
    pick(obj, keys).and_then(Value::as_i64)
}

pub fn pick_opt_str(obj: &Value, keys: &[&str]) -> Option<String> {
    pick(obj, keys).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_order() {
        let obj = json!({ "room_id": 1, "roomid": 2 });
        assert_eq!(pick_i64(&obj, &["room_id", "roomid"], 0), 1);
        assert_eq!(pick_i64(&obj, &["roomid", "room_id"], 0), 2);
    }

    #[test]
    fn test_null_falls_through_to_alias() {
        let obj = json!({ "live_status": null, "liveStatus": 1 });
        assert_eq!(pick_i64(&obj, &["live_status", "liveStatus"], 0), 1);
    }

    #[test]
    fn test_missing_keys_default() {
        let obj = json!({});
        assert_eq!(pick_i64(&obj, &["short_id", "shortid"], 0), 0);
        assert_eq!(pick_str(&obj, &["tags", "tag_name"], ""), "");
        assert_eq!(pick_opt_i64(&obj, &["follower_count"]), None);
        assert_eq!(pick_opt_str(&obj, &["nickname"]), None);
    }

    #[test]
    fn test_type_mismatch_defaults() {
        let obj = json!({ "live_time": "not a number" });
        assert_eq!(pick_i64(&obj, &["live_time"], 0), 0);
    }
}
