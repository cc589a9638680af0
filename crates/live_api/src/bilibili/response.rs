use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{pick, pick_i64, pick_str};

/// Single-room status, the subset of `Room/getRoomInfoOld` this service
/// exposes. `code`/`message` mirror the upstream envelope so callers can
/// tell an upstream failure (`code: -1`) from a room that is simply
/// offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveInfo {
    pub code: i64,
    pub message: String,
    #[serde(rename = "liveStatus")]
    pub live_status: i64,
    pub url: String,
    pub roomid: i64,
}

impl LiveInfo {
    pub fn failed(message: String) -> Self {
        Self {
            code: -1,
            message,
            live_status: 0,
            url: String::new(),
            roomid: 0,
        }
    }

    /// Maps the upstream payload, or its absence. A body that did not
    /// parse as JSON arrives as `None` and yields the sentinel `code: -1`
    /// with the raw HTTP status embedded in the message.
    pub fn from_upstream(payload: Option<&Value>, http_status: u16) -> Self {
        let room = payload
            .and_then(|j| j.get("data"))
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        Self {
            code: payload
                .and_then(|j| j.get("code"))
                .and_then(Value::as_i64)
                .unwrap_or(-1),
            message: payload
                .and_then(|j| j.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("raw response status={http_status}")),
            live_status: pick_i64(&room, &["liveStatus", "live_status"], 0),
            url: pick_str(&room, &["url"], ""),
            roomid: pick_i64(&room, &["roomid", "room_id"], 0),
        }
    }
}

/// One entry of the batch status map, keyed by requested UID string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStatusEntry {
    // uid passes through untyped: the upstream emits it as a number, but a
    // requested UID that is not numeric falls back as a string.
    pub uid: Value,
    pub uname: String,
    pub title: String,
    pub room_id: i64,
    pub short_id: i64,
    pub live_time: i64,
    pub live_status: i64,
    pub tags: String,
}

impl LiveStatusEntry {
    /// Maps one upstream entry. Every field has a default, so an entry the
    /// upstream omitted entirely still comes out complete; `uid` falls
    /// back to the requested UID, parsed numeric when possible.
    pub fn from_upstream(info: &Value, requested_uid: &str) -> Self {
        let uid = pick(info, &["uid"])
            .cloned()
            .unwrap_or_else(|| match requested_uid.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::from(requested_uid),
            });
        Self {
            uid,
            uname: pick_str(info, &["uname"], ""),
            title: pick_str(info, &["title"], ""),
            room_id: pick_i64(info, &["room_id", "roomid"], 0),
            short_id: pick_i64(info, &["short_id", "shortid"], 0),
            live_time: pick_i64(info, &["live_time"], 0),
            live_status: pick_i64(info, &["live_status", "liveStatus"], 0),
            tags: pick_str(info, &["tags", "tag_name"], ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_live_info_maps_full_payload() {
        let payload = json!({
            "code": 0,
            "message": "ok",
            "data": { "liveStatus": 1, "url": "http://x", "roomid": 456 }
        });
        let info = LiveInfo::from_upstream(Some(&payload), 200);
        assert_eq!(
            info,
            LiveInfo {
                code: 0,
                message: "ok".to_string(),
                live_status: 1,
                url: "http://x".to_string(),
                roomid: 456,
            }
        );
    }

    #[test]
    fn test_live_info_unparsable_body() {
        let info = LiveInfo::from_upstream(None, 200);
        assert_eq!(info.code, -1);
        assert_eq!(info.message, "raw response status=200");
        assert_eq!(info.live_status, 0);
        assert_eq!(info.url, "");
        assert_eq!(info.roomid, 0);
    }

    #[test]
    fn test_live_info_alternate_spellings() {
        let payload = json!({
            "code": 0,
            "message": "ok",
            "data": { "live_status": 2, "room_id": 7 }
        });
        let info = LiveInfo::from_upstream(Some(&payload), 200);
        assert_eq!(info.live_status, 2);
        assert_eq!(info.roomid, 7);
    }

    #[test]
    fn test_live_info_serializes_camel_case_status() {
        let info = LiveInfo::failed("boom".to_string());
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "code": -1,
                "message": "boom",
                "liveStatus": 0,
                "url": "",
                "roomid": 0
            })
        );
    }

    #[test]
    fn test_entry_defaults_are_total() {
        let entry = LiveStatusEntry::from_upstream(&json!({}), "999");
        assert_eq!(
            entry,
            LiveStatusEntry {
                uid: json!(999),
                uname: String::new(),
                title: String::new(),
                room_id: 0,
                short_id: 0,
                live_time: 0,
                live_status: 0,
                tags: String::new(),
            }
        );
    }

    #[test]
    fn test_entry_uid_fallback_keeps_non_numeric_string() {
        let entry = LiveStatusEntry::from_upstream(&json!({}), "not-a-number");
        assert_eq!(entry.uid, json!("not-a-number"));
    }

    #[test]
    fn test_entry_prefers_upstream_fields() {
        let info = json!({
            "uid": 1,
            "uname": "miko",
            "title": "live!",
            "roomid": 10,
            "shortid": 2,
            "live_time": 100,
            "liveStatus": 1,
            "tag_name": "music"
        });
        let entry = LiveStatusEntry::from_upstream(&info, "1");
        assert_eq!(entry.uname, "miko");
        assert_eq!(entry.title, "live!");
        assert_eq!(entry.room_id, 10);
        assert_eq!(entry.short_id, 2);
        assert_eq!(entry.live_time, 100);
        assert_eq!(entry.live_status, 1);
        assert_eq!(entry.tags, "music");
    }
}
