use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{pick, pick_opt_i64, pick_opt_str};

/// The profile subset exposed for a Douyin user. Every field is nullable:
/// absent upstream fields serialize as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DouyinProfile {
    pub follower_count: Option<i64>,
    pub max_follower_count: Option<i64>,
    pub ip_location: Option<String>,
    pub live_status: Option<i64>,
    pub nickname: Option<String>,
    // room_id and uid pass through untyped: the upstream emits them as a
    // number or a string depending on endpoint version.
    pub room_id: Option<Value>,
    pub sec_uid: Option<String>,
    pub uid: Option<Value>,
    pub unique_id: Option<String>,
}

impl DouyinProfile {
    /// Maps the nested `data.user` object of the profile payload.
    pub fn from_user(user: &Value) -> Self {
        Self {
            follower_count: pick_opt_i64(user, &["follower_count"]),
            max_follower_count: pick_opt_i64(user, &["max_follower_count"]),
            ip_location: pick_opt_str(user, &["ip_location"]),
            live_status: pick_opt_i64(user, &["live_status", "liveStatus"]),
            nickname: pick_opt_str(user, &["nickname"]),
            room_id: pick(user, &["room_id", "roomid"]).cloned(),
            sec_uid: pick_opt_str(user, &["sec_uid"]),
            uid: pick(user, &["uid"]).cloned(),
            unique_id: pick_opt_str(user, &["unique_id"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_user_maps_to_all_nulls() {
        let profile = DouyinProfile::from_user(&json!({}));
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            json!({
                "follower_count": null,
                "max_follower_count": null,
                "ip_location": null,
                "live_status": null,
                "nickname": null,
                "room_id": null,
                "sec_uid": null,
                "uid": null,
                "unique_id": null
            })
        );
    }

    #[test]
    fn test_full_user_maps_through() {
        let user = json!({
            "follower_count": 1000,
            "max_follower_count": 2000,
            "ip_location": "IP属地:北京",
            "live_status": 1,
            "nickname": "主播",
            "room_id": 7123456789012345678u64,
            "sec_uid": "MS4wLjAB",
            "uid": "42",
            "unique_id": "handle"
        });
        let profile = DouyinProfile::from_user(&user);
        assert_eq!(profile.follower_count, Some(1000));
        assert_eq!(profile.max_follower_count, Some(2000));
        assert_eq!(profile.ip_location.as_deref(), Some("IP属地:北京"));
        assert_eq!(profile.live_status, Some(1));
        assert_eq!(profile.nickname.as_deref(), Some("主播"));
        assert_eq!(profile.room_id, Some(json!(7123456789012345678u64)));
        assert_eq!(profile.sec_uid.as_deref(), Some("MS4wLjAB"));
        assert_eq!(profile.uid, Some(json!("42")));
        assert_eq!(profile.unique_id.as_deref(), Some("handle"));
    }
}
