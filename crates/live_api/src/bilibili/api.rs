use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::{json, Value};

use super::response::LiveInfo;
use crate::errors::LiveApiError;

pub const ROOM_INFO_PATH: &str = "/room/v1/Room/getRoomInfoOld";
pub const STATUS_INFO_PATH: &str = "/room/v1/Room/get_status_info_by_uids";
pub const MASTER_INFO_PATH: &str = "/live_user/v1/Master/info";

// The live API rejects unbranded requests, so every call carries a
// browser-shaped header set.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("User-Agent", "Mozilla/5.0".parse().unwrap());
    headers.insert(
        "Accept",
        "application/json, text/plain, */*".parse().unwrap(),
    );
    headers.insert("Referer", "https://live.bilibili.com".parse().unwrap());
    headers.insert("Origin", "https://live.bilibili.com".parse().unwrap());
    headers
}

/// Queries live room status for a single streamer. Never fails: network
/// and parse problems collapse into `code: -1` with a message, so the
/// route keeps answering 200 with the failure embedded.
pub async fn get_live_info(client: &Client, api_base: &str, uid: &str) -> LiveInfo {
    let url = format!("{api_base}{ROOM_INFO_PATH}?mid={uid}");
    let resp = match client.get(&url).headers(browser_headers()).send().await {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("get_live_info: request failed for uid {uid}: {e}");
            return LiveInfo::failed(e.to_string());
        }
    };
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let payload = serde_json::from_str::<Value>(&text).ok();
    if payload.is_none() {
        log::warn!("get_live_info: unparsable response for uid {uid} (status={status})");
    }
    LiveInfo::from_upstream(payload.as_ref(), status)
}

/// Queries live status for a batch of streamers in one POST. The upstream
/// endpoint only accepts numeric UIDs. An unusable body yields `Ok(None)`
/// so the caller can answer 502; only transport failures are errors.
pub async fn get_status_info_by_uids(
    client: &Client,
    api_base: &str,
    uids: &[i64],
) -> Result<Option<Value>, LiveApiError> {
    let url = format!("{api_base}{STATUS_INFO_PATH}");
    let resp = client
        .post(&url)
        .headers(browser_headers())
        .json(&json!({ "uids": uids }))
        .send()
        .await?;
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&text) {
        Ok(payload) => Ok(Some(payload)),
        Err(_) => {
            log::error!("get_status_info_by_uids: unparsable response (status={status})");
            Ok(None)
        }
    }
}

/// Resolves a streamer's display name, falling back to the UID string on
/// any failure or when the upstream omits it.
pub async fn get_uname_by_uid(client: &Client, api_base: &str, uid: &str) -> String {
    let url = format!("{api_base}{MASTER_INFO_PATH}?uid={uid}");
    let resp = match client.get(&url).headers(browser_headers()).send().await {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("get_uname_by_uid: request failed for uid {uid}: {e}");
            return uid.to_string();
        }
    };
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&text) {
        Ok(payload) => payload["data"]["info"]["uname"]
            .as_str()
            .filter(|uname| !uname.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uid.to_string()),
        Err(_) => {
            log::warn!("get_uname_by_uid: unparsable response for uid {uid} (status={status})");
            uid.to_string()
        }
    }
}
