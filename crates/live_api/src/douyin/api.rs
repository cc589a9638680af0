use reqwest::Client;
use serde_json::Value;

use crate::errors::LiveApiError;

pub const USER_PROFILE_PATH: &str = "/api/douyin/web/handler_user_profile";

/// Fetches a Douyin user profile by `sec_user_id`. Unlike the Bilibili
/// single-room call, failures here surface as errors for the route to map
/// to a 500.
pub async fn get_user_profile(
    client: &Client,
    api_base: &str,
    sec_user_id: &str,
) -> Result<Value, LiveApiError> {
    let url = format!(
        "{api_base}{USER_PROFILE_PATH}?sec_user_id={}",
        urlencoding::encode(sec_user_id)
    );
    let resp = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    if !status.is_success() {
        log::error!("get_user_profile: upstream error {status}: {text}");
        return Err(LiveApiError::ApiError {
            error: format!("douyin api error: {status} {text}"),
        });
    }
    serde_json::from_str::<Value>(&text).map_err(|_| {
        log::error!("get_user_profile: unparsable response (status={status})");
        LiveApiError::ApiError {
            error: "douyin api returned invalid json".to_string(),
        }
    })
}
