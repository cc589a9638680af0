use std::collections::BTreeMap;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use crate::http_server::{pages, params};
use crate::state::State;
use live_api::bilibili::{self, LiveInfo, LiveStatusEntry};
use live_api::douyin::{self, DouyinProfile};
use live_api::errors::LiveApiError;

const SINGLE_KEYS: &[&str] = &["uid"];
const BATCH_KEYS: &[&str] = &["uids[]", "uids"];
const DOUYIN_KEYS: &[&str] = &["sec_user_id", "sec_uid"];

#[derive(Debug, Serialize, Deserialize)]
struct ApiResponse<T> {
    apisuccess: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            apisuccess: true,
            data,
        }
    }
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn bad_gateway(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.to_string(),
        }
    }

    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<LiveApiError> for ApiError {
    fn from(e: LiveApiError) -> Self {
        log::error!("upstream call failed: {e}");
        Self::internal(e.to_string())
    }
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

async fn live_info(state: State, uid: &str) -> Json<ApiResponse<LiveInfo>> {
    let info = bilibili::api::get_live_info(&state.client, &state.config.bilibili_api_base, uid).await;
    Json(ApiResponse::success(info))
}

async fn handler_live_info_get(
    state: axum::extract::State<State>,
    query: axum::extract::RawQuery,
) -> Result<Json<ApiResponse<LiveInfo>>, ApiError> {
    let uids = params::from_query(query.0.as_deref().unwrap_or(""), SINGLE_KEYS);
    let Some(uid) = uids.first() else {
        return Err(ApiError::bad_request("missing uid query parameter"));
    };
    Ok(live_info(state.0, uid).await)
}

async fn handler_live_info_post(
    state: axum::extract::State<State>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ApiResponse<LiveInfo>>, ApiError> {
    let uids = params::from_body(content_type(&headers), &body, SINGLE_KEYS);
    let Some(uid) = uids.first() else {
        return Err(ApiError::bad_request("missing uid"));
    };
    Ok(live_info(state.0, uid).await)
}

/// Looks up a batch entry by the requested key, then by its canonical
/// numeric spelling ("0123" and "123" address the same UID).
fn lookup_entry<'a>(data: &'a Value, uid: &str) -> Option<&'a Value> {
    if let Some(info) = data.get(uid) {
        return Some(info);
    }
    let canonical = uid.parse::<i64>().ok()?.to_string();
    if canonical == uid {
        return None;
    }
    data.get(canonical.as_str())
}

async fn live_infos(
    state: State,
    uids: Vec<String>,
) -> Result<Json<ApiResponse<BTreeMap<String, LiveStatusEntry>>>, ApiError> {
    if uids.is_empty() {
        return Err(ApiError::bad_request("missing uids parameter"));
    }
    // The upstream batch endpoint only takes numeric IDs; non-numeric
    // requests still get a defaulted entry in the response map.
    let numeric: Vec<i64> = uids.iter().filter_map(|uid| uid.parse().ok()).collect();
    let upstream = bilibili::api::get_status_info_by_uids(
        &state.client,
        &state.config.bilibili_api_base,
        &numeric,
    )
    .await?;
    let Some(upstream) = upstream else {
        return Err(ApiError::bad_gateway("invalid response from upstream"));
    };
    let empty = Value::Object(serde_json::Map::new());
    let data = upstream
        .get("data")
        .filter(|data| data.is_object())
        .unwrap_or(&empty);
    let mut result = BTreeMap::new();
    for uid in &uids {
        let info = lookup_entry(data, uid).unwrap_or(&empty);
        result.insert(uid.clone(), LiveStatusEntry::from_upstream(info, uid));
    }
    Ok(Json(ApiResponse::success(result)))
}

async fn handler_live_infos_get(
    state: axum::extract::State<State>,
    query: axum::extract::RawQuery,
) -> Result<Json<ApiResponse<BTreeMap<String, LiveStatusEntry>>>, ApiError> {
    let uids = params::from_query(query.0.as_deref().unwrap_or(""), BATCH_KEYS);
    live_infos(state.0, uids).await
}

async fn handler_live_infos_post(
    state: axum::extract::State<State>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ApiResponse<BTreeMap<String, LiveStatusEntry>>>, ApiError> {
    let uids = params::from_body(content_type(&headers), &body, BATCH_KEYS);
    live_infos(state.0, uids).await
}

async fn live_uname(state: State, uid: &str) -> Json<ApiResponse<String>> {
    let uname =
        bilibili::api::get_uname_by_uid(&state.client, &state.config.bilibili_api_base, uid).await;
    Json(ApiResponse::success(uname))
}

async fn handler_live_uname_get(
    state: axum::extract::State<State>,
    query: axum::extract::RawQuery,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let uids = params::from_query(query.0.as_deref().unwrap_or(""), SINGLE_KEYS);
    let Some(uid) = uids.first() else {
        return Err(ApiError::bad_request("missing uid query parameter"));
    };
    Ok(live_uname(state.0, uid).await)
}

async fn handler_live_uname_post(
    state: axum::extract::State<State>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let uids = params::from_body(content_type(&headers), &body, SINGLE_KEYS);
    let Some(uid) = uids.first() else {
        return Err(ApiError::bad_request("missing uid"));
    };
    Ok(live_uname(state.0, uid).await)
}

async fn douyin_profile(
    state: State,
    sec_user_id: &str,
) -> Result<Json<ApiResponse<DouyinProfile>>, ApiError> {
    let payload =
        douyin::api::get_user_profile(&state.client, &state.config.douyin_api_base, sec_user_id)
            .await?;
    let empty = Value::Object(serde_json::Map::new());
    let user = payload
        .get("data")
        .and_then(|data| data.get("user"))
        .unwrap_or(&empty);
    Ok(Json(ApiResponse::success(DouyinProfile::from_user(user))))
}

async fn handler_douyin_profile_get(
    state: axum::extract::State<State>,
    query: axum::extract::RawQuery,
) -> Result<Json<ApiResponse<DouyinProfile>>, ApiError> {
    let ids = params::from_query(query.0.as_deref().unwrap_or(""), DOUYIN_KEYS);
    let Some(sec_user_id) = ids.first() else {
        return Err(ApiError::bad_request("missing sec_user_id query parameter"));
    };
    douyin_profile(state.0, sec_user_id).await
}

async fn handler_douyin_profile_post(
    state: axum::extract::State<State>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ApiResponse<DouyinProfile>>, ApiError> {
    let ids = params::from_body(content_type(&headers), &body, DOUYIN_KEYS);
    let Some(sec_user_id) = ids.first() else {
        return Err(ApiError::bad_request("missing sec_user_id"));
    };
    douyin_profile(state.0, sec_user_id).await
}

fn router(state: State) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/tgbot", get(pages::tgbot))
        .route("/tgbot/init", get(pages::tgbot_init))
        .route(
            "/live-info",
            get(handler_live_info_get).post(handler_live_info_post),
        )
        .route(
            "/live-infos",
            get(handler_live_infos_get).post(handler_live_infos_post),
        )
        .route(
            "/live-uname",
            get(handler_live_uname_get).post(handler_live_uname_post),
        )
        .route(
            "/douyin-profile",
            get(handler_douyin_profile_get).post(handler_douyin_profile_post),
        )
        .with_state(state)
}

pub async fn start_api_server(state: State) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let addr = state.config.bind.clone();
    let app = router(state).layer(cors);

    log::info!("Starting API server on http://{addr}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind to address {addr}: {e}");
            log::error!("Please check if the port is already in use or try a different port");
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {e}");
    }
}
