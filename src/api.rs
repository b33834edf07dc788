//! Leaderboard and feedback HTTP client
//!
//! Thin JSON client over the browser fetch API. Every call degrades to a
//! fallback value on failure; gameplay never waits on the network.

use serde::{Deserialize, Serialize};

use crate::profile::PlayerProfile;

/// Same-origin API mount point
pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload<'a> {
    player_id: &'a str,
    name: &'a str,
    social: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScorePayload<'a> {
    player_id: &'a str,
    score: u32,
    coins: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackPayload<'a> {
    player_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    #[serde(default)]
    pub social: String,
    pub score: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreResponse {
    rank: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Register (or refresh) the player identity server-side
    pub async fn register(&self, profile: &PlayerProfile) -> bool {
        let payload = RegisterPayload {
            player_id: &profile.player_id,
            name: &profile.name,
            social: &profile.social,
        };
        match post_json(&self.url("players"), &payload).await {
            Ok(_) => true,
            Err(err) => {
                log::warn!("player registration failed: {err}");
                false
            }
        }
    }

    /// Submit a finished run; returns the leaderboard rank when the server
    /// reports one
    pub async fn submit_score(&self, profile: &PlayerProfile, score: u32, coins: u32) -> Option<u32> {
        let payload = ScorePayload {
            player_id: &profile.player_id,
            score,
            coins,
        };
        match post_json(&self.url("scores"), &payload).await {
            Ok(body) => serde_json::from_str::<ScoreResponse>(&body)
                .ok()
                .and_then(|r| r.rank),
            Err(err) => {
                log::warn!("score submission failed: {err}");
                None
            }
        }
    }

    /// Top entries, best first. Empty on any failure.
    pub async fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let url = format!("{}?limit={limit}", self.url("leaderboard"));
        match get_json(&url).await {
            Ok(body) => serde_json::from_str(&body).unwrap_or_else(|err| {
                log::warn!("bad leaderboard payload: {err}");
                Vec::new()
            }),
            Err(err) => {
                log::warn!("leaderboard fetch failed: {err}");
                Vec::new()
            }
        }
    }

    pub async fn send_feedback(&self, profile: &PlayerProfile, message: &str) -> bool {
        let payload = FeedbackPayload {
            player_id: &profile.player_id,
            message,
        };
        match post_json(&self.url("feedback"), &payload).await {
            Ok(_) => true,
            Err(err) => {
                log::warn!("feedback submission failed: {err}");
                false
            }
        }
    }

    pub async fn health(&self) -> bool {
        get_json(&self.url("health")).await.is_ok()
    }
}

async fn post_json<T: Serialize>(url: &str, payload: &T) -> Result<String, String> {
    let body = serde_json::to_string(payload).map_err(|e| e.to_string())?;
    fetch(url, "POST", Some(body)).await
}

async fn get_json(url: &str) -> Result<String, String> {
    fetch(url, "GET", None).await
}

#[cfg(target_arch = "wasm32")]
async fn fetch(url: &str, method: &str, body: Option<String>) -> Result<String, String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let describe = |v: JsValue| v.as_string().unwrap_or_else(|| format!("{v:?}"));

    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(describe)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(describe)?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(describe)?;
    let response: Response = response.dyn_into().map_err(|_| "not a Response".to_string())?;

    if !response.ok() {
        return Err(format!("http {}", response.status()));
    }

    let text = JsFuture::from(response.text().map_err(describe)?)
        .await
        .map_err(describe)?;
    Ok(text.as_string().unwrap_or_default())
}

/// Native stub: there is no server to talk to off the web
#[cfg(not(target_arch = "wasm32"))]
async fn fetch(url: &str, method: &str, _body: Option<String>) -> Result<String, String> {
    log::debug!("skipping {method} {url} on native");
    Err("network unavailable on native".to_string())
}
