use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status payload reported by the capture server. Extra fields the server
/// may add are ignored; the feature flags are optional because older
/// servers omit them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CaptureStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        rename = "videoEnabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_enabled: Option<bool>,
    #[serde(
        default,
        rename = "audioEnabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_enabled: Option<bool>,
    #[serde(
        default,
        rename = "analysisEnabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_enabled: Option<bool>,
}

impl CaptureStatus {
    fn unreachable(message: &str) -> Self {
        Self {
            error: true,
            message: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(default)]
    pub message: String,
}

impl ActionResult {
    fn failed(message: &str) -> Self {
        Self {
            success: false,
            running: None,
            message: message.to_string(),
        }
    }
}

/// Client for the capture server's REST surface. Every operation resolves to
/// a payload: transport and parse failures are logged and mapped to the
/// uniform error shapes, never surfaced as `Err` to callers.
#[derive(Clone)]
pub struct CaptureClient {
    http: reqwest::Client,
    base_url: String,
}

impl CaptureClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/api/capture/{tail}", self.base_url)
    }

    pub async fn get_status(&self) -> CaptureStatus {
        let url = self.endpoint("status");
        match fetch_json::<CaptureStatus>(self.http.get(&url)).await {
            Ok(status) => status,
            Err(err) => {
                tracing::error!("Status request to {url} failed: {err}");
                CaptureStatus::unreachable("Unable to reach the capture server")
            }
        }
    }

    pub async fn get_config(&self) -> Value {
        let url = self.endpoint("config");
        match fetch_json::<Value>(self.http.get(&url)).await {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("Config request to {url} failed: {err}");
                serde_json::json!({
                    "error": true,
                    "message": "Unable to retrieve the capture configuration",
                })
            }
        }
    }

    pub async fn start_capture(&self) -> ActionResult {
        self.post_action("start", "Unable to start the capture").await
    }

    pub async fn stop_capture(&self) -> ActionResult {
        self.post_action("stop", "Unable to stop the capture").await
    }

    pub async fn restart_capture(&self) -> ActionResult {
        self.post_action("restart", "Unable to restart the capture")
            .await
    }

    async fn post_action(&self, tail: &str, fallback: &str) -> ActionResult {
        let url = self.endpoint(tail);
        match fetch_json::<ActionResult>(self.http.post(&url)).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("Capture {tail} request to {url} failed: {err}");
                ActionResult::failed(fallback)
            }
        }
    }
}

// Single attempt, no retries. The body is parsed regardless of the HTTP
// status code, as the server reports operation failures in-band.
async fn fetch_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, reqwest::Error> {
    request.send().await?.json::<T>().await
}
