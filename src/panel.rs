use crate::alerts::{AlertCenter, AlertView, Severity};
use crate::client::{ActionResult, CaptureClient, CaptureStatus};
use crate::forms;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use std::time::Instant;

/// The capture lifecycle operations the panel can request. The set is
/// statically enumerable; anything else is rejected at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureAction {
    Start,
    Stop,
    Restart,
}

impl CaptureAction {
    pub fn name(self) -> &'static str {
        match self {
            CaptureAction::Start => "start",
            CaptureAction::Stop => "stop",
            CaptureAction::Restart => "restart",
        }
    }

    pub fn pending_message(self) -> &'static str {
        match self {
            CaptureAction::Start => "Starting capture...",
            CaptureAction::Stop => "Stopping capture...",
            CaptureAction::Restart => "Restarting capture...",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown capture action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for CaptureAction {
    type Err = UnknownAction;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "start" => Ok(CaptureAction::Start),
            "stop" => Ok(CaptureAction::Stop),
            "restart" => Ok(CaptureAction::Restart),
            _ => Err(UnknownAction(raw.to_string())),
        }
    }
}

/// Feature flags the capture server reports alongside its running state.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct CaptureFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<bool>,
}

/// Snapshot handed to the page script. Button fields are absent while the
/// running state is unknown, so the page leaves the controls as rendered.
#[derive(Clone, Debug, Serialize)]
pub struct PanelView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_disabled: Option<bool>,
    pub flags: CaptureFlags,
    pub alerts: Vec<AlertView>,
}

#[derive(Clone, Copy, Default)]
struct PanelState {
    running: Option<bool>,
    flags: CaptureFlags,
}

/// One instance per process, shared through the router state.
pub struct ControlPanel {
    client: CaptureClient,
    alerts: AlertCenter,
    state: RwLock<PanelState>,
}

impl ControlPanel {
    pub fn new(client: CaptureClient) -> Self {
        Self {
            client,
            alerts: AlertCenter::new(),
            state: RwLock::new(PanelState::default()),
        }
    }

    /// One-shot status check at startup. A reachable server seeds the
    /// running flag; an unreachable one raises a persistent banner and
    /// leaves the running state unasserted.
    pub async fn bootstrap(&self) {
        let status = self.client.get_status().await;
        if status.error {
            tracing::warn!(
                "Capture server unreachable during startup: {}",
                status.message.as_deref().unwrap_or("no detail")
            );
            self.alerts.push(
                Severity::Danger,
                "Connection to the capture server failed. Check that it is running.",
            );
            return;
        }
        self.apply_status(&status);
    }

    pub async fn refresh_status(&self) -> CaptureStatus {
        let status = self.client.get_status().await;
        if !status.error {
            self.apply_status(&status);
        }
        status
    }

    fn apply_status(&self, status: &CaptureStatus) {
        let mut state = self.state.write().expect("panel state poisoned");
        state.running = Some(status.running);
        state.flags = CaptureFlags {
            video: status.video_enabled,
            audio: status.audio_enabled,
            analysis: status.analysis_enabled,
        };
    }

    pub async fn dispatch(&self, action: CaptureAction) -> ActionResult {
        self.alerts.push(Severity::Info, action.pending_message());
        let result = match action {
            CaptureAction::Start => self.client.start_capture().await,
            CaptureAction::Stop => self.client.stop_capture().await,
            CaptureAction::Restart => self.client.restart_capture().await,
        };
        if result.success {
            tracing::info!("Capture {} succeeded: {}", action.name(), result.message);
            self.alerts.push(Severity::Success, result.message.clone());
            let mut state = self.state.write().expect("panel state poisoned");
            state.running = result.running;
        } else {
            tracing::warn!("Capture {} failed: {}", action.name(), result.message);
            self.alerts.push(Severity::Danger, result.message.clone());
        }
        result
    }

    pub async fn remote_config(&self) -> Value {
        self.client.get_config().await
    }

    /// Saving has no server contract yet. The coerced object is logged and
    /// the user is told the feature is pending.
    pub fn save_config<'a>(
        &self,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Map<String, Value> {
        let config = forms::coerce_config(fields);
        tracing::info!(
            "Configuration submitted (save not implemented): {}",
            serde_json::Value::Object(config.clone())
        );
        self.alerts.push(
            Severity::Warning,
            "Saving the configuration is not yet available.",
        );
        config
    }

    pub fn dismiss_alert(&self, id: u64) -> bool {
        self.alerts.dismiss(id)
    }

    pub fn prune_alerts(&self) {
        self.alerts.prune(Instant::now());
    }

    pub fn view(&self) -> PanelView {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> PanelView {
        let state = *self.state.read().expect("panel state poisoned");
        PanelView {
            running: state.running,
            start_disabled: state.running,
            stop_disabled: state.running.map(|running| !running),
            flags: state.flags,
            alerts: self.alerts.active_at(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_parse_case_insensitively() {
        assert_eq!("start".parse(), Ok(CaptureAction::Start));
        assert_eq!("Stop".parse(), Ok(CaptureAction::Stop));
        assert_eq!("RESTART".parse(), Ok(CaptureAction::Restart));
    }

    #[test]
    fn unknown_action_names_are_rejected() {
        let err = "foo".parse::<CaptureAction>().unwrap_err();
        assert_eq!(err, UnknownAction("foo".to_string()));
        assert_eq!(err.to_string(), "Unknown capture action: foo");
    }

    #[test]
    fn button_projection_follows_running_flag() {
        let panel = ControlPanel::new(CaptureClient::new("http://127.0.0.1:1/angel"));

        let view = panel.view();
        assert_eq!(view.running, None);
        assert_eq!(view.start_disabled, None);
        assert_eq!(view.stop_disabled, None);

        panel.apply_status(&CaptureStatus {
            running: true,
            ..CaptureStatus::default()
        });
        let view = panel.view();
        assert_eq!(view.start_disabled, Some(true));
        assert_eq!(view.stop_disabled, Some(false));

        panel.apply_status(&CaptureStatus::default());
        let view = panel.view();
        assert_eq!(view.start_disabled, Some(false));
        assert_eq!(view.stop_disabled, Some(true));
    }

    #[test]
    fn stub_save_coerces_and_warns() {
        let panel = ControlPanel::new(CaptureClient::new("http://127.0.0.1:1/angel"));
        let config = panel.save_config([("enabled", "on"), ("interval", "30")]);

        assert_eq!(config["enabled"], serde_json::json!(true));
        assert_eq!(config["interval"], serde_json::json!(30));

        let alerts = panel.view().alerts;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert!(alerts[0].message.contains("not yet available"));
    }
}
