use serde::Serialize;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// How long non-danger banners stay up before they are swept away.
pub const ALERT_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Danger banners persist until dismissed by hand.
    pub fn auto_dismisses(self) -> bool {
        !matches!(self, Severity::Danger)
    }
}

#[derive(Clone, Debug)]
struct Alert {
    id: u64,
    severity: Severity,
    message: String,
    posted_at: Instant,
}

#[derive(Clone, Debug, Serialize)]
pub struct AlertView {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub age_ms: u64,
    pub auto_dismiss: bool,
}

#[derive(Default)]
pub struct AlertCenter {
    alerts: RwLock<Vec<Alert>>,
    next_id: AtomicU64,
}

impl AlertCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, severity: Severity, message: impl Into<String>) -> u64 {
        self.push_at(severity, message, Instant::now())
    }

    pub fn push_at(&self, severity: Severity, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut alerts = self.alerts.write().expect("alert center poisoned");
        // Newest first, matching insertion at the top of the card body.
        alerts.insert(
            0,
            Alert {
                id,
                severity,
                message: message.into(),
                posted_at: now,
            },
        );
        id
    }

    pub fn dismiss(&self, id: u64) -> bool {
        let mut alerts = self.alerts.write().expect("alert center poisoned");
        let before = alerts.len();
        alerts.retain(|alert| alert.id != id);
        alerts.len() != before
    }

    pub fn prune(&self, now: Instant) {
        let mut alerts = self.alerts.write().expect("alert center poisoned");
        alerts.retain(|alert| !expired(alert, now));
    }

    pub fn active(&self) -> Vec<AlertView> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&self, now: Instant) -> Vec<AlertView> {
        self.prune(now);
        let alerts = self.alerts.read().expect("alert center poisoned");
        alerts
            .iter()
            .map(|alert| AlertView {
                id: alert.id,
                severity: alert.severity,
                message: alert.message.clone(),
                age_ms: now
                    .duration_since(alert.posted_at)
                    .as_millis()
                    .min(u128::from(u64::MAX)) as u64,
                auto_dismiss: alert.severity.auto_dismisses(),
            })
            .collect()
    }
}

fn expired(alert: &Alert, now: Instant) -> bool {
    alert.severity.auto_dismisses() && now.duration_since(alert.posted_at) >= ALERT_TTL
}
