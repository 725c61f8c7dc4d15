//! Transient alert stack with a fixed auto-expiry lifecycle.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How long an alert stays fully visible.
pub const ALERT_VISIBLE_MS: u64 = 5000;
/// How long the fade-out lasts before the alert is destroyed.
pub const ALERT_FADE_MS: u64 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AlertPhase {
    Visible,
    Fading,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    age_ms: u64,
}

impl Alert {
    pub fn phase(&self) -> AlertPhase {
        if self.age_ms < ALERT_VISIBLE_MS {
            AlertPhase::Visible
        } else {
            AlertPhase::Fading
        }
    }
}

/// Alerts stack in arrival order; duplicates are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlertStack {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertStack {
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.alerts.push(Alert {
            id,
            message: message.into(),
            age_ms: 0,
        });
        id
    }

    /// Manual dismissal; returns false when the alert is already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Ages every alert by `elapsed_ms`, dropping the ones past
    /// `ALERT_VISIBLE_MS + ALERT_FADE_MS`. Returns true when any alert
    /// changed phase or expired.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        let mut changed = false;
        self.alerts.retain_mut(|alert| {
            let phase_before = alert.phase();
            alert.age_ms = alert.age_ms.saturating_add(elapsed_ms);
            if alert.age_ms >= ALERT_VISIBLE_MS + ALERT_FADE_MS {
                changed = true;
                return false;
            }
            if alert.phase() != phase_before {
                changed = true;
            }
            true
        });
        changed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Oldest alert still on screen, the one a dismiss key targets first.
    pub fn front_id(&self) -> Option<u64> {
        self.alerts.first().map(|alert| alert.id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
