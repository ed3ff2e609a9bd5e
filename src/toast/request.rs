// SPDX-License-Identifier: MPL-2.0
//! Notification requests as they arrive from triggers or callers.

use super::kind::ToastKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A request to show one toast.
///
/// Decodes the `showToast` trigger entry. The legacy `type` and `duration`
/// keys are accepted alongside `kind` and `durationMs`. A missing kind means
/// [`ToastKind::Success`]; a missing duration means the configured default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    #[serde(default, alias = "type")]
    pub kind: ToastKind,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl NotificationRequest {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration_ms: None,
        }
    }

    /// Sets the auto-dismiss delay; zero keeps the toast until dismissed.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Effective auto-dismiss delay, `None` when the toast is persistent.
    #[must_use]
    pub fn auto_dismiss(&self, default: Duration) -> Option<Duration> {
        let duration = self.duration_ms.map_or(default, Duration::from_millis);
        (!duration.is_zero()).then_some(duration)
    }
}
