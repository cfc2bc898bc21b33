// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification activity tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{DismissReason, Kind};

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notification entered the store.
    NotificationShown {
        id: u64,
        kind: Kind,
        persistent: bool,
    },

    /// A notification left the store.
    NotificationDismissed { id: u64, reason: DismissReason },

    /// A warning surfaced to the user.
    Warning { event: WarningEvent },

    /// An error surfaced to the user.
    Error { event: ErrorEvent },
}

/// Warning text as shown to the user (after sanitization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error text as shown to the user (after sanitization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_event_new_creates_with_current_timestamp() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            event: WarningEvent::new("low stock"),
        });
        let after = Instant::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn shown_event_serializes_with_snake_case_tag() {
        let shown = DiagnosticEventKind::NotificationShown {
            id: 7,
            kind: Kind::Error,
            persistent: false,
        };

        let json = serde_json::to_string(&shown).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"notification_shown\""));
        assert!(json.contains("\"kind\":\"error\""));
    }

    #[test]
    fn dismissed_event_deserializes_from_json() {
        let json = r#"{"type":"notification_dismissed","id":3,"reason":"expired"}"#;
        let event: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");

        assert_eq!(
            event,
            DiagnosticEventKind::NotificationDismissed {
                id: 3,
                reason: DismissReason::Expired,
            }
        );
    }
}
