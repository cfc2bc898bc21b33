// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! This module provides the central collector that receives events from
//! the notification store and keeps them in a circular buffer.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use super::{
    sanitize_message, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    ErrorEvent, WarningEvent,
};
use crate::notifications::{DismissReason, Kind, NotificationId};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel so logging never blocks the
/// caller; when the channel is full the event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_shown(&self, id: NotificationId, kind: Kind, persistent: bool) {
        self.send(DiagnosticEventKind::NotificationShown {
            id: id.value(),
            kind,
            persistent,
        });
    }

    pub fn log_dismissed(&self, id: NotificationId, reason: DismissReason) {
        self.send(DiagnosticEventKind::NotificationDismissed {
            id: id.value(),
            reason,
        });
    }

    /// Logs a warning; the message is sanitized to remove file paths.
    pub fn log_warning(&self, message: &str) {
        self.send(DiagnosticEventKind::Warning {
            event: WarningEvent::new(sanitize_message(message)),
        });
    }

    /// Logs an error; the message is sanitized to remove file paths.
    pub fn log_error(&self, message: &str) {
        self.send(DiagnosticEventKind::Error {
            event: ErrorEvent::new(sanitize_message(message)),
        });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_send(
        &self,
        kind: DiagnosticEventKind,
    ) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.try_send(kind);
    }
}

/// Central collector for diagnostic events.
///
/// The collector receives events through a channel and stores them in a
/// memory-bounded circular buffer. Old events are automatically evicted
/// when the buffer reaches capacity.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for duration calculations).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all collected events as a JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    #[allow(clippy::cast_possible_truncation)] // Durations in ms fit comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                kind: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            started_at: self.collection_started_at_utc,
            duration_ms: self.collection_started_at.elapsed().as_millis() as u64,
            event_count: events.len(),
            events,
        }
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("started_at", &self.collection_started_at_utc)
            .finish_non_exhaustive()
    }
}

/// Exported diagnostics report.
#[derive(Debug, Serialize)]
struct DiagnosticReport {
    started_at: DateTime<Utc>,
    duration_ms: u64,
    event_count: usize,
    events: Vec<SerializableEvent>,
}

/// An event with its timestamp expressed relative to collection start.
#[derive(Debug, Serialize)]
struct SerializableEvent {
    offset_ms: u64,
    #[serde(flatten)]
    kind: DiagnosticEventKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_events_land_in_buffer_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_warning("Refrigerant low");
        handle.log_error("Request failed");
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn logged_messages_are_sanitized() {
        let mut collector = DiagnosticsCollector::default();
        collector
            .handle()
            .log_error("cannot read /home/ops/export.csv");
        collector.process_pending();

        let event = collector.iter().next().expect("event should be stored");
        assert_eq!(
            event.kind,
            DiagnosticEventKind::Error {
                event: ErrorEvent::new("cannot read <path>"),
            }
        );
    }

    #[test]
    fn buffer_evicts_oldest_events() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10));
        let handle = collector.handle();
        for i in 0..15 {
            handle.log_warning(&format!("warning {i}"));
        }
        collector.process_pending();

        assert_eq!(collector.len(), 10);
        let first = collector.iter().next().expect("event should be stored");
        assert_eq!(
            first.kind,
            DiagnosticEventKind::Warning {
                event: WarningEvent::new("warning 5"),
            }
        );
    }

    #[test]
    fn full_channel_drops_events_without_blocking() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..DEFAULT_CHANNEL_CAPACITY {
            handle.log_warning("spam");
        }

        let result = handle.try_send(DiagnosticEventKind::Warning {
            event: WarningEvent::new("one too many"),
        });
        assert!(matches!(result, Err(TrySendError::Full(_))));
    }

    #[test]
    fn export_json_contains_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log_shown(NotificationId::new(), Kind::Info, false);
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event_count"], 1);
        assert_eq!(value["events"][0]["type"], "notification_shown");
        assert_eq!(value["events"][0]["kind"], "info");
    }
}
