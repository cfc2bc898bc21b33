// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `NotificationStore` owns the ordered list of active notifications
//! and every mutation entry point. Auto-dismiss deadlines, action callbacks
//! and confirm callbacks live in side-tables keyed by id or token, so
//! records stay plain data and removal always cleans up all three.

use super::notification::{
    ActionCallback, Content, DecisionCallback, DecisionToken, DismissReason, Kind, Notification,
    NotificationId, NotifyOptions, Outcome,
};
use super::timer::TimerTable;
use crate::config::NotificationSettings;
use crate::diagnostics::DiagnosticsHandle;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Messages a renderer sends back to the store.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Answer a confirm notification.
    Resolve(DecisionToken, Outcome),
    /// Run the action attached to a notification.
    InvokeAction(NotificationId),
    /// Periodic tick; expires due notifications.
    Tick(Instant),
}

/// Callbacks registered for a pending confirm notification.
struct PendingDecision {
    id: NotificationId,
    on_confirm: Option<DecisionCallback>,
    on_cancel: Option<DecisionCallback>,
}

/// A decided confirm notification whose callback has not run yet.
///
/// Returned by [`NotificationStore::take_decision`] so a caller holding a
/// lock on the store can run the callback after releasing it.
pub struct Decision {
    outcome: Outcome,
    callback: Option<DecisionCallback>,
}

impl Decision {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Runs the registered callback, if any.
    pub fn run(self) {
        if let Some(callback) = self.callback {
            callback();
        }
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("outcome", &self.outcome)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// Owns the active notifications, in insertion order.
#[derive(Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
    timers: TimerTable,
    actions: HashMap<NotificationId, ActionCallback>,
    decisions: HashMap<DecisionToken, PendingDecision>,
    settings: NotificationSettings,
    /// Optional diagnostics handle for logging warnings/errors.
    diagnostics: Option<DiagnosticsHandle>,
}

impl NotificationStore {
    /// Creates a new empty store with default durations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty store using configured durations.
    #[must_use]
    pub fn with_settings(settings: NotificationSettings) -> Self {
        Self {
            settings: settings.clamped(),
            ..Self::default()
        }
    }

    /// Sets the diagnostics handle for logging shown and dismissed notifications.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Appends a notification and returns its id.
    ///
    /// Without an explicit duration the configured default (5 s) applies.
    /// A timer is armed unless the notification is persistent or its
    /// duration is zero. Never fails.
    pub fn add(
        &mut self,
        content: impl Into<Content>,
        kind: Kind,
        options: NotifyOptions,
    ) -> NotificationId {
        let options = options.or_duration(self.settings.default_duration());
        self.insert(content.into(), kind, options, None)
    }

    pub(crate) fn insert(
        &mut self,
        content: Content,
        kind: Kind,
        options: NotifyOptions,
        decision: Option<DecisionToken>,
    ) -> NotificationId {
        let NotifyOptions {
            duration,
            persistent,
            action,
        } = options;
        let duration = duration.unwrap_or(Duration::ZERO);

        let mut notification =
            Notification::new(kind, content, duration, persistent, Instant::now());
        if let Some((label, callback)) = action {
            notification = notification.with_action(label);
            self.actions.insert(notification.id(), callback);
        }
        if let Some(token) = decision {
            notification = notification.with_decision(token);
        }

        let id = notification.id();
        if let Some(deadline) = notification.expires_at() {
            self.timers.arm(id, deadline);
        }
        self.log_shown(&notification);
        self.notifications.push(notification);
        id
    }

    /// Removes a notification by id.
    ///
    /// Idempotent: an unknown id is a no-op. Returns `true` if the
    /// notification was present.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        self.remove_with_reason(id, DismissReason::Removed)
    }

    fn remove_with_reason(&mut self, id: NotificationId, reason: DismissReason) -> bool {
        let Some(pos) = self.notifications.iter().position(|n| n.id() == id) else {
            return false;
        };
        let notification = self.notifications.remove(pos);
        self.forget(&notification);
        if let Some(handle) = &self.diagnostics {
            handle.log_dismissed(id, reason);
        }
        true
    }

    /// Drops everything the side-tables hold for `notification`.
    fn forget(&mut self, notification: &Notification) {
        self.timers.cancel(notification.id());
        self.actions.remove(&notification.id());
        if let Some(token) = notification.decision() {
            self.decisions.remove(&token);
        }
    }

    /// Removes all notifications and cancels all pending timers.
    pub fn clear(&mut self) {
        if let Some(handle) = &self.diagnostics {
            for notification in &self.notifications {
                handle.log_dismissed(notification.id(), DismissReason::Cleared);
            }
        }
        self.notifications.clear();
        self.timers.clear();
        self.actions.clear();
        self.decisions.clear();
    }

    /// Removes every notification of `kind`, leaving the others and their
    /// timers untouched. Returns how many were removed.
    pub fn clear_by_kind(&mut self, kind: Kind) -> usize {
        let ids: Vec<NotificationId> = self
            .notifications
            .iter()
            .filter(|n| n.kind() == kind)
            .map(Notification::id)
            .collect();
        for id in &ids {
            self.remove_with_reason(*id, DismissReason::Cleared);
        }
        ids.len()
    }

    /// Expires every timed notification whose deadline is at or before `now`.
    ///
    /// Returns the number of notifications removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.timers
            .take_expired(now)
            .into_iter()
            .filter(|id| self.remove_with_reason(*id, DismissReason::Expired))
            .count()
    }

    /// Earliest pending auto-dismiss deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Answers a confirm notification.
    ///
    /// Runs the callback registered for `outcome` (if one was supplied)
    /// and removes the notification. Unknown tokens are ignored.
    pub fn resolve(&mut self, token: DecisionToken, outcome: Outcome) -> bool {
        match self.take_decision(token, outcome) {
            Some(decision) => {
                decision.run();
                true
            }
            None => false,
        }
    }

    /// Like [`resolve`](Self::resolve), but hands the callback back instead
    /// of running it. The notification is already removed on return.
    pub fn take_decision(&mut self, token: DecisionToken, outcome: Outcome) -> Option<Decision> {
        let pending = self.decisions.remove(&token)?;
        self.remove_with_reason(pending.id, DismissReason::Resolved);
        let callback = match outcome {
            Outcome::Confirm => pending.on_confirm,
            Outcome::Cancel => pending.on_cancel,
        };
        Some(Decision { outcome, callback })
    }

    pub(crate) fn register_decision(
        &mut self,
        token: DecisionToken,
        id: NotificationId,
        on_confirm: Option<DecisionCallback>,
        on_cancel: Option<DecisionCallback>,
    ) {
        self.decisions.insert(
            token,
            PendingDecision {
                id,
                on_confirm,
                on_cancel,
            },
        );
    }

    /// Runs the action attached to `id`. The notification stays in place.
    ///
    /// Returns `false` if the notification is gone or has no action.
    pub fn invoke_action(&mut self, id: NotificationId) -> bool {
        match self.actions.get_mut(&id) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Takes the action callback out so it can run without a store borrow.
    pub(crate) fn take_action(&mut self, id: NotificationId) -> Option<ActionCallback> {
        self.actions.remove(&id)
    }

    /// Puts an action callback back, unless its notification has left meanwhile.
    pub(crate) fn restore_action(&mut self, id: NotificationId, callback: ActionCallback) {
        if self.get(id).is_some() {
            self.actions.entry(id).or_insert(callback);
        }
    }

    /// Handles a renderer message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.remove(*id);
            }
            Message::Resolve(token, outcome) => {
                self.resolve(*token, *outcome);
            }
            Message::InvokeAction(id) => {
                self.invoke_action(*id);
            }
            Message::Tick(now) => {
                self.tick(*now);
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id() == id)
    }

    /// Returns the active notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Returns a copy of the active notifications, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    #[must_use]
    pub fn count_by_kind(&self, kind: Kind) -> usize {
        self.notifications.iter().filter(|n| n.kind() == kind).count()
    }

    /// Number of armed auto-dismiss timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn has_timer(&self, id: NotificationId) -> bool {
        self.timers.is_armed(id)
    }

    fn log_shown(&self, notification: &Notification) {
        let Some(handle) = &self.diagnostics else {
            return;
        };
        handle.log_shown(
            notification.id(),
            notification.kind(),
            notification.is_persistent(),
        );
        match notification.kind() {
            Kind::Warning => handle.log_warning(&notification.content().diagnostic_text()),
            Kind::Error => handle.log_error(&notification.content().diagnostic_text()),
            Kind::Success | Kind::Info => {}
        }
    }
}

impl fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationStore")
            .field("notifications", &self.notifications)
            .field("timers", &self.timers)
            .field("actions", &self.actions.len())
            .field("decisions", &self.decisions.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn after(ms: u64) -> Instant {
        Instant::now() + Duration::from_millis(ms)
    }

    #[test]
    fn new_store_is_empty() {
        let store = NotificationStore::new();
        assert!(store.is_empty());
        assert_eq!(store.pending_timers(), 0);
        assert_eq!(store.next_deadline(), None);
    }

    #[test]
    fn add_uses_default_duration_and_arms_timer() {
        let mut store = NotificationStore::new();
        let id = store.add("Work order saved", Kind::Info, NotifyOptions::new());

        let notification = store.get(id).expect("notification should be present");
        assert_eq!(notification.duration(), Duration::from_millis(5_000));
        assert_eq!(notification.kind(), Kind::Info);
        assert!(store.has_timer(id));
    }

    #[test]
    fn timed_notification_expires_after_its_duration() {
        let mut store = NotificationStore::new();
        let id = store.add("Sync started", Kind::Info, NotifyOptions::new().duration_ms(200));

        assert_eq!(store.tick(Instant::now()), 0);
        assert!(store.get(id).is_some());

        assert_eq!(store.tick(after(250)), 1);
        assert!(store.get(id).is_none());
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn persistent_notification_survives_any_tick() {
        let mut store = NotificationStore::new();
        let zero = store.add(
            "Pinned",
            Kind::Warning,
            NotifyOptions::new().duration_ms(0).persistent(true),
        );
        let long = store.add(
            "Pinned too",
            Kind::Warning,
            NotifyOptions::new().duration_ms(1).persistent(true),
        );

        store.tick(after(24 * 3_600 * 1_000));

        assert!(store.get(zero).is_some());
        assert!(store.get(long).is_some());
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn zero_duration_arms_no_timer() {
        let mut store = NotificationStore::new();
        let id = store.add("Stays", Kind::Info, NotifyOptions::new().duration_ms(0));
        assert!(!store.has_timer(id));
        store.tick(after(60_000));
        assert!(store.get(id).is_some());
    }

    #[test]
    fn huge_duration_is_accepted_and_never_expires() {
        let mut store = NotificationStore::new();
        let id = store.add(
            "Warranty renewal pending",
            Kind::Info,
            NotifyOptions::new().duration(Duration::MAX),
        );

        assert!(!store.has_timer(id));
        let notification = store.get(id).expect("notification should be present");
        assert_eq!(notification.expires_at(), None);
        assert_eq!(notification.progress(Instant::now()), None);
        assert_eq!(store.tick(Instant::now() + Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = NotificationStore::new();
        let keep = store.add("keep", Kind::Info, NotifyOptions::new());
        let id = store.add("gone", Kind::Info, NotifyOptions::new());

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(!store.remove(NotificationId::new()));

        assert_eq!(store.len(), 1);
        assert!(store.get(keep).is_some());
    }

    #[test]
    fn remove_cancels_timer() {
        let mut store = NotificationStore::new();
        let id = store.add("x", Kind::Success, NotifyOptions::new().duration_ms(100));
        store.remove(id);

        assert!(!store.has_timer(id));
        assert_eq!(store.tick(after(200)), 0);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = NotificationStore::new();
        let ids = [
            store.add("first", Kind::Info, NotifyOptions::new()),
            store.add("second", Kind::Error, NotifyOptions::new()),
            store.add("third", Kind::Success, NotifyOptions::new()),
        ];

        let listed: Vec<NotificationId> = store.iter().map(Notification::id).collect();
        assert_eq!(listed, ids);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = NotificationStore::new();
        for i in 0..5 {
            store.add(format!("n{i}"), Kind::Info, NotifyOptions::new());
        }
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn clear_by_kind_removes_exactly_that_kind() {
        let mut store = NotificationStore::new();
        let info = store.add("i", Kind::Info, NotifyOptions::new().duration_ms(100));
        store.add("e1", Kind::Error, NotifyOptions::new());
        let success = store.add("s", Kind::Success, NotifyOptions::new());
        store.add("e2", Kind::Error, NotifyOptions::new().persistent(true));

        assert_eq!(store.clear_by_kind(Kind::Error), 2);

        assert_eq!(store.count_by_kind(Kind::Error), 0);
        let remaining: Vec<NotificationId> = store.iter().map(Notification::id).collect();
        assert_eq!(remaining, vec![info, success]);
        assert!(store.has_timer(info));
        assert!(store.has_timer(success));
        assert_eq!(store.clear_by_kind(Kind::Warning), 0);
    }

    #[test]
    fn action_runs_without_dismissing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut store = NotificationStore::new();
        let id = store.add(
            "Work order deleted",
            Kind::Success,
            NotifyOptions::new().action("Undo", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(store.invoke_action(id));
        assert!(store.invoke_action(id));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(store.get(id).is_some());
        assert_eq!(
            store.get(id).and_then(Notification::action).map(|a| &a.label),
            Some(&Content::text("Undo"))
        );
    }

    #[test]
    fn action_is_dropped_with_its_notification() {
        let mut store = NotificationStore::new();
        let id = store.add("x", Kind::Info, NotifyOptions::new().action("Undo", || {}));
        store.remove(id);
        assert!(!store.invoke_action(id));
    }

    #[test]
    fn restore_action_skips_removed_notifications() {
        let mut store = NotificationStore::new();
        let id = store.add("x", Kind::Info, NotifyOptions::new().action("Undo", || {}));
        let callback = store.take_action(id).expect("action registered");
        store.remove(id);
        store.restore_action(id, callback);
        assert!(store.actions.is_empty());
    }

    #[test]
    fn handle_message_dispatches() {
        let mut store = NotificationStore::new();
        let dismissed = store.add("a", Kind::Info, NotifyOptions::new());
        let expiring = store.add("b", Kind::Info, NotifyOptions::new().duration_ms(10));

        store.handle_message(&Message::Dismiss(dismissed));
        store.handle_message(&Message::Tick(after(50)));

        assert!(store.get(dismissed).is_none());
        assert!(store.get(expiring).is_none());
    }

    #[test]
    fn resolve_with_unknown_token_is_noop() {
        let mut store = NotificationStore::new();
        store.add("a", Kind::Info, NotifyOptions::new());
        assert!(!store.resolve(DecisionToken::new(), Outcome::Confirm));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn settings_change_default_duration() {
        let mut store = NotificationStore::with_settings(NotificationSettings {
            default_duration_ms: 1_000,
            ..NotificationSettings::default()
        });
        let id = store.add("x", Kind::Info, NotifyOptions::new());
        assert_eq!(
            store.get(id).map(Notification::duration),
            Some(Duration::from_millis(1_000))
        );
    }

    #[test]
    fn diagnostics_record_shown_and_dismissed() {
        let mut collector = DiagnosticsCollector::default();
        let mut store = NotificationStore::new();
        store.set_diagnostics(collector.handle());

        let id = store.add("Compressor fault", Kind::Error, NotifyOptions::new());
        store.add("ok", Kind::Success, NotifyOptions::new());
        store.remove(id);
        store.clear();
        collector.process_pending();

        let kinds: Vec<DiagnosticEventKind> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds.len(), 5);
        assert!(matches!(
            kinds[0],
            DiagnosticEventKind::NotificationShown {
                kind: Kind::Error,
                ..
            }
        ));
        assert!(matches!(kinds[1], DiagnosticEventKind::Error { .. }));
        assert!(matches!(
            kinds[3],
            DiagnosticEventKind::NotificationDismissed {
                reason: DismissReason::Removed,
                ..
            }
        ));
        assert!(matches!(
            kinds[4],
            DiagnosticEventKind::NotificationDismissed {
                reason: DismissReason::Cleared,
                ..
            }
        ));
    }
}
