// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record, its `Kind`, the
//! `Content` it displays and the options accepted when creating one.
//! Records carry data only; callbacks live in the store's side-tables.

use crate::i18n::I18n;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Callback run when an action control is invoked. May run many times.
pub type ActionCallback = Box<dyn FnMut() + Send>;

/// Callback run once when a confirm notification is decided.
pub type DecisionCallback = Box<dyn FnOnce() + Send>;

/// Unique identifier for a notification.
///
/// Drawn from a process-wide counter, so two ids never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle a confirm notification hands to its renderer.
///
/// The renderer answers with `NotificationStore::resolve(token, outcome)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecisionToken(u64);

impl DecisionToken {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// User answer to a confirm notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Confirm,
    Cancel,
}

/// Category of a notification; drives icon and accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Success, Kind::Error, Kind::Warning, Kind::Info];

    /// Returns the glyph the renderer shows in front of the message.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Kind::Success => "✔",
            Kind::Error => "✖",
            Kind::Warning => "⚠",
            Kind::Info => "ℹ",
        }
    }
}

/// Why a notification left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// `remove(id)` was called.
    Removed,
    /// Its timer fired.
    Expired,
    /// Swept by `clear` or `clear_by_kind`.
    Cleared,
    /// A confirm notification received its answer.
    Resolved,
}

/// What a notification displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Text shown verbatim.
    Text(String),
    /// A Fluent message key resolved at render time.
    Localized {
        key: String,
        args: Vec<(String, String)>,
    },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn localized(key: impl Into<String>) -> Self {
        Self::Localized {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Adds an interpolation argument. Plain text is left untouched.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Localized { args, .. } = &mut self {
            args.push((name.into(), value.into()));
        }
        self
    }

    /// Produces the display string in the active locale.
    #[must_use]
    pub fn resolve(&self, i18n: &I18n) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Localized { key, args } if args.is_empty() => i18n.tr(key),
            Self::Localized { key, args } => {
                let args: Vec<(&str, &str)> = args
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                i18n.tr_with_args(key, &args)
            }
        }
    }

    /// Locale-independent rendering used for diagnostics.
    #[must_use]
    pub fn diagnostic_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Localized { key, args } if args.is_empty() => key.clone(),
            Self::Localized { key, args } => {
                let args: Vec<String> = args.iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{key} ({})", args.join(", "))
            }
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// The single action control a notification may render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: Content,
}

/// Options accepted by `NotificationStore::add` and the derived helpers.
#[derive(Default)]
pub struct NotifyOptions {
    /// `None` picks the default of the calling operation. Zero disables expiry.
    pub(crate) duration: Option<Duration>,
    pub(crate) persistent: bool,
    pub(crate) action: Option<(Content, ActionCallback)>,
}

impl NotifyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long the notification stays before auto-dismissal.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Shorthand for [`NotifyOptions::duration`] in milliseconds.
    #[must_use]
    pub fn duration_ms(self, millis: u64) -> Self {
        self.duration(Duration::from_millis(millis))
    }

    /// A persistent notification never expires, whatever its duration.
    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Attaches an action control. Invoking it does not dismiss the notification.
    #[must_use]
    pub fn action(
        mut self,
        label: impl Into<Content>,
        callback: impl FnMut() + Send + 'static,
    ) -> Self {
        self.action = Some((label.into(), Box::new(callback)));
        self
    }

    /// Fills in the duration only if the caller left it unset.
    pub(crate) fn or_duration(mut self, duration: Duration) -> Self {
        self.duration.get_or_insert(duration);
        self
    }
}

impl fmt::Debug for NotifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyOptions")
            .field("duration", &self.duration)
            .field("persistent", &self.persistent)
            .field("action", &self.action.as_ref().map(|(label, _)| label))
            .finish()
    }
}

/// A notification as held by the store and read by renderers.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    content: Content,
    duration: Duration,
    persistent: bool,
    action: Option<Action>,
    decision: Option<DecisionToken>,
    created_at: Instant,
}

impl Notification {
    pub(crate) fn new(
        kind: Kind,
        content: Content,
        duration: Duration,
        persistent: bool,
        created_at: Instant,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            content,
            duration,
            persistent,
            action: None,
            decision: None,
            created_at,
        }
    }

    pub(crate) fn with_action(mut self, label: Content) -> Self {
        self.action = Some(Action { label });
        self
    }

    pub(crate) fn with_decision(mut self, token: DecisionToken) -> Self {
        self.decision = Some(token);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Token of a confirm notification; `None` for every other notification.
    #[must_use]
    pub fn decision(&self) -> Option<DecisionToken> {
        self.decision
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns whether a timer governs this notification's lifetime.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        !self.persistent && !self.duration.is_zero()
    }

    /// Deadline of a timed notification. A duration too large to add to
    /// `created_at` never expires.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        if !self.is_timed() {
            return None;
        }
        self.created_at.checked_add(self.duration)
    }

    /// Time left before auto-dismissal, `None` if it never expires.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fraction of the display window still left, from 1.0 down to 0.0.
    ///
    /// Purely cosmetic; removal is driven by the store's timers.
    #[must_use]
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.remaining(now)
            .map(|left| (left.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0))
    }
}
