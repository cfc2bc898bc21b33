// SPDX-License-Identifier: MPL-2.0
//! Derived notification operations.
//!
//! Thin compositions over [`NotificationStore::add`] with fixed kinds and
//! duration presets, plus normalization of heterogeneous error values.

use super::notification::{
    Content, DecisionCallback, DecisionToken, Kind, NotificationId, NotifyOptions,
};
use super::store::NotificationStore;
use serde_json::Value;
use std::fmt;

/// Operations with a dedicated success template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Save,
    Send,
}

impl Operation {
    /// Parses an operation tag. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "save" => Some(Self::Save),
            "send" => Some(Self::Send),
            _ => None,
        }
    }

    /// Returns the i18n message key for this operation's template.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Self::Create => "notification-operation-create",
            Self::Update => "notification-operation-update",
            Self::Delete => "notification-operation-delete",
            Self::Save => "notification-operation-save",
            Self::Send => "notification-operation-send",
        }
    }
}

const OPERATION_DEFAULT_KEY: &str = "notification-operation-default";
const UNEXPECTED_ERROR_KEY: &str = "notification-unexpected-error";
const UNEXPECTED_ERROR_CONTEXT_KEY: &str = "notification-unexpected-error-context";

/// Callbacks for a confirm notification. Both are optional.
#[derive(Default)]
pub struct ConfirmCallbacks {
    on_confirm: Option<DecisionCallback>,
    on_cancel: Option<DecisionCallback>,
}

impl ConfirmCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_confirm(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_confirm = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for ConfirmCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmCallbacks")
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Extracts a display message from an error value.
///
/// Probes, in order: a plain string (used verbatim), `userMessage`,
/// `message`, then `response.data.message`. Empty fields count as absent.
/// Returns `None` when nothing usable is found.
///
/// # Examples
///
/// ```
/// use hvac_notify::notifications::describe_error;
/// use serde_json::json;
///
/// assert_eq!(
///     describe_error(&json!({"response": {"data": {"message": "Quota exceeded"}}})),
///     Some("Quota exceeded".to_string())
/// );
/// assert_eq!(describe_error(&json!({})), None);
/// ```
#[must_use]
pub fn describe_error(error: &Value) -> Option<String> {
    if let Value::String(text) = error {
        return Some(text.clone());
    }

    ["/userMessage", "/message", "/response/data/message"]
        .into_iter()
        .filter_map(|pointer| error.pointer(pointer).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}

impl NotificationStore {
    pub fn show_success(
        &mut self,
        content: impl Into<Content>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.add(content, Kind::Success, options)
    }

    /// Errors stay on screen longer than other kinds (7 s by default).
    pub fn show_error(
        &mut self,
        content: impl Into<Content>,
        options: NotifyOptions,
    ) -> NotificationId {
        let options = options.or_duration(self.settings().error_duration());
        self.add(content, Kind::Error, options)
    }

    pub fn show_warning(
        &mut self,
        content: impl Into<Content>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.add(content, Kind::Warning, options)
    }

    pub fn show_info(
        &mut self,
        content: impl Into<Content>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.add(content, Kind::Info, options)
    }

    /// Shows an error derived from a failed request.
    ///
    /// The message comes from [`describe_error`], falling back to a
    /// generic localized text. A non-empty `context` prefixes it as
    /// `"{context}: {message}"`. Displayed for 8 s by default.
    pub fn show_http_error(&mut self, error: &Value, context: &str) -> NotificationId {
        let content = match (describe_error(error), context.is_empty()) {
            (Some(message), true) => Content::Text(message),
            (Some(message), false) => Content::Text(format!("{context}: {message}")),
            (None, true) => Content::localized(UNEXPECTED_ERROR_KEY),
            (None, false) => {
                Content::localized(UNEXPECTED_ERROR_CONTEXT_KEY).with_arg("context", context)
            }
        };
        let options = NotifyOptions::new().duration(self.settings().http_error_duration());
        self.show_error(content, options)
    }

    /// Shows any Rust error the same way as [`show_http_error`](Self::show_http_error),
    /// using its `Display` text as the message.
    pub fn show_failure(
        &mut self,
        error: &(dyn std::error::Error + 'static),
        context: &str,
    ) -> NotificationId {
        self.show_http_error(&Value::String(error.to_string()), context)
    }

    /// Shows the success template for `operation` applied to `resource`.
    ///
    /// Unknown operation tags fall back to a generic success message.
    pub fn show_operation_success(&mut self, operation: &str, resource: &str) -> NotificationId {
        let content = match Operation::from_tag(operation) {
            Some(operation) => {
                Content::localized(operation.i18n_key()).with_arg("resource", resource)
            }
            None => Content::localized(OPERATION_DEFAULT_KEY),
        };
        self.show_success(content, NotifyOptions::new())
    }

    /// Shows a persistent warning that waits for a confirm/cancel answer.
    ///
    /// The returned token is what the renderer passes to
    /// [`resolve`](NotificationStore::resolve). Either answer runs the
    /// matching callback (if supplied) and removes the notification.
    pub fn show_confirm(
        &mut self,
        content: impl Into<Content>,
        callbacks: ConfirmCallbacks,
    ) -> (NotificationId, DecisionToken) {
        let token = DecisionToken::new();
        let id = self.insert(
            content.into(),
            Kind::Warning,
            NotifyOptions::new().persistent(true),
            Some(token),
        );
        self.register_decision(token, id, callbacks.on_confirm, callbacks.on_cancel);
        (id, token)
    }
}
