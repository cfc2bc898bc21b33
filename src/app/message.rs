// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo dashboard.

use crate::notifications;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Forwarded from the toast overlay and the tick subscription.
    Notification(notifications::Message),
    /// A dashboard button was pressed.
    Demo(DemoAction),
    /// Switch to the next available locale.
    CycleLocale,
}

/// Buttons on the dashboard, one per notification flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    SaveWorkOrder,
    FailRequest,
    LowStock,
    SyncStarted,
    PinnedReminder,
    DeleteTechnician,
    ClearErrors,
    ClearAll,
}

impl DemoAction {
    pub const ALL: [DemoAction; 8] = [
        DemoAction::SaveWorkOrder,
        DemoAction::FailRequest,
        DemoAction::LowStock,
        DemoAction::SyncStarted,
        DemoAction::PinnedReminder,
        DemoAction::DeleteTechnician,
        DemoAction::ClearErrors,
        DemoAction::ClearAll,
    ];

    /// i18n key of the button label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::SaveWorkOrder => "demo-button-success",
            Self::FailRequest => "demo-button-error",
            Self::LowStock => "demo-button-warning",
            Self::SyncStarted => "demo-button-info",
            Self::PinnedReminder => "demo-button-persistent",
            Self::DeleteTechnician => "demo-button-confirm",
            Self::ClearErrors => "demo-button-clear-errors",
            Self::ClearAll => "demo-button-clear",
        }
    }
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `es`, `en-US`).
    pub lang: Option<String>,
    /// Optional settings file to use instead of the per-user one.
    pub config_path: Option<String>,
}
