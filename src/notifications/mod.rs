// SPDX-License-Identifier: MPL-2.0
//! Transient notification store with timed auto-dismissal.
//!
//! Any part of the application can enqueue a short message (success,
//! error, warning, info) that a renderer shows until it is dismissed, its
//! timer fires, or the user answers a confirm prompt.
//!
//! # Components
//!
//! - [`notification`] - `Notification` record, ids, kinds and options
//! - [`timer`] - `TimerTable` side-table of pending deadlines
//! - [`store`] - `NotificationStore` owning records, timers and callbacks
//! - [`helpers`] - presets (`show_success`, `show_http_error`, ...)
//! - [`shared`] - `SharedStore` for tokio hosts, with a background expiry task
//!
//! # Usage
//!
//! ```ignore
//! use hvac_notify::notifications::{NotificationStore, NotifyOptions};
//!
//! let mut store = NotificationStore::new();
//! store.show_success("Work order saved", NotifyOptions::new());
//!
//! // From the host's periodic tick:
//! store.tick(std::time::Instant::now());
//! ```
//!
//! Callbacks never live on the records themselves, so [`Notification`] is
//! plain data and can be cloned into snapshots for rendering.

mod helpers;
mod notification;
mod shared;
mod store;
mod timer;

pub use helpers::{describe_error, ConfirmCallbacks, Operation};
pub use notification::{
    Action, ActionCallback, Content, DecisionCallback, DecisionToken, DismissReason, Kind,
    Notification, NotificationId, NotifyOptions, Outcome,
};
pub use shared::{ExpiryTask, SharedStore};
pub use store::{Decision, Message, NotificationStore};
pub use timer::TimerTable;
