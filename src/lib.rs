// SPDX-License-Identifier: MPL-2.0
//! `hvac_notify` is the notification layer of an HVAC operations dashboard.
//!
//! It keeps a process-wide list of transient messages (success, error,
//! warning, info), dismisses them when their timers fire, and supports
//! action buttons and confirm prompts. Rendering is done with Iced; the
//! store itself does not depend on any GUI.

#![doc(html_root_url = "https://docs.rs/hvac_notify/0.3.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod notifications;
pub mod ui;
