// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording notification activity.
//!
//! The notification store reports what it shows and dismisses through a
//! [`DiagnosticsHandle`]. Events travel over a bounded channel into a
//! [`DiagnosticsCollector`], which keeps them in a memory-bounded
//! [`CircularBuffer`] and can export them as JSON.
//!
//! # Privacy
//!
//! Warning and error texts are passed through [`sanitize_message`] before
//! they are stored, so file paths echoed by backend errors never end up
//! in an exported report.

mod buffer;
mod collector;
mod events;
mod sanitizer;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, ErrorEvent, WarningEvent};
pub use sanitizer::sanitize_message;
