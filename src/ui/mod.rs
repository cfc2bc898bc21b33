// SPDX-License-Identifier: MPL-2.0
//! Iced rendering for notifications.
//!
//! - [`toast`] - toast card, overlay and tick subscription
//! - [`design_tokens`] - design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod toast;
