// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Durations**: Auto-dismiss windows per notification flavour
//! - **Overlay**: How many toasts the renderer stacks at once
//! - **Diagnostics**: Event log sizing

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Auto-dismiss window for success, warning and info notifications (ms).
pub const DEFAULT_DURATION_MS: u64 = 5_000;

/// Auto-dismiss window for error notifications (ms).
pub const DEFAULT_ERROR_DURATION_MS: u64 = 7_000;

/// Auto-dismiss window for errors derived from failed HTTP calls (ms).
pub const DEFAULT_HTTP_ERROR_DURATION_MS: u64 = 8_000;

/// Upper bound for any configured duration (ms). One hour.
pub const MAX_DURATION_MS: u64 = 3_600_000;

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Default number of toasts stacked by the overlay.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Minimum number of toasts stacked by the overlay.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Maximum number of toasts stacked by the overlay.
pub const MAX_MAX_VISIBLE: usize = 20;

/// Interval of the renderer tick that drives expiry and progress bars (ms).
pub const TICK_INTERVAL_MS: u64 = 100;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = 500;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DURATION_MS > 0);
    assert!(DEFAULT_ERROR_DURATION_MS > DEFAULT_DURATION_MS);
    assert!(DEFAULT_HTTP_ERROR_DURATION_MS > DEFAULT_ERROR_DURATION_MS);
    assert!(MAX_DURATION_MS >= DEFAULT_HTTP_ERROR_DURATION_MS);

    assert!(MIN_MAX_VISIBLE > 0);
    assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    assert!(TICK_INTERVAL_MS > 0);

    assert!(MIN_DIAGNOSTICS_CAPACITY > 0);
    assert!(DEFAULT_DIAGNOSTICS_CAPACITY >= MIN_DIAGNOSTICS_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_CAPACITY <= MAX_DIAGNOSTICS_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_match_dashboard_behaviour() {
        assert_eq!(DEFAULT_DURATION_MS, 5_000);
        assert_eq!(DEFAULT_ERROR_DURATION_MS, 7_000);
        assert_eq!(DEFAULT_HTTP_ERROR_DURATION_MS, 8_000);
    }

    #[test]
    fn overlay_defaults_are_valid() {
        assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
        assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    }

    #[test]
    fn diagnostics_defaults_are_valid() {
        assert!(DEFAULT_DIAGNOSTICS_CAPACITY >= MIN_DIAGNOSTICS_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_CAPACITY <= MAX_DIAGNOSTICS_CAPACITY);
    }
}
