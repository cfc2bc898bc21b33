// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for notification texts.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Embedded `.ftl` translation files (`en-US`, `es`)
//! - Runtime language switching
//! - Fallback to the default locale when a key is missing

pub mod fluent;

pub use fluent::I18n;
