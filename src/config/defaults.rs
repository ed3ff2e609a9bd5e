// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Timing**: Auto-dismiss and exit animation delays
//! - **Page**: Container identity and template origin

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Auto-dismiss delay applied when a request does not name one (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 10_000;

/// Delay between the exit state and detaching the toast (in milliseconds).
/// Matches the `duration-300` transition class put on every toast.
pub const DEFAULT_EXIT_ANIMATION_MS: u64 = 300;

/// Upper bound accepted for the exit animation delay (in milliseconds).
pub const MAX_EXIT_ANIMATION_MS: u64 = 5_000;

// ==========================================================================
// Page Defaults
// ==========================================================================

/// Well-known identifier of the toast container element.
pub const DEFAULT_CONTAINER_ID: &str = "toast-container";

/// Origin the `/toast/{kind}` templates are fetched from.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Language used when neither the CLI, the config nor the OS provide one.
pub const FALLBACK_LANGUAGE: &str = "en";
