//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::time::Duration;

use crate::core::config::{DEFAULT_FOLLOW_UP_PLACEHOLDER, DEFAULT_PLACEHOLDER, ResolvedConfig};

/// Resolved config with recording disabled and a 100ms debounce.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        transcript_path: None,
        debounce: Duration::from_millis(100),
        min_lines: 1,
        max_lines: 4,
        placeholder: DEFAULT_PLACEHOLDER.to_string(),
        follow_up_placeholder: DEFAULT_FOLLOW_UP_PLACEHOLDER.to_string(),
        reset_on_submit: true,
        start_in_follow_up: false,
    }
}
