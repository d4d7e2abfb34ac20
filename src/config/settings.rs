// src/config/settings.rs

use std::time::Duration;

use tracing::warn;

/// Name of the workspace configuration file under the root.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "angular.json";
/// Suffix of source files whose specs are scoped.
pub const DEFAULT_SOURCE_SUFFIX: &str = ".ts";
/// Suffix of spec files.
pub const DEFAULT_SPEC_SUFFIX: &str = ".spec.ts";
/// Quiet window that coalesces bursts of watch events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Environment variable overriding the debounce window in milliseconds.
pub const DEBOUNCE_ENV_VAR: &str = "SPECSCOPE_DEBOUNCE_MS";

/// Tool-level settings shared by every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_file_name: String,
    pub source_suffix: String,
    pub spec_suffix: String,
    pub debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
            spec_suffix: DEFAULT_SPEC_SUFFIX.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl Settings {
    /// Defaults, with the debounce window taken from `SPECSCOPE_DEBOUNCE_MS`
    /// when it holds a valid number.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var(DEBOUNCE_ENV_VAR) {
            match parse_debounce_ms(&raw) {
                Some(window) => settings.debounce = window,
                None => warn!(value = %raw, "ignoring invalid debounce override"),
            }
        }
        settings
    }
}

fn parse_debounce_ms(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}
