//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.promptline/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PromptlineConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Transcript file; `~/` is expanded, an empty string disables recording
    pub transcript: Option<String>,
    pub start_in_follow_up: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub debounce_ms: Option<u64>,
    pub min_lines: Option<u16>,
    pub max_lines: Option<u16>,
    pub placeholder: Option<String>,
    pub follow_up_placeholder: Option<String>,
    pub reset_on_submit: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_MIN_LINES: u16 = 1;
pub const DEFAULT_MAX_LINES: u16 = 6;
/// Upper bound on either line limit; taller than any real terminal.
pub const MAX_LINE_LIMIT: u16 = 200;
pub const DEFAULT_PLACEHOLDER: &str = "What would you like to research next?";
pub const DEFAULT_FOLLOW_UP_PLACEHOLDER: &str = "Any questions about this report?";
const DEFAULT_TRANSCRIPT_FILE: &str = "transcript.jsonl";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub transcript_path: Option<PathBuf>,
    pub debounce: Duration,
    pub min_lines: u16,
    pub max_lines: u16,
    pub placeholder: String,
    pub follow_up_placeholder: String,
    pub reset_on_submit: bool,
    pub start_in_follow_up: bool,
}

/// Values given on the command line (None / false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub transcript: Option<PathBuf>,
    pub no_transcript: bool,
    pub debounce_ms: Option<u64>,
    pub follow_up: bool,
    pub no_reset: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.promptline`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".promptline"))
}

/// Returns the path to `~/.promptline/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.promptline/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PromptlineConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PromptlineConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PromptlineConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load from an explicit path, generating the commented default if absent.
pub fn load_config_from(path: &Path) -> Result<PromptlineConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PromptlineConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PromptlineConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# promptline configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# transcript = "~/.promptline/transcript.jsonl"   # "" disables recording
# start_in_follow_up = false

# [input]
# debounce_ms = 100                  # quiet period before the box resizes
# min_lines = 1
# max_lines = 6
# placeholder = "What would you like to research next?"
# follow_up_placeholder = "Any questions about this report?"
# reset_on_submit = true
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PromptlineConfig, cli: &CliOverrides) -> ResolvedConfig {
    let transcript_path = resolve_transcript(config, cli);

    // Debounce: CLI → env → config → default
    let debounce_ms = cli
        .debounce_ms
        .or_else(|| {
            std::env::var("PROMPTLINE_DEBOUNCE_MS")
                .ok()
                .and_then(|v| match v.trim().parse() {
                    Ok(ms) => Some(ms),
                    Err(e) => {
                        warn!("Ignoring PROMPTLINE_DEBOUNCE_MS={:?}: {}", v, e);
                        None
                    }
                })
        })
        .or(config.input.debounce_ms)
        .unwrap_or(DEFAULT_DEBOUNCE_MS);

    let min_lines = config
        .input
        .min_lines
        .unwrap_or(DEFAULT_MIN_LINES)
        .clamp(1, MAX_LINE_LIMIT);
    let max_lines = config
        .input
        .max_lines
        .unwrap_or(DEFAULT_MAX_LINES)
        .clamp(min_lines, MAX_LINE_LIMIT);

    ResolvedConfig {
        transcript_path,
        debounce: Duration::from_millis(debounce_ms),
        min_lines,
        max_lines,
        placeholder: config
            .input
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        follow_up_placeholder: config
            .input
            .follow_up_placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_FOLLOW_UP_PLACEHOLDER.to_string()),
        reset_on_submit: !cli.no_reset && config.input.reset_on_submit.unwrap_or(true),
        start_in_follow_up: cli.follow_up || config.general.start_in_follow_up.unwrap_or(false),
    }
}

/// Transcript: `--no-transcript` → CLI path → env → config → `~/.promptline/transcript.jsonl`.
fn resolve_transcript(config: &PromptlineConfig, cli: &CliOverrides) -> Option<PathBuf> {
    if cli.no_transcript {
        return None;
    }
    if let Some(path) = &cli.transcript {
        return Some(path.clone());
    }

    let configured = std::env::var("PROMPTLINE_TRANSCRIPT")
        .ok()
        .or_else(|| config.general.transcript.clone());

    match configured {
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => Some(expand_home(raw.trim())),
        None => config_dir().map(|d| d.join(DEFAULT_TRANSCRIPT_FILE)),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}
