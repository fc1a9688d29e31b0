//! Bot configuration module.
//!
//! Handles loading, validating, and merging configuration. Configuration is
//! layered: stock defaults are overridden by an optional `config.toml`, which
//! is in turn overridden by environment variables (the deployment delivers
//! credentials as GitHub Secrets, never through the config file).
//!
//! ## Layers
//!
//! ```text
//! stock defaults            # compiled in
//! config/config.toml        # optional, --config to relocate
//! FB_PAGE_ID                # → facebook.page_id
//! FB_ACCESS_TOKEN           # → facebook.access_token
//! FB_API_VERSION            # → facebook.api_version
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [facebook]
//! api_version = "v18.0"     # Graph API version
//! # page_id = "..."         # usually supplied via FB_PAGE_ID
//! # access_token = "..."    # usually supplied via FB_ACCESS_TOKEN
//!
//! [paths]
//! posts_dir = "posts"       # queued markdown posts
//! logs_dir = "logs"         # per-run log files
//!
//! [content]
//! default_message = "..."   # used when the fallback list is empty
//! fallback_messages = []    # daily message candidates
//! hashtags = "..."          # appended to every rendered markdown post
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! # Only override the posts directory
//! [paths]
//! posts_dir = "queue"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Bot configuration merged from defaults, `config.toml`, and environment.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// Graph API target (page, credentials, version).
    pub facebook: FacebookConfig,
    /// Filesystem layout (posts queue, log files).
    pub paths: PathsConfig,
    /// Canned content for generated daily messages.
    pub content: ContentConfig,
}

impl BotConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.facebook.api_version.starts_with('v') {
            return Err(ConfigError::Validation(
                "facebook.api_version must look like \"v18.0\"".into(),
            ));
        }
        if self.paths.posts_dir.is_empty() {
            return Err(ConfigError::Validation(
                "paths.posts_dir must not be empty".into(),
            ));
        }
        if self.paths.logs_dir.is_empty() {
            return Err(ConfigError::Validation(
                "paths.logs_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Page id and access token, required before any Graph API call.
    ///
    /// Kept out of [`validate`](Self::validate) so dry runs work without
    /// credentials.
    pub fn require_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let page_id = self
            .facebook
            .page_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "no Facebook page id configured (set FB_PAGE_ID or facebook.page_id)".into(),
                )
            })?;
        let access_token = self
            .facebook
            .access_token
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "no Facebook access token configured (set FB_ACCESS_TOKEN or \
                     facebook.access_token)"
                        .into(),
                )
            })?;
        Ok((page_id, access_token))
    }
}

/// Graph API target settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacebookConfig {
    /// Page to post to. Usually supplied via `FB_PAGE_ID`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    /// Page access token. Usually supplied via `FB_ACCESS_TOKEN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Graph API version segment, e.g. `v18.0`.
    pub api_version: String,
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            page_id: None,
            access_token: None,
            api_version: "v18.0".to_string(),
        }
    }
}

/// Filesystem layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory of queued markdown posts. Consumed files move to
    /// `<posts_dir>/archive/`.
    pub posts_dir: String,
    /// Directory for per-run log files.
    pub logs_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            logs_dir: "logs".to_string(),
        }
    }
}

/// Canned content for generated daily messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Used when `fallback_messages` is empty.
    pub default_message: String,
    /// Daily message candidates; one is picked at random.
    pub fallback_messages: Vec<String>,
    /// Appended to every rendered markdown post.
    pub hashtags: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_message: "🌞 Good morning from Fiew! Stay curious, stay inspired. #FiewDaily"
                .to_string(),
            fallback_messages: vec![
                "Another day, another opportunity to learn something new! 📚".to_string(),
                "Keep exploring, keep growing. What will you discover today?".to_string(),
                "Thought for the day: The only limit is your imagination. ✨".to_string(),
            ],
            hashtags: "#Fiew #DailyPost #Curiosity".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging file and environment overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BotConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist (stock defaults apply).
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Build the environment overlay from a variable lookup.
///
/// Only variables that are actually set contribute keys, so unset variables
/// never clobber file values. The lookup is injected so tests don't have to
/// mutate process-global environment state.
pub fn env_overlay(lookup: impl Fn(&str) -> Option<String>) -> Option<toml::Value> {
    const VARS: [(&str, &str); 3] = [
        ("FB_PAGE_ID", "page_id"),
        ("FB_ACCESS_TOKEN", "access_token"),
        ("FB_API_VERSION", "api_version"),
    ];

    let mut facebook = toml::map::Map::new();
    for (var, key) in VARS {
        if let Some(value) = lookup(var) {
            facebook.insert(key.to_string(), toml::Value::String(value));
        }
    }
    if facebook.is_empty() {
        return None;
    }
    let mut root = toml::map::Map::new();
    root.insert("facebook".to_string(), toml::Value::Table(facebook));
    Some(toml::Value::Table(root))
}

/// Whether `TEST_MODE` requests a dry run.
pub fn test_mode(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("TEST_MODE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Load config from `path`, layering file and environment over stock defaults.
///
/// Rejects unknown keys and validates the result.
pub fn load_config(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<BotConfig, ConfigError> {
    let mut merged = stock_defaults_value();
    if let Some(file_layer) = load_raw_config(path)? {
        merged = merge_toml(merged, file_layer);
    }
    if let Some(env_layer) = env_overlay(env) {
        merged = merge_toml(merged, env_layer);
    }
    let config: BotConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Fiew Bot Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Credentials layer on top of this file from the environment:
#   FB_PAGE_ID       -> facebook.page_id
#   FB_ACCESS_TOKEN  -> facebook.access_token
#   FB_API_VERSION   -> facebook.api_version
#
# Each layer only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Graph API target
# ---------------------------------------------------------------------------
[facebook]
# Graph API version segment.
api_version = "v18.0"

# Page id and access token. Prefer the FB_* environment variables (delivered
# as repository secrets) over writing credentials into this file.
# page_id = ""
# access_token = ""

# ---------------------------------------------------------------------------
# Filesystem layout
# ---------------------------------------------------------------------------
[paths]
# Directory of queued markdown posts. The earliest file (by name) is posted
# and then moved to <posts_dir>/archive/.
posts_dir = "posts"

# Directory for per-run log files.
logs_dir = "logs"

# ---------------------------------------------------------------------------
# Generated daily messages
# ---------------------------------------------------------------------------
[content]
# Used when fallback_messages is empty.
default_message = "🌞 Good morning from Fiew! Stay curious, stay inspired. #FiewDaily"

# Daily message candidates; one is picked at random and prefixed with the
# day-of-week theme.
fallback_messages = [
    "Another day, another opportunity to learn something new! 📚",
    "Keep exploring, keep growing. What will you discover today?",
    "Thought for the day: The only limit is your imagination. ✨",
]

# Appended to every rendered markdown post.
hashtags = "#Fiew #DailyPost #Curiosity"
"##
}
