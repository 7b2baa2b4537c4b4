//! Config loader — reads `~/.folio/config.json`, then merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.folio/config.json` (or an explicit path)
//! 3. Environment variables (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{ChatConfig, Config, ProviderConfig};

/// Primary provider API key.
pub const ENV_PRIMARY_API_KEY: &str = "LLM_API_KEY";
/// Secondary provider API key.
pub const ENV_SECONDARY_API_KEY: &str = "DEEPSEEK_API_KEY";
/// System prompt shared by both providers.
pub const ENV_SYSTEM_PROMPT: &str = "SYSTEM_PROMPT";

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + process environment.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    let mut config: Config = match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return Config::default();
        }
    };

    if config.chat.timeout_secs == 0 {
        warn!("ignoring chat.timeoutSecs = 0 in {}", path.display());
        config.chat.timeout_secs = ChatConfig::default().timeout_secs;
    }

    config
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` resolves a variable name to its value; empty values count as unset.
///
/// Supported variables:
/// - `LLM_API_KEY` → `providers.primary.api_key`
/// - `DEEPSEEK_API_KEY` → `providers.secondary.api_key`
/// - `SYSTEM_PROMPT` → `chat.system_prompt`
/// - `FOLIO_PROVIDERS__PRIMARY__API_BASE` → `providers.primary.api_base`
/// - `FOLIO_PROVIDERS__SECONDARY__API_BASE` → `providers.secondary.api_base`
/// - `FOLIO_PROVIDERS__SECONDARY__MODEL` → `providers.secondary.model`
/// - `FOLIO_CHAT__TIMEOUT_SECS` → `chat.timeout_secs`
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    apply_provider_env(&mut config.providers.primary, "PRIMARY", ENV_PRIMARY_API_KEY, &get);
    apply_provider_env(
        &mut config.providers.secondary,
        "SECONDARY",
        ENV_SECONDARY_API_KEY,
        &get,
    );

    if let Some(val) = get(ENV_SYSTEM_PROMPT) {
        config.chat.system_prompt = val;
    }
    if let Some(val) = get("FOLIO_CHAT__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(n) if n > 0 => config.chat.timeout_secs = n,
            _ => warn!(value = %val, "ignoring invalid FOLIO_CHAT__TIMEOUT_SECS"),
        }
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(
    provider: &mut ProviderConfig,
    name: &str,
    key_var: &str,
    get: &dyn Fn(&str) -> Option<String>,
) {
    if let Some(val) = get(key_var) {
        provider.api_key = val;
    }
    if let Some(val) = get(format!("FOLIO_PROVIDERS__{name}__API_BASE").as_str()) {
        provider.api_base = Some(val);
    }
    if let Some(val) = get(format!("FOLIO_PROVIDERS__{name}__MODEL").as_str()) {
        provider.model = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
