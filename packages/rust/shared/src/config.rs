//! Application configuration for SuggestPanel.
//!
//! User config lives at `~/.suggestpanel/suggestpanel.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestPanelError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "suggestpanel.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".suggestpanel";

/// Fallback suggestion backend when no base URL is configured.
pub const DEFAULT_BACKEND: &str = "http://127.0.0.1:8000";

// ---------------------------------------------------------------------------
// Config structs (matching suggestpanel.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Suggestion backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Suggestion request tuning.
    #[serde(default)]
    pub suggest: SuggestConfig,
}

/// `[backend]` section — the persisted backend base URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the suggestion backend. Empty means "use the default".
    #[serde(default)]
    pub base_url: String,
}

impl BackendConfig {
    /// Resolve the effective base URL, falling back to [`DEFAULT_BACKEND`]
    /// when no value is configured.
    pub fn resolve_base_url(&self) -> &str {
        if self.base_url.trim().is_empty() {
            DEFAULT_BACKEND
        } else {
            &self.base_url
        }
    }
}

/// `[suggest]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Maximum number of suggestions requested from the backend.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u32,

    /// Online-window hint embedded in the request payload.
    #[serde(default = "default_online_within_minutes")]
    pub online_within_minutes: u32,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            online_within_minutes: default_online_within_minutes(),
        }
    }
}

fn default_max_suggestions() -> u32 {
    2
}
fn default_online_within_minutes() -> u32 {
    5
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.suggestpanel/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SuggestPanelError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.suggestpanel/suggestpanel.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SuggestPanelError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        SuggestPanelError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SuggestPanelError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SuggestPanelError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SuggestPanelError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("max_suggestions"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.suggest.max_suggestions, 2);
        assert_eq!(parsed.suggest.online_within_minutes, 5);
    }

    #[test]
    fn base_url_falls_back_to_default_when_absent() {
        let config = AppConfig::default();
        assert_eq!(config.backend.resolve_base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn base_url_falls_back_to_default_when_blank() {
        let backend = BackendConfig {
            base_url: "   ".into(),
        };
        assert_eq!(backend.resolve_base_url(), DEFAULT_BACKEND);
    }

    #[test]
    fn configured_base_url_wins() {
        let toml_str = r#"
[backend]
base_url = "https://example.com"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.backend.resolve_base_url(), "https://example.com");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(config.backend.base_url, "");
        assert_eq!(config.suggest.max_suggestions, 2);
    }
}
