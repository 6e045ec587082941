use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::HttpOptions;

/// Default redirect-chain lookup service.
pub const DEFAULT_RESOLVER_ENDPOINT: &str = "https://api.httpstatus.io/v1/status";

/// Suggestion (chat completion) settings (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Ask for suggestions when a URL fails to resolve.
    pub enabled: bool,
    /// Chat model name.
    pub model: String,
    /// API base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 100,
            temperature: 0.6,
        }
    }
}

/// Global configuration loaded from `~/.config/unshort/config.toml`.
///
/// API keys are never stored here; see [`crate::suggest::Credentials`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnshortConfig {
    /// Endpoint that accepts `{"requestUrl": ...}` and returns the redirect chain.
    pub resolver_endpoint: String,
    /// Connect timeout for every outbound request.
    pub connect_timeout_secs: u64,
    /// Total timeout for every outbound request.
    pub timeout_secs: u64,
    /// User-Agent sent with page fetches and service calls.
    pub user_agent: String,
    /// Directory that receives `urls.csv` / `urls.txt`.
    pub output_dir: PathBuf,
    /// Optional suggestion settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub suggest: Option<SuggestConfig>,
}

impl Default for UnshortConfig {
    fn default() -> Self {
        Self {
            resolver_endpoint: DEFAULT_RESOLVER_ENDPOINT.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
            user_agent: concat!("unshort/", env!("CARGO_PKG_VERSION")).to_string(),
            output_dir: PathBuf::from("output"),
            suggest: None,
        }
    }
}

impl UnshortConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Suggestion settings with defaults filled in.
    pub fn suggest(&self) -> SuggestConfig {
        self.suggest.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("unshort")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UnshortConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UnshortConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UnshortConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
