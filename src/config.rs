//! Widget configuration: server location, endpoint paths, request timeout,
//! optional behaviours. Read from `<config dir>/finchat/config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Overrides `base_url` when set.
pub const BASE_URL_ENV: &str = "FINCHAT_BASE_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub send: String,
    pub history: String,
    pub clear: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            send: "/finance/chatbot/send/".into(),
            history: "/finance/chatbot/history/".into(),
            clear: "/finance/chatbot/clear/".into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetConfig {
    pub base_url: String,
    pub endpoints: Endpoints,
    pub request_timeout_secs: u64,
    /// Close the panel when a click lands outside it. Off unless enabled.
    pub close_on_outside_click: bool,
    /// Banner kept at the top of the message list across clears.
    pub welcome_message: Option<String>,
    /// Cookies seeded into the jar before the first request, e.g.
    /// `sessionid=...` copied from a browser session.
    pub cookies: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            endpoints: Endpoints::default(),
            request_timeout_secs: 120,
            close_on_outside_click: false,
            welcome_message: Some(
                "Hi! I'm your finance assistant. Ask me about accounts, invoices or journal entries."
                    .into(),
            ),
            cookies: Vec::new(),
        }
    }
}

impl WidgetConfig {
    /// Load from the default location and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    /// Missing file yields defaults; a present but invalid file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: WidgetConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("finchat").join("config.json"))
    }

    /// Where the log file goes; falls back to the temp dir.
    pub fn log_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("finchat")
            .join("finchat.log")
    }
}
