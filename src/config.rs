use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// API backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Holds `index.html` for `/` and the assets served under `/static`.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Manus,
    Echo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_kind")]
    pub kind: AgentKind,
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub eager_init: bool,
}

/// Static preview server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_host")]
    pub host: String,
    #[serde(default = "default_preview_port")]
    pub port: u16,
    #[serde(default = "default_web_dir")]
    pub directory: String,
    #[serde(default = "default_true")]
    pub open_browser: bool,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_web_dir() -> String {
    "web_interface".to_string()
}

fn default_agent_kind() -> AgentKind {
    AgentKind::Manus
}

fn default_agent_base_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_preview_host() -> String {
    "127.0.0.1".to_string()
}

fn default_preview_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            web_dir: default_web_dir(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            kind: default_agent_kind(),
            base_url: default_agent_base_url(),
            timeout_secs: None,
            eager_init: true,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            host: default_preview_host(),
            port: default_preview_port(),
            directory: default_web_dir(),
            open_browser: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config in {}", path))?;
            Ok(config)
        } else {
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config in {}", path))?;
            Ok(config)
        }
    }

    /// Load the first config file that exists, falling back to defaults.
    ///
    /// `env_var` may name an explicit path; it is tried before the
    /// `manus-web.yaml` / `manus-web.json` files in the working directory.
    /// A file that exists but does not parse is an error.
    pub fn discover(env_var: &str) -> Result<(Self, Option<String>)> {
        let candidates: Vec<String> = vec![
            std::env::var(env_var).ok(),
            Some("manus-web.yaml".to_string()),
            Some("manus-web.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        for path in candidates {
            if Path::new(&path).exists() {
                let config = Self::load(&path)?;
                return Ok((config, Some(path)));
            }
            tracing::debug!("No config file at {}", path);
        }

        Ok((Self::default(), None))
    }
}
