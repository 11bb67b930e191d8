//! Configuration loading, validation, and management for LitLens.
//!
//! Loads configuration from `~/.litlens/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.litlens/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server-side fallback API key. Browser users normally supply their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Hosted model endpoint settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// The three agent profiles
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Maximum tool-call rounds per agent run
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    /// PDF extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// arXiv search tool settings
    #[serde(default)]
    pub arxiv: ArxivConfig,

    /// Gateway (web UI) configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_max_tool_rounds() -> u32 {
    4
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("agents", &self.agents)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("extraction", &self.extraction)
            .field("arxiv", &self.arxiv)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenAI-compatible base URL (without `/chat/completions`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client timeout for a single completion call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Model parameters for one agent profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfileConfig {
    #[serde(default = "default_model")]
    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,
}

fn default_model() -> String {
    "gpt-4o".into()
}

impl AgentProfileConfig {
    fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: default_model(),
            temperature,
            max_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default = "default_answer_profile")]
    pub answer: AgentProfileConfig,

    #[serde(default = "default_citation_profile")]
    pub citation: AgentProfileConfig,

    #[serde(default = "default_comparison_profile")]
    pub comparison: AgentProfileConfig,
}

fn default_answer_profile() -> AgentProfileConfig {
    AgentProfileConfig::new(0.6, 1400)
}
fn default_citation_profile() -> AgentProfileConfig {
    AgentProfileConfig::new(0.3, 800)
}
fn default_comparison_profile() -> AgentProfileConfig {
    AgentProfileConfig::new(0.5, 1600)
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            answer: default_answer_profile(),
            citation: default_citation_profile(),
            comparison: default_comparison_profile(),
        }
    }
}

impl AgentsConfig {
    fn all(&self) -> [(&'static str, &AgentProfileConfig); 3] {
        [
            ("answer", &self.answer),
            ("citation", &self.citation),
            ("comparison", &self.comparison),
        ]
    }

    fn all_mut(&mut self) -> [&mut AgentProfileConfig; 3] {
        [&mut self.answer, &mut self.citation, &mut self.comparison]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Character budget for the concatenated PDF context
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_chars() -> usize {
    12_000
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArxivConfig {
    #[serde(default = "default_arxiv_url")]
    pub base_url: String,

    /// Upper bound on results returned per search
    #[serde(default = "default_arxiv_max_results")]
    pub max_results: u32,
}

fn default_arxiv_url() -> String {
    "https://export.arxiv.org/api".into()
}
fn default_arxiv_max_results() -> u32 {
    5
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            base_url: default_arxiv_url(),
            max_results: default_arxiv_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Upper bound on one chat form submission (all PDFs together)
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

fn default_port() -> u16 {
    8501
}
fn default_host() -> String {
    "127.0.0.1".into()
}
/// Largest accepted `gateway.max_upload_mb`.
pub const MAX_UPLOAD_MB_LIMIT: usize = 1024;

fn default_max_upload_mb() -> usize {
    50
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides (highest priority).
    ///
    /// Takes a lookup function so callers and tests don't have to touch the
    /// process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("LITLENS_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        }

        if let Some(model) = lookup("LITLENS_MODEL") {
            for profile in self.agents.all_mut() {
                profile.model = model.clone();
            }
        }

        if let Some(url) = lookup("LITLENS_BASE_URL") {
            self.provider.base_url = url;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".litlens")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in self.agents.all() {
            if !(0.0..=2.0).contains(&profile.temperature) {
                return Err(ConfigError::ValidationError(format!(
                    "agents.{name}.temperature must be between 0.0 and 2.0"
                )));
            }
            if profile.max_tokens == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "agents.{name}.max_tokens must be > 0"
                )));
            }
            if profile.model.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "agents.{name}.model must not be empty"
                )));
            }
        }

        if self.extraction.max_chars == 0 {
            return Err(ConfigError::ValidationError(
                "extraction.max_chars must be > 0".into(),
            ));
        }

        if !(1..=MAX_UPLOAD_MB_LIMIT).contains(&self.gateway.max_upload_mb) {
            return Err(ConfigError::ValidationError(format!(
                "gateway.max_upload_mb must be between 1 and {MAX_UPLOAD_MB_LIMIT}"
            )));
        }

        if self.max_tool_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "max_tool_rounds must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if a server-side API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: ProviderConfig::default(),
            agents: AgentsConfig::default(),
            max_tool_rounds: default_max_tool_rounds(),
            extraction: ExtractionConfig::default(),
            arxiv: ArxivConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
