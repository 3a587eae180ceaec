use crate::{Result, TextCraftError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration for the TextCraft service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextCraftConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Bearer-token verification settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Generation backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider: "gemini" or "huggingface"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier
    /// For Gemini: e.g. "gemini-1.5-flash"
    /// For Hugging Face: e.g. "mistralai/Mistral-7B-Instruct-v0.2"
    #[serde(default)]
    pub model: Option<String>,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_base")]
    pub gemini_api_base: String,

    /// Gemini API key (falls back to GOOGLE_AI_API_KEY)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Hugging Face Inference API base URL
    #[serde(default = "default_huggingface_api_base")]
    pub huggingface_api_base: String,

    /// Hugging Face API key (falls back to HUGGINGFACE_API_KEY)
    #[serde(default)]
    pub huggingface_api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Token cap for Hugging Face generation
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: usize,

    /// Sampling temperature for Hugging Face generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling parameter for Hugging Face generation
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            gemini_api_base: default_gemini_api_base(),
            gemini_api_key: None,
            huggingface_api_base: default_huggingface_api_base(),
            huggingface_api_key: None,
            timeout_secs: default_timeout_secs(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret used to verify bearer tokens. Token issuance is the
    /// identity provider's job; this service only verifies.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter: "error", "warn", "info", "debug", "trace"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_huggingface_api_base() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_new_tokens() -> usize {
    250
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_jwt_secret() -> String {
    "change-me".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TextCraftConfig {
    /// Load configuration: TOML file if present, then environment
    /// overrides on top.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("TEXTCRAFT_CONFIG") {
            Ok(path) => Self::load_from_file(Path::new(&path))?,
            Err(_) => {
                let default_path = Path::new("textcraft.toml");
                if default_path.exists() {
                    Self::load_from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TextCraftError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| {
            TextCraftError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("TEXTCRAFT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TEXTCRAFT_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(provider) = std::env::var("TEXTCRAFT_LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("TEXTCRAFT_LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Ok(key) = std::env::var("GOOGLE_AI_API_KEY") {
            self.llm.gemini_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("HUGGINGFACE_API_KEY") {
            self.llm.huggingface_api_key = Some(key);
        }
        if let Ok(secret) = std::env::var("TEXTCRAFT_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(level) = std::env::var("TEXTCRAFT_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.llm.provider.as_str() {
            "gemini" | "huggingface" => Ok(()),
            other => Err(TextCraftError::Config(format!(
                "unsupported LLM provider: {} (expected gemini or huggingface)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TextCraftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.timeout_secs, 60);
    }

    #[test]
    fn unknown_provider_fails_validation() {
        let mut config = TextCraftConfig::default();
        config.llm.provider = "openai".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let parsed: TextCraftConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [llm]
            provider = "huggingface"
            model = "mistralai/Mistral-7B-Instruct-v0.2"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.llm.provider, "huggingface");
        assert_eq!(parsed.llm.max_new_tokens, 250);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn load_from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textcraft.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();
        let config = TextCraftConfig::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(TextCraftConfig::load_from_file(&dir.path().join("missing.toml")).is_err());
    }
}
