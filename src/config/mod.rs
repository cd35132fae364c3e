use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Gemini backend settings
    pub gemini: GeminiConfig,

    /// Transcript resolver settings
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model identifier
    pub model: String,

    /// API key; the GEMINI_API_KEY environment variable takes precedence
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum transcript length (characters) for the json3 segment path.
    /// Rejects empty or placeholder caption tracks.
    pub min_segment_chars: usize,

    /// Minimum transcript length (characters) for the timed-text XML path
    pub min_timedtext_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            gemini: GeminiConfig {
                model: "gemini-2.0-flash".to_string(),
                api_key: None,
            },
            resolver: ResolverConfig {
                min_segment_chars: 10,
                min_timedtext_chars: 10,
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                fs_err::read_to_string(&config_path).context("Failed to read config file")?;

            let config: Config =
                serde_yaml::from_str(&content).context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("ytbrief").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.gemini.model.is_empty() {
            anyhow::bail!("Gemini model must be configured");
        }

        if self.resolver.min_segment_chars == 0 || self.resolver.min_timedtext_chars == 0 {
            anyhow::bail!("Resolver length thresholds must be at least 1");
        }

        Ok(())
    }

    /// Resolve the Gemini API key: environment variable first, config second
    pub fn api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.gemini
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .context("GEMINI_API_KEY must be set (environment variable or gemini.api_key in config.yaml)")
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Server: {}:{}", self.server.host, self.server.port);
        println!("  Gemini Model: {}", self.gemini.model);
        println!(
            "  Gemini API Key: {}",
            if self.api_key().is_ok() {
                "configured"
            } else {
                "not set"
            }
        );
        println!(
            "  Resolver Thresholds: segments >= {}, timedtext >= {}",
            self.resolver.min_segment_chars, self.resolver.min_timedtext_chars
        );
    }
}
