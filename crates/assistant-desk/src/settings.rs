use assistant_desk_client::config::{DEFAULT_REQUEST_TIMEOUT, OPENAI_API_BASE};
use assistant_desk_client::{ClientConfig, PollConfig};
use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub logging: LoggingSettings,

    // Secret (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: OPENAI_API_BASE.to_string(),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT.as_secs()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub interval_ms: u64,
    pub max_wait_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        let poll = PollConfig::default();
        Self {
            interval_ms: poll.interval.as_millis() as u64,
            max_wait_secs: poll.max_wait.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. DESK_* environment variables, `__` between section and key
    ///    (e.g. DESK_POLL__MAX_WAIT_SECS=60)
    ///
    /// OPENAI_API_KEY is required and only read from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("DESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        settings.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
            })?;

        Ok(settings)
    }

    /// Parse settings from a TOML string (useful for testing)
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new()
            .with_interval(Duration::from_millis(self.poll.interval_ms))
            .with_max_wait(Duration::from_secs(self.poll.max_wait_secs))
    }

    pub fn client_config(&self) -> assistant_desk_client::Result<ClientConfig> {
        let mut config = ClientConfig::new(self.openai_api_key.clone())?
            .with_base_url(self.api.base_url.clone())
            .with_poll(self.poll_config());
        if let Some(secs) = self.api.request_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
