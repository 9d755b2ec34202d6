// Client configuration. Built once by the caller and handed to the client;
// nothing in this crate reads the process environment.

use crate::error::{DeskError, Result};
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Value of the `OpenAI-Beta` header required by the Assistants API
pub const ASSISTANTS_BETA: &str = "assistants=v2";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Run polling cadence and the fail-safe bound on total wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(300),
        }
    }
}

impl PollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub beta_header: String,
    /// Per-request timeout, no limit when unset
    pub request_timeout: Option<Duration>,
    pub poll: PollConfig,
}

impl ClientConfig {
    /// Fails with `DeskError::Config` when the key is empty so that no
    /// unauthenticated request is ever sent.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DeskError::Config("API key must not be empty".to_string()));
        }

        Ok(Self {
            api_key,
            base_url: OPENAI_API_BASE.to_string(),
            beta_header: ASSISTANTS_BETA.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            poll: PollConfig::default(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}
