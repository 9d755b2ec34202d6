use std::time::Duration;

use thiserror::Error;

use crate::types::RunStatus;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// Error envelope reported by the API, surfaced verbatim
    #[error("{message} (Type: {kind})")]
    Api { message: String, kind: String },

    #[error("Run failed with status: {status}")]
    RunFailed { status: RunStatus },

    #[error("Run did not finish within {waited:?} (last status: {last_status})")]
    Timeout {
        waited: Duration,
        last_status: RunStatus,
    },

    #[error("The assistant did not provide a response.")]
    NoResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown assistant: {0}")]
    UnknownAssistant(String),
}

impl From<reqwest::Error> for DeskError {
    fn from(err: reqwest::Error) -> Self {
        DeskError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// What a presentation layer should show the user for a failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: &'static str,
    pub body: String,
}

impl DeskError {
    pub fn notification(&self) -> Notification {
        match self {
            DeskError::NoResponse => Notification {
                severity: Severity::Warning,
                title: "No Response",
                body: self.to_string(),
            },
            DeskError::MalformedResponse(_) => Notification {
                severity: Severity::Warning,
                title: "No Response",
                body: self.to_string(),
            },
            DeskError::UnknownAssistant(_) => Notification {
                severity: Severity::Warning,
                title: "Warning",
                body: "Please select an assistant to query.".to_string(),
            },
            DeskError::Config(_) => Notification {
                severity: Severity::Error,
                title: "Configuration Error",
                body: self.to_string(),
            },
            _ => Notification {
                severity: Severity::Error,
                title: "Error",
                body: format!("An error occurred: {}", self),
            },
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, DeskError::Config(_))
    }
}
