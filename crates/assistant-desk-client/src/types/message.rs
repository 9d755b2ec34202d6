use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A message read back from a thread.
///
/// Content parts stay raw so that only the message actually used has to
/// match the text shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<Value>,
}

impl ThreadMessage {
    /// Text message with a single `text` part
    pub fn text(role: Role, value: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            content: vec![serde_json::json!({
                "type": "text",
                "text": { "value": value.into(), "annotations": [] },
            })],
        }
    }

    /// Value of the first content part, if it is text
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .first()?
            .get("text")?
            .get("value")?
            .as_str()
    }
}
