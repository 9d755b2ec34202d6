use serde::{Deserialize, Serialize};

/// Shown in place of a missing assistant description
pub const NO_DESCRIPTION: &str = "No description";

/// An assistant as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub model: String,
}

impl AssistantRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            model: model.into(),
        }
    }
}
