use crate::error::{DeskError, Result};
use crate::traits::AssistantsApi;
use crate::types::AssistantRecord;

/// Assistants fetched once at startup, read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct AssistantRegistry {
    assistants: Vec<AssistantRecord>,
}

impl AssistantRegistry {
    pub async fn load(api: &dyn AssistantsApi) -> Result<Self> {
        let assistants = api.list_assistants().await?;
        tracing::info!("Loaded {} assistants", assistants.len());
        Ok(Self { assistants })
    }

    pub fn from_records(assistants: Vec<AssistantRecord>) -> Self {
        Self { assistants }
    }

    pub fn all(&self) -> &[AssistantRecord] {
        &self.assistants
    }

    pub fn len(&self) -> usize {
        self.assistants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assistants.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AssistantRecord> {
        self.assistants.iter().find(|a| a.id == id)
    }

    /// Resolve what the user typed: exact id, then 1-based list position,
    /// then case-insensitive name.
    pub fn select(&self, selector: &str) -> Result<&AssistantRecord> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(DeskError::UnknownAssistant(String::new()));
        }

        if let Some(found) = self.get(selector) {
            return Ok(found);
        }

        if let Ok(position) = selector.parse::<usize>() {
            if let Some(found) = position
                .checked_sub(1)
                .and_then(|index| self.assistants.get(index))
            {
                return Ok(found);
            }
        }

        self.assistants
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(selector))
            .ok_or_else(|| DeskError::UnknownAssistant(selector.to_string()))
    }
}
