use crate::error::Result;
use crate::types::{AssistantRecord, Role, Run, RunStatus, ThreadMessage};
use async_trait::async_trait;

/// The six Assistants API calls the query pipeline is built from.
///
/// Implementations perform network I/O only and keep no state between
/// calls.
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    async fn list_assistants(&self) -> Result<Vec<AssistantRecord>>;

    /// Returns the new thread id
    async fn create_thread(&self) -> Result<String>;

    async fn post_message(&self, thread_id: &str, role: Role, content: &str) -> Result<()>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus>;

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;
}
