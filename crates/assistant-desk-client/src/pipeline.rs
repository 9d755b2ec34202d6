use crate::config::PollConfig;
use crate::error::{DeskError, Result};
use crate::poller::RunPoller;
use crate::traits::AssistantsApi;
use crate::types::Role;
use std::sync::Arc;

/// One question to one assistant: a fresh thread and a single run.
///
/// UI-independent. Every failure is returned unchanged from the step that
/// produced it and no later step runs.
#[derive(Clone)]
pub struct QueryPipeline {
    api: Arc<dyn AssistantsApi>,
    poller: RunPoller,
}

impl QueryPipeline {
    pub fn new(api: Arc<dyn AssistantsApi>, poll: PollConfig) -> Self {
        Self {
            api,
            poller: RunPoller::new(poll),
        }
    }

    pub async fn query(&self, assistant_id: &str, text: &str) -> Result<String> {
        let api = self.api.as_ref();

        let thread_id = api.create_thread().await?;
        tracing::debug!(%thread_id, assistant_id, "thread created");

        api.post_message(&thread_id, Role::User, text).await?;

        let run = api.create_run(&thread_id, assistant_id).await?;
        tracing::debug!(run_id = %run.id, status = %run.status, "run created");

        self.poller
            .await_completion(api, &thread_id, &run.id)
            .await?;

        let messages = api.list_messages(&thread_id).await?;
        let answer = messages
            .iter()
            .find(|m| m.role == Role::Assistant)
            .ok_or(DeskError::NoResponse)?;

        answer.first_text().map(str::to_string).ok_or_else(|| {
            DeskError::MalformedResponse(
                "assistant message has no leading text content".to_string(),
            )
        })
    }
}
