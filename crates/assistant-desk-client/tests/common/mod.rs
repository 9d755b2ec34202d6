#![allow(dead_code)]

use assistant_desk_client::{
    AssistantRecord, AssistantsApi, DeskError, Result, Role, Run, RunStatus, ThreadMessage,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Calls as seen by the scripted API, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListAssistants,
    CreateThread,
    PostMessage { thread_id: String, content: String },
    CreateRun { thread_id: String, assistant_id: String },
    GetRunStatus { thread_id: String, run_id: String },
    ListMessages { thread_id: String },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::ListAssistants => "list_assistants",
            Call::CreateThread => "create_thread",
            Call::PostMessage { .. } => "post_message",
            Call::CreateRun { .. } => "create_run",
            Call::GetRunStatus { .. } => "get_run_status",
            Call::ListMessages { .. } => "list_messages",
        }
    }
}

/// In-memory `AssistantsApi` that replays a script and records every call.
///
/// `fail_on` makes the named call fail: with `api_error` as an API error
/// envelope, otherwise as a transport error. `stall_on` makes the named call
/// never answer.
pub struct ScriptedApi {
    pub assistants: Vec<AssistantRecord>,
    pub statuses: Mutex<VecDeque<RunStatus>>,
    pub messages: Vec<ThreadMessage>,
    pub fail_on: Option<&'static str>,
    pub api_error: Option<(String, String)>,
    pub stall_on: Option<&'static str>,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn new(statuses: &[&str], messages: Vec<ThreadMessage>) -> Self {
        Self {
            assistants: Vec::new(),
            statuses: Mutex::new(statuses.iter().map(|s| RunStatus::from(*s)).collect()),
            messages,
            fail_on: None,
            api_error: None,
            stall_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answer: &str) -> Self {
        Self::new(
            &["queued", "in_progress", "completed"],
            vec![
                ThreadMessage::text(Role::Assistant, answer),
                ThreadMessage::text(Role::User, "question"),
            ],
        )
    }

    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn rejecting_on(mut self, call: &'static str, message: &str, kind: &str) -> Self {
        self.fail_on = Some(call);
        self.api_error = Some((message.to_string(), kind.to_string()));
        self
    }

    pub fn stalling_on(mut self, call: &'static str) -> Self {
        self.stall_on = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::name).collect()
    }

    async fn record(&self, call: Call) -> Result<()> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);
        if self.stall_on == Some(name) {
            std::future::pending::<()>().await;
        }
        if self.fail_on == Some(name) {
            return Err(match &self.api_error {
                Some((message, kind)) => DeskError::Api {
                    message: message.clone(),
                    kind: kind.clone(),
                },
                None => DeskError::Transport(format!("connection reset during {}", name)),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AssistantsApi for ScriptedApi {
    async fn list_assistants(&self) -> Result<Vec<AssistantRecord>> {
        self.record(Call::ListAssistants).await?;
        Ok(self.assistants.clone())
    }

    async fn create_thread(&self) -> Result<String> {
        self.record(Call::CreateThread).await?;
        Ok("thread_1".to_string())
    }

    async fn post_message(&self, thread_id: &str, role: Role, content: &str) -> Result<()> {
        assert_eq!(role, Role::User);
        self.record(Call::PostMessage {
            thread_id: thread_id.to_string(),
            content: content.to_string(),
        })
        .await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        self.record(Call::CreateRun {
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
        })
        .await?;
        Ok(Run {
            id: "run_1".to_string(),
            status: RunStatus::Queued,
        })
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus> {
        self.record(Call::GetRunStatus {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        })
        .await?;
        let mut statuses = self.statuses.lock().unwrap();
        // The last scripted status repeats once the script runs out
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        Ok(status.unwrap_or(RunStatus::InProgress))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        self.record(Call::ListMessages {
            thread_id: thread_id.to_string(),
        })
        .await?;
        Ok(self.messages.clone())
    }
}
