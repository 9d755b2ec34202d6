// OpenAI Assistants API client (HTTP direct, no SDK)
// https://platform.openai.com/docs/api-reference/assistants

use crate::config::ClientConfig;
use crate::error::{DeskError, Result};
use crate::traits::AssistantsApi;
use crate::types::{AssistantRecord, Role, Run, RunStatus, ThreadMessage};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

/// Assistants API client.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenAIAssistantsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIAssistantsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| DeskError::Config("Invalid API key format".to_string()))?,
        );
        headers.insert(
            "openai-beta",
            HeaderValue::from_str(&config.beta_header)
                .map_err(|_| DeskError::Config("Invalid API version marker".to_string()))?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| DeskError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);
        let response = self.http_client.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        tracing::debug!("POST {}", path);
        let mut request = self.http_client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        read_json(response).await
    }
}

/// Map a response onto the shared error contract.
///
/// An error envelope wins over the status code; a non-success status
/// without one is still an API error; a success body of the wrong shape is
/// malformed.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
        tracing::debug!("API error envelope ({}): {}", status, envelope.error.message);
        return Err(DeskError::Api {
            message: envelope.error.message,
            kind: envelope.error.kind.unwrap_or_else(|| "unknown".to_string()),
        });
    }

    if !status.is_success() {
        return Err(DeskError::Api {
            message: format!("HTTP {}: {}", status, body.trim()),
            kind: "http_error".to_string(),
        });
    }

    serde_json::from_str(&body).map_err(|e| DeskError::MalformedResponse(e.to_string()))
}

// ============================================================================
// TRAIT IMPLEMENTATION
// ============================================================================

#[async_trait]
impl AssistantsApi for OpenAIAssistantsClient {
    async fn list_assistants(&self) -> Result<Vec<AssistantRecord>> {
        let list: ListResponse<AssistantObject> = self.get("/assistants").await?;
        Ok(list.data.into_iter().map(AssistantRecord::from).collect())
    }

    async fn create_thread(&self) -> Result<String> {
        let thread: IdObject = self.post("/threads", None).await?;
        Ok(thread.id)
    }

    async fn post_message(&self, thread_id: &str, role: Role, content: &str) -> Result<()> {
        let body = serde_json::json!({
            "role": role.as_str(),
            "content": content,
        });
        let _: IgnoredAny = self
            .post(&format!("/threads/{}/messages", thread_id), Some(body))
            .await?;
        Ok(())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let body = serde_json::json!({ "assistant_id": assistant_id });
        self.post(&format!("/threads/{}/runs", thread_id), Some(body))
            .await
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus> {
        let run: Run = self
            .get(&format!("/threads/{}/runs/{}", thread_id, run_id))
            .await?;
        Ok(run.status)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let list: ListResponse<ThreadMessage> = self
            .get(&format!("/threads/{}/messages", thread_id))
            .await?;
        Ok(list.data)
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct IdObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AssistantObject {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    model: String,
}

impl From<AssistantObject> for AssistantRecord {
    fn from(a: AssistantObject) -> Self {
        AssistantRecord::new(a.id, a.name.unwrap_or_default(), a.description, a.model)
    }
}
