pub mod config;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod poller;
pub mod registry;
pub mod traits;
pub mod types;

pub use config::{ClientConfig, PollConfig};
pub use error::{DeskError, Notification, Result, Severity};
pub use openai::OpenAIAssistantsClient;
pub use pipeline::QueryPipeline;
pub use poller::RunPoller;
pub use registry::AssistantRegistry;
pub use traits::AssistantsApi;
pub use types::{AssistantRecord, Role, Run, RunStatus, ThreadMessage, NO_DESCRIPTION};
