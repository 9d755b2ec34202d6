pub mod assistant;
pub mod message;
pub mod run;

pub use assistant::{AssistantRecord, NO_DESCRIPTION};
pub use message::{Role, ThreadMessage};
pub use run::{Run, RunStatus};
