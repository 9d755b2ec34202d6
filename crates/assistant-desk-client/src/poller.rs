use crate::config::PollConfig;
use crate::error::{DeskError, Result};
use crate::traits::AssistantsApi;
use crate::types::RunStatus;
use tokio::time::{timeout_at, Instant};

/// Drives a run to a terminal state by polling its status.
///
/// The first poll is immediate; every non-terminal status is followed by a
/// sleep of `interval`. `max_wait` bounds the whole wait, including a status
/// request that never answers: past it the poller gives up with
/// `DeskError::Timeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunPoller {
    config: PollConfig,
}

impl RunPoller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    pub async fn await_completion(
        &self,
        api: &dyn AssistantsApi,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunStatus> {
        let started = Instant::now();
        let deadline = started + self.config.max_wait;
        // A freshly created run is queued
        let mut last_status = RunStatus::Queued;

        loop {
            let status = match timeout_at(deadline, api.get_run_status(thread_id, run_id)).await {
                Ok(polled) => polled?,
                Err(_) => {
                    let waited = started.elapsed();
                    tracing::warn!(
                        run_id,
                        ?waited,
                        %last_status,
                        "run status request outlived the wait bound"
                    );
                    return Err(DeskError::Timeout {
                        waited,
                        last_status,
                    });
                }
            };
            tracing::debug!(run_id, %status, "run status");

            if status.is_success() {
                return Ok(status);
            }
            if status.is_failure() {
                tracing::warn!(run_id, %status, "run ended without completing");
                return Err(DeskError::RunFailed { status });
            }

            let waited = started.elapsed();
            if waited >= self.config.max_wait {
                tracing::warn!(run_id, ?waited, %status, "gave up waiting for run");
                return Err(DeskError::Timeout {
                    waited,
                    last_status: status,
                });
            }

            last_status = status;
            tokio::time::sleep(self.config.interval).await;
        }
    }
}
