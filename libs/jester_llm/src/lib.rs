use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

pub mod error;
pub mod job;
pub mod plugin_api;

pub use error::{GenerationError, JobFailure};
pub use job::{GenerationOutput, JobHandle, JobState, JobStatus, TaskStatus};
pub use plugin_api::{PluginApiBackend, PluginApiConfig};

/// A remote capability that runs text generation as asynchronous jobs.
#[async_trait]
pub trait GenerationBackend {
    /// Submits `document` and returns the job as first reported.
    async fn submit(&self, document: &str) -> Result<JobStatus, GenerationError>;

    async fn status(&self, job: &JobHandle) -> Result<JobStatus, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(60),
        }
    }
}

/// Submits documents to a [`GenerationBackend`] and waits for the result.
///
/// Cheap to clone; one instance is built at startup and shared by every
/// request.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend + Send + Sync>,
    config: WaitConfig,
}

impl GenerationClient {
    pub fn new(
        backend: Arc<dyn GenerationBackend + Send + Sync>,
        config: Option<WaitConfig>,
    ) -> Self {
        Self {
            backend,
            config: config.unwrap_or_default(),
        }
    }

    /// Submits `document`, waits for the job to finish and returns the
    /// generated text. Failures are returned as-is, nothing is retried.
    pub async fn generate(&self, document: &str) -> Result<String, GenerationError> {
        let submitted = self.backend.submit(document).await?;
        let task_id = submitted.status.task_id.clone();
        tracing::info!(task_id = %task_id, state = ?submitted.status.state, "generation job submitted");

        let finished = self.wait(submitted).await?;

        if finished.status.state == JobState::Failed {
            let status = finished.status;
            let reason = JobFailure::Failed {
                status_code: status.status_code,
                status_message: status.status_message,
                status_suggestion: status.status_suggestion,
            };
            tracing::warn!(task_id = %task_id, %reason, "generation job failed");
            return Err(GenerationError::RemoteJobFailed { task_id, reason });
        }

        let output = finished.output.ok_or_else(|| {
            GenerationError::MalformedRemoteResponse(format!(
                "task {} succeeded without output",
                task_id
            ))
        })?;

        output.generated_text()
    }

    /// Polls until the job is terminal. The first check happens right away;
    /// later ones are spaced by `poll_interval` until `max_wait` runs out.
    async fn wait(&self, mut job: JobStatus) -> Result<JobStatus, GenerationError> {
        if job.status.state.is_terminal() {
            return Ok(job);
        }

        let handle = job.handle();
        let start = Instant::now();

        job = self.backend.status(&handle).await?;
        while !job.status.state.is_terminal() {
            if start.elapsed() >= self.config.max_wait {
                tracing::warn!(
                    task_id = %handle.task_id,
                    "gave up waiting after {:?}",
                    self.config.max_wait
                );
                return Err(GenerationError::RemoteJobFailed {
                    task_id: handle.task_id,
                    reason: JobFailure::TimedOut {
                        waited_secs: self.config.max_wait.as_secs(),
                    },
                });
            }

            sleep(self.config.poll_interval).await;
            job = self.backend.status(&handle).await?;
            tracing::debug!(task_id = %handle.task_id, state = ?job.status.state, "polled job");
        }

        Ok(job)
    }
}
