use thiserror::Error;

/// Failures surfaced by [`crate::GenerationClient::generate`].
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Remote generation capability unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Remote job {task_id} failed: {reason}")]
    RemoteJobFailed { task_id: String, reason: JobFailure },

    #[error("Malformed remote response: {0}")]
    MalformedRemoteResponse(String),
}

impl GenerationError {
    /// Stable identifier used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::RemoteUnavailable(_) => "remote_unavailable",
            GenerationError::RemoteJobFailed { .. } => "remote_job_failed",
            GenerationError::MalformedRemoteResponse(_) => "malformed_remote_response",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::RemoteUnavailable(err.to_string())
    }
}

/// Why a submitted job did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFailure {
    Failed {
        status_code: Option<String>,
        status_message: Option<String>,
        status_suggestion: Option<String>,
    },
    TimedOut {
        waited_secs: u64,
    },
}

impl std::fmt::Display for JobFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobFailure::Failed {
                status_code,
                status_message,
                status_suggestion,
            } => {
                let mut parts = Vec::new();
                if let Some(code) = status_code {
                    parts.push(code.clone());
                }
                if let Some(message) = status_message {
                    parts.push(format!("Message: {}", message));
                }
                if let Some(suggestion) = status_suggestion {
                    parts.push(format!("Suggestion: {}", suggestion));
                }
                if parts.is_empty() {
                    write!(f, "unknown remote error")
                } else {
                    write!(f, "{}", parts.join("; "))
                }
            }
            JobFailure::TimedOut { waited_secs } => {
                write!(f, "timed out after {}s", waited_secs)
            }
        }
    }
}
