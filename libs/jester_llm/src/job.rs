use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerationError;

/// Lifecycle of a remote job as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Waiting,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub task_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub task_id: String,
    pub state: JobState,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub status_suggestion: Option<String>,
}

/// A status snapshot of a job, with its output once it has succeeded.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub status: TaskStatus,
    pub output: Option<GenerationOutput>,
}

impl JobStatus {
    pub fn handle(&self) -> JobHandle {
        JobHandle {
            task_id: self.status.task_id.clone(),
        }
    }
}

/// Typed output of a succeeded generation job.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "OutputShape")]
pub struct GenerationOutput {
    pub file: GeneratedFile,
}

/// Tag results arrive as `{"file": {"blocks": ...}}`; inline documents may
/// come back as the bare file.
#[derive(Deserialize)]
#[serde(untagged)]
enum OutputShape {
    Wrapped { file: GeneratedFile },
    Bare(GeneratedFile),
}

impl From<OutputShape> for GenerationOutput {
    fn from(shape: OutputShape) -> Self {
        match shape {
            OutputShape::Wrapped { file } | OutputShape::Bare(file) => Self { file },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedFile {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<TagValue>,
}

/// Generation tags carry their text either directly or wrapped as
/// `{"string-value": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Wrapped {
        #[serde(rename = "string-value")]
        string_value: String,
    },
    Other(Value),
}

impl GenerationOutput {
    /// First block, first tag, its value.
    pub fn generated_text(&self) -> Result<String, GenerationError> {
        let block = self.file.blocks.first().ok_or_else(|| {
            GenerationError::MalformedRemoteResponse("output has no blocks".to_string())
        })?;
        let tag = block.tags.first().ok_or_else(|| {
            GenerationError::MalformedRemoteResponse("first block has no tags".to_string())
        })?;

        match &tag.value {
            Some(TagValue::Text(text)) => Ok(text.clone()),
            Some(TagValue::Wrapped { string_value }) => Ok(string_value.clone()),
            Some(TagValue::Other(other)) => Err(GenerationError::MalformedRemoteResponse(
                format!("unexpected tag value: {}", other),
            )),
            None => Err(GenerationError::MalformedRemoteResponse(
                "first tag has no value".to_string(),
            )),
        }
    }
}

/// Envelope every task-returning endpoint responds with.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskEnvelope {
    pub status: TaskStatus,
    #[serde(default)]
    pub data: Option<Value>,
}

impl TaskEnvelope {
    /// The output is only decoded once the job has succeeded; anything
    /// attached to a pending or failed job is ignored.
    pub(crate) fn into_job_status(self) -> Result<JobStatus, GenerationError> {
        let output = match (self.status.state, self.data) {
            (JobState::Succeeded, Some(data)) if !data.is_null() => Some(
                serde_json::from_value::<GenerationOutput>(data).map_err(|e| {
                    GenerationError::MalformedRemoteResponse(format!(
                        "task {} output: {}",
                        self.status.task_id, e
                    ))
                })?,
            ),
            _ => None,
        };

        Ok(JobStatus {
            status: self.status,
            output,
        })
    }
}
