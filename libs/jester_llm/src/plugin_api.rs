use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::job::{JobHandle, JobStatus, TaskEnvelope};
use crate::{GenerationBackend, GenerationError};

#[derive(Debug, Clone)]
pub struct PluginApiConfig {
    pub api_base: String,
    pub api_key: String,
    pub workspace: Option<String>,
    pub plugin_handle: String,
    pub instance_handle: String,
    pub max_words: u32,
}

impl PluginApiConfig {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            workspace: None,
            plugin_handle: "prompt-generation-default".to_string(),
            instance_handle: "limit-100".to_string(),
            max_words: 100,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateInstanceResponse {
    data: CreateInstanceData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInstanceData {
    plugin_instance: PluginInstance,
}

#[derive(Debug, Deserialize)]
struct PluginInstance {
    #[serde(default)]
    id: Option<String>,
    handle: String,
}

/// Generation backend talking to a hosted plugin platform over HTTP.
pub struct PluginApiBackend {
    client: Client,
    api_base: String,
    instance_handle: String,
}

impl PluginApiBackend {
    /// Builds the HTTP client and makes sure the configured plugin instance
    /// exists, creating it on first use.
    pub async fn connect(config: PluginApiConfig) -> Result<Self, GenerationError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| GenerationError::RemoteUnavailable(format!("invalid API key: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        if let Some(workspace) = &config.workspace {
            let value = HeaderValue::from_str(workspace).map_err(|e| {
                GenerationError::RemoteUnavailable(format!("invalid workspace handle: {}", e))
            })?;
            headers.insert("X-Workspace-Handle", value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        let mut backend = Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            instance_handle: config.instance_handle.clone(),
        };

        let created: CreateInstanceResponse = backend
            .post_json(
                "plugin/instance/create",
                &json!({
                    "pluginHandle": config.plugin_handle,
                    "handle": config.instance_handle,
                    "config": { "max_words": config.max_words },
                    "fetchIfExists": true,
                }),
            )
            .await?;

        let instance = created.data.plugin_instance;
        tracing::info!(
            plugin = %config.plugin_handle,
            instance = %instance.handle,
            id = instance.id.as_deref().unwrap_or("-"),
            "plugin instance ready"
        );
        backend.instance_handle = instance.handle;

        Ok(backend)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, GenerationError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::RemoteUnavailable(format!("failed to reach {}: {}", path, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::RemoteUnavailable(format!(
                "{} returned error status: {}, body: {}",
                path, status, error_text
            )));
        }

        response.json::<T>().await.map_err(|e| {
            GenerationError::RemoteUnavailable(format!("failed to parse {} response: {}", path, e))
        })
    }

    /// Task endpoints report job failures inside the envelope, sometimes
    /// alongside an error status code, so the body is decoded first.
    async fn post_task(&self, path: &str, body: &Value) -> Result<JobStatus, GenerationError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::RemoteUnavailable(format!("failed to reach {}: {}", path, e))
            })?;

        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<TaskEnvelope>(&text) {
            Ok(envelope) => envelope.into_job_status(),
            Err(_) if !status.is_success() => Err(GenerationError::RemoteUnavailable(format!(
                "{} returned error status: {}, body: {}",
                path, status, text
            ))),
            Err(e) => Err(GenerationError::MalformedRemoteResponse(format!(
                "{} response is not a task envelope: {}",
                path, e
            ))),
        }
    }
}

#[async_trait]
impl GenerationBackend for PluginApiBackend {
    async fn submit(&self, document: &str) -> Result<JobStatus, GenerationError> {
        self.post_task(
            "plugin/instance/tag",
            &json!({
                "pluginInstance": self.instance_handle,
                "doc": document,
            }),
        )
        .await
    }

    async fn status(&self, job: &JobHandle) -> Result<JobStatus, GenerationError> {
        self.post_task("task/status", &json!({ "taskId": job.task_id }))
            .await
    }
}
