use jester_llm::{GenerationClient, GenerationError};

use super::{joke_prompt::JokePrompt, topic};

#[derive(Clone)]
pub struct JokeService {
    client: GenerationClient,
}

impl JokeService {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    /// Generates a one line joke about `topic`, falling back to a default
    /// topic when the input is unusable.
    pub async fn generate(&self, topic: Option<&str>) -> Result<String, GenerationError> {
        let topic = topic::normalize(topic);
        let prompt = JokePrompt::get_prompt(&topic);

        tracing::info!(topic = %topic, "generating joke");
        self.client.generate(&prompt).await
    }
}
