use jester_llm::GenerationClient;

use crate::joke::joke_service::JokeService;

#[derive(Clone)]
pub struct AppService {
    pub joke_service: JokeService,
}

impl AppService {
    pub fn new(client: GenerationClient) -> Self {
        let joke_service = JokeService::new(client);

        Self { joke_service }
    }
}

/// Shared by every request; holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
}

impl AppState {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            service: AppService::new(client),
        }
    }
}
