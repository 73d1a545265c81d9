pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod markdown;
pub mod prompt;
pub mod summarizer;

use std::sync::Arc;
use config::Config;
use llm::HuggingFaceEndpoint;
use loader::WebLoader;
use summarizer::Summarizer;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: Config, summarizer: Summarizer) -> Self {
        AppState {
            config: Arc::new(config),
            summarizer,
        }
    }

    /// State wired to the real web loader and hosted model.
    pub fn from_config(config: Config) -> Self {
        let summarizer = build_summarizer(&config);
        AppState::new(config, summarizer)
    }
}

/// Builds the production pipeline from configuration.
pub fn build_summarizer(config: &Config) -> Summarizer {
    Summarizer::new(
        Arc::new(WebLoader::new()),
        Arc::new(HuggingFaceEndpoint::new(config.generation.clone())),
        config.max_input_chars,
    )
}
