use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::llm::TextGenerator;
use crate::loader::DocumentLoader;
use crate::prompt::{truncate_to_limit, SUMMARY_TEMPLATE};

/// Outcome of one successful pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub url: String,
    pub title: Option<String>,
    /// Retrieved text before any length limit was applied.
    pub source_text: String,
    pub summary: String,
    pub word_count: usize,
    pub truncated: bool,
}

/// Runs retrieval, prompt construction and generation for one URL at a time.
#[derive(Clone)]
pub struct Summarizer {
    loader: Arc<dyn DocumentLoader>,
    generator: Arc<dyn TextGenerator>,
    max_input_chars: usize,
}

impl Summarizer {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        generator: Arc<dyn TextGenerator>,
        max_input_chars: usize,
    ) -> Self {
        Summarizer {
            loader,
            generator,
            max_input_chars,
        }
    }

    pub async fn summarize(&self, url: &str) -> Result<Summary> {
        let url = url.trim();
        if url.is_empty() {
            warn!("Summarize requested without a URL");
            return Err(AppError::EmptyUrl);
        }

        info!(url, "Loading document");
        let load_start = Instant::now();
        let document = self.loader.load(url).await.inspect_err(|e| {
            error!(url, error = %e, "Document retrieval failed");
        })?;
        info!(
            url,
            segments = document.segments.len(),
            elapsed = ?load_start.elapsed(),
            "Document loaded"
        );

        let source_text = document.first_text().to_string();
        let title = document.first_title().map(str::to_string);
        let word_count = source_text.split_whitespace().count();

        let (text, truncated) = truncate_to_limit(&source_text, self.max_input_chars);
        if truncated {
            warn!(
                url,
                original_chars = source_text.chars().count(),
                limit = self.max_input_chars,
                "Document text truncated to fit the model input limit"
            );
        }

        let prompt = SUMMARY_TEMPLATE.format(&text);
        info!(url, prompt_chars = prompt.len(), word_count, "Built prompt");

        let llm_start = Instant::now();
        let summary = self.generator.generate(&prompt).await.inspect_err(|e| {
            error!(url, error = %e, "Generation failed");
        })?;
        info!(url, elapsed = ?llm_start.elapsed(), "Summary generated");

        Ok(Summary {
            url: url.to_string(),
            title,
            source_text,
            summary,
            word_count,
            truncated,
        })
    }
}
