use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::markdown::render_summary_html;
use crate::summarizer::Summary;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub title: Option<String>,
    pub source_text: String,
    pub summary: String,
    pub summary_html: String,
    pub model: String,
    pub word_count: usize,
    pub truncated: bool,
    pub summarized_at: DateTime<Utc>,
}

impl SummarizeResponse {
    pub fn new(summary: Summary, model: &str) -> Self {
        SummarizeResponse {
            summary_html: render_summary_html(&summary.summary),
            url: summary.url,
            title: summary.title,
            source_text: summary.source_text,
            summary: summary.summary,
            model: model.to_string(),
            word_count: summary.word_count,
            truncated: summary.truncated,
            summarized_at: Utc::now(),
        }
    }
}

#[derive(Deserialize)]
pub struct DownloadRequest {
    pub summary: String,
}
