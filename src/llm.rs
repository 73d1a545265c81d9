use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::{AppError, Result};

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GenerationParameters {
    pub temperature: f32,
    pub max_new_tokens: u32,
    pub return_full_text: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GenerationOptions {
    pub wait_for_model: bool,
}

/// Body of a text-generation call to the inference API.
#[derive(Debug, Serialize, PartialEq)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(config: &GenerationConfig, prompt: &str) -> Self {
        GenerationRequest {
            inputs: prompt.to_string(),
            parameters: GenerationParameters {
                temperature: config.temperature,
                max_new_tokens: config.max_new_tokens,
                return_full_text: false,
            },
            options: GenerationOptions {
                wait_for_model: true,
            },
        }
    }
}

#[derive(Deserialize)]
struct Generated {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<Generated>),
    Single(Generated),
    Error { error: serde_json::Value },
}

/// Client for a model hosted on the Hugging Face inference API.
#[derive(Clone)]
pub struct HuggingFaceEndpoint {
    client: Client,
    config: GenerationConfig,
}

impl HuggingFaceEndpoint {
    pub fn new(config: GenerationConfig) -> Self {
        HuggingFaceEndpoint {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceEndpoint {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerationRequest::new(&self.config, prompt);
        debug!(
            model = %self.config.model_id,
            task = %self.config.task,
            prompt_chars = prompt.len(),
            "Sending generation request"
        );

        let res = self
            .client
            .post(self.config.model_url())
            .bearer_auth(&self.config.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmError(format!("Request to model endpoint failed: {}", e)))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AppError::LlmError(format!("Failed to read model response: {}", e)))?;

        parse_response(status.as_u16(), &text)
    }
}

/// Pulls the generated text out of an inference API response body.
pub fn parse_response(status: u16, body: &str) -> Result<String> {
    let parsed = serde_json::from_str::<GenerationResponse>(body);

    match parsed {
        Ok(GenerationResponse::Error { error }) => {
            let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            Err(AppError::LlmError(format!("Model endpoint returned HTTP {}: {}", status, message)))
        }
        _ if !(200..300).contains(&status) => Err(AppError::LlmError(format!(
            "Model endpoint returned HTTP {}: {}",
            status,
            body.trim()
        ))),
        Ok(GenerationResponse::Single(generated)) => Ok(generated.generated_text.trim().to_string()),
        Ok(GenerationResponse::Batch(batch)) => batch
            .into_iter()
            .next()
            .map(|generated| generated.generated_text.trim().to_string())
            .ok_or_else(|| AppError::LlmError("Model endpoint returned no generations".to_string())),
        Err(e) => Err(AppError::LlmError(format!("Invalid response format from LLM: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_fixed_generation_parameters() {
        let config = GenerationConfig::new("hf_fake");
        let long = "long ".repeat(100_000);
        for prompt in ["short", long.as_str()] {
            let request = GenerationRequest::new(&config, prompt);
            assert_eq!(request.inputs, prompt);
            assert_eq!(request.parameters.temperature, 0.3);
            assert_eq!(request.parameters.max_new_tokens, 1024);
            assert!(!request.parameters.return_full_text);
        }
    }

    #[test]
    fn request_serializes_to_inference_api_shape() {
        let request = GenerationRequest::new(&GenerationConfig::new("t"), "Summarize me");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputs"], "Summarize me");
        assert_eq!(json["parameters"]["max_new_tokens"], 1024);
        assert!((json["parameters"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(json["parameters"]["return_full_text"], false);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn parses_batch_response() {
        let summary = parse_response(200, r#"[{"generated_text": "  A summary.\n"}]"#).unwrap();
        assert_eq!(summary, "A summary.");
    }

    #[test]
    fn parses_single_response() {
        let summary = parse_response(200, r#"{"generated_text": "Another summary"}"#).unwrap();
        assert_eq!(summary, "Another summary");
    }

    #[test]
    fn error_body_becomes_llm_error() {
        let err = parse_response(429, r#"{"error": "Rate limit reached"}"#).unwrap_err();
        match err {
            AppError::LlmError(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("Rate limit reached"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_success_status_without_json_is_an_error() {
        let err = parse_response(401, "Unauthorized").unwrap_err();
        assert!(matches!(err, AppError::LlmError(msg) if msg.contains("401")));
    }

    #[test]
    fn empty_batch_is_an_error() {
        assert!(matches!(parse_response(200, "[]"), Err(AppError::LlmError(_))));
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_response(200, r#"{"choices": []}"#),
            Err(AppError::LlmError(_))
        ));
    }
}
