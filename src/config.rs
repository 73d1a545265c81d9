use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const MODEL_ID: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const TASK: &str = "text-generation";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_NEW_TOKENS: u32 = 1024;
pub const DEFAULT_ENDPOINT_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MAX_INPUT_CHARS: usize = 32_000;

/// Settings for the hosted generation endpoint.
///
/// The model parameters are fixed; only the credentials and the endpoint
/// location come from the environment.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub api_token: String,
    pub endpoint_url: String,
    pub model_id: String,
    pub task: String,
    pub temperature: f32,
    pub max_new_tokens: u32,
}

impl GenerationConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        GenerationConfig {
            api_token: api_token.into(),
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            model_id: MODEL_ID.to_string(),
            task: TASK.to_string(),
            temperature: TEMPERATURE,
            max_new_tokens: MAX_NEW_TOKENS,
        }
    }

    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    /// Full URL of the model endpoint.
    pub fn model_url(&self) -> String {
        format!("{}/{}", self.endpoint_url.trim_end_matches('/'), self.model_id)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub generation: GenerationConfig,
    /// Longest document text (in characters) sent to the model; 0 disables the limit.
    pub max_input_chars: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let api_token = env::var("HUGGINGFACEHUB_API_TOKEN")
            .or_else(|_| env::var("HF_TOKEN"))
            .map_err(|_| {
                AppError::ConfigError(
                    "HUGGINGFACEHUB_API_TOKEN (or HF_TOKEN) must be set".to_string(),
                )
            })?;

        let mut generation = GenerationConfig::new(api_token);
        if let Ok(url) = env::var("HF_INFERENCE_URL") {
            generation = generation.with_endpoint_url(url);
        }

        let max_input_chars = match env::var("MAX_INPUT_CHARS") {
            Ok(raw) => parse_max_input_chars(&raw)?,
            Err(_) => DEFAULT_MAX_INPUT_CHARS,
        };

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let server_addr = parse_server_addr(&host, &port)?;

        Ok(Config {
            server_addr,
            generation,
            max_input_chars,
        })
    }
}

fn parse_server_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
    Ok(SocketAddr::new(ip, port))
}

fn parse_max_input_chars(raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| AppError::ConfigError(format!("Invalid MAX_INPUT_CHARS: {}", e)))
}
