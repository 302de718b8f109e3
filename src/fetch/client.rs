//! OpenAI chat completions client for ASCII art

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompts::generate_prompt;
use crate::config::FetchConfig;

/// Instructions sent as the system message of every request
const SYSTEM_PROMPT: &str = "You are an ASCII artist. Create ASCII art that fits within the \
specified dimensions. Use only ASCII characters. Do not include any explanation or markdown formatting.";

/// Sampling temperature for art generation
const TEMPERATURE: f32 = 0.9;

/// Upper bound on tokens in the model's answer
const MAX_TOKENS: u32 = 2000;

/// Errors that can occur when fetching art
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key was configured
    #[error("OPENAI_API_KEY not found in environment")]
    MissingApiKey,

    /// HTTP request failed
    #[error("Failed to fetch art from OpenAI: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Failed to fetch art from OpenAI: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The API answered without any art
    #[error("Failed to fetch art from OpenAI: response contained no art")]
    EmptyResponse,
}

/// Art returned by the fetcher together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArt {
    /// Art text, already truncated to the configured width and height
    pub art: String,
    /// Prompt that was sent to the model
    pub prompt: String,
    pub theme: String,
    pub style: String,
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response body (only the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error body returned by OpenAI-compatible APIs
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for fetching ASCII art from a chat completions API
#[derive(Debug, Clone)]
pub struct ArtFetcher {
    client: Client,
    api_key: String,
    config: FetchConfig,
}

impl ArtFetcher {
    /// Creates a fetcher from configuration
    ///
    /// # Returns
    /// * `Err(FetchError::MissingApiKey)` if no API key is configured
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), config)
    }

    /// Creates a fetcher with a custom HTTP client
    pub fn with_client(client: Client, config: FetchConfig) -> Result<Self, FetchError> {
        let api_key = config.api_key.clone().ok_or(FetchError::MissingApiKey)?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Fetches a new piece of art
    ///
    /// # Arguments
    /// * `prompt` - Explicit prompt; a themed prompt is generated when `None`
    ///
    /// # Returns
    /// * `Ok(FetchedArt)` - Art trimmed to the configured dimensions
    /// * `Err(FetchError)` - If the request fails or the answer holds no art
    pub async fn fetch(&self, prompt: Option<&str>) -> Result<FetchedArt, FetchError> {
        let prompt = match prompt {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => generate_prompt(
                &self.config.theme,
                &self.config.style,
                self.config.width,
                self.config.height,
                &mut rand::thread_rng(),
            ),
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::info!(model = %self.config.model, theme = %self.config.theme, "requesting art");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), "art request rejected");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let art = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(FetchError::EmptyResponse)?;

        Ok(FetchedArt {
            art: truncate_art(&art, self.config.width, self.config.height),
            prompt,
            theme: self.config.theme.clone(),
            style: self.config.style.clone(),
        })
    }
}

/// Keeps the first `height` lines of `art`, each cut to `width` characters
pub fn truncate_art(art: &str, width: usize, height: usize) -> String {
    art.split('\n')
        .take(height)
        .map(|line| line.chars().take(width).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
