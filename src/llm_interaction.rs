use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::constants;

/// Anything that turns an instruction into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingCredential,
    #[error("generation service rejected the access key ({status}): {message}")]
    Unauthorized { status: u16, message: String },
    #[error("generation service is rate limiting requests: {message}")]
    RateLimited { message: String },
    #[error("generation service returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("request to generation service failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("generation service blocked the prompt: {reason}")]
    Blocked { reason: String },
    #[error("malformed response from generation service: {0}")]
    MalformedResponse(String),
}

/// Coarse failure category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    Upstream,
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::MissingCredential | GenerationError::Unauthorized { .. } => {
                FailureKind::Configuration
            }
            _ => FailureKind::Upstream,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: constants::GOOGLE_API_KEY.clone(),
            model: constants::GEMINI_MODEL.clone(),
            base_url: constants::GEMINI_API_URL.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// Request/response shapes of the generateContent endpoint

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

/// Client for the Gemini `generateContent` API. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, instruction), fields(model = %self.config.model))]
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        debug!(instruction_len = instruction.len(), "Sending generateContent request");

        let request_payload = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: instruction }],
            }],
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(%status, %error_body, "Generation request failed");
            return Err(status_error(status, &error_body));
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        let text = completion_text(parsed)?;

        debug!(response_len = text.len(), "Received completion");
        Ok(text)
    }
}

fn status_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    // An invalid key comes back as 400 with a message naming the key.
    let bad_key = status == StatusCode::BAD_REQUEST && message.to_lowercase().contains("api key");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        _ if bad_key => GenerationError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited { message },
        _ => GenerationError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}

fn completion_text(response: GenerateResponse) -> Result<String, GenerationError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => GenerationError::Blocked { reason },
            None => GenerationError::MalformedResponse("response contained no candidates".to_string()),
        });
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        return Err(match candidate.finish_reason {
            Some(reason) if reason == "SAFETY" || reason == "RECITATION" => GenerationError::Blocked { reason },
            Some(reason) => GenerationError::MalformedResponse(format!(
                "candidate contained no text (finish reason {})",
                reason
            )),
            None => GenerationError::MalformedResponse("candidate contained no text".to_string()),
        });
    }
    Ok(texts.concat())
}
