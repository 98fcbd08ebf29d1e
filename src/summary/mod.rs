use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const MODEL: &str = "grok-beta";
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes text. Produce a concise 2-3 sentence summary.";
const MAX_TOKENS: u32 = 150;

/// Gateway to the external chat-completion API. Each call is single-shot:
/// no retries, no caching, no timeout beyond the transport's own.
#[derive(Clone)]
pub struct SummaryService {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    stream: bool,
}

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
    content: String,
}

impl SummaryService {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Forwards `text` to the completion endpoint and relays the summary.
    ///
    /// Input and credential are checked before any network activity.
    /// Upstream failures are classified by the response's HTTP status code;
    /// the mapping to caller-facing statuses lives in [`ApiError`].
    pub async fn summarize(&self, text: Option<String>) -> Result<String, ApiError> {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(ApiError::Validation("Text is required".to_string())),
        };

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("XAI_API_KEY is not set".to_string()))?;

        let body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &text,
                },
            ],
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        tracing::info!("Requesting summary for {} characters of text", text.len());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream { status, detail });
        }

        let completion: ChatResponse = response.json().await?;

        completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|summary| !summary.is_empty())
            .ok_or(ApiError::Upstream {
                status,
                detail: "upstream returned no completion text".to_string(),
            })
    }
}
