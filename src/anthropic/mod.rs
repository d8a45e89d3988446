use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::companion::error::CompanionError;

pub const MESSAGES_PATH: &str = "/v1/messages";
pub const COMPANION_MODEL: &str = "claude-sonnet-4-20250514";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MAX_TOKENS: u32 = 150;

/// Thin client for the Anthropic Messages API. One request per call, no
/// retries; the timeout lives on the shared `reqwest::Client`.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    messages_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            messages_url: format!("{}{}", base_url.trim_end_matches('/'), MESSAGES_PATH),
            api_key,
        }
    }

    /// Send `prompt` as a single user message and return the text of the
    /// first content block.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompanionError> {
        let body = MessagesRequest {
            model: COMPANION_MODEL,
            max_tokens: MAX_TOKENS,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %text, "anthropic rejected request");
            return Err(CompanionError::UpstreamStatus(status.as_u16()));
        }

        let raw = response.bytes().await?;
        extract_text(&raw)
    }
}

fn extract_text(raw: &[u8]) -> Result<String, CompanionError> {
    let parsed: MessagesResponse =
        serde_json::from_slice(raw).map_err(|e| CompanionError::UpstreamDecode(e.to_string()))?;

    let text = parsed
        .content
        .into_iter()
        .next()
        .ok_or_else(|| CompanionError::UpstreamDecode("response has no content blocks".into()))?
        .text
        .ok_or_else(|| {
            CompanionError::UpstreamDecode("first content block has no text".into())
        })?;

    if text.trim().is_empty() {
        return Err(CompanionError::EmptyCompletion);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_messages_api_shape() {
        let body = MessagesRequest {
            model: COMPANION_MODEL,
            max_tokens: MAX_TOKENS,
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 150,
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn extracts_first_text_block() {
        let raw = br#"{"id":"msg_1","content":[{"type":"text","text":"Nice work!"},{"type":"text","text":"ignored"}]}"#;
        assert_eq!(extract_text(raw).unwrap(), "Nice work!");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        let cases: [&[u8]; 4] = [
            b"not json",
            br#"{"content":[]}"#,
            br#"{"content":[{"type":"tool_use"}]}"#,
            br#"{"type":"error"}"#,
        ];
        for raw in cases {
            assert!(matches!(
                extract_text(raw),
                Err(CompanionError::UpstreamDecode(_))
            ));
        }
    }

    #[test]
    fn blank_completion_is_an_error() {
        assert!(matches!(
            extract_text(br#"{"content":[{"text":"  "}]}"#),
            Err(CompanionError::EmptyCompletion)
        ));
    }

    #[test]
    fn joins_base_url_without_double_slash() {
        let client = AnthropicClient::new(reqwest::Client::new(), "http://localhost:1/", "k".into());
        assert_eq!(client.messages_url, "http://localhost:1/v1/messages");
    }
}
