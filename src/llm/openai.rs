//! OpenAI chat-completions client
//!
//! Talks to the OpenAI-compatible `/v1/chat/completions` endpoint with
//! bearer authentication.

use super::ChatModel;
use crate::config::UpstreamConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// OpenAI chat model implementation
pub struct OpenAiChat {
    model: String,
    base_url: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiChat {
    pub fn new(api_key: String, config: &UpstreamConfig) -> Self {
        Self {
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client: reqwest::Client::new(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Wire-format message
#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[async_trait::async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        debug!(
            "OpenAiChat: requesting completion from model {}",
            self.model
        );

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                "OpenAiChat: request failed with status {}: {}",
                status, error_text
            );
            anyhow::bail!("OpenAI request failed: {} - {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("OpenAI response contained no choices"))?;

        debug!("OpenAiChat: received {} bytes of text", reply.len());

        Ok(reply)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Only run when an API key is available
    async fn test_openai_simple_completion() {
        let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
        let model = OpenAiChat::new(api_key, &UpstreamConfig::default());

        let reply = model
            .complete("You are a helpful assistant.", "Say hello in one short sentence.")
            .await
            .unwrap();

        assert!(!reply.is_empty());
        println!("Reply: {}", reply);
    }
}
