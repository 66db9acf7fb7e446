//! Mock chat model for tests and keyless development

use super::ChatModel;
use anyhow::Result;

/// Mock chat model implementation
pub struct MockChatModel {
    model_name: String,
    reply: String,
    fail: bool,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            model_name: "mock-chat-v1".to_string(),
            reply: "This is a mock completion.".to_string(),
            fail: false,
        }
    }

    /// Mock that returns a fixed reply
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::new()
        }
    }

    /// Mock that fails every call, for exercising upstream error paths
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
        if self.fail {
            anyhow::bail!("mock upstream failure");
        }
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_configured_reply() {
        let model = MockChatModel::with_reply("hello");
        let reply = model.complete("sys", "msg").await.unwrap();
        assert_eq!(reply, "hello");
    }

    #[tokio::test]
    async fn test_failing_mock_errors() {
        let model = MockChatModel::failing();
        assert!(model.complete("sys", "msg").await.is_err());
    }
}
