//! Chat model abstraction

use anyhow::Result;

pub mod mock;
pub mod openai;

/// Upstream chat completion engine.
///
/// The gateway treats the upstream as an opaque call that returns
/// generated text or fails.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for a system prompt / user message pair
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}
