// Content generator trait: the seam between request handling and the
// hosted model.
//
// Handlers and the CLI only see this trait. The Gemini REST client is the
// production implementation; tests swap in canned replies.

use anyhow::Result;
use async_trait::async_trait;

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    /// Raw bytes plus their MIME type (e.g. a bill photo)
    InlineData { mime_type: String, data: Vec<u8> },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }
}

/// Trait for single-turn content generation. Implementations must be async
/// because every real provider is an HTTP API.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Send one user turn and return the model's text reply.
    async fn generate(&self, parts: Vec<Part>) -> Result<String>;
}
