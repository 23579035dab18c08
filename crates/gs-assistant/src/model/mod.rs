//! External text-generation models.
//!
//! One operation: prompt in, text out. Callers re-validate whatever comes
//! back; nothing here interprets the reply.
//!
//! - **Gemini** (cloud): Generative Language API, needs an API key.
//! - **Ollama** (local): `/api/chat` on a local host.
//! - **Scripted** (tests): replays canned replies.

pub mod gemini;
pub mod mock;
pub mod ollama;

use async_trait::async_trait;

pub use gemini::{GeminiConfig, GeminiModel};
pub use mock::ScriptedModel;
pub use ollama::{OllamaConfig, OllamaModel};

/// Errors from a model call. All of them degrade the turn; none reach the user.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Http(String),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode model response: {0}")]
    Decode(String),

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("model not configured: {0}")]
    NotConfigured(String),
}

/// A text-in, text-out language model.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Model identifier (for logging).
    fn model_name(&self) -> &str;
}
