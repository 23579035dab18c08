//! Model classifier: one model call, exact-label validation.
//!
//! The reply is lower-cased and trimmed and must then be exactly one of
//! `sql_query`, `procedural_info`, `status_check` or `general`. Anything else,
//! a failed call, or no configured model resolves to `general`.

use std::sync::Arc;

use async_trait::async_trait;
use gs_protocol::Intent;

use super::{ClassifierPolicy, IntentClassifier};
use crate::model::TextModel;

/// Classifier that delegates to a text model.
pub struct LlmClassifier {
    model: Option<Arc<dyn TextModel>>,
}

impl LlmClassifier {
    /// `None` models a deployment without credentials: every input becomes
    /// the catch-all label.
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }
}

/// Build the classification prompt for `input`.
pub fn classification_prompt(input: &str) -> String {
    format!(
        r#"Analyze the following user query about Sri Lankan government services and classify it:

Categories:
- sql_query: User is asking for specific data that requires database lookup (documents for services, service details, department info, etc.)
- procedural_info: User asking about processes, general guidance, how-to information
- status_check: User wants to check application/document status (requires authentication)
- general: General questions about government services

User query: "{input}"

Examples of sql_query:
- "What documents do I need for passport?"
- "Which services does Health Department offer?"
- "Show me all available services"
- "What are the requirements for driving license?"

Examples of procedural_info:
- "How do I apply for passport?"
- "What are the office hours?"
- "How to file a complaint?"

Respond with only the category name."#
    )
}

/// Accept the reply only if it is exactly one of the model labels.
pub fn parse_label(reply: &str) -> Option<Intent> {
    let label = reply.trim().to_lowercase();
    Intent::MODEL_LABELS
        .into_iter()
        .find(|intent| intent.label() == label)
}

#[async_trait]
impl IntentClassifier for LlmClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<Intent> {
        let Some(model) = &self.model else {
            tracing::debug!("no model configured, using catch-all intent");
            return Ok(Intent::CATCH_ALL);
        };

        let reply = match model.generate(&classification_prompt(text)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "classification call failed");
                return Ok(Intent::CATCH_ALL);
            }
        };

        match parse_label(&reply) {
            Some(intent) => Ok(intent),
            None => {
                tracing::debug!(reply = %reply, "model returned an unknown label");
                Ok(Intent::CATCH_ALL)
            }
        }
    }

    fn policy_name(&self) -> &str {
        "model"
    }

    fn policy(&self) -> ClassifierPolicy {
        ClassifierPolicy::Model
    }
}
