//! Response formatting.
//!
//! Four modes:
//! - **Template**: canned procedural text, no data access.
//! - **Rows**: one model call turns the JSON rows into prose; the
//!   deterministic renderer in [`fallback`] takes over when the call fails.
//! - **No results**: fixed suggestions block.
//! - **Error**: fixed apology, bypassing both rendering modes.

pub mod fallback;
pub mod templates;

use std::sync::Arc;

use gs_protocol::{Intent, RequestContext, Row};

use crate::classifier::ClassifierPolicy;
use crate::model::TextModel;

/// Renders the final text of a turn.
pub struct ResponseFormatter {
    model: Option<Arc<dyn TextModel>>,
}

impl ResponseFormatter {
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }

    /// Canned text for an intent on the template path.
    pub fn template(&self, policy: ClassifierPolicy, intent: Intent, input: &str) -> &'static str {
        templates::for_intent(policy, intent, input)
    }

    /// Final text for the data-lookup path.
    pub async fn format(&self, ctx: &RequestContext) -> String {
        if let Some(error) = &ctx.error {
            tracing::info!(error = %error, "responding with apology");
            return templates::APOLOGY.to_string();
        }
        match ctx.rows.as_deref() {
            None | Some([]) => templates::NO_RESULTS.to_string(),
            Some(rows) => self.render_rows(&ctx.input, rows).await,
        }
    }

    /// Render rows through the model, or deterministically when it fails.
    pub async fn render_rows(&self, input: &str, rows: &[Row]) -> String {
        let Some(model) = &self.model else {
            return fallback::render(rows);
        };

        let prompt = match rendering_prompt(input, rows) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize rows for the model");
                return fallback::render(rows);
            }
        };

        match model.generate(&prompt).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                tracing::warn!("model returned blank formatting");
                fallback::render(rows)
            }
            Err(e) => {
                tracing::warn!(error = %e, "formatting call failed, using plain rendering");
                fallback::render(rows)
            }
        }
    }
}

fn rendering_prompt(input: &str, rows: &[Row]) -> serde_json::Result<String> {
    let results = serde_json::to_string_pretty(rows)?;
    Ok(format!(
        r#"Format this database query result into a user-friendly response for: "{input}"

Query Results:
{results}

Instructions:
1. Create a clear, well-organized response
2. Use bullet points or numbered lists for easy reading
3. Include contact information (email, phone) when available
4. Add helpful tips or next steps for the user
5. Keep it concise but informative
6. Format as plain text (not markdown)
7. If showing document requirements, clearly mark mandatory vs optional
8. Include department information when relevant
9. End with helpful contact information or next steps

Make it sound professional but friendly, like a helpful government service representative."#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScriptedModel;
    use gs_protocol::TurnError;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        let Some(map) = json!({"title": "Passport Application", "description": "Apply for a passport"})
            .as_object()
            .cloned()
        else {
            panic!("not an object");
        };
        vec![map]
    }

    fn context_with_rows(rows: Vec<Row>) -> RequestContext {
        let mut ctx = RequestContext::new("documents for passport");
        ctx.rows = Some(rows);
        ctx
    }

    #[tokio::test]
    async fn model_reply_is_returned_trimmed() {
        let model = Arc::new(ScriptedModel::replying(["\n  You will need your NIC.  \n"]));
        let formatter = ResponseFormatter::new(Some(model.clone()));
        let text = formatter.format(&context_with_rows(rows())).await;
        assert_eq!(text, "You will need your NIC.");

        let prompts = model.prompts();
        assert!(prompts[0].contains("\"title\": \"Passport Application\""));
        assert!(prompts[0].contains("for: \"documents for passport\""));
    }

    #[tokio::test]
    async fn failed_call_uses_plain_rendering() {
        let formatter = ResponseFormatter::new(Some(Arc::new(ScriptedModel::failing())));
        let text = formatter.format(&context_with_rows(rows())).await;
        assert!(text.starts_with("Here's what I found for you:"));
        assert!(text.contains("1. Passport Application"));
    }

    #[tokio::test]
    async fn blank_reply_uses_plain_rendering() {
        let formatter = ResponseFormatter::new(Some(Arc::new(ScriptedModel::replying(["   "]))));
        let text = formatter.format(&context_with_rows(rows())).await;
        assert!(text.contains("1. Passport Application"));
    }

    #[tokio::test]
    async fn missing_model_uses_plain_rendering() {
        let text = ResponseFormatter::new(None)
            .format(&context_with_rows(rows()))
            .await;
        assert!(text.contains("Description: Apply for a passport"));
    }

    #[tokio::test]
    async fn empty_rows_use_no_results_template() {
        let model = Arc::new(ScriptedModel::replying(["unused"]));
        let formatter = ResponseFormatter::new(Some(model.clone()));
        assert_eq!(
            formatter.format(&context_with_rows(Vec::new())).await,
            templates::NO_RESULTS
        );
        assert_eq!(
            formatter.format(&RequestContext::new("x")).await,
            templates::NO_RESULTS
        );
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn error_bypasses_rendering() {
        let model = Arc::new(ScriptedModel::replying(["unused"]));
        let formatter = ResponseFormatter::new(Some(model.clone()));
        let mut ctx = context_with_rows(rows());
        ctx.fail(TurnError::StoreUnavailable("timeout".into()));
        assert_eq!(formatter.format(&ctx).await, templates::APOLOGY);
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn template_delegates_to_intent_table() {
        let formatter = ResponseFormatter::new(None);
        assert_eq!(
            formatter.template(ClassifierPolicy::Keyword, Intent::FileComplaint, "anything"),
            templates::COMPLAINT_PROCEDURE
        );
        assert_eq!(
            formatter.template(ClassifierPolicy::Model, Intent::General, "How do I apply?"),
            templates::APPLICATION_PROCESS
        );
    }
}
