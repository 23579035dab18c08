use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::intent::Intent;

/// One record returned by the store: field name → scalar or nested value.
///
/// Shapes vary per store call, so consumers check field presence instead of
/// assuming a fixed record type.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Router state machine stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Classifying,
    /// Canned procedural text, no data access.
    Templating,
    /// Direct service-requirements lookup (keyword deployment).
    LookingUpService,
    /// Model writes a read-only query.
    Synthesizing,
    /// Query is mapped onto structured store calls.
    Executing,
    /// Rows (or the upstream error) rendered into text.
    Formatting,
    Done,
}

/// Failures recorded on the context; downstream stages short-circuit on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TurnError {
    #[error("invalid query type")]
    InvalidQuery,

    #[error("query contains forbidden operation: {0}")]
    ForbiddenOperation(String),

    #[error("unable to process your request: {0}")]
    SynthesisUnavailable(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Per-turn mutable record threaded through the router.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// Turn identifier (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Literal user text (untrusted).
    pub input: String,
    pub intent: Option<Intent>,
    /// Service keyword extracted on the service-requirements path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Validated read-only query, data-lookup path only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TurnError>,
    /// Stages visited, in order.
    pub stages: Vec<Stage>,
    pub started_at: DateTime<Utc>,
    response: Option<String>,
}

impl RequestContext {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            input: input.into(),
            intent: None,
            service: None,
            query: None,
            rows: None,
            error: None,
            stages: Vec::new(),
            started_at: Utc::now(),
            response: None,
        }
    }

    /// Record entry into a stage.
    pub fn enter(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Set the final response. Only the first call takes effect; returns
    /// whether this call set it.
    pub fn respond(&mut self, text: impl Into<String>) -> bool {
        if self.response.is_some() {
            return false;
        }
        self.response = Some(text.into());
        true
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn into_response(self) -> Option<String> {
        self.response
    }

    /// Record an error unless one is already present.
    pub fn fail(&mut self, error: TurnError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_blank() {
        let ctx = RequestContext::new("hello");
        assert_eq!(ctx.input, "hello");
        assert!(ctx.intent.is_none());
        assert!(ctx.response().is_none());
        assert!(ctx.stages.is_empty());
        assert!(!ctx.has_error());
    }

    #[test]
    fn response_is_set_once() {
        let mut ctx = RequestContext::new("hi");
        assert!(ctx.respond("first"));
        assert!(!ctx.respond("second"));
        assert_eq!(ctx.response(), Some("first"));
        assert_eq!(ctx.into_response().as_deref(), Some("first"));
    }

    #[test]
    fn first_error_wins() {
        let mut ctx = RequestContext::new("hi");
        ctx.fail(TurnError::InvalidQuery);
        ctx.fail(TurnError::StoreUnavailable("down".into()));
        assert_eq!(ctx.error, Some(TurnError::InvalidQuery));
    }

    #[test]
    fn context_serialization_skips_empty_fields() {
        let mut ctx = RequestContext::new("what are the office hours?");
        ctx.intent = Some(Intent::ProceduralInfo);
        ctx.enter(Stage::Classifying);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["intent"], "procedural_info");
        assert_eq!(json["stages"][0], "classifying");
        assert!(json.get("query").is_none());
        assert!(json.get("rows").is_none());
    }

    #[test]
    fn turn_error_serialization() {
        let err = TurnError::ForbiddenOperation("DROP".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "forbidden_operation");
        assert_eq!(json["detail"], "DROP");
        assert_eq!(err.to_string(), "query contains forbidden operation: DROP");
    }
}
