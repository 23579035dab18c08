//! Query synthesis: the model writes a read-only query for data lookups.
//!
//! The only safety gate is a keyword filter: the reply must start with
//! `SELECT` and must not contain any mutating keyword anywhere. The filter is
//! a plain substring match on the upper-cased text, so column names such as
//! `created_at` trip it and comment-split keywords slip through. The executor
//! never runs the text, it only pattern-matches it onto structured calls.

use std::sync::Arc;

use gs_protocol::TurnError;
use gs_store::DATABASE_SCHEMA;

use crate::model::TextModel;

/// Keywords that reject a query wherever they appear.
pub const FORBIDDEN_KEYWORDS: &[&str] = &[
    "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "CREATE", "TRUNCATE",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("query does not start with SELECT")]
    InvalidQuery,

    #[error("query contains forbidden keyword {0}")]
    ForbiddenOperation(String),

    #[error("query synthesis unavailable: {0}")]
    Unavailable(String),
}

impl From<SynthesisError> for TurnError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::InvalidQuery => TurnError::InvalidQuery,
            SynthesisError::ForbiddenOperation(keyword) => TurnError::ForbiddenOperation(keyword),
            SynthesisError::Unavailable(reason) => TurnError::SynthesisUnavailable(reason),
        }
    }
}

/// Turns a data-lookup question into a validated read-only query.
pub struct QuerySynthesizer {
    model: Option<Arc<dyn TextModel>>,
}

impl QuerySynthesizer {
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }

    /// One model call, then the keyword gate. No retries.
    pub async fn synthesize(&self, input: &str) -> Result<String, SynthesisError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| SynthesisError::Unavailable("no model configured".into()))?;

        let reply = model
            .generate(&synthesis_prompt(input))
            .await
            .map_err(|e| SynthesisError::Unavailable(e.to_string()))?;

        let query = validate_query(&reply)?;
        tracing::debug!(model = model.model_name(), query = %query, "query synthesized");
        Ok(query)
    }
}

/// Build the synthesis prompt for `input`.
pub fn synthesis_prompt(input: &str) -> String {
    format!(
        r#"Based on the user question and database schema, generate a PostgreSQL query.

{DATABASE_SCHEMA}

User Question: "{input}"

Rules:
1. Use PostgreSQL syntax
2. Use JOINs to get related data when needed
3. Use ILIKE for case-insensitive pattern matching
4. Limit results to reasonable numbers (use LIMIT)
5. Only SELECT queries are allowed
6. Focus on public data only
7. Use table aliases for readability

Common patterns:
- For service requirements: JOIN service, department, required_doc_for_service, document_type
- For department services: JOIN department and service tables
- For document types: Use document_type table

Example query (documents for passport):
  SELECT s.title AS service_name, dt.doc_type, rds.is_mandatory, d.title AS department
  FROM service s
  JOIN department d ON s.department_id = d.department_id
  JOIN required_doc_for_service rds ON s.service_id = rds.service_id
  JOIN document_type dt ON rds.doc_type_id = dt.doc_type_id
  WHERE s.title ILIKE '%passport%';

Generate only the SQL query, no explanations:"#
    )
}

/// Strip a leading ```` ```sql ```` or ```` ``` ```` fence and a trailing
/// ```` ``` ```` fence.
pub fn strip_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```sql") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Apply the keyword gate to a raw model reply.
pub fn validate_query(reply: &str) -> Result<String, SynthesisError> {
    let query = strip_fences(reply);
    let upper = query.to_uppercase();

    if !upper.starts_with("SELECT") {
        return Err(SynthesisError::InvalidQuery);
    }

    if let Some(keyword) = FORBIDDEN_KEYWORDS.iter().find(|k| upper.contains(*k)) {
        return Err(SynthesisError::ForbiddenOperation((*keyword).to_string()));
    }

    Ok(query.to_string())
}
