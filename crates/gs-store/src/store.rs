//! Store abstraction: the structured read calls the assistant may issue.

use async_trait::async_trait;
use gs_protocol::Row;

use crate::error::StoreResult;

/// Read-only catalogue access.
///
/// Row shapes follow PostgREST embedding, so every backend returns the same
/// nested objects:
///
/// | call                       | row shape |
/// |----------------------------|-----------|
/// | `service_requirements`     | `title, description, department{title,email,phone_no}, required_doc_for_service[{is_mandatory, document_type{doc_type,description}}]` |
/// | `services_with_department` | `title, description, department{title,email,phone_no}` |
/// | `document_types`           | `doc_type, description` |
/// | `departments`              | `title, description, email, phone_no` |
/// | `services`                 | `title, description` |
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// Services whose title matches `service` (case-insensitive substring),
    /// with their department and required documents.
    async fn service_requirements(&self, service: &str, limit: usize) -> StoreResult<Vec<Row>>;

    /// Services with their department, optionally only those whose department
    /// title matches `department` (case-insensitive substring).
    async fn services_with_department(
        &self,
        department: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<Row>>;

    async fn document_types(&self, limit: usize) -> StoreResult<Vec<Row>>;

    async fn departments(&self, limit: usize) -> StoreResult<Vec<Row>>;

    async fn services(&self, limit: usize) -> StoreResult<Vec<Row>>;

    /// Backend name (for logging).
    fn backend_name(&self) -> &str;
}
