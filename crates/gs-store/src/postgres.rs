//! PostgreSQL store: fixed parameterized SELECTs over a `PgPool`.
//!
//! Each query builds the same nested JSON shape PostgREST would return, so
//! the formatter cannot tell the backends apart.

use std::time::Duration;

use async_trait::async_trait;
use gs_protocol::Row;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StoreResult;
use crate::store::ServiceStore;

const SERVICE_REQUIREMENTS_SQL: &str = r#"
SELECT jsonb_build_object(
    'title', s.title,
    'description', s.description,
    'department', CASE WHEN d.department_id IS NULL THEN NULL ELSE
        jsonb_build_object('title', d.title, 'email', d.email, 'phone_no', d.phone_no) END,
    'required_doc_for_service', COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'is_mandatory', r.is_mandatory,
            'document_type', jsonb_build_object('doc_type', dt.doc_type, 'description', dt.description)))
        FROM required_doc_for_service r
        JOIN document_type dt ON dt.doc_type_id = r.doc_type_id
        WHERE r.service_id = s.service_id), '[]'::jsonb)
)
FROM service s
LEFT JOIN department d ON d.department_id = s.department_id
WHERE s.title ILIKE $1
ORDER BY s.title
LIMIT $2
"#;

const SERVICES_WITH_DEPARTMENT_SQL: &str = r#"
SELECT jsonb_build_object(
    'title', s.title,
    'description', s.description,
    'department', CASE WHEN d.department_id IS NULL THEN NULL ELSE
        jsonb_build_object('title', d.title, 'email', d.email, 'phone_no', d.phone_no) END
)
FROM service s
LEFT JOIN department d ON d.department_id = s.department_id
ORDER BY s.title
LIMIT $1
"#;

const SERVICES_IN_DEPARTMENT_SQL: &str = r#"
SELECT jsonb_build_object(
    'title', s.title,
    'description', s.description,
    'department', jsonb_build_object('title', d.title, 'email', d.email, 'phone_no', d.phone_no)
)
FROM service s
JOIN department d ON d.department_id = s.department_id
WHERE d.title ILIKE $1
ORDER BY s.title
LIMIT $2
"#;

const DOCUMENT_TYPES_SQL: &str = r#"
SELECT jsonb_build_object('doc_type', doc_type, 'description', description)
FROM document_type
ORDER BY doc_type
LIMIT $1
"#;

const DEPARTMENTS_SQL: &str = r#"
SELECT jsonb_build_object('title', title, 'description', description, 'email', email, 'phone_no', phone_no)
FROM department
ORDER BY title
LIMIT $1
"#;

const SERVICES_SQL: &str = r#"
SELECT jsonb_build_object('title', title, 'description', description)
FROM service
ORDER BY title
LIMIT $1
"#;

/// Build a lazily connecting pool. Nothing is dialed until the first query,
/// and each query waits at most `acquire_timeout` for a connection. The
/// schema is external; no migrations run here.
pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
}

/// Store backed by a PostgreSQL pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store over a lazy pool. Fails only on a malformed URL; an unreachable
    /// server surfaces per call as [`StoreError::Database`](crate::StoreError).
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> StoreResult<Self> {
        Ok(Self::new(connect_lazy(database_url, acquire_timeout)?))
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{needle}%")
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn into_rows(values: Vec<serde_json::Value>) -> Vec<Row> {
    values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl ServiceStore for PgStore {
    async fn service_requirements(&self, service: &str, limit: usize) -> StoreResult<Vec<Row>> {
        let values = sqlx::query_scalar::<_, serde_json::Value>(SERVICE_REQUIREMENTS_SQL)
            .bind(like_pattern(service))
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(into_rows(values))
    }

    async fn services_with_department(
        &self,
        department: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<Row>> {
        let values = match department {
            Some(name) => {
                sqlx::query_scalar::<_, serde_json::Value>(SERVICES_IN_DEPARTMENT_SQL)
                    .bind(like_pattern(name))
                    .bind(sql_limit(limit))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, serde_json::Value>(SERVICES_WITH_DEPARTMENT_SQL)
                    .bind(sql_limit(limit))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(into_rows(values))
    }

    async fn document_types(&self, limit: usize) -> StoreResult<Vec<Row>> {
        let values = sqlx::query_scalar::<_, serde_json::Value>(DOCUMENT_TYPES_SQL)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(into_rows(values))
    }

    async fn departments(&self, limit: usize) -> StoreResult<Vec<Row>> {
        let values = sqlx::query_scalar::<_, serde_json::Value>(DEPARTMENTS_SQL)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(into_rows(values))
    }

    async fn services(&self, limit: usize) -> StoreResult<Vec<Row>> {
        let values = sqlx::query_scalar::<_, serde_json::Value>(SERVICES_SQL)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(into_rows(values))
    }

    fn backend_name(&self) -> &str {
        "postgres"
    }
}
