//! PostgREST (Supabase) store client.
//!
//! Every call is a `GET {url}/rest/v1/{table}?select=…` with optional `ilike`
//! filters and a `limit`. Embedded relations come back as nested objects.

use std::time::Duration;

use async_trait::async_trait;
use gs_protocol::Row;
use serde::Deserialize;

use crate::error::{StoreError, StoreResult};
use crate::store::ServiceStore;

const SERVICE_REQUIREMENTS_COLUMNS: &str = "title,description,department(title,email,phone_no),required_doc_for_service(is_mandatory,document_type(doc_type,description))";
const SERVICE_DEPARTMENT_COLUMNS: &str = "title,description,department(title,email,phone_no)";
const SERVICE_DEPARTMENT_INNER_COLUMNS: &str =
    "title,description,department!inner(title,email,phone_no)";

/// Connection settings for a PostgREST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RestStoreConfig {
    /// Project URL (e.g. "https://abc.supabase.co").
    pub url: String,
    /// API key, sent as `apikey` and bearer token.
    pub key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl RestStoreConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One structured select against a single table.
#[derive(Debug, Clone, PartialEq)]
struct Select {
    table: &'static str,
    columns: &'static str,
    filters: Vec<(String, String)>,
    limit: usize,
}

impl Select {
    fn from(table: &'static str, columns: &'static str) -> Self {
        Self {
            table,
            columns,
            filters: Vec::new(),
            limit: 0,
        }
    }

    /// Case-insensitive substring filter on `column`.
    fn ilike(mut self, column: &str, needle: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("ilike.*{needle}*")));
        self
    }

    fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.to_string())];
        pairs.extend(self.filters.iter().cloned());
        if self.limit > 0 {
            pairs.push(("limit".to_string(), self.limit.to_string()));
        }
        pairs
    }
}

/// Store backed by a PostgREST HTTP API.
pub struct RestStore {
    client: reqwest::Client,
    config: RestStoreConfig,
}

impl RestStore {
    pub fn new(config: RestStoreConfig) -> StoreResult<Self> {
        if config.url.trim().is_empty() || config.key.trim().is_empty() {
            return Err(StoreError::NotConfigured(
                "store URL and key are required".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn fetch(&self, select: Select) -> StoreResult<Vec<Row>> {
        let url = format!(
            "{}/rest/v1/{}",
            self.config.url.trim_end_matches('/'),
            select.table
        );

        let response = self
            .client
            .get(&url)
            .query(&select.query_pairs())
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::debug!(table = select.table, rows = rows.len(), "postgrest select");
        Ok(rows)
    }
}

#[async_trait]
impl ServiceStore for RestStore {
    async fn service_requirements(&self, service: &str, limit: usize) -> StoreResult<Vec<Row>> {
        self.fetch(
            Select::from("service", SERVICE_REQUIREMENTS_COLUMNS)
                .ilike("title", service)
                .limit(limit),
        )
        .await
    }

    async fn services_with_department(
        &self,
        department: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<Row>> {
        let select = match department {
            Some(name) => Select::from("service", SERVICE_DEPARTMENT_INNER_COLUMNS)
                .ilike("department.title", name),
            None => Select::from("service", SERVICE_DEPARTMENT_COLUMNS),
        };
        self.fetch(select.limit(limit)).await
    }

    async fn document_types(&self, limit: usize) -> StoreResult<Vec<Row>> {
        self.fetch(Select::from("document_type", "doc_type,description").limit(limit))
            .await
    }

    async fn departments(&self, limit: usize) -> StoreResult<Vec<Row>> {
        self.fetch(Select::from("department", "title,description,email,phone_no").limit(limit))
            .await
    }

    async fn services(&self, limit: usize) -> StoreResult<Vec<Row>> {
        self.fetch(Select::from("service", "title,description").limit(limit))
            .await
    }

    fn backend_name(&self) -> &str {
        "postgrest"
    }
}
