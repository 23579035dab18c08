//! Query execution by pattern matching.
//!
//! The synthesized text is never sent to the store. Its lower-cased form is
//! matched against a short table of table names and mapped onto one of the
//! structured [`ServiceStore`] calls:
//!
//! | query mentions                 | call                        | cap |
//! |--------------------------------|-----------------------------|-----|
//! | `service` and `document_type`  | `service_requirements(name)`| 20  |
//! | `service` and `department`     | `services_with_department`  | 20  |
//! | `document_type`                | `document_types`            | 20  |
//! | `department`                   | `departments`               | 20  |
//! | anything else                  | `services`                  | 10  |
//!
//! `name` is the first `title ILIKE '%…%'` pattern in the query.

use std::fmt;
use std::sync::LazyLock;

use gs_protocol::{RequestContext, Row, TurnError};
use gs_store::{ServiceStore, StoreResult};
use regex::Regex;

static TITLE_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"title\s+ilike\s+'%([^%]+)%'").unwrap());

/// The structured store call chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `None` when the query named no service title; yields no rows.
    ServiceRequirements(Option<String>),
    ServicesWithDepartment(Option<String>),
    DocumentTypes,
    Departments,
    Services,
}

impl fmt::Display for StoreCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceRequirements(name) => {
                write!(f, "service_requirements({})", name.as_deref().unwrap_or("-"))
            }
            Self::ServicesWithDepartment(name) => {
                write!(f, "services_with_department({})", name.as_deref().unwrap_or("*"))
            }
            Self::DocumentTypes => f.write_str("document_types"),
            Self::Departments => f.write_str("departments"),
            Self::Services => f.write_str("services"),
        }
    }
}

/// First `title ILIKE '%name%'` pattern in an already lower-cased query.
pub fn title_filter(lower: &str) -> Option<String> {
    let captures = TITLE_FILTER.captures(lower)?;
    Some(captures.get(1)?.as_str().to_string())
}

/// Choose the store call for a query.
pub fn plan(query: &str) -> StoreCall {
    let lower = query.to_lowercase();
    let mentions_service = lower.contains("service");

    if mentions_service && lower.contains("document_type") {
        StoreCall::ServiceRequirements(title_filter(&lower))
    } else if mentions_service && lower.contains("department") {
        StoreCall::ServicesWithDepartment(title_filter(&lower))
    } else if lower.contains("document_type") {
        StoreCall::DocumentTypes
    } else if lower.contains("department") {
        StoreCall::Departments
    } else {
        StoreCall::Services
    }
}

/// Row caps per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryExecutor {
    /// Cap for the joined and catalogue calls.
    pub detail_limit: usize,
    /// Cap for the bare service listing.
    pub summary_limit: usize,
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self {
            detail_limit: 20,
            summary_limit: 10,
        }
    }
}

impl QueryExecutor {
    pub fn new(detail_limit: usize, summary_limit: usize) -> Self {
        Self {
            detail_limit,
            summary_limit,
        }
    }

    /// Run the planned call for `ctx.query` and store the rows on the context.
    ///
    /// Skipped when the context already carries an error or has no query.
    /// A store failure leaves empty rows and records `StoreUnavailable`; it is
    /// never returned.
    pub async fn execute(&self, store: &dyn ServiceStore, ctx: &mut RequestContext) {
        if ctx.has_error() {
            return;
        }
        let Some(query) = ctx.query.as_deref() else {
            return;
        };

        let call = plan(query);
        tracing::debug!(call = %call, backend = store.backend_name(), "executing store call");

        match self.run(store, &call).await {
            Ok(rows) => {
                tracing::info!(call = %call, rows = rows.len(), "store call complete");
                ctx.rows = Some(rows);
            }
            Err(e) => {
                tracing::warn!(call = %call, error = %e, "store call failed");
                ctx.rows = Some(Vec::new());
                ctx.fail(TurnError::StoreUnavailable(e.to_string()));
            }
        }
    }

    async fn run(&self, store: &dyn ServiceStore, call: &StoreCall) -> StoreResult<Vec<Row>> {
        match call {
            StoreCall::ServiceRequirements(Some(name)) => {
                store.service_requirements(name, self.detail_limit).await
            }
            StoreCall::ServiceRequirements(None) => Ok(Vec::new()),
            StoreCall::ServicesWithDepartment(name) => {
                store
                    .services_with_department(name.as_deref(), self.detail_limit)
                    .await
            }
            StoreCall::DocumentTypes => store.document_types(self.detail_limit).await,
            StoreCall::Departments => store.departments(self.detail_limit).await,
            StoreCall::Services => store.services(self.summary_limit).await,
        }
    }
}
