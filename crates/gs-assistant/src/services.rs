//! Direct service-requirements lookup for the keyword deployment.
//!
//! The target service is the first known keyword found in the input. The
//! store is queried with that keyword and the first matching service is
//! rendered with its numbered document list.

use gs_protocol::{RequestContext, Row, TurnError};
use gs_store::ServiceStore;
use serde_json::Value;

use crate::formatter::fallback::{requirement, text};
use crate::formatter::templates;

/// Keyword → canonical service name, checked in order.
pub const SERVICE_NAMES: &[(&str, &str)] = &[
    ("passport", "Passport Application"),
    ("driving license", "Driving License"),
    ("license", "Driving License"),
    ("birth certificate", "Birth Certificate"),
    ("marriage certificate", "Marriage Certificate"),
    ("business registration", "Business Registration"),
    ("tax clearance", "Tax Clearance Certificate"),
    ("police clearance", "Police Clearance Certificate"),
    ("grama niladhari", "Grama Niladhari Certificate"),
    ("identity card", "National Identity Card"),
];

const LOOKUP_TIP: &str =
    "Tip: Make sure all documents are original or certified copies, and bring photocopies as well.";

/// A recognized service mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTarget {
    /// The keyword as it appears in the input (lower-cased).
    pub keyword: &'static str,
    pub name: &'static str,
}

/// First known service mentioned in `input`.
pub fn extract_service(input: &str) -> Option<ServiceTarget> {
    let lower = input.to_lowercase();
    SERVICE_NAMES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(keyword, name)| ServiceTarget { keyword, name })
}

/// Answer a service-requirements question.
///
/// Sets `ctx.service` when a target is found. A store failure is recorded on
/// the context and answered with the lookup-failed block.
pub async fn lookup(store: &dyn ServiceStore, ctx: &mut RequestContext, limit: usize) -> String {
    let Some(target) = extract_service(&ctx.input) else {
        tracing::debug!("no service named in requirements question");
        return templates::SERVICE_PROMPT.to_string();
    };
    ctx.service = Some(target.keyword.to_string());

    match store.service_requirements(target.keyword, limit).await {
        Ok(rows) => {
            tracing::info!(service = target.keyword, rows = rows.len(), "service lookup complete");
            let response = match rows.first() {
                Some(row) => render_requirements(row, target.name),
                None => templates::service_not_found(target.keyword),
            };
            ctx.rows = Some(rows);
            response
        }
        Err(e) => {
            tracing::warn!(service = target.keyword, error = %e, "service lookup failed");
            ctx.fail(TurnError::StoreUnavailable(e.to_string()));
            templates::SERVICE_LOOKUP_FAILED.to_string()
        }
    }
}

/// Detailed block for one service row.
pub fn render_requirements(row: &Row, fallback_name: &str) -> String {
    let title = text(row, "title").unwrap_or_else(|| fallback_name.to_string());
    let mut out = format!("{title}\n\nRequired Documents:\n");

    let documents: Vec<(String, &'static str)> = match row.get("required_doc_for_service") {
        Some(Value::Array(docs)) => docs
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|doc| {
                let name = doc
                    .get("document_type")
                    .and_then(Value::as_object)
                    .and_then(|dt| text(dt, "doc_type"))?;
                Some((name, requirement(doc)))
            })
            .collect(),
        _ => Vec::new(),
    };

    if documents.is_empty() {
        out.push_str(
            "No specific documents found in our database. Please contact the department for details.\n",
        );
    }
    for (i, (name, flag)) in documents.iter().enumerate() {
        out.push_str(&format!("{}. {name} ({flag})\n", i + 1));
    }

    if let Some(Value::Object(department)) = row.get("department") {
        let name = text(department, "title").unwrap_or_else(|| "N/A".into());
        out.push_str(&format!("\nDepartment: {name}\n"));
        let contact: Vec<String> = ["email", "phone_no"]
            .iter()
            .filter_map(|key| text(department, key))
            .collect();
        if !contact.is_empty() {
            out.push_str(&format!("Contact: {}\n", contact.join(" | ")));
        }
    }

    let description =
        text(row, "description").unwrap_or_else(|| "Contact department for details".into());
    out.push_str(&format!("\nService Description: {description}\n\n{LOOKUP_TIP}"));
    out
}
