//! Deterministic row renderer, used when the model cannot format results.

use gs_protocol::Row;
use serde_json::Value;

use super::templates::CONTACT_FOOTER;

/// Rows listed before the remainder is summarized.
pub const MAX_LISTED_ROWS: usize = 5;

/// Render rows as a numbered plain-text list.
pub fn render(rows: &[Row]) -> String {
    let mut out = String::from("Here's what I found for you:\n\n");

    for (i, row) in rows.iter().take(MAX_LISTED_ROWS).enumerate() {
        render_row(&mut out, i + 1, row);
        out.push('\n');
    }

    if rows.len() > MAX_LISTED_ROWS {
        out.push_str(&format!(
            "... and {} more results available.\n\n",
            rows.len() - MAX_LISTED_ROWS
        ));
    }

    out.push_str(CONTACT_FOOTER);
    out
}

fn render_row(out: &mut String, n: usize, row: &Row) {
    match text(row, "title") {
        Some(title) => {
            out.push_str(&format!("{n}. {title}\n"));
        }
        None => {
            out.push_str(&format!("{n}.\n"));
        }
    }

    if let Some(description) = text(row, "description") {
        out.push_str(&format!("   Description: {description}\n"));
    }

    if let Some(doc_type) = text(row, "doc_type") {
        out.push_str(&format!("   Document: {doc_type} ({})\n", requirement(row)));
    }

    if let Some(Value::Array(docs)) = row.get("required_doc_for_service") {
        for doc in docs.iter().filter_map(Value::as_object) {
            let name = doc
                .get("document_type")
                .and_then(Value::as_object)
                .and_then(|dt| text(dt, "doc_type"));
            if let Some(name) = name {
                out.push_str(&format!("   Document: {name} ({})\n", requirement(doc)));
            }
        }
    }

    if let Some(Value::Object(department)) = row.get("department") {
        let title = text(department, "title").unwrap_or_else(|| "N/A".into());
        out.push_str(&format!("   Department: {title}\n"));
        let contact: Vec<String> = ["email", "phone_no"]
            .iter()
            .filter_map(|key| text(department, key))
            .collect();
        if !contact.is_empty() {
            out.push_str(&format!("   Contact: {}\n", contact.join(" | ")));
        }
    }

    if let Some(email) = text(row, "email") {
        out.push_str(&format!("   Email: {email}\n"));
    }

    if let Some(phone) = text(row, "phone_no") {
        out.push_str(&format!("   Phone: {phone}\n"));
    }
}

/// A missing flag counts as required.
pub(crate) fn requirement(row: &Row) -> &'static str {
    match row.get("is_mandatory") {
        None | Some(Value::Bool(true)) => "Required",
        Some(Value::Bool(false)) | Some(Value::Null) => "Optional",
        Some(_) => "Required",
    }
}

/// Field as display text; null and blank strings count as absent.
pub(crate) fn text(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
