//! Keyword classifier: ordered rules over the lower-cased input.
//!
//! Rules are checked in priority order and the first match wins:
//! service requirements, status, appointments, complaints, help.

use async_trait::async_trait;
use gs_protocol::Intent;

use super::IntentClassifier;

/// Phrases that on their own mean "what do I need for …".
const REQUIREMENT_PHRASES: &[&str] = &[
    "what documents",
    "what do i need",
    "requirements for",
    "documents for",
];

/// Requirement words; only count together with a service keyword.
const REQUIREMENT_KEYWORDS: &[&str] = &[
    "document",
    "documents",
    "need",
    "required",
    "requirements",
    "paperwork",
];

/// Service keywords recognized by the requirement rule.
pub const SERVICE_KEYWORDS: &[&str] = &["passport", "license", "certificate", "registration", "permit"];

const STATUS_KEYWORDS: &[&str] = &["status", "check", "application", "my documents"];

const APPOINTMENT_KEYWORDS: &[&str] = &["appointment", "schedule", "meeting", "book", "slot"];

const COMPLAINT_KEYWORDS: &[&str] = &["complaint", "problem", "issue", "file complaint"];

const HELP_KEYWORDS: &[&str] = &["help", "services", "what can", "how do"];

/// Deterministic keyword classifier.
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentClassifier for RuleBasedClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<Intent> {
        Ok(classify_keywords(text))
    }

    fn policy_name(&self) -> &str {
        "keyword"
    }
}

/// Core keyword matching.
pub fn classify_keywords(text: &str) -> Intent {
    let lower = text.to_lowercase();
    let lower = lower.trim();

    if is_requirement_question(lower) {
        return Intent::ServiceRequirements;
    }

    if matches_any(lower, STATUS_KEYWORDS) {
        return Intent::CheckStatus;
    }

    if matches_any(lower, APPOINTMENT_KEYWORDS) {
        return Intent::ScheduleAppointment;
    }

    if matches_any(lower, COMPLAINT_KEYWORDS) {
        return Intent::FileComplaint;
    }

    if matches_any(lower, HELP_KEYWORDS) {
        return Intent::GeneralInfo;
    }

    Intent::CATCH_ALL
}

fn is_requirement_question(lower: &str) -> bool {
    matches_any(lower, REQUIREMENT_PHRASES)
        || (matches_any(lower, REQUIREMENT_KEYWORDS) && matches_any(lower, SERVICE_KEYWORDS))
}

/// Check if the text contains any of the given patterns.
pub(crate) fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
