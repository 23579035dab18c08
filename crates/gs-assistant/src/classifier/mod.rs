//! Intent classification.
//!
//! Maps raw user text onto one label of the fixed [`Intent`] enumeration.
//! Two policies, one per deployment:
//! - **Keyword** (local): ordered keyword rules, deterministic, no I/O.
//! - **Model**: one model call, reply accepted only if it is an exact label.
//!
//! Built-in policies never fail; every internal fault resolves to the
//! catch-all label. The trait still returns `Result` so the interactive loop
//! can contain a faulty classifier.

pub mod llm;
pub mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use gs_protocol::Intent;
use serde::Deserialize;

use crate::model::TextModel;

pub use llm::LlmClassifier;
pub use rules::RuleBasedClassifier;

/// Trait for classifiers that turn user text into an intent.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<Intent>;

    /// Name of this policy (for logging).
    fn policy_name(&self) -> &str;

    /// Deployment whose catch-all templates this classifier's turns use.
    fn policy(&self) -> ClassifierPolicy {
        ClassifierPolicy::Keyword
    }
}

/// Which classification policy a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierPolicy {
    #[default]
    Keyword,
    Model,
}

impl std::str::FromStr for ClassifierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" | "rules" => Ok(Self::Keyword),
            "model" | "llm" => Ok(Self::Model),
            other => Err(format!("unknown classifier policy: {other}")),
        }
    }
}

/// Build the classifier for a policy. The keyword policy ignores `model`.
pub fn for_policy(
    policy: ClassifierPolicy,
    model: Option<Arc<dyn TextModel>>,
) -> Arc<dyn IntentClassifier> {
    match policy {
        ClassifierPolicy::Keyword => Arc::new(RuleBasedClassifier::new()),
        ClassifierPolicy::Model => Arc::new(LlmClassifier::new(model)),
    }
}
