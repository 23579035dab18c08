//! Shared test harness for end-to-end tests.
//!
//! Wires a real router to in-memory or wiremock-backed collaborators and
//! drives the interactive loop over byte buffers.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use gs_assistant::classifier::{IntentClassifier, LlmClassifier, RuleBasedClassifier};
use gs_assistant::model::{ScriptedModel, TextModel};
use gs_assistant::repl;
use gs_assistant::router::Router;
use gs_assistant::transcript::Transcript;
use gs_store::{MockStore, ServiceStore};

/// Router plus the fakes behind it.
pub struct TestHarness {
    pub router: Router,
    pub store: Arc<MockStore>,
    pub model: Option<Arc<ScriptedModel>>,
}

impl TestHarness {
    /// Keyword classifier, no model, the given store.
    pub fn keyword(store: MockStore) -> Self {
        let store = Arc::new(store);
        let router = Router::new(Arc::new(RuleBasedClassifier::new()), None, store.clone());
        Self {
            router,
            store,
            model: None,
        }
    }

    /// Model classifier; one scripted model answers classification,
    /// synthesis and formatting in call order.
    pub fn model<I, S>(replies: I, store: MockStore) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Arc::new(store);
        let scripted = Arc::new(ScriptedModel::replying(replies));
        let model: Arc<dyn TextModel> = scripted.clone();
        let router = Router::new(
            Arc::new(LlmClassifier::new(Some(model.clone()))),
            Some(model),
            store.clone(),
        );
        Self {
            router,
            store,
            model: Some(scripted),
        }
    }

    /// Arbitrary classifier and store, no model.
    pub fn with_parts(classifier: Arc<dyn IntentClassifier>, store: Arc<dyn ServiceStore>) -> Self {
        Self {
            router: Router::new(classifier, None, store),
            store: Arc::new(MockStore::new()),
            model: None,
        }
    }

    /// Feed `input` to the loop; returns the transcript and everything printed.
    pub async fn converse(&self, input: &str) -> (Transcript, String) {
        let mut out = Vec::new();
        let transcript = repl::run(&self.router, input.as_bytes(), &mut out)
            .await
            .unwrap();
        (transcript, String::from_utf8(out).unwrap())
    }

    /// Full session including the transcript file; returns its path.
    pub async fn session(&self, input: &str, dir: &std::path::Path) -> (PathBuf, String) {
        self.session_bytes(input.as_bytes(), dir).await
    }

    /// Like [`session`](Self::session) for raw, possibly non-UTF-8 input.
    pub async fn session_bytes(&self, input: &[u8], dir: &std::path::Path) -> (PathBuf, String) {
        let mut out = Vec::new();
        let path = repl::run_session(&self.router, input, &mut out, dir)
            .await
            .unwrap();
        (path, String::from_utf8_lossy(&out).into_owned())
    }
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gs-e2e-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Catalogue with `count` services under one department.
pub fn store_with_services(count: usize) -> MockStore {
    let mut store = MockStore::new();
    let department = store.add_department(
        "Department of Registration of Persons",
        None,
        "info@drp.gov.lk",
        "0112585656",
    );
    for i in 1..=count {
        store.add_service(department, &format!("Service {i}"), Some("Sample service"));
    }
    store
}
