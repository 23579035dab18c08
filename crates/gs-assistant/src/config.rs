//! Assistant configuration, loadable from TOML and overlaid from the
//! environment. Credentials only ever come from the environment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gs_store::RestStoreConfig;
use serde::Deserialize;

use crate::classifier::ClassifierPolicy;
use crate::model::{GeminiConfig, GeminiModel, ModelError, OllamaConfig, OllamaModel, TextModel};

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Classification policy.
    #[serde(default)]
    pub classifier: ClassifierPolicy,
    /// Directory conversation transcripts are written to.
    #[serde(default = "default_transcript_dir")]
    pub transcript_dir: PathBuf,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_transcript_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierPolicy::default(),
            transcript_dir: default_transcript_dir(),
            model: ModelConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Which text model backs classification, synthesis and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Gemini,
    Ollama,
    /// No model: catch-all classification, no data lookups, plain rendering.
    None,
}

impl std::str::FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            "none" | "off" => Ok(Self::None),
            other => Err(format!("unknown model provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl ModelConfig {
    /// Build the configured model. `Ok(None)` when the provider is `none`.
    pub fn build(&self) -> Result<Option<Arc<dyn TextModel>>, ModelError> {
        let model: Arc<dyn TextModel> = match self.provider {
            ModelProvider::None => return Ok(None),
            ModelProvider::Gemini => Arc::new(GeminiModel::new(self.gemini.clone())?),
            ModelProvider::Ollama => Arc::new(OllamaModel::new(self.ollama.clone())?),
        };
        Ok(Some(model))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Request timeout for the REST backend, in seconds.
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
    /// Row cap for joined and catalogue lookups.
    #[serde(default = "default_detail_limit")]
    pub detail_limit: usize,
    /// Row cap for the plain service listing.
    #[serde(default = "default_summary_limit")]
    pub summary_limit: usize,
    #[serde(skip)]
    pub database_url: Option<String>,
    #[serde(skip)]
    pub supabase_url: Option<String>,
    #[serde(skip)]
    pub supabase_key: Option<String>,
}

fn default_store_timeout_secs() -> u64 {
    10
}
fn default_detail_limit() -> usize {
    20
}
fn default_summary_limit() -> usize {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_store_timeout_secs(),
            detail_limit: default_detail_limit(),
            summary_limit: default_summary_limit(),
            database_url: None,
            supabase_url: None,
            supabase_key: None,
        }
    }
}

/// Store backend chosen from the available credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres(String),
    Rest { url: String, key: String },
    /// No credentials: the in-memory sample catalogue.
    Sample,
}

impl StoreConfig {
    /// `DATABASE_URL` wins, then the Supabase pair, then sample data.
    pub fn backend(&self) -> StoreBackend {
        if let Some(url) = &self.database_url {
            return StoreBackend::Postgres(url.clone());
        }
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => StoreBackend::Rest {
                url: url.clone(),
                key: key.clone(),
            },
            _ => StoreBackend::Sample,
        }
    }

    pub fn rest_config(&self, url: &str, key: &str) -> RestStoreConfig {
        RestStoreConfig {
            timeout_secs: self.timeout_secs,
            ..RestStoreConfig::new(url, key)
        }
    }
}

impl AssistantConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// File (or defaults) overlaid with the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay environment variables read through `lookup`. Blank values
    /// count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = var("GS_CLASSIFIER") {
            match value.parse::<ClassifierPolicy>() {
                Ok(policy) => self.classifier = policy,
                Err(e) => tracing::warn!(error = %e, "ignoring GS_CLASSIFIER"),
            }
        }
        if let Some(value) = var("GS_MODEL_PROVIDER") {
            match value.parse::<ModelProvider>() {
                Ok(provider) => self.model.provider = provider,
                Err(e) => tracing::warn!(error = %e, "ignoring GS_MODEL_PROVIDER"),
            }
        }
        if let Some(key) = var("GEMINI_API_KEY") {
            self.model.gemini.api_key = key;
        }
        if let Some(host) = var("OLLAMA_HOST") {
            self.model.ollama.host = host;
        }
        if let Some(url) = var("DATABASE_URL") {
            self.store.database_url = Some(url);
        }
        if let Some(url) = var("SUPABASE_URL") {
            self.store.supabase_url = Some(url);
        }
        if let Some(key) = var("SUPABASE_KEY") {
            self.store.supabase_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.classifier, ClassifierPolicy::Keyword);
        assert_eq!(config.transcript_dir, PathBuf::from("."));
        assert_eq!(config.model.provider, ModelProvider::Gemini);
        assert_eq!(config.store.detail_limit, 20);
        assert_eq!(config.store.summary_limit, 10);
        assert_eq!(config.store.timeout_secs, 10);
        assert_eq!(config.store.backend(), StoreBackend::Sample);
    }

    #[test]
    fn deserialize_empty_config() {
        let config: AssistantConfig = toml::from_str("").unwrap();
        assert_eq!(config.classifier, ClassifierPolicy::Keyword);
        assert_eq!(config.model.ollama.model, "llama3");
        assert_eq!(config.model.gemini.model, "gemini-2.5-flash");
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
classifier = "model"
transcript_dir = "/var/log/gs-assistant"

[model]
provider = "ollama"

[model.ollama]
host = "http://gpu-box:11434"
model = "llama3.1"
timeout_secs = 60

[model.gemini]
model = "gemini-2.0-flash"

[store]
timeout_secs = 5
detail_limit = 50
summary_limit = 25
"#;
        let config: AssistantConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.classifier, ClassifierPolicy::Model);
        assert_eq!(config.transcript_dir, PathBuf::from("/var/log/gs-assistant"));
        assert_eq!(config.model.provider, ModelProvider::Ollama);
        assert_eq!(config.model.ollama.host, "http://gpu-box:11434");
        assert_eq!(config.model.ollama.timeout_secs, 60);
        assert_eq!(config.model.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.model.gemini.timeout_secs, 30);
        assert_eq!(config.store.detail_limit, 50);
        assert_eq!(config.store.summary_limit, 25);
    }

    #[test]
    fn credentials_are_not_read_from_file() {
        let toml = r#"
[model.gemini]
api_key = "leaked"

[store]
database_url = "postgres://leaked"
"#;
        let config: AssistantConfig = toml::from_str(toml).unwrap();
        assert!(config.model.gemini.api_key.is_empty());
        assert!(config.store.database_url.is_none());
    }

    #[test]
    fn env_overlay() {
        let mut config = AssistantConfig::default();
        config.apply_env(env(&[
            ("GS_CLASSIFIER", "llm"),
            ("GS_MODEL_PROVIDER", "Ollama"),
            ("GEMINI_API_KEY", "secret"),
            ("OLLAMA_HOST", "http://127.0.0.1:11434"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "anon"),
        ]));
        assert_eq!(config.classifier, ClassifierPolicy::Model);
        assert_eq!(config.model.provider, ModelProvider::Ollama);
        assert_eq!(config.model.gemini.api_key, "secret");
        assert_eq!(config.model.ollama.host, "http://127.0.0.1:11434");
        assert_eq!(
            config.store.backend(),
            StoreBackend::Rest {
                url: "https://abc.supabase.co".into(),
                key: "anon".into()
            }
        );
    }

    #[test]
    fn invalid_and_blank_env_values_are_ignored() {
        let mut config = AssistantConfig::default();
        config.apply_env(env(&[
            ("GS_CLASSIFIER", "neural"),
            ("GS_MODEL_PROVIDER", "openai"),
            ("GEMINI_API_KEY", "   "),
            ("DATABASE_URL", ""),
        ]));
        assert_eq!(config.classifier, ClassifierPolicy::Keyword);
        assert_eq!(config.model.provider, ModelProvider::Gemini);
        assert!(config.model.gemini.api_key.is_empty());
        assert_eq!(config.store.backend(), StoreBackend::Sample);
    }

    #[test]
    fn database_url_wins_over_supabase() {
        let mut config = AssistantConfig::default();
        config.apply_env(env(&[
            ("DATABASE_URL", "postgres://localhost/gov"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "anon"),
        ]));
        assert_eq!(
            config.store.backend(),
            StoreBackend::Postgres("postgres://localhost/gov".into())
        );
    }

    #[test]
    fn supabase_url_without_key_is_sample() {
        let mut config = AssistantConfig::default();
        config.apply_env(env(&[("SUPABASE_URL", "https://abc.supabase.co")]));
        assert_eq!(config.store.backend(), StoreBackend::Sample);
    }

    #[test]
    fn rest_config_carries_timeout() {
        let store = StoreConfig {
            timeout_secs: 3,
            ..StoreConfig::default()
        };
        let rest = store.rest_config("https://abc.supabase.co", "anon");
        assert_eq!(rest.timeout_secs, 3);
        assert_eq!(rest.key, "anon");
    }

    #[test]
    fn model_build() {
        let mut model = ModelConfig {
            provider: ModelProvider::None,
            ..ModelConfig::default()
        };
        assert!(model.build().unwrap().is_none());

        model.provider = ModelProvider::Gemini;
        assert!(matches!(model.build(), Err(ModelError::NotConfigured(_))));

        model.gemini.api_key = "key".into();
        assert_eq!(model.build().unwrap().unwrap().model_name(), "gemini-2.5-flash");

        model.provider = ModelProvider::Ollama;
        assert_eq!(model.build().unwrap().unwrap().model_name(), "llama3");
    }

    #[test]
    fn provider_from_str() {
        assert_eq!("GEMINI".parse(), Ok(ModelProvider::Gemini));
        assert_eq!("off".parse(), Ok(ModelProvider::None));
        assert!("openai".parse::<ModelProvider>().is_err());
    }
}
