//! Government services assistant: interactive shell.
//!
//! Wires the classifier, text model and catalogue store into the router and
//! runs the read-line loop on stdin/stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use gs_assistant::classifier::{self, ClassifierPolicy};
use gs_assistant::config::{AssistantConfig, StoreBackend, StoreConfig};
use gs_assistant::executor::QueryExecutor;
use gs_assistant::repl;
use gs_assistant::router::Router;
use gs_store::{MockStore, PgStore, RestStore, ServiceStore};

#[derive(Parser)]
#[command(
    name = "gs-assistant",
    version,
    about = "Sri Lankan government services assistant"
)]
struct Cli {
    /// TOML config file
    #[arg(long, env = "GS_CONFIG")]
    config: Option<PathBuf>,

    /// Classification policy (overrides config and GS_CLASSIFIER)
    #[arg(long, value_enum)]
    classifier: Option<ClassifierPolicy>,

    /// Directory for conversation transcripts
    #[arg(long, env = "GS_TRANSCRIPT_DIR")]
    transcript_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, env = "GS_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gs-assistant starting");

    // ── Config ──────────────────────────────────────────────────
    let mut config = AssistantConfig::load(cli.config.as_deref())?;
    if let Some(policy) = cli.classifier {
        config.classifier = policy;
    }
    if let Some(dir) = cli.transcript_dir {
        config.transcript_dir = dir;
    }

    // ── Model ───────────────────────────────────────────────────
    let model = match config.model.build() {
        Ok(Some(model)) => {
            tracing::info!(model = model.model_name(), "text model configured");
            Some(model)
        }
        Ok(None) => {
            tracing::info!("text model disabled");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "text model unavailable, data lookups and model classification degrade");
            None
        }
    };

    // ── Store ───────────────────────────────────────────────────
    let store = build_store(&config.store)?;
    tracing::info!(backend = store.backend_name(), "catalogue store ready");

    // ── Router ──────────────────────────────────────────────────
    let classifier = classifier::for_policy(config.classifier, model.clone());
    let router = Router::new(classifier, model, store).with_executor(QueryExecutor::new(
        config.store.detail_limit,
        config.store.summary_limit,
    ));
    tracing::info!(policy = router.classifier_policy(), "router ready");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    repl::run_session(&router, stdin, &mut stdout, &config.transcript_dir).await?;

    Ok(())
}

fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn ServiceStore>> {
    let store: Arc<dyn ServiceStore> = match config.backend() {
        StoreBackend::Postgres(url) => {
            tracing::info!("using PostgreSQL catalogue (connects on first query)");
            Arc::new(PgStore::connect_lazy(
                &url,
                Duration::from_secs(config.timeout_secs),
            )?)
        }
        StoreBackend::Rest { url, key } => {
            tracing::info!(url = %url, "using PostgREST catalogue");
            Arc::new(RestStore::new(config.rest_config(&url, &key))?)
        }
        StoreBackend::Sample => {
            tracing::warn!("no DATABASE_URL or SUPABASE_URL/SUPABASE_KEY, using sample catalogue");
            Arc::new(MockStore::with_sample_data())
        }
    };
    Ok(store)
}
