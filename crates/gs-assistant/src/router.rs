//! Intent router: the per-turn state machine.
//!
//! ```text
//! Classifying ─┬─> Templating ──────────────────────────────┐
//!              ├─> LookingUpService ────────────────────────┤
//!              └─> Synthesizing ─> Executing ─> Formatting ─┴─> Done
//! ```
//!
//! Every turn visits `Classifying` first and `Done` last, runs exactly one
//! handler and ends with a non-empty response. Errors recorded on the
//! context make later stages fall through to the apology. Only a classifier
//! fault escapes `handle`.

use std::sync::Arc;

use gs_protocol::{Intent, RequestContext, Stage};
use gs_store::ServiceStore;
use tracing::Instrument;

use crate::classifier::IntentClassifier;
use crate::executor::QueryExecutor;
use crate::formatter::{ResponseFormatter, templates};
use crate::model::TextModel;
use crate::services;
use crate::synthesizer::QuerySynthesizer;

/// Next stage after classification. Exhaustive over [`Intent`].
pub fn route(intent: Intent) -> Stage {
    match intent {
        Intent::SqlQuery => Stage::Synthesizing,
        Intent::ServiceRequirements => Stage::LookingUpService,
        Intent::CheckStatus
        | Intent::ScheduleAppointment
        | Intent::FileComplaint
        | Intent::GeneralInfo
        | Intent::ProceduralInfo
        | Intent::StatusCheck
        | Intent::General => Stage::Templating,
    }
}

/// Owns the collaborators of a turn; built once, borrowed per turn.
pub struct Router {
    classifier: Arc<dyn IntentClassifier>,
    store: Arc<dyn ServiceStore>,
    synthesizer: QuerySynthesizer,
    executor: QueryExecutor,
    formatter: ResponseFormatter,
}

impl Router {
    /// `model` is shared by synthesis and row formatting; `None` degrades
    /// both to their error and fallback paths.
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        model: Option<Arc<dyn TextModel>>,
        store: Arc<dyn ServiceStore>,
    ) -> Self {
        Self {
            classifier,
            store,
            synthesizer: QuerySynthesizer::new(model.clone()),
            executor: QueryExecutor::default(),
            formatter: ResponseFormatter::new(model),
        }
    }

    pub fn with_executor(mut self, executor: QueryExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn classifier_policy(&self) -> &str {
        self.classifier.policy_name()
    }

    /// Run one turn to completion.
    pub async fn handle(&self, input: &str) -> anyhow::Result<RequestContext> {
        let ctx = RequestContext::new(input);
        let span = tracing::info_span!("turn", id = %ctx.id);
        self.run(ctx).instrument(span).await
    }

    /// Run one turn and return only the response text.
    pub async fn reply(&self, input: &str) -> anyhow::Result<String> {
        let ctx = self.handle(input).await?;
        Ok(ctx
            .into_response()
            .unwrap_or_else(|| templates::APOLOGY.to_string()))
    }

    async fn run(&self, mut ctx: RequestContext) -> anyhow::Result<RequestContext> {
        let mut stage = Stage::Classifying;

        loop {
            ctx.enter(stage);
            stage = match stage {
                Stage::Classifying => {
                    let intent = self.classifier.classify(&ctx.input).await?;
                    tracing::info!(
                        intent = %intent,
                        policy = self.classifier.policy_name(),
                        "classified"
                    );
                    ctx.intent = Some(intent);
                    route(intent)
                }
                Stage::Templating => {
                    let intent = ctx.intent.unwrap_or(Intent::CATCH_ALL);
                    ctx.respond(self.formatter.template(
                        self.classifier.policy(),
                        intent,
                        &ctx.input,
                    ));
                    Stage::Done
                }
                Stage::LookingUpService => {
                    let text =
                        services::lookup(self.store.as_ref(), &mut ctx, self.executor.detail_limit)
                            .await;
                    ctx.respond(text);
                    Stage::Done
                }
                Stage::Synthesizing => {
                    let synthesized = self.synthesizer.synthesize(&ctx.input).await;
                    match synthesized {
                        Ok(query) => ctx.query = Some(query),
                        Err(e) => {
                            tracing::warn!(error = %e, "query synthesis rejected");
                            ctx.fail(e.into());
                        }
                    }
                    Stage::Executing
                }
                Stage::Executing => {
                    self.executor.execute(self.store.as_ref(), &mut ctx).await;
                    Stage::Formatting
                }
                Stage::Formatting => {
                    let text = self.formatter.format(&ctx).await;
                    ctx.respond(text);
                    Stage::Done
                }
                Stage::Done => break,
            };
        }

        if ctx.response().is_none_or(|r| r.trim().is_empty()) {
            ctx.respond(templates::APOLOGY);
        }

        tracing::debug!(stages = ?ctx.stages, "turn complete");
        Ok(ctx)
    }
}
