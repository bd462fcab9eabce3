//! Four-stage generation pipeline.
//!
//! Stages run strictly in order; each stage's prompt consumes the previous
//! stage's finalized artifact, so nothing here is concurrent. Every failure
//! mode (no credential, transport, empty completion, parse) is absorbed by
//! substituting the fallback generator for that stage and moving on.

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::errors::StageError;
use crate::fallback;
use crate::parse;
use crate::prompt;
use crate::provider::{Completion, DynProvider};
use crate::wire::{
    BusinessSpec, LandingPage, MarketingAssets, Message, PipelineState, PitchDeck, Stage,
    StageStatus,
};

/// Record of one completion call: the exact prompt sent and, when the
/// endpoint returned text, the raw reply. One entry per stage that actually
/// reached the gateway; a fallback-only run records none.
#[derive(Debug)]
pub struct StageTrace {
    pub stage: Stage,
    pub max_tokens: u32,
    pub prompt: String,
    pub response: Option<String>,
}

pub struct Pipeline {
    provider: Option<DynProvider>,
    debug: bool,
    traces: Vec<StageTrace>,
}

impl Pipeline {
    pub fn new(provider: Option<DynProvider>, debug: bool) -> Self {
        Self {
            provider,
            debug,
            traces: Vec::new(),
        }
    }

    pub fn traces(&self) -> &[StageTrace] {
        &self.traces
    }

    /// Run all four stages for an idea, publishing a fresh state snapshot to
    /// `observe` after every transition. Always runs to completion; the
    /// returned state carries every artifact, real or fallback.
    pub async fn run(
        &mut self,
        idea: &str,
        mut observe: impl FnMut(&PipelineState),
    ) -> PipelineState {
        let started_ms = Utc::now().timestamp_millis();
        let mut state = PipelineState::new(idea.to_string());
        observe(&state);

        // Stage 1: conversation + business spec.
        state = advance(state, StageStatus::Spec);
        observe(&state);

        let (conversation, spec) = self.spec_stage(idea, started_ms).await;
        state.conversation = conversation;
        observe(&state);
        state.business_spec = Some(spec);
        observe(&state);

        let spec_json = state
            .business_spec
            .as_ref()
            .and_then(|s| serde_json::to_string(s).ok())
            .unwrap_or_else(|| "{}".to_string());

        // Stage 2: landing page.
        state = advance(state, StageStatus::Landing);
        observe(&state);
        state.landing_page = Some(
            self.json_stage(Stage::Landing, &spec_json, || fallback::landing_page(idea))
                .await,
        );
        observe(&state);

        // Stage 3: pitch deck.
        state = advance(state, StageStatus::Pitch);
        observe(&state);
        state.pitch_deck = Some(
            self.json_stage(Stage::Pitch, &spec_json, || fallback::pitch_deck(idea))
                .await,
        );
        observe(&state);

        // Stage 4: marketing assets.
        state = advance(state, StageStatus::Marketing);
        observe(&state);
        state.marketing_assets = Some(
            self.json_stage(Stage::Marketing, &spec_json, || {
                fallback::marketing_assets(idea)
            })
            .await,
        );
        observe(&state);

        state = advance(state, StageStatus::Complete);
        observe(&state);
        state
    }

    /// Stage 1 has its own shape: a usable conversation is mandatory, while
    /// the embedded spec JSON falls back on its own. A reply with a good
    /// conversation but a bad spec object keeps the real conversation.
    async fn spec_stage(&mut self, idea: &str, started_ms: i64) -> (Vec<Message>, BusinessSpec) {
        let full_fallback = || (fallback::conversation(idea), fallback::business_spec(idea));

        let text = match self.complete_stage(Stage::Spec, idea).await {
            Some(result) => match result {
                Ok(Completion::Text(t)) => t,
                Ok(Completion::Empty) => {
                    self.note(Stage::Spec, &StageError::EmptyCompletion);
                    return full_fallback();
                }
                Err(e) => {
                    self.note(Stage::Spec, &e);
                    return full_fallback();
                }
            },
            None => return full_fallback(),
        };

        match parse::parse_spec_reply(&text, started_ms) {
            Ok(reply) => {
                let spec = reply.spec.unwrap_or_else(|| {
                    self.note(Stage::Spec, &StageError::Parse("spec object".into()));
                    fallback::business_spec(idea)
                });
                (reply.conversation, spec)
            }
            Err(e) => {
                self.note(Stage::Spec, &e);
                full_fallback()
            }
        }
    }

    async fn json_stage<T: DeserializeOwned>(
        &mut self,
        stage: Stage,
        spec_json: &str,
        make_fallback: impl FnOnce() -> T,
    ) -> T {
        match self.complete_stage(stage, spec_json).await {
            Some(Ok(Completion::Text(text))) => match parse::parse_stage_json::<T>(&text) {
                Ok(value) => value,
                Err(e) => {
                    self.note(stage, &e);
                    make_fallback()
                }
            },
            Some(Ok(Completion::Empty)) => {
                self.note(stage, &StageError::EmptyCompletion);
                make_fallback()
            }
            Some(Err(e)) => {
                self.note(stage, &e);
                make_fallback()
            }
            None => make_fallback(),
        }
    }

    /// One gateway round trip, recorded as a trace. `None` means no provider
    /// is configured and no request was made.
    async fn complete_stage(
        &mut self,
        stage: Stage,
        context: &str,
    ) -> Option<Result<Completion, StageError>> {
        let provider = match &self.provider {
            Some(p) => p,
            None => return None,
        };

        let prompt = prompt::build(stage, context);
        let result = provider.complete(&prompt, stage.max_tokens()).await;
        let response = match &result {
            Ok(Completion::Text(t)) => Some(t.clone()),
            _ => None,
        };
        self.traces.push(StageTrace {
            stage,
            max_tokens: stage.max_tokens(),
            prompt,
            response,
        });
        Some(result)
    }

    fn note(&self, stage: Stage, err: &StageError) {
        if self.debug {
            eprintln!("debug[{}]: falling back: {}", stage.name(), err);
        }
    }
}

fn advance(mut state: PipelineState, status: StageStatus) -> PipelineState {
    state.status = status;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::provider::Provider;

    const IDEA: &str = "A meal planning app for busy families";

    struct EmptyProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Provider for EmptyProvider {
        async fn complete(&self, _prompt: &str, _max: u32) -> Result<Completion, StageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Completion::Empty)
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        async fn complete(&self, _prompt: &str, _max: u32) -> Result<Completion, StageError> {
            Err(StageError::Transport("connection refused".into()))
        }
    }

    /// Spec-stage reply with a real conversation but unparseable spec JSON.
    struct PartialSpecProvider;

    #[async_trait]
    impl Provider for PartialSpecProvider {
        async fn complete(&self, _prompt: &str, _max: u32) -> Result<Completion, StageError> {
            Ok(Completion::Text(
                "<conversation>**[CEO]**: We should ship this.</conversation>\n<master_spec>{broken</master_spec>"
                    .to_string(),
            ))
        }
    }

    /// Replies with prose around braces that never parse as JSON.
    struct MalformedJsonProvider;

    #[async_trait]
    impl Provider for MalformedJsonProvider {
        async fn complete(&self, _prompt: &str, _max: u32) -> Result<Completion, StageError> {
            Ok(Completion::Text(
                "Here is what you asked for:\n{\"hero\": {\"headline\": }\nHope it helps!".to_string(),
            ))
        }
    }

    fn assert_all_artifacts(state: &PipelineState) {
        assert!(!state.conversation.is_empty());
        let spec = state.business_spec.as_ref().expect("business spec");
        assert_eq!(spec.financials.revenue_projections.len(), 12);
        assert!(!state.landing_page.as_ref().expect("landing").features.is_empty());
        assert_eq!(state.pitch_deck.as_ref().expect("pitch").slides.len(), 10);
        assert!(!state.marketing_assets.as_ref().expect("marketing").tweets.is_empty());
        assert_eq!(state.status, StageStatus::Complete);
    }

    fn status_trail(statuses: &[StageStatus]) -> Vec<StageStatus> {
        let mut trail = Vec::new();
        for s in statuses {
            if trail.last() != Some(s) {
                trail.push(*s);
            }
        }
        trail
    }

    #[tokio::test]
    async fn no_credential_runs_fully_on_fallback() {
        let mut pipeline = Pipeline::new(None, false);
        let mut statuses = Vec::new();
        let state = pipeline.run(IDEA, |s| statuses.push(s.status)).await;

        assert_all_artifacts(&state);
        assert_eq!(
            status_trail(&statuses),
            vec![
                StageStatus::Idle,
                StageStatus::Spec,
                StageStatus::Landing,
                StageStatus::Pitch,
                StageStatus::Marketing,
                StageStatus::Complete,
            ]
        );
        assert_eq!(state.conversation.len(), 5);
        assert_eq!(
            state.business_spec.unwrap().startup.name,
            "Mealy"
        );
    }

    #[tokio::test]
    async fn empty_completions_match_fallback_shape_with_one_call_per_stage() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider: DynProvider = Box::new(EmptyProvider {
            calls: Arc::clone(&calls),
        });
        let mut pipeline = Pipeline::new(Some(provider), false);

        let mut statuses = Vec::new();
        let state = pipeline.run(IDEA, |s| statuses.push(s.status)).await;

        assert_all_artifacts(&state);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(statuses.last(), Some(&StageStatus::Complete));
    }

    #[tokio::test]
    async fn transport_failures_never_abort_later_stages() {
        let mut pipeline = Pipeline::new(Some(Box::new(FailingProvider)), false);
        let state = pipeline.run(IDEA, |_| {}).await;
        assert_all_artifacts(&state);
    }

    #[tokio::test]
    async fn bad_spec_json_keeps_real_conversation_and_falls_back_spec_only() {
        let mut pipeline = Pipeline::new(Some(Box::new(PartialSpecProvider)), false);
        let state = pipeline.run(IDEA, |_| {}).await;

        assert_eq!(state.conversation.len(), 1);
        assert_eq!(state.conversation[0].content, "We should ship this.");
        // Spec object fell back; shape is still complete.
        assert_eq!(state.business_spec.unwrap().startup.name, "Mealy");
    }

    #[tokio::test]
    async fn malformed_json_yields_exactly_the_fallback_artifacts() {
        let mut pipeline = Pipeline::new(Some(Box::new(MalformedJsonProvider)), false);
        let state = pipeline.run(IDEA, |_| {}).await;

        // Not a partially-parsed object: byte-for-byte the fallback output.
        assert_eq!(
            serde_json::to_string(&state.landing_page.unwrap()).unwrap(),
            serde_json::to_string(&fallback::landing_page(IDEA)).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&state.pitch_deck.unwrap()).unwrap(),
            serde_json::to_string(&fallback::pitch_deck(IDEA)).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&state.marketing_assets.unwrap()).unwrap(),
            serde_json::to_string(&fallback::marketing_assets(IDEA)).unwrap()
        );
    }

    #[tokio::test]
    async fn every_gateway_call_is_traced() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider: DynProvider = Box::new(EmptyProvider {
            calls: Arc::clone(&calls),
        });
        let mut pipeline = Pipeline::new(Some(provider), false);
        pipeline.run(IDEA, |_| {}).await;

        let traces = pipeline.traces();
        assert_eq!(traces.len(), 4);
        assert_eq!(traces[0].stage, Stage::Spec);
        assert_eq!(traces[0].max_tokens, 4096);
        assert!(traces[0].prompt.contains(IDEA));
        // Empty completions carry no response text.
        assert!(traces.iter().all(|t| t.response.is_none()));

        let mut no_key = Pipeline::new(None, false);
        no_key.run(IDEA, |_| {}).await;
        assert!(no_key.traces().is_empty());
    }

    #[tokio::test]
    async fn snapshots_are_monotonic() {
        let mut pipeline = Pipeline::new(None, false);
        let mut seen_spec = false;
        let mut seen_landing = false;
        pipeline
            .run(IDEA, |s| {
                if s.business_spec.is_some() {
                    seen_spec = true;
                }
                if s.landing_page.is_some() {
                    seen_landing = true;
                }
                // Fields never disappear once published.
                assert!(!seen_spec || s.business_spec.is_some());
                assert!(!seen_landing || s.landing_page.is_some());
            })
            .await;
        assert!(seen_spec && seen_landing);
    }
}
