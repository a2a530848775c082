//! Compare providers use case
//!
//! Sends one prompt to several providers concurrently and delivers each
//! provider's outcome as soon as it settles.

use crate::config::BehaviorConfig;
use crate::ports::outcome_sink::OutcomeSink;
use crate::ports::telemetry::{NoTelemetry, TelemetryHook};
use crate::registry::{ProviderRegistry, RequestError};
use crate::use_cases::governed_call::RetryGovernor;
use comparator_domain::{CallError, CallOutcome, Prompt, ProviderDescriptor, ProviderId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors from [`CompareProvidersUseCase::call_single`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallSingleError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Call(#[from] CallError),
}

/// Input for a fan-out
#[derive(Debug, Clone)]
pub struct FanOutRequest {
    /// The prompt sent to every provider
    pub prompt: Prompt,
    /// Providers to call; 1 to 5, no duplicates
    pub provider_ids: Vec<ProviderId>,
    /// Per-provider model overrides; providers not listed use their default
    pub models: HashMap<ProviderId, String>,
    /// Cancelling this token stops every call that has not settled yet
    pub cancellation: CancellationToken,
}

impl FanOutRequest {
    pub fn new<I, P>(prompt: Prompt, provider_ids: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProviderId>,
    {
        Self {
            prompt,
            provider_ids: provider_ids.into_iter().map(Into::into).collect(),
            models: HashMap::new(),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_model(mut self, provider_id: impl Into<ProviderId>, model: impl Into<String>) -> Self {
        self.models.insert(provider_id.into(), model.into());
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }
}

/// All outcomes of one fan-out, in completion order
#[derive(Debug, Clone, PartialEq)]
pub struct FanOutReport {
    outcomes: Vec<CallOutcome>,
}

impl FanOutReport {
    pub fn outcomes(&self) -> &[CallOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<CallOutcome> {
        self.outcomes
    }

    pub fn outcome(&self, provider_id: &ProviderId) -> Option<&CallOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.provider_id() == provider_id)
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Use case for comparing provider responses to one prompt
pub struct CompareProvidersUseCase {
    registry: Arc<ProviderRegistry>,
    governor: Arc<RetryGovernor>,
    estimated_tokens: u32,
}

impl CompareProvidersUseCase {
    pub fn new(registry: Arc<ProviderRegistry>, config: BehaviorConfig) -> Self {
        Self {
            registry,
            governor: Arc::new(RetryGovernor::new(config.retry)),
            estimated_tokens: config.estimated_tokens_per_call,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Call every requested provider concurrently.
    ///
    /// The selection is validated before anything is dispatched; a bad
    /// selection fails the whole request. Once dispatched, each provider
    /// yields exactly one outcome: `sink` receives it as soon as that
    /// provider settles, independent of the others, and the report lists
    /// all of them. Telemetry is recorded once per provider at dispatch.
    pub async fn fan_out(
        &self,
        request: FanOutRequest,
        sink: &dyn OutcomeSink,
        telemetry: &dyn TelemetryHook,
    ) -> Result<FanOutReport, RequestError> {
        let resolved = self.registry.resolve(&request.provider_ids)?;

        let descriptors: Vec<ProviderDescriptor> =
            resolved.iter().map(|p| p.descriptor().clone()).collect();
        info!(
            "Dispatching prompt to {} providers: {}",
            descriptors.len(),
            descriptors
                .iter()
                .map(|d| d.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        sink.on_dispatch(&descriptors);

        let prompt: Arc<str> = Arc::from(request.prompt.content());
        let mut join_set = JoinSet::new();

        for provider in resolved {
            let descriptor = provider.descriptor().clone();
            telemetry.record_call(&descriptor.id, self.estimated_tokens);

            let adapter = provider.adapter();
            let governor = Arc::clone(&self.governor);
            let prompt = Arc::clone(&prompt);
            let model = request.models.get(&descriptor.id).cloned();
            let cancellation = request.cancellation.child_token();

            join_set.spawn(async move {
                let result = governor
                    .guard(&descriptor.display_name, &cancellation, || {
                        adapter.call(&prompt, model.as_deref())
                    })
                    .await;
                CallOutcome::new(descriptor.id, result)
            });
        }

        let mut pending: Vec<(ProviderId, String)> = descriptors
            .iter()
            .map(|d| (d.id.clone(), d.display_name.clone()))
            .collect();
        let mut outcomes = Vec::with_capacity(descriptors.len());

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(outcome) => {
                    pending.retain(|(id, _)| id != outcome.provider_id());
                    match outcome.error() {
                        None => info!("Provider {} responded", outcome.provider_id()),
                        Some(e) => warn!("Provider {} failed: {}", outcome.provider_id(), e),
                    }
                    sink.on_outcome(&outcome);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A task that panicked or was aborted never reported; settle it here.
        for (id, display_name) in pending {
            warn!("Provider {} ended without a result", id);
            let outcome = CallOutcome::failure(
                id,
                CallError::Aborted {
                    provider: display_name,
                },
            );
            sink.on_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(FanOutReport { outcomes })
    }

    /// Call one provider under the same retry/timeout policy.
    ///
    /// Used for follow-up questions. No telemetry is recorded.
    pub async fn call_single(
        &self,
        provider_id: &ProviderId,
        prompt: &Prompt,
    ) -> Result<String, CallSingleError> {
        self.call_single_with_telemetry(provider_id, prompt, &NoTelemetry)
            .await
    }

    pub async fn call_single_with_telemetry(
        &self,
        provider_id: &ProviderId,
        prompt: &Prompt,
        telemetry: &dyn TelemetryHook,
    ) -> Result<String, CallSingleError> {
        let provider = self
            .registry
            .get(provider_id)
            .ok_or_else(|| RequestError::UnknownProvider(provider_id.clone()))?;
        let descriptor = provider.descriptor();
        telemetry.record_call(&descriptor.id, self.estimated_tokens);

        let adapter = provider.adapter();
        let cancellation = CancellationToken::new();
        let text = self
            .governor
            .guard(&descriptor.display_name, &cancellation, || {
                adapter.call(prompt.content(), None)
            })
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::ports::outcome_sink::NoOutcomeSink;
    use crate::ports::provider_adapter::ProviderAdapter;
    use async_trait::async_trait;
    use comparator_domain::{ProviderError, ProviderKind};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::{Instant, sleep};

    /// What a scripted adapter does on each attempt
    #[derive(Clone)]
    enum Step {
        Reply(Duration, &'static str),
        Fail(Duration),
        Malformed(Duration),
        Hang,
    }

    struct ScriptedAdapter {
        descriptor: ProviderDescriptor,
        steps: Vec<Step>,
        calls: AtomicU32,
        models: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedAdapter {
        fn new(kind: ProviderKind, steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                descriptor: kind.descriptor(),
                steps,
                calls: AtomicU32::new(0),
                models: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProviderAdapter for ScriptedAdapter {
        fn descriptor(&self) -> &ProviderDescriptor {
            &self.descriptor
        }

        async fn call(&self, _prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            self.models.lock().unwrap().push(model.map(str::to_string));
            let step = self.steps[n.min(self.steps.len() - 1)].clone();
            match step {
                Step::Reply(delay, text) => {
                    sleep(delay).await;
                    Ok(text.to_string())
                }
                Step::Fail(delay) => {
                    sleep(delay).await;
                    Err(ProviderError::Network("connection refused".to_string()))
                }
                Step::Malformed(delay) => {
                    sleep(delay).await;
                    Err(ProviderError::malformed("no choices in response"))
                }
                Step::Hang => {
                    sleep(Duration::from_secs(3600)).await;
                    Ok("never".to_string())
                }
            }
        }
    }

    /// Records outcomes with their arrival time
    #[derive(Default)]
    struct RecordingSink {
        dispatched: Mutex<Vec<ProviderId>>,
        arrivals: Mutex<Vec<(ProviderId, Duration, bool)>>,
        started: Mutex<Option<Instant>>,
    }

    impl RecordingSink {
        fn arrivals(&self) -> Vec<(ProviderId, Duration, bool)> {
            self.arrivals.lock().unwrap().clone()
        }
    }

    impl OutcomeSink for RecordingSink {
        fn on_dispatch(&self, providers: &[ProviderDescriptor]) {
            *self.started.lock().unwrap() = Some(Instant::now());
            self.dispatched
                .lock()
                .unwrap()
                .extend(providers.iter().map(|d| d.id.clone()));
        }

        fn on_outcome(&self, outcome: &CallOutcome) {
            let started = self.started.lock().unwrap().unwrap();
            self.arrivals.lock().unwrap().push((
                outcome.provider_id().clone(),
                started.elapsed(),
                outcome.is_success(),
            ));
        }
    }

    #[derive(Default)]
    struct CountingTelemetry {
        calls: Mutex<Vec<(ProviderId, u32)>>,
    }

    impl TelemetryHook for CountingTelemetry {
        fn record_call(&self, provider_id: &ProviderId, estimated_tokens: u32) {
            self.calls
                .lock()
                .unwrap()
                .push((provider_id.clone(), estimated_tokens));
        }
    }

    fn use_case(adapters: Vec<Arc<ScriptedAdapter>>) -> CompareProvidersUseCase {
        let registry = adapters.into_iter().fold(ProviderRegistry::new(), |r, a| {
            r.with_provider(a as Arc<dyn ProviderAdapter>)
        });
        CompareProvidersUseCase::new(Arc::new(registry), BehaviorConfig::default())
    }

    fn prompt() -> Prompt {
        Prompt::new("Translate: Hello").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcomes_stream_independently() {
        let openai = ScriptedAdapter::new(
            ProviderKind::OpenAi,
            vec![Step::Reply(Duration::from_millis(300), "Hola")],
        );
        let claude = ScriptedAdapter::new(
            ProviderKind::Claude,
            vec![Step::Reply(Duration::from_millis(50), "Hola")],
        );
        let use_case = use_case(vec![openai, claude]);
        let sink = RecordingSink::default();

        let report = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["openai", "claude"]),
                &sink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        let arrivals = sink.arrivals();
        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].0.as_str(), "claude");
        assert!(arrivals[0].1 < Duration::from_millis(300));
        assert_eq!(arrivals[1].0.as_str(), "openai");
        assert!(arrivals[1].1 >= Duration::from_millis(300));
        assert_eq!(report.succeeded(), 2);
        assert_eq!(
            report.outcome(&"claude".into()).and_then(CallOutcome::text),
            Some("Hola")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_affect_others() {
        let openai = ScriptedAdapter::new(
            ProviderKind::OpenAi,
            vec![Step::Fail(Duration::from_millis(10))],
        );
        let claude = ScriptedAdapter::new(
            ProviderKind::Claude,
            vec![Step::Reply(Duration::from_millis(100), "Hola")],
        );
        let use_case = use_case(vec![Arc::clone(&openai), claude]);
        let sink = RecordingSink::default();

        let report = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["openai", "claude"]),
                &sink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        assert_eq!(openai.calls(), 3);
        let failed = report.outcome(&"openai".into()).unwrap();
        assert_eq!(
            failed.error().map(ToString::to_string).as_deref(),
            Some("Couldn't connect to OpenAI servers. Please try again.")
        );
        assert_eq!(
            report.outcome(&"claude".into()).and_then(CallOutcome::text),
            Some("Hola")
        );
        assert_eq!(sink.arrivals().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_third_attempt_text_is_delivered() {
        let attempt = Duration::from_millis(50);
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, vec![Step::Reply(attempt, "attempt1")]);
        let claude = ScriptedAdapter::new(
            ProviderKind::Claude,
            vec![
                Step::Fail(attempt),
                Step::Fail(attempt),
                Step::Reply(attempt, "attempt3"),
            ],
        );
        let use_case = use_case(vec![openai, Arc::clone(&claude)]);
        let sink = RecordingSink::default();

        let report = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["openai", "claude"]),
                &sink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        assert_eq!(claude.calls(), 3);
        assert_eq!(
            report.outcome(&"claude".into()).and_then(CallOutcome::text),
            Some("attempt3")
        );
        assert_eq!(
            report.outcome(&"openai".into()).and_then(CallOutcome::text),
            Some("attempt1")
        );

        let arrivals = sink.arrivals();
        assert_eq!(arrivals[0].0.as_str(), "openai");
        assert_eq!(arrivals[1].0.as_str(), "claude");
        assert!(arrivals[1].2);
        // three attempts plus two backoffs
        assert!(arrivals[1].1 >= Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_responses_exhaust_into_user_message() {
        let attempt = Duration::from_millis(50);
        let gemini = ScriptedAdapter::new(ProviderKind::Gemini, vec![Step::Malformed(attempt)]);
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, vec![Step::Reply(attempt, "Hola")]);
        let use_case = use_case(vec![Arc::clone(&gemini), openai]);

        let report = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["gemini", "openai"]),
                &NoOutcomeSink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        assert_eq!(gemini.calls(), 3);
        let failed = report.outcome(&"gemini".into()).unwrap();
        assert_eq!(
            failed.display_text(),
            "Error: Couldn't connect to Gemini 2.5 Flash servers. Please try again."
        );
        assert_eq!(
            failed.error().and_then(CallError::last_error).map(ProviderError::kind),
            Some("malformed_response")
        );
        assert_eq!(
            report.outcome(&"openai".into()).and_then(CallOutcome::text),
            Some("Hola")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang_is_cut_off_without_delaying_others() {
        let grok = ScriptedAdapter::new(ProviderKind::Grok, vec![Step::Hang]);
        let deepseek = ScriptedAdapter::new(
            ProviderKind::DeepSeek,
            vec![Step::Reply(Duration::from_millis(200), "Bonjour")],
        );
        let use_case = use_case(vec![Arc::clone(&grok), deepseek]);
        let sink = RecordingSink::default();

        use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["deepseek", "grok"]),
                &sink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        let arrivals = sink.arrivals();
        assert_eq!(arrivals[0].0.as_str(), "deepseek");
        assert!(arrivals[0].2);
        assert!(arrivals[0].1 < Duration::from_secs(1));
        assert_eq!(arrivals[1].0.as_str(), "grok");
        assert!(!arrivals[1].2);
        assert!(arrivals[1].1 <= Duration::from_secs(20) + Duration::from_millis(100));
        assert_eq!(grok.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_one_outcome_per_provider() {
        let adapters = vec![
            ScriptedAdapter::new(ProviderKind::OpenAi, vec![Step::Fail(Duration::ZERO)]),
            ScriptedAdapter::new(ProviderKind::Claude, vec![Step::Hang]),
            ScriptedAdapter::new(
                ProviderKind::Gemini,
                vec![
                    Step::Fail(Duration::from_millis(5)),
                    Step::Reply(Duration::from_millis(5), "Hallo"),
                ],
            ),
            ScriptedAdapter::new(
                ProviderKind::Mistral,
                vec![Step::Reply(Duration::from_millis(1), "Salut")],
            ),
            ScriptedAdapter::new(
                ProviderKind::Perplexity,
                vec![Step::Reply(Duration::from_secs(19), "Hola")],
            ),
        ];
        let use_case = use_case(adapters);
        let sink = RecordingSink::default();
        let selection = ["openai", "claude", "gemini", "mistral", "perplexity"];

        let report = use_case
            .fan_out(FanOutRequest::new(prompt(), selection), &sink, &NoTelemetry)
            .await
            .unwrap();

        let mut seen: Vec<String> = sink
            .arrivals()
            .iter()
            .map(|(id, _, _)| id.to_string())
            .collect();
        seen.sort();
        let mut expected: Vec<String> = selection.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(seen, expected);
        assert_eq!(report.len(), 5);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_order_follows_priority() {
        let use_case = use_case(vec![
            ScriptedAdapter::new(ProviderKind::OpenRouter, vec![Step::Reply(Duration::ZERO, "a")]),
            ScriptedAdapter::new(ProviderKind::Gemini, vec![Step::Reply(Duration::ZERO, "b")]),
        ]);
        let sink = RecordingSink::default();

        use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["openrouter", "gemini"]),
                &sink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        let dispatched = sink.dispatched.lock().unwrap().clone();
        assert_eq!(
            dispatched,
            vec![ProviderId::from("gemini"), ProviderId::from("openrouter")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_provider_fails_before_any_call() {
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, vec![Step::Reply(Duration::ZERO, "x")]);
        let use_case = use_case(vec![Arc::clone(&openai)]);
        let telemetry = CountingTelemetry::default();

        let err = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["openai", "nonexistent"]),
                &NoOutcomeSink,
                &telemetry,
            )
            .await
            .unwrap_err();

        assert_eq!(err, RequestError::UnknownProvider("nonexistent".into()));
        assert_eq!(openai.calls(), 0);
        assert!(telemetry.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_limits() {
        let use_case = use_case(vec![ScriptedAdapter::new(
            ProviderKind::Grok,
            vec![Step::Reply(Duration::ZERO, "x")],
        )]);

        let empty: [&str; 0] = [];
        let err = use_case
            .fan_out(FanOutRequest::new(prompt(), empty), &NoOutcomeSink, &NoTelemetry)
            .await
            .unwrap_err();
        assert_eq!(err, RequestError::NoProviders);

        let err = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["grok", "grok"]),
                &NoOutcomeSink,
                &NoTelemetry,
            )
            .await
            .unwrap_err();
        assert_eq!(err, RequestError::DuplicateProvider("grok".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_telemetry_recorded_once_per_provider_at_dispatch() {
        let claude = ScriptedAdapter::new(ProviderKind::Claude, vec![Step::Fail(Duration::ZERO)]);
        let grok = ScriptedAdapter::new(ProviderKind::Grok, vec![Step::Reply(Duration::ZERO, "x")]);
        let use_case = use_case(vec![claude, grok]);
        let telemetry = CountingTelemetry::default();

        use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["claude", "grok"]),
                &NoOutcomeSink,
                &telemetry,
            )
            .await
            .unwrap();

        // Retries of the failing provider are not charged again.
        let calls = telemetry.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                (ProviderId::from("claude"), 1000),
                (ProviderId::from("grok"), 1000)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_model_override_reaches_adapter() {
        let grok = ScriptedAdapter::new(ProviderKind::Grok, vec![Step::Reply(Duration::ZERO, "x")]);
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, vec![Step::Reply(Duration::ZERO, "y")]);
        let use_case = use_case(vec![Arc::clone(&grok), Arc::clone(&openai)]);

        use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["grok", "openai"]).with_model("grok", "grok-3"),
                &NoOutcomeSink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        assert_eq!(*grok.models.lock().unwrap(), vec![Some("grok-3".to_string())]);
        assert_eq!(*openai.models.lock().unwrap(), vec![None]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_settles_pending_providers() {
        let claude = ScriptedAdapter::new(ProviderKind::Claude, vec![Step::Hang]);
        let mistral = ScriptedAdapter::new(
            ProviderKind::Mistral,
            vec![Step::Reply(Duration::from_millis(10), "Salut")],
        );
        let use_case = use_case(vec![claude, mistral]);
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let report = use_case
            .fan_out(
                FanOutRequest::new(prompt(), ["claude", "mistral"]).with_cancellation(token),
                &NoOutcomeSink,
                &NoTelemetry,
            )
            .await
            .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.outcome(&"mistral".into()).and_then(CallOutcome::text),
            Some("Salut")
        );
        assert!(
            report
                .outcome(&"claude".into())
                .and_then(CallOutcome::error)
                .is_some_and(CallError::is_cancelled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_single_uses_retry_policy() {
        let deepseek = ScriptedAdapter::new(
            ProviderKind::DeepSeek,
            vec![Step::Fail(Duration::ZERO), Step::Reply(Duration::ZERO, "Sure")],
        );
        let use_case = use_case(vec![Arc::clone(&deepseek)]);

        let text = use_case
            .call_single(&"deepseek".into(), &prompt())
            .await
            .unwrap();

        assert_eq!(text, "Sure");
        assert_eq!(deepseek.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_single_unknown_provider() {
        let use_case = use_case(vec![]);
        let err = use_case
            .call_single(&"nonexistent".into(), &prompt())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CallSingleError::Request(RequestError::UnknownProvider("nonexistent".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_single_exhausted_message() {
        let registry = ProviderRegistry::new().with_provider(ScriptedAdapter::new(
            ProviderKind::Perplexity,
            vec![Step::Fail(Duration::ZERO)],
        ));
        let config = BehaviorConfig::default().with_retry(RetryPolicy::new(2, Duration::from_secs(5)));
        let use_case = CompareProvidersUseCase::new(Arc::new(registry), config);

        let err = use_case
            .call_single(&"perplexity".into(), &prompt())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Couldn't connect to Perplexity servers. Please try again."
        );
    }
}
