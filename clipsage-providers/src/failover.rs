//! Model failover: walk the model list when a model is rate-limited.
//!
//! [`FailoverOrchestrator`] reads the selected provider and its configuration
//! from the [`ConfigStore`] on every call. Starting at the stored model, it
//! calls each model in turn:
//!
//! - success ends the walk; if the model differs from the stored one it is
//!   persisted, so later calls start there
//! - a rate-limit error moves on to the next model
//! - any other error is returned immediately
//!
//! Providers whose descriptor disables failover make exactly one attempt.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use clipsage_core::{
    ActivitySink, ConfigStore, ProcessingAttempt, ProviderConfig, ProviderId, truncate_for_log,
};
use tracing::{debug, info, instrument, warn};

use crate::client::ProviderClient;
use crate::error::{ProviderError, Result};
use crate::registry::ProviderRegistry;

/// Longest error text copied into an activity entry.
const LOG_ERROR_CHARS: usize = 120;

// ============================================================================
// Report
// ============================================================================

/// The result of a successful failover walk.
#[derive(Debug, Clone)]
pub struct FailoverReport {
    /// Generated text.
    pub text: String,
    /// Model that produced it.
    pub model: String,
    /// Every model call made, in order.
    pub attempts: Vec<ProcessingAttempt>,
    /// Whether the answering model differs from the stored one.
    pub switched: bool,
}

impl FailoverReport {
    /// Returns the number of rate-limited attempts before the answer.
    pub fn rate_limited_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_rate_limited()).count()
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs one provider request with model failover.
pub struct FailoverOrchestrator {
    store: Arc<dyn ConfigStore>,
    activity: Arc<dyn ActivitySink>,
    clients: HashMap<ProviderId, Arc<dyn ProviderClient>>,
}

impl FailoverOrchestrator {
    /// Creates an orchestrator with the registry's default clients.
    pub fn new(store: Arc<dyn ConfigStore>, activity: Arc<dyn ActivitySink>) -> Self {
        let clients = ProviderRegistry::all()
            .iter()
            .map(|d| (d.id, d.client()))
            .collect();
        Self {
            store,
            activity,
            clients,
        }
    }

    /// Replaces the client for the client's own provider.
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn ProviderClient>) -> Self {
        self.clients.insert(client.provider(), client);
        self
    }

    /// Processes `text` with the currently selected provider.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn process(&self, text: &str) -> Result<FailoverReport> {
        let provider = self.store.selected_provider().await;
        let config = self.store.provider_config(provider).await;
        debug!(provider = %provider, start = config.start_index(), "Resolved provider configuration");
        self.run(&config, text).await
    }

    /// Processes `text` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingApiKey`] before any call when no key is set
    /// - [`ProviderError::AllModelsRateLimited`] when every model from the
    ///   start index onward is rate-limited
    /// - the first non-rate-limit error, unchanged
    #[instrument(skip(self, config, text), fields(provider = %config.provider, chars = text.chars().count()))]
    pub async fn run(&self, config: &ProviderConfig, text: &str) -> Result<FailoverReport> {
        let provider = config.provider;
        let api_key = config
            .api_key()
            .ok_or(ProviderError::MissingApiKey(provider))?;
        let client = self.client(provider)?;

        let failover = ProviderRegistry::supports_failover(provider);
        let start = config.start_index();
        let budget = if failover { config.models.len() } else { 1 };
        let mut attempts = Vec::new();

        for model in config.models.iter().skip(start).take(budget) {
            self.activity
                .info(&format!("Calling {} API ({model})...", provider.display_name()))
                .await;

            let attempt_start = Instant::now();
            match client
                .call(api_key, model, text, config.custom_instructions())
                .await
            {
                Ok(answer) => {
                    attempts.push(ProcessingAttempt::success(model, attempt_start.elapsed()));
                    let switched = config.current_model() != Some(model.as_str());
                    if switched {
                        self.persist_model(provider, model).await;
                    }
                    info!(model = %model, attempts = attempts.len(), switched, "Provider answered");
                    return Ok(FailoverReport {
                        text: answer,
                        model: model.clone(),
                        attempts,
                        switched,
                    });
                }
                Err(err) if failover && err.is_rate_limited() => {
                    warn!(model = %model, error = %err, "Model rate limited");
                    attempts.push(ProcessingAttempt::rate_limited(
                        model,
                        err.to_string(),
                        attempt_start.elapsed(),
                    ));
                    self.activity
                        .error(&format!("{model} rate limited, trying next model..."))
                        .await;
                }
                Err(err) => {
                    warn!(
                        model = %model,
                        error = %err,
                        attempts = attempts.len() + 1,
                        "Provider call failed"
                    );
                    self.activity
                        .error(&format!(
                            "{model} failed: {}",
                            truncate_for_log(&err.to_string(), LOG_ERROR_CHARS)
                        ))
                        .await;
                    return Err(err);
                }
            }
        }

        if attempts.is_empty() {
            return Err(ProviderError::NoModels(provider));
        }

        warn!(attempts = attempts.len(), "All models rate limited");
        Err(ProviderError::AllModelsRateLimited {
            attempts: attempts.into_iter().map(|a| a.model).collect(),
        })
    }

    fn client(&self, provider: ProviderId) -> Result<Arc<dyn ProviderClient>> {
        self.clients
            .get(&provider)
            .cloned()
            .ok_or(ProviderError::NoClient(provider))
    }

    async fn persist_model(&self, provider: ProviderId, model: &str) {
        match self.store.set_current_model(provider, model).await {
            Ok(()) => {
                info!(provider = %provider, model = %model, "Stored new current model");
                self.activity.success(&format!("Switched to {model}")).await;
            }
            Err(e) => {
                warn!(provider = %provider, model = %model, error = %e, "Failed to store current model");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clipsage_core::{ActivityLogEntry, CoreError, PresetSlot, Severity};
    use std::sync::Mutex;

    /// Client scripted per model: `Ok(text)` or an HTTP status.
    struct ScriptedClient {
        provider: ProviderId,
        script: HashMap<String, std::result::Result<String, u16>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(provider: ProviderId, script: &[(&str, std::result::Result<&str, u16>)]) -> Self {
            Self {
                provider,
                script: script
                    .iter()
                    .map(|(m, r)| ((*m).to_string(), r.map(str::to_string)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProviderClient for ScriptedClient {
        fn provider(&self) -> ProviderId {
            self.provider
        }

        async fn call(
            &self,
            _api_key: &str,
            model: &str,
            _text: &str,
            _custom: Option<&str>,
        ) -> Result<String> {
            self.calls.lock().unwrap().push(model.to_string());
            match self.script.get(model) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(status)) => Err(ProviderError::Api {
                    vendor: self.provider,
                    status: *status,
                    message: "scripted".to_string(),
                }),
                None => Err(ProviderError::EmptyResponse {
                    vendor: self.provider,
                }),
            }
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        stored: Mutex<Vec<(ProviderId, String)>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl ConfigStore for MemoryStore {
        async fn selected_provider(&self) -> ProviderId {
            ProviderId::Gemini
        }

        async fn provider_config(&self, provider: ProviderId) -> ProviderConfig {
            ProviderConfig::new(provider).with_api_key("k")
        }

        async fn set_current_model(
            &self,
            provider: ProviderId,
            model: &str,
        ) -> std::result::Result<(), CoreError> {
            if self.fail_writes {
                return Err(CoreError::Persistence("disk full".to_string()));
            }
            self.stored
                .lock()
                .unwrap()
                .push((provider, model.to_string()));
            Ok(())
        }

        async fn preset(&self, _slot: PresetSlot) -> Option<String> {
            None
        }
    }

    #[derive(Default)]
    struct VecSink(Mutex<Vec<ActivityLogEntry>>);

    #[async_trait]
    impl ActivitySink for VecSink {
        async fn record(&self, entry: ActivityLogEntry) {
            self.0.lock().unwrap().push(entry);
        }
    }

    fn gemini_config(models: &[&str]) -> ProviderConfig {
        ProviderConfig::new(ProviderId::Gemini)
            .with_api_key("k")
            .with_models(models.iter().copied())
    }

    fn orchestrator(
        client: Arc<ScriptedClient>,
        store: Arc<MemoryStore>,
        sink: Arc<VecSink>,
    ) -> FailoverOrchestrator {
        FailoverOrchestrator::new(store, sink).with_client(client)
    }

    #[tokio::test]
    async fn test_success_on_first_model_does_not_persist() {
        let client = Arc::new(ScriptedClient::new(ProviderId::Gemini, &[("m1", Ok("A"))]));
        let store = Arc::new(MemoryStore::default());
        let orch = orchestrator(client.clone(), store.clone(), Arc::default());

        let report = orch.run(&gemini_config(&["m1", "m2"]), "q").await.unwrap();

        assert_eq!(report.text, "A");
        assert_eq!(report.model, "m1");
        assert!(!report.switched);
        assert!(store.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited_models_are_skipped_and_winner_persisted() {
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Gemini,
            &[("m1", Err(429)), ("m2", Err(429)), ("m3", Ok("ANSWER"))],
        ));
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(VecSink::default());
        let orch = orchestrator(client.clone(), store.clone(), sink.clone());

        let report = orch.run(&gemini_config(&["m1", "m2", "m3"]), "q").await.unwrap();

        assert_eq!(report.text, "ANSWER");
        assert_eq!(report.model, "m3");
        assert!(report.switched);
        assert_eq!(report.rate_limited_count(), 2);
        assert_eq!(client.calls(), vec!["m1", "m2", "m3"]);
        assert_eq!(
            *store.stored.lock().unwrap(),
            vec![(ProviderId::Gemini, "m3".to_string())]
        );

        let entries = sink.0.lock().unwrap();
        assert!(entries.iter().any(|e| e.message == "m1 rate limited, trying next model..."));
        assert!(entries
            .iter()
            .any(|e| e.severity == Severity::Success && e.message == "Switched to m3"));
    }

    #[tokio::test]
    async fn test_all_rate_limited() {
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Gemini,
            &[("m1", Err(429)), ("m2", Err(429))],
        ));
        let orch = orchestrator(client.clone(), Arc::default(), Arc::default());

        let err = orch.run(&gemini_config(&["m1", "m2"]), "q").await.unwrap_err();

        match err {
            ProviderError::AllModelsRateLimited { attempts } => {
                assert_eq!(attempts, vec!["m1", "m2"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_error_stops_walk() {
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Gemini,
            &[("m1", Err(401)), ("m2", Ok("never"))],
        ));
        let orch = orchestrator(client.clone(), Arc::default(), Arc::default());

        let err = orch.run(&gemini_config(&["m1", "m2"]), "q").await.unwrap_err();

        assert!(matches!(err, ProviderError::Api { status: 401, .. }));
        assert_eq!(client.calls(), vec!["m1"]);
    }

    #[tokio::test]
    async fn test_walk_starts_at_stored_model() {
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Gemini,
            &[("m1", Ok("first")), ("m2", Err(429)), ("m3", Ok("third"))],
        ));
        let store = Arc::new(MemoryStore::default());
        let orch = orchestrator(client.clone(), store.clone(), Arc::default());

        let config = gemini_config(&["m1", "m2", "m3"]).with_current_model("m2");
        let report = orch.run(&config, "q").await.unwrap();

        // Earlier models are never retried.
        assert_eq!(client.calls(), vec!["m2", "m3"]);
        assert_eq!(report.model, "m3");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let client = Arc::new(ScriptedClient::new(ProviderId::Groq, &[]));
        let orch = orchestrator(client.clone(), Arc::default(), Arc::default());

        let config = ProviderConfig::new(ProviderId::Groq);
        let err = orch.run(&config, "q").await.unwrap_err();

        assert!(matches!(err, ProviderError::MissingApiKey(ProviderId::Groq)));
        assert!(err.to_string().contains("API key"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_groq_makes_single_attempt() {
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Groq,
            &[("g1", Err(429)), ("g2", Ok("never"))],
        ));
        let orch = orchestrator(client.clone(), Arc::default(), Arc::default());

        let config = ProviderConfig::new(ProviderId::Groq)
            .with_api_key("gsk")
            .with_models(["g1", "g2"]);
        let err = orch.run(&config, "q").await.unwrap_err();

        assert!(matches!(err, ProviderError::Api { status: 429, .. }));
        assert_eq!(client.calls(), vec!["g1"]);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_not_fatal() {
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Gemini,
            &[("m1", Err(429)), ("m2", Ok("ok"))],
        ));
        let store = Arc::new(MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        });
        let orch = orchestrator(client, store, Arc::default());

        let report = orch.run(&gemini_config(&["m1", "m2"]), "q").await.unwrap();
        assert_eq!(report.text, "ok");
    }

    #[tokio::test]
    async fn test_process_reads_selection_from_store() {
        let default_model = ProviderId::Gemini.default_models()[0];
        let client = Arc::new(ScriptedClient::new(
            ProviderId::Gemini,
            &[(default_model, Ok("from store"))],
        ));
        let orch = orchestrator(client.clone(), Arc::default(), Arc::default());

        let report = orch.process("q").await.unwrap();
        assert_eq!(report.text, "from store");
        assert_eq!(client.calls(), vec![default_model]);
    }
}
