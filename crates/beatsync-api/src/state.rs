//! Application state.

use std::sync::Arc;

use beatsync_engine::{EngineConfig, JobRegistry, StatusPoller, TransformPipeline};
use beatsync_media::MediaStore;
use beatsync_provider::{ProviderConfig, RunwayClient, ScriptClient, VideoGeneration};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub engine_config: EngineConfig,
    pub script: Arc<ScriptClient>,
    pub provider: Arc<dyn VideoGeneration>,
    pub registry: JobRegistry,
    pub poller: Arc<StatusPoller>,
    pub store: MediaStore,
}

impl AppState {
    /// Create new application state from the environment.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let provider_config = ProviderConfig::from_env();
        let engine_config = EngineConfig::from_env();

        let store = MediaStore::new(&engine_config.work_dir, &engine_config.processed_dir);
        store.init().await?;

        let script = Arc::new(ScriptClient::new(&provider_config)?);
        let provider: Arc<dyn VideoGeneration> = Arc::new(RunwayClient::new(&provider_config)?);

        Ok(Self::assemble(config, engine_config, store, script, provider))
    }

    /// Wire the state from pre-built parts. Used by `new` and by tests that
    /// inject a fake provider.
    pub fn assemble(
        config: ApiConfig,
        engine_config: EngineConfig,
        store: MediaStore,
        script: Arc<ScriptClient>,
        provider: Arc<dyn VideoGeneration>,
    ) -> Self {
        let registry = JobRegistry::new();
        let pipeline = TransformPipeline::new(registry.clone(), store.clone(), &engine_config);
        let poller = Arc::new(StatusPoller::new(
            Arc::clone(&provider),
            registry.clone(),
            pipeline,
        ));

        Self {
            config,
            engine_config,
            script,
            provider,
            registry,
            poller,
            store,
        }
    }
}
