// MCP Dashboard - Application state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tokio::sync::RwLock;

use crate::actions::ModelActions;
use crate::catalog::{ModelsView, ResourcesView};
use crate::config::DashboardConfig;
use crate::invocation::InvocationFlow;
use crate::mcp::client::ResourceClient;
use crate::ollama::ModelRuntimeClient;
use crate::transport::Transport;

/// Central application state. Clone-friendly: everything mutable is behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub resources_client: ResourceClient,
    pub runtime_client: ModelRuntimeClient,
    /// Resource catalog as last loaded.
    pub resources: Arc<RwLock<ResourcesView>>,
    /// Model catalog plus its loading / error flags.
    pub models: Arc<RwLock<ModelsView>>,
    pub invocation: Arc<RwLock<InvocationFlow>>,
    /// Per-model pull/delete state machines.
    pub actions: ModelActions,
    pub start_time: Instant,
    /// `true` once both startup loaders have finished.
    pub ready: Arc<AtomicBool>,
}

impl AppState {
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Relaxed);
        tracing::info!("Dashboard marked as READY");
    }
}

impl AppState {
    /// Build the state around a fresh HTTP client. No request timeout is set:
    /// pulls of large models can legitimately run for a long time.
    pub fn new(config: DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: DashboardConfig, client: Client) -> Self {
        let transport = Transport::new(client);
        let resources_client = ResourceClient::new(
            transport.clone(),
            config.api_base_url.clone(),
            config.api_key.clone(),
        );
        let runtime_client =
            ModelRuntimeClient::new(transport, config.model_runtime_base_url.clone());

        tracing::info!(
            "AppState initialised: resources={} runtime={} auth={} payload_policy={}",
            config.api_base_url,
            config.model_runtime_base_url,
            if config.api_key.is_some() { "bearer" } else { "none" },
            config.payload_parse_policy,
        );

        Self {
            config: Arc::new(config),
            actions: ModelActions::new(runtime_client.clone()),
            resources_client,
            runtime_client,
            resources: Arc::new(RwLock::new(ResourcesView::default())),
            models: Arc::new(RwLock::new(ModelsView::default())),
            invocation: Arc::new(RwLock::new(InvocationFlow::default())),
            start_time: Instant::now(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }
}
