use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::agent::{AgentFactory, AgentHandle, ConfiguredAgentFactory};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agent: AgentHandle,
    pub web_dir: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let factory: Arc<dyn AgentFactory> =
            Arc::new(ConfiguredAgentFactory::new(config.agent.clone()));
        Self::with_agent(config, AgentHandle::new(factory))
    }

    pub fn with_agent(config: Config, agent: AgentHandle) -> Self {
        let web_dir = PathBuf::from(&config.server.web_dir);
        Self {
            config: Arc::new(config),
            agent,
            web_dir,
        }
    }

    /// Build the agent now instead of on first request. Failure is logged
    /// and left for the next request to retry.
    pub async fn warm_up(&self) {
        match self.agent.get().await {
            Ok(agent) => info!("Agent '{}' initialized", agent.name()),
            Err(e) => warn!("Failed to initialize agent at startup: {}", e),
        }
    }
}
