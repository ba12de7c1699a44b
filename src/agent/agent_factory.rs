use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::agent::echo::EchoAgent;
use crate::agent::interface::{Agent, AgentError};
use crate::agent::manus_client::ManusClient;
use crate::config::{AgentConfig, AgentKind};

/// Builds the agent behind an [`AgentHandle`](crate::agent::AgentHandle).
///
/// Construction may talk to the network, so it is async and fallible.
#[async_trait]
pub trait AgentFactory: Send + Sync {
    async fn create(&self) -> Result<Arc<dyn Agent>, AgentError>;
}

/// Factory for creating agent instances from configuration
pub struct ConfiguredAgentFactory {
    config: AgentConfig,
}

impl ConfiguredAgentFactory {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AgentFactory for ConfiguredAgentFactory {
    async fn create(&self) -> Result<Arc<dyn Agent>, AgentError> {
        info!("Initializing agent: {:?}", self.config.kind);

        match self.config.kind {
            AgentKind::Manus => {
                let timeout = self.config.timeout_secs.map(Duration::from_secs);
                let client = ManusClient::connect(&self.config.base_url, timeout).await?;
                info!(
                    "Connected to agent '{}' at {} ({} tools)",
                    client.name(),
                    client.base_url(),
                    client.available_tools().len()
                );
                Ok(Arc::new(client))
            }
            AgentKind::Echo => Ok(Arc::new(EchoAgent::new())),
        }
    }
}
