use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tool the agent can call, as listed by `/api/tools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's arguments, passed through untouched.
    #[serde(default)]
    pub parameters: serde_json::Value,
}

/// Errors that can occur while talking to an agent
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Agent service error: {0}")]
    Service(String),

    #[error("Invalid agent response: {0}")]
    InvalidResponse(String),

    #[error("Agent configuration error: {0}")]
    Configuration(String),
}

/// Base interface for the external agent the backend forwards work to.
///
/// The backend makes no assumptions about what happens inside `run`; it
/// only reads the descriptive fields and awaits the instruction's result.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    fn max_steps(&self) -> u32;

    fn available_tools(&self) -> &[ToolDescriptor];

    /// Run a single instruction to completion and return the final text.
    async fn run(&self, instruction: &str) -> Result<String, AgentError>;
}
