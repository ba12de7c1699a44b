use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::agent::interface::{Agent, AgentError, ToolDescriptor};

/// Offline agent that echoes the instruction back.
///
/// Used for UI work when no Manus service is running.
pub struct EchoAgent {
    name: String,
    max_steps: u32,
    tools: Vec<ToolDescriptor>,
    delay: Duration,
}

impl EchoAgent {
    pub fn new() -> Self {
        Self {
            name: "Echo".to_string(),
            max_steps: 1,
            tools: vec![ToolDescriptor {
                name: "echo".to_string(),
                description: "Repeat the instruction back to the caller".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "instruction": {"type": "string"}
                    },
                    "required": ["instruction"]
                }),
            }],
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for EchoAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for EchoAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_steps(&self) -> u32 {
        self.max_steps
    }

    fn available_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn run(&self, instruction: &str) -> Result<String, AgentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!("Echo: {}", instruction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_instruction() {
        let agent = EchoAgent::new();
        assert_eq!(agent.run("hello").await.unwrap(), "Echo: hello");
        assert_eq!(agent.available_tools().len(), 1);
    }
}
