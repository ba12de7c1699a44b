use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::agent::interface::{Agent, AgentError, ToolDescriptor};

/// HTTP client for a Manus agent service.
///
/// Descriptive fields are fetched once in [`ManusClient::connect`] and kept
/// for the lifetime of the client; only `run` goes back to the service.
#[derive(Debug, Clone)]
pub struct ManusClient {
    client: Client,
    base_url: String,
    info: AgentInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub max_steps: u32,
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunRequest {
    pub instruction: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ManusClient {
    pub async fn connect(base_url: &str, timeout: Option<Duration>) -> Result<Self, AgentError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AgentError::Configuration(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}/agent/info", base_url);
        debug!("Fetching agent info from {}", url);

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AgentError::Service(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let info: AgentInfo = response
            .json()
            .await
            .map_err(|e| AgentError::InvalidResponse(e.to_string()))?;

        Ok(Self { client, base_url, info })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Agent for ManusClient {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn max_steps(&self) -> u32 {
        self.info.max_steps
    }

    fn available_tools(&self) -> &[ToolDescriptor] {
        &self.info.tools
    }

    async fn run(&self, instruction: &str) -> Result<String, AgentError> {
        let url = format!("{}/agent/run", self.base_url);
        let request = RunRequest {
            instruction: instruction.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        let body: RunResponse = match response.json().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(AgentError::Service(format!("POST {} returned {}", url, status)));
            }
            Err(e) => return Err(AgentError::InvalidResponse(e.to_string())),
        };

        if let Some(error) = body.error {
            return Err(AgentError::Service(error));
        }
        if !status.is_success() {
            return Err(AgentError::Service(format!("POST {} returned {}", url, status)));
        }

        body.response
            .ok_or_else(|| AgentError::InvalidResponse("missing `response` field".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO_BODY: &str = r#"{
        "name": "Manus",
        "max_steps": 20,
        "tools": [
            {"name": "python_execute", "description": "Run Python code", "parameters": {"type": "object"}},
            {"name": "terminate", "description": "Finish the task"}
        ]
    }"#;

    async fn info_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/agent/info")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(INFO_BODY)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn connect_reads_agent_info() {
        let mut server = mockito::Server::new_async().await;
        let mock = info_mock(&mut server).await;

        let client = ManusClient::connect(&server.url(), None).await.unwrap();
        mock.assert_async().await;

        assert_eq!(client.name(), "Manus");
        assert_eq!(client.max_steps(), 20);
        assert_eq!(client.available_tools().len(), 2);
        assert_eq!(client.available_tools()[0].name, "python_execute");
        assert!(client.available_tools()[1].parameters.is_null());
    }

    #[tokio::test]
    async fn connect_fails_on_service_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/agent/info")
            .with_status(503)
            .create_async()
            .await;

        let err = ManusClient::connect(&server.url(), None).await.unwrap_err();
        assert!(matches!(err, AgentError::Service(_)));
    }

    #[tokio::test]
    async fn run_posts_instruction() {
        let mut server = mockito::Server::new_async().await;
        let _info = info_mock(&mut server).await;
        let run = server
            .mock("POST", "/agent/run")
            .match_body(mockito::Matcher::Json(serde_json::json!({"instruction": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "hi there"}"#)
            .create_async()
            .await;

        let client = ManusClient::connect(&server.url(), None).await.unwrap();
        let text = client.run("hello").await.unwrap();
        run.assert_async().await;
        assert_eq!(text, "hi there");
    }

    #[tokio::test]
    async fn run_surfaces_error_body() {
        let mut server = mockito::Server::new_async().await;
        let _info = info_mock(&mut server).await;
        let _run = server
            .mock("POST", "/agent/run")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "step limit reached"}"#)
            .create_async()
            .await;

        let client = ManusClient::connect(&server.url(), None).await.unwrap();
        match client.run("hello").await {
            Err(AgentError::Service(msg)) => assert_eq!(msg, "step limit reached"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let err = ManusClient::connect("http://127.0.0.1:1", Some(Duration::from_secs(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Network(_)));
    }
}
