use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

use crate::agent::ToolDescriptor;
use crate::chat_history::{self, HistoryEntry};
use crate::error::ApiError;
use crate::state::AppState;
use crate::templates::{self, Template};

pub const DEFAULT_SESSION_ID: &str = "default";

/// Served at `/` when the web directory has no `index.html`.
const FALLBACK_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Manus Web Interface</title>
</head>
<body>
  <h1>Manus Web Interface</h1>
  <p>The UI assets were not found. The API is available under <code>/api/</code>:
  <a href="/api/status">status</a>, <a href="/api/tools">tools</a>,
  <a href="/api/templates">templates</a>.</p>
</body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
    pub session_id: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractUrlResponse {
    pub response: String,
    pub url: String,
    pub success: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub agent_name: String,
    pub tools_available: usize,
    pub max_steps: u32,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDescriptor>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: BTreeMap<&'static str, Template>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: &'static [HistoryEntry],
    pub success: bool,
}

/// Instruction sent to the agent for `/api/extract-url`.
pub fn extraction_prompt(url: &str) -> String {
    format!(
        "Extract structured data from URL: {}. Write a complete script that scrapes this page and saves the data as JSON and CSV.",
        url
    )
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let invalid = || ApiError::BadRequest("request body must be a JSON object".to_string());
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|_| invalid())?;
    if !value.is_object() {
        return Err(invalid());
    }
    serde_json::from_value(value).map_err(|_| invalid())
}

/// Keep only a non-blank value.
fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let index_path = state.web_dir.join("index.html");
    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html),
        Err(e) => {
            debug!("Serving fallback shell, {:?} unavailable: {}", index_path, e);
            Html(FALLBACK_SHELL.to_string())
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let request: ChatRequest = parse_body(&body)?;
    let message = required(request.message, "message")?;
    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    info!("Processing message for session {}: {}...", session_id, preview(&message));

    let agent = state.agent.get().await.map_err(ApiError::AgentUnavailable)?;
    let response = agent.run(&message).await.map_err(ApiError::Agent)?;

    Ok(Json(ChatResponse {
        response,
        success: true,
        session_id,
        timestamp: timestamp(),
    }))
}

pub async fn extract_url(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExtractUrlResponse>, ApiError> {
    let request: ExtractUrlRequest = parse_body(&body)?;
    let url = required(request.url, "url")?;

    info!("Extracting data from URL: {}", url);

    let agent = state.agent.get().await.map_err(ApiError::AgentUnavailable)?;
    let response = agent
        .run(&extraction_prompt(&url))
        .await
        .map_err(ApiError::Agent)?;

    Ok(Json(ExtractUrlResponse {
        response,
        url,
        success: true,
        timestamp: timestamp(),
    }))
}

pub async fn status(State(state): State<AppState>) -> Response {
    match state.agent.get().await {
        Ok(agent) => Json(StatusResponse {
            status: "online",
            agent_name: agent.name().to_string(),
            tools_available: agent.available_tools().len(),
            max_steps: agent.max_steps(),
            success: true,
        })
        .into_response(),
        Err(e) => {
            error!("Agent initialization failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "error": "agent is unavailable",
                    "success": false,
                })),
            )
                .into_response()
        }
    }
}

pub async fn tools(State(state): State<AppState>) -> Result<Json<ToolsResponse>, ApiError> {
    let agent = state.agent.get().await.map_err(ApiError::AgentUnavailable)?;
    Ok(Json(ToolsResponse {
        tools: agent.available_tools().to_vec(),
        success: true,
    }))
}

pub async fn get_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: templates::templates(),
        success: true,
    })
}

pub async fn get_history() -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: chat_history::history(),
        success: true,
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_embeds_url() {
        assert_eq!(
            extraction_prompt("https://example.com"),
            "Extract structured data from URL: https://example.com. Write a complete script that scrapes this page and saves the data as JSON and CSV."
        );
    }

    #[test]
    fn blank_values_are_missing() {
        assert!(required(None, "message").is_err());
        assert!(required(Some("   ".to_string()), "message").is_err());
        assert_eq!(required(Some("hi".to_string()), "message").unwrap(), "hi");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let text = "é".repeat(150);
        assert_eq!(preview(&text).chars().count(), 100);
    }
}
