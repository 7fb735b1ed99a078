//! Notes-service client
//!
//! Thin HTTP client for the pad-style notes service the digest is published
//! to. The service exposes a single create endpoint that returns the
//! identifier of the new pad.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::config::NotesConfig;
use crate::error::RemoteError;
use crate::gateway::NotesGateway;

/// Notes-service client wrapper
pub struct NotesClient {
    http: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct CreateDocumentResponse {
    #[serde(rename = "padId")]
    pad_id: String,
}

impl NotesClient {
    /// Create a client with an explicit base URL and token.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Create a client from configuration, reading the API token from the
    /// configured environment variable.
    pub fn from_config(config: &NotesConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(anyhow!(
                "notes.base_url is not configured. Run: issuepad init"
            ));
        }

        let token = env::var(&config.token_env).with_context(|| {
            format!("{} environment variable not set", config.token_env)
        })?;

        if token.is_empty() {
            return Err(anyhow!("{} is empty", config.token_env));
        }

        Ok(Self::new(&config.base_url, &token))
    }
}

#[async_trait]
impl NotesGateway for NotesClient {
    async fn create_document(&self, title: &str, body: &str) -> Result<String, RemoteError> {
        let url = format!("{}/api/1.0/pad/create", self.base_url);

        debug!("Creating document at: {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "title": title,
                "content": body,
            }))
            .send()
            .await
            .map_err(|e| RemoteError::Notes(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Notes(format!(
                "create returned status {}",
                status
            )));
        }

        let created: CreateDocumentResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Notes(format!("invalid create response: {}", e)))?;

        Ok(created.pad_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_document_returns_pad_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/1.0/pad/create"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(serde_json::json!({
                "title": "Active Projects: Week of March 3rd, 2024",
                "content": "sc3\n- Ship it\n",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "padId": "pad-123",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = NotesClient::new(&server.uri(), "secret");
        let pad_id = client
            .create_document(
                "Active Projects: Week of March 3rd, 2024",
                "sc3\n- Ship it\n",
            )
            .await
            .expect("create failed");

        assert_eq!(pad_id, "pad-123");
    }

    #[tokio::test]
    async fn test_create_document_maps_http_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/1.0/pad/create"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = NotesClient::new(&server.uri(), "secret");
        let result = client.create_document("title", "body").await;

        assert!(matches!(result, Err(RemoteError::Notes(_))));
    }

    #[tokio::test]
    async fn test_create_document_rejects_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/1.0/pad/create"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let client = NotesClient::new(&server.uri(), "secret");
        let result = client.create_document("title", "body").await;

        assert!(matches!(result, Err(RemoteError::Notes(_))));
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let config = NotesConfig::default();
        assert!(NotesClient::from_config(&config).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = NotesClient::new("https://pads.example.org/", "secret");
        assert_eq!(client.base_url, "https://pads.example.org");
    }
}
