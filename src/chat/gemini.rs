//! Gemini `generateContent` client.
//!
//! ```text
//! POST {base_url}/v1beta/models/{model}:generateContent
//! {
//!   "systemInstruction": { "parts": [{ "text": <role instruction> }] },
//!   "contents": [{ "role": "user", "parts": [{ "text": <message> }] }]
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ChatCollaborator;
use crate::config::ChatConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseCandidate {
    pub content: Option<Content>,
}

/// Response body (only the fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        Some(text)
    }
}

/// Build the request body for one user message.
pub fn request_body(message: &str, role_instruction: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: role_instruction.to_string(),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: message.to_string(),
            }],
        }],
    }
}

/// Hosted chat collaborator backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ChatConfig,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client. The API key is resolved from config or environment.
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self {
            http: builder.build()?,
            config: config.clone(),
            api_key: config.resolve_api_key(),
        })
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full endpoint URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn try_generate(&self, message: &str, role_instruction: &str) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("no Gemini API key configured".into()))?;

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(message, role_instruction))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.text())
    }
}

#[async_trait]
impl ChatCollaborator for GeminiClient {
    async fn generate_reply(&self, message: &str, role_instruction: &str) -> String {
        match self.try_generate(message, role_instruction).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                debug!(chars = text.len(), "chat reply received");
                text
            }
            Ok(_) => self.config.empty_reply.clone(),
            Err(e) => {
                warn!(error = %e, model = %self.config.model, "chat call failed");
                self.config.fallback_reply.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(request_body("Hi", "You are a pirate.")).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are a pirate.");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hi");
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_response_text() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Arr, "},{"text":"matey!"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("Arr, matey!"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn test_endpoint() {
        let config = ChatConfig {
            base_url: "http://localhost:8080/".into(),
            api_key: Some("k".into()),
            ..ChatConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_returns_fallback() {
        let config = ChatConfig {
            base_url: "http://127.0.0.1:9".into(),
            api_key: Some("test-key".into()),
            timeout_secs: 5,
            ..ChatConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        let reply = client.generate_reply("Hello", "Be nice.").await;
        assert_eq!(reply, config.fallback_reply);
    }
}
