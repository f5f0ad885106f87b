use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use super::errors::SuggestError;
use super::{read_api_key, SuggestionService};
use crate::config::SuggestionSettings;

const PROVIDER: &str = "the completion service";

const INSTRUCTION: &str = "Rewrite the user's workplace message so that it uses inclusive language. \
Keep the meaning, tone and length. Reply with the rewritten message only.";

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(
        url: &str,
        model: &str,
        api_key: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, SuggestError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestError::Request {
                provider: PROVIDER,
                details: e.to_string(),
            })?;

        Ok(Self {
            http,
            url: url.to_string(),
            model: model.to_string(),
            api_key,
            max_tokens,
        })
    }

    pub fn from_settings(settings: &SuggestionSettings) -> Result<Self, SuggestError> {
        let api_key = read_api_key(settings.api_key_env())?;
        Self::new(
            settings.endpoint(),
            settings.model(),
            api_key,
            settings.max_length,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": INSTRUCTION },
                { "role": "user", "content": text },
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0,
        })
    }
}

/// Pull `choices[0].message.content` out of a chat-completions body.
pub fn parse_response(body: &str) -> Result<String, SuggestError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| SuggestError::MalformedResponse {
            provider: PROVIDER,
            details: e.to_string(),
        })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SuggestError::MalformedResponse {
            provider: PROVIDER,
            details: "no choices".to_string(),
        })?;

    match choice.message.content.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(SuggestError::EmptySuggestion),
    }
}

impl SuggestionService for CompletionClient {
    async fn suggest(&self, text: &str) -> Result<String, SuggestError> {
        info!("💬 Requesting suggestion from {} ({})", self.url, self.model);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| SuggestError::Request {
                provider: PROVIDER,
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| SuggestError::Request {
            provider: PROVIDER,
            details: e.to_string(),
        })?;

        if !status.is_success() {
            warn!("⚠️ {} returned HTTP {}", PROVIDER, status.as_u16());
            return Err(SuggestError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let client = CompletionClient::new(
            "http://localhost:8080/v1/chat/completions",
            "local-model",
            "key".to_string(),
            256,
            Duration::from_secs(5),
        )
        .unwrap();

        let body = client.request_body("Hello everyone");
        assert_eq!(body["model"], "local-model");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["temperature"], 0);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Hello everyone");
    }

    #[test]
    fn test_parse_response_content() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":" Hi team! "}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Hi team!");
    }

    #[test]
    fn test_parse_response_no_choices() {
        let err = parse_response(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, SuggestError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_response_null_content() {
        let err = parse_response(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .unwrap_err();
        assert!(matches!(err, SuggestError::EmptySuggestion));
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SuggestError::MalformedResponse { .. }));
    }

    #[test]
    fn test_from_settings_requires_api_key() {
        let settings = SuggestionSettings {
            provider: crate::suggest::Provider::Completion,
            api_key_env: Some("INCLUSIFY_TEST_COMPLETION_KEY_UNSET".to_string()),
            ..SuggestionSettings::default()
        };
        let err = CompletionClient::from_settings(&settings).unwrap_err();
        assert!(matches!(err, SuggestError::MissingApiKey { .. }));
    }
}
