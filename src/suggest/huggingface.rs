use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::errors::SuggestError;
use super::{read_api_key, SuggestionService};
use crate::config::SuggestionSettings;

const PROVIDER: &str = "Hugging Face";

/// Generation parameters sent with every summarization request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryParameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for SummaryParameters {
    fn default() -> Self {
        Self {
            max_length: 500,
            min_length: 100,
            do_sample: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

/// Client for the Hugging Face hosted inference API.
#[derive(Debug)]
pub struct HuggingFaceClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    parameters: SummaryParameters,
}

impl HuggingFaceClient {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: String,
        parameters: SummaryParameters,
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
            url: model_url(endpoint, model),
            api_key,
            parameters,
        })
    }

    pub fn from_settings(settings: &SuggestionSettings) -> Result<Self, SuggestError> {
        let api_key = read_api_key(settings.api_key_env())?;
        let parameters = SummaryParameters {
            max_length: settings.max_length,
            min_length: settings.min_length,
            do_sample: false,
        };
        Self::new(
            settings.endpoint(),
            settings.model(),
            api_key,
            parameters,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_body(&self, text: &str) -> serde_json::Value {
        build_request(text, self.parameters)
    }
}

fn model_url(endpoint: &str, model: &str) -> String {
    format!("{}/models/{}", endpoint.trim_end_matches('/'), model.trim_matches('/'))
}

fn build_request(text: &str, parameters: SummaryParameters) -> serde_json::Value {
    serde_json::json!({
        "inputs": text,
        "parameters": parameters,
    })
}

/// Extract the first summary from a `[{"summary_text": ...}]` body.
pub fn parse_response(body: &str) -> Result<String, SuggestError> {
    let items: Vec<SummaryItem> =
        serde_json::from_str(body).map_err(|e| SuggestError::MalformedResponse {
            provider: PROVIDER,
            details: e.to_string(),
        })?;

    let first = items
        .into_iter()
        .next()
        .ok_or_else(|| SuggestError::MalformedResponse {
            provider: PROVIDER,
            details: "empty result list".to_string(),
        })?;

    let text = first.summary_text.trim();
    if text.is_empty() {
        return Err(SuggestError::EmptySuggestion);
    }
    Ok(text.to_string())
}

impl SuggestionService for HuggingFaceClient {
    async fn suggest(&self, text: &str) -> Result<String, SuggestError> {
        info!("🤗 Requesting suggestion from {}", self.url);

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

    fn client() -> HuggingFaceClient {
        HuggingFaceClient::new(
            "https://api-inference.huggingface.co/",
            "facebook/bart-large-cnn",
            "test-key".to_string(),
            SummaryParameters::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_model_url() {
        assert_eq!(
            client().url(),
            "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = client().request_body("hello everyone");
        assert_eq!(
            body,
            serde_json::json!({
                "inputs": "hello everyone",
                "parameters": {
                    "max_length": 500,
                    "min_length": 100,
                    "do_sample": false
                }
            })
        );
    }

    #[test]
    fn test_parse_response_summary_text() {
        let body = r#"[{"summary_text": "  Everyone worked hard.  "}]"#;
        assert_eq!(parse_response(body).unwrap(), "Everyone worked hard.");
    }

    #[test]
    fn test_parse_response_generated_text_alias() {
        let body = r#"[{"generated_text": "Team, let's go."}]"#;
        assert_eq!(parse_response(body).unwrap(), "Team, let's go.");
    }

    #[test]
    fn test_parse_response_takes_first_item() {
        let body = r#"[{"summary_text": "one"}, {"summary_text": "two"}]"#;
        assert_eq!(parse_response(body).unwrap(), "one");
    }

    #[test]
    fn test_parse_response_malformed() {
        for body in ["", "{\"error\": \"Model is loading\"}", "[{\"label\": 1}]", "[]"] {
            let err = parse_response(body).unwrap_err();
            assert!(
                matches!(err, SuggestError::MalformedResponse { .. }),
                "unexpected {:?} for {:?}",
                err,
                body
            );
        }
    }

    #[test]
    fn test_parse_response_blank_summary() {
        let err = parse_response(r#"[{"summary_text": "   "}]"#).unwrap_err();
        assert!(matches!(err, SuggestError::EmptySuggestion));
    }

    #[test]
    fn test_from_settings_requires_api_key() {
        let settings = SuggestionSettings {
            api_key_env: Some("INCLUSIFY_TEST_HF_KEY_UNSET".to_string()),
            ..SuggestionSettings::default()
        };
        let err = HuggingFaceClient::from_settings(&settings).unwrap_err();
        assert!(matches!(err, SuggestError::MissingApiKey { .. }));
        assert!(err.to_string().contains("INCLUSIFY_TEST_HF_KEY_UNSET"));
    }

    #[test]
    fn test_from_settings_uses_configured_lengths() {
        std::env::set_var("INCLUSIFY_TEST_HF_KEY_SET", "hf_test");
        let settings = SuggestionSettings {
            api_key_env: Some("INCLUSIFY_TEST_HF_KEY_SET".to_string()),
            max_length: 200,
            min_length: 20,
            ..SuggestionSettings::default()
        };
        let client = HuggingFaceClient::from_settings(&settings).unwrap();
        let body = client.request_body("x");
        assert_eq!(body["parameters"]["max_length"], 200);
        assert_eq!(body["parameters"]["min_length"], 20);
    }
}
