//! Optional rewrite suggestions from a hosted language model
//!
//! - `errors`: failure modes of the remote call
//! - `huggingface`: Hugging Face inference API (summarization models)
//! - `completion`: OpenAI-compatible chat completions

pub mod completion;
pub mod errors;
pub mod huggingface;

pub use completion::CompletionClient;
pub use errors::SuggestError;
pub use huggingface::HuggingFaceClient;

use crate::config::SuggestionSettings;

/// A service that takes prose and returns further-rewritten prose.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait SuggestionService {
    async fn suggest(&self, text: &str) -> Result<String, SuggestError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    HuggingFace,
    Completion,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::HuggingFace => "huggingface",
            Provider::Completion => "completion",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "huggingface" | "hugging-face" | "hf" => Some(Provider::HuggingFace),
            "completion" | "openai" => Some(Provider::Completion),
            _ => None,
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            Provider::HuggingFace => "https://api-inference.huggingface.co",
            Provider::Completion => "https://api.openai.com/v1/chat/completions",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::HuggingFace => "facebook/bart-large-cnn",
            Provider::Completion => "gpt-4o-mini",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            Provider::HuggingFace => "HUGGINGFACE_API_KEY",
            Provider::Completion => "OPENAI_API_KEY",
        }
    }
}

/// Read an API key from the environment. Blank values count as missing.
pub fn read_api_key(var: &str) -> Result<String, SuggestError> {
    std::env::var(var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| SuggestError::MissingApiKey {
            var: var.to_string(),
        })
}

/// The configured suggestion backend.
#[derive(Debug)]
pub enum Suggester {
    HuggingFace(HuggingFaceClient),
    Completion(CompletionClient),
}

impl Suggester {
    pub fn from_settings(settings: &SuggestionSettings) -> Result<Self, SuggestError> {
        match settings.provider {
            Provider::HuggingFace => HuggingFaceClient::from_settings(settings).map(Suggester::HuggingFace),
            Provider::Completion => CompletionClient::from_settings(settings).map(Suggester::Completion),
        }
    }
}

impl SuggestionService for Suggester {
    async fn suggest(&self, text: &str) -> Result<String, SuggestError> {
        match self {
            Suggester::HuggingFace(client) => client.suggest(text).await,
            Suggester::Completion(client) => client.suggest(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("huggingface"), Some(Provider::HuggingFace));
        assert_eq!(Provider::parse("HF"), Some(Provider::HuggingFace));
        assert_eq!(Provider::parse("OpenAI"), Some(Provider::Completion));
        assert_eq!(Provider::parse("ollama"), None);
        for provider in [Provider::HuggingFace, Provider::Completion] {
            assert_eq!(Provider::parse(provider.as_str()), Some(provider));
        }
    }

    #[test]
    fn test_read_api_key() {
        std::env::set_var("INCLUSIFY_TEST_READ_KEY", "  secret  ");
        assert_eq!(read_api_key("INCLUSIFY_TEST_READ_KEY").unwrap(), "secret");

        std::env::set_var("INCLUSIFY_TEST_BLANK_KEY", "   ");
        assert!(matches!(
            read_api_key("INCLUSIFY_TEST_BLANK_KEY"),
            Err(SuggestError::MissingApiKey { .. })
        ));

        assert!(read_api_key("INCLUSIFY_TEST_NEVER_SET_KEY").is_err());
    }

    #[test]
    fn test_suggester_from_settings_selects_provider() {
        std::env::set_var("INCLUSIFY_TEST_SUGGESTER_KEY", "key");
        let mut settings = SuggestionSettings {
            api_key_env: Some("INCLUSIFY_TEST_SUGGESTER_KEY".to_string()),
            ..SuggestionSettings::default()
        };
        assert!(matches!(
            Suggester::from_settings(&settings).unwrap(),
            Suggester::HuggingFace(_)
        ));

        settings.provider = Provider::Completion;
        assert!(matches!(
            Suggester::from_settings(&settings).unwrap(),
            Suggester::Completion(_)
        ));
    }

    #[tokio::test]
    async fn test_mock_service() {
        let mut mock = MockSuggestionService::new();
        mock.expect_suggest()
            .withf(|text| text.trim() == "Hello everyone")
            .returning(|_| Ok("Hi all".to_string()));

        assert_eq!(mock.suggest("Hello everyone").await.unwrap(), "Hi all");
    }
}
