/// Errors from the external rewrite-suggestion service
#[derive(Clone, Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("API key not set - export {var} to enable suggestions")]
    MissingApiKey { var: String },

    #[error("Request to {provider} failed: {details}")]
    Request { provider: &'static str, details: String },

    #[error("Failed to fetch response from {provider} (HTTP {status})")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {provider}: {details}")]
    MalformedResponse { provider: &'static str, details: String },

    #[error("Suggestion service returned no text")]
    EmptySuggestion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SuggestError::Status {
            provider: "Hugging Face",
            status: 503,
            body: "{\"error\":\"loading\"}".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch response from Hugging Face (HTTP 503)"
        );

        let error = SuggestError::MissingApiKey {
            var: "HUGGINGFACE_API_KEY".to_string(),
        };
        assert!(error.to_string().contains("HUGGINGFACE_API_KEY"));
    }

    #[test]
    fn test_all_error_variants() {
        let errors = vec![
            SuggestError::MissingApiKey { var: "X".to_string() },
            SuggestError::Request { provider: "p", details: "timeout".to_string() },
            SuggestError::Status { provider: "p", status: 500, body: String::new() },
            SuggestError::MalformedResponse { provider: "p", details: "eof".to_string() },
            SuggestError::EmptySuggestion,
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
