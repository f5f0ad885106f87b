use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::logging::log_error;
use crate::rewriter::{Language, ReplacementTable, RewriteResult, Rewriter};
use crate::suggest::{SuggestError, Suggester, SuggestionService};

enum Backend<S> {
    Disabled,
    Ready(S),
    Unavailable(SuggestError),
}

/// Result of one check: the local rewrite, plus the remote suggestion when
/// one was requested.
#[derive(Debug)]
pub struct CheckOutcome {
    pub language: Language,
    pub rewrite: RewriteResult,
    pub suggestion: Option<Result<String, SuggestError>>,
}

impl CheckOutcome {
    pub fn suggestion_text(&self) -> Option<&str> {
        match &self.suggestion {
            Some(Ok(text)) => Some(text),
            _ => None,
        }
    }

    pub fn suggestion_error(&self) -> Option<&SuggestError> {
        match &self.suggestion {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "language": self.language.code(),
            "rewrite": self.rewrite,
            "suggestion": self.suggestion_text(),
            "suggestionError": self.suggestion_error().map(|e| e.to_string()),
        })
    }
}

/// Runs the local rewrite and, when configured, asks a suggestion service for
/// a further rewrite of the result.
pub struct InclusivityChecker<S> {
    rewriter: Rewriter,
    /// Language tables with custom terms merged in, built once by `with_terms`.
    merged_tables: HashMap<Language, ReplacementTable>,
    backend: Backend<S>,
    error_log: Option<PathBuf>,
}

impl<S: SuggestionService> InclusivityChecker<S> {
    pub fn new(rewriter: Rewriter) -> Self {
        Self {
            rewriter,
            merged_tables: HashMap::new(),
            backend: Backend::Disabled,
            error_log: None,
        }
    }

    pub fn with_terms(mut self, terms: ReplacementTable) -> Self {
        self.merged_tables = if terms.is_empty() {
            HashMap::new()
        } else {
            Language::ALL
                .into_iter()
                .map(|lang| (lang, lang.table().merged_with(&terms)))
                .collect()
        };
        self
    }

    pub fn with_suggester(mut self, suggester: S) -> Self {
        self.backend = Backend::Ready(suggester);
        self
    }

    pub fn with_error_log(mut self, path: PathBuf) -> Self {
        self.error_log = Some(path);
        self
    }

    pub fn suggestions_enabled(&self) -> bool {
        !matches!(self.backend, Backend::Disabled)
    }

    fn table_for(&self, language: Language) -> &ReplacementTable {
        self.merged_tables
            .get(&language)
            .unwrap_or_else(|| language.table())
    }

    pub async fn check(&self, text: &str, language: Language) -> CheckOutcome {
        let table = self.table_for(language);
        let rewrite = self.rewriter.rewrite(text, table);
        info!(
            "✅ {} check: {} of {} words flagged, score {}",
            language.name(),
            rewrite.non_inclusive_count,
            rewrite.total_word_count,
            rewrite.formatted_score()
        );

        let suggestion = if text.trim().is_empty() {
            None
        } else {
            match &self.backend {
                Backend::Disabled => None,
                Backend::Unavailable(e) => {
                    self.report(e);
                    Some(Err(e.clone()))
                }
                Backend::Ready(service) => {
                    let result = service.suggest(&rewrite.rewritten_text).await;
                    if let Err(e) = &result {
                        self.report(e);
                    }
                    Some(result)
                }
            }
        };

        CheckOutcome {
            language,
            rewrite,
            suggestion,
        }
    }

    fn report(&self, e: &SuggestError) {
        error!("Suggestion failed: {}", e);
        if let SuggestError::Status { body, .. } = e {
            if !body.is_empty() {
                warn!("Response body: {}", body);
            }
        }
        if let Some(path) = &self.error_log {
            log_error(path, &format!("Suggestion failed: {}", e));
        }
    }
}

impl InclusivityChecker<Suggester> {
    /// Build a checker from config. A suggestion backend that cannot be set up
    /// (e.g. missing API key) is reported on each check instead of failing here.
    pub fn from_config(config: &Config) -> Self {
        let mut checker = Self::new(Rewriter::with_case_mode(config.case_mode))
            .with_terms(config.custom_terms())
            .with_error_log(config.log_path.clone());

        if config.suggestions.enabled {
            checker.backend = match Suggester::from_settings(&config.suggestions) {
                Ok(suggester) => {
                    info!("🔌 Suggestions enabled via {}", config.suggestions.provider.as_str());
                    Backend::Ready(suggester)
                }
                Err(e) => {
                    warn!("⚠️ Suggestions unavailable: {}", e);
                    Backend::Unavailable(e)
                }
            };
        }

        checker
    }
}
