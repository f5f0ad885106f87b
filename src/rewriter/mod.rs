//! Inclusive-language rewriting
//!
//! - `tokenizer`: lossless word-boundary split
//! - `case`: position-by-position case matching
//! - `tables`: per-language replacement tables

pub mod case;
pub mod tables;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use case::match_case;
pub use tables::{Language, ReplacementTable};
pub use tokenizer::tokenize;

/// How a replacement is cased when it is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseMode {
    /// Emit the replacement exactly as stored in the table.
    #[default]
    Verbatim,
    /// Align the replacement's case with the text it replaces.
    MatchSource,
}

impl CaseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseMode::Verbatim => "verbatim",
            CaseMode::MatchSource => "match-source",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "verbatim" => Some(CaseMode::Verbatim),
            "match-source" | "match_source" => Some(CaseMode::MatchSource),
            _ => None,
        }
    }
}

/// A flagged term found in the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTerm {
    /// The term as written in the input.
    pub term: String,
    /// What was emitted in its place.
    pub replacement: String,
    /// Byte offset of the term in the input.
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    pub rewritten_text: String,
    pub non_inclusive_count: usize,
    pub total_word_count: usize,
    pub score: f64,
    pub flagged: Vec<FlaggedTerm>,
}

impl RewriteResult {
    /// Score with two decimals, e.g. `50.00`.
    pub fn formatted_score(&self) -> String {
        format!("{:.2}", self.score)
    }

    pub fn is_clean(&self) -> bool {
        self.non_inclusive_count == 0
    }
}

/// 0 when there are no words, otherwise the share of words that were not
/// flagged, as a percentage.
pub fn inclusivity_score(non_inclusive: usize, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    let flagged_share = non_inclusive as f64 / total_words as f64 * 100.0;
    (100.0 - flagged_share).clamp(0.0, 100.0)
}

/// Single-pass term rewriter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rewriter {
    case_mode: CaseMode,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_mode(case_mode: CaseMode) -> Self {
        Self { case_mode }
    }

    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    pub fn rewrite(&self, text: &str, table: &ReplacementTable) -> RewriteResult {
        let tokens = tokenize(text);
        let total_word_count = tokens.iter().filter(|t| tokenizer::is_countable(t)).count();

        let mut rewritten_text = String::with_capacity(text.len());
        let mut flagged = Vec::new();
        let mut offset = 0;
        let mut i = 0;

        while i < tokens.len() {
            match longest_match(&tokens[i..], table) {
                Some((span, replacement)) => {
                    let source = tokens[i..i + span].concat();
                    let emitted = match self.case_mode {
                        CaseMode::Verbatim => replacement.to_string(),
                        CaseMode::MatchSource => match_case(replacement, &source),
                    };
                    rewritten_text.push_str(&emitted);
                    let start = offset;
                    offset += source.len();
                    flagged.push(FlaggedTerm {
                        term: source,
                        replacement: emitted,
                        offset: start,
                    });
                    i += span;
                }
                None => {
                    rewritten_text.push_str(tokens[i]);
                    offset += tokens[i].len();
                    i += 1;
                }
            }
        }

        let non_inclusive_count = flagged.len();
        let score = inclusivity_score(non_inclusive_count, total_word_count);
        debug!(
            "Rewrote {} words, {} flagged, score {:.2}",
            total_word_count, non_inclusive_count, score
        );

        RewriteResult {
            rewritten_text,
            non_inclusive_count,
            total_word_count,
            score,
            flagged,
        }
    }
}

/// Longest run of tokens at the head of `tokens` whose lowercased
/// concatenation is a table key.
fn longest_match<'t>(tokens: &[&str], table: &'t ReplacementTable) -> Option<(usize, &'t str)> {
    let max_span = table.max_span().min(tokens.len());
    (1..=max_span).rev().find_map(|span| {
        let candidate = tokens[..span].concat().to_lowercase();
        table.get(&candidate).map(|replacement| (span, replacement))
    })
}

/// Rewrite `text` against `table`, emitting replacements verbatim.
pub fn rewrite(text: &str, table: &ReplacementTable) -> RewriteResult {
    Rewriter::new().rewrite(text, table)
}
