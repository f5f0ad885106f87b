use std::path::PathBuf;

use clap::Parser;

use crate::checker::CheckOutcome;
use crate::rewriter::Language;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "inclusify", version, about = "Rewrites non-inclusive terms and scores the text")]
pub struct CliArgs {
    /// Language table: en, es, fr
    #[arg(short, long, value_name = "CODE")]
    pub lang: Option<Language>,

    /// Ask the configured service for a further rewrite
    #[arg(short, long, overrides_with = "no_suggest")]
    pub suggest: bool,

    /// Never contact the suggestion service
    #[arg(long, overrides_with = "suggest")]
    pub no_suggest: bool,

    /// Match replacement casing to the replaced text
    #[arg(short, long)]
    pub match_case: bool,

    /// Print the result as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Read settings from PATH
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Text to check; read from stdin when omitted
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

impl CliArgs {
    /// `Some(true)` forces suggestions on, `Some(false)` off, `None` defers to config.
    pub fn suggest_override(&self) -> Option<bool> {
        match (self.suggest, self.no_suggest) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}

/// Human-readable report of a check.
pub fn render(outcome: &CheckOutcome) -> String {
    let rewrite = &outcome.rewrite;
    let mut out = String::new();

    out.push_str(&rewrite.rewritten_text);
    if !rewrite.rewritten_text.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&format!("\nInclusivity score: {}\n", rewrite.formatted_score()));

    if rewrite.is_clean() {
        out.push_str("No non-inclusive terms found.\n");
    } else {
        out.push_str(&format!(
            "Replaced {} of {} words:\n",
            rewrite.non_inclusive_count, rewrite.total_word_count
        ));
        for flagged in &rewrite.flagged {
            out.push_str(&format!("  {} -> {}\n", flagged.term, flagged.replacement));
        }
    }

    match &outcome.suggestion {
        Some(Ok(text)) => out.push_str(&format!("\nSuggested inclusive version:\n{}\n", text)),
        Some(Err(e)) => out.push_str(&format!("\nError: {}\n", e)),
        None => {}
    }

    out
}
