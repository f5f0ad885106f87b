//! Inclusive-language checker
//!
//! Rewrites flagged workplace terms with inclusive alternatives, scores the
//! text, and can ask a hosted language model for a further rewrite.
//!
//! ```
//! use inclusify::rewriter::{rewrite, Language};
//!
//! let result = rewrite("Hello guys", Language::En.table());
//! assert_eq!(result.rewritten_text, "Hello everyone");
//! assert_eq!(result.formatted_score(), "50.00");
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod rewriter;
pub mod suggest;

pub use checker::{CheckOutcome, InclusivityChecker};
pub use error::{AppError, Result};
pub use rewriter::{rewrite, Language, ReplacementTable, RewriteResult, Rewriter};
