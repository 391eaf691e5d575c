//! Log excerpting tools for LogLens.
//!
//! Reduces arbitrarily large log content to a bounded, diagnostically
//! relevant excerpt (keyword-matched lines plus a trailing context window)
//! and composes that excerpt into a single analysis prompt.

pub mod classifier;
pub mod error;
pub mod excerpt;
pub mod prompt;

// Re-export key types for convenience
pub use classifier::{KeywordClassifier, LineClassifier};
pub use error::{LogError, LogResult};
pub use excerpt::{Excerpt, ExcerptExtractor, ExcerptLimits, LineSelection};
pub use prompt::{DEFAULT_LANGUAGE, DEFAULT_LOG_KIND, DEFAULT_PERSONA, PromptBuilder};
