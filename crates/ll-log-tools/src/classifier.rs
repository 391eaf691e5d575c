//! Line significance classifiers.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::error::{LogError, LogResult};

/// Keywords that mark a line as diagnostically significant.
pub const DEFAULT_KEYWORDS: &str = "error|exception|warn|fail|caused by|critical";

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| build_pattern(DEFAULT_KEYWORDS).expect("default keyword pattern compiles"));

fn build_pattern(keywords: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("({keywords})"))
        .case_insensitive(true)
        .build()
}

/// Decides whether a single log line is worth showing to the analyzer.
///
/// Implementations must be pure: the same line always classifies the same way.
pub trait LineClassifier: Send + Sync {
    fn is_significant(&self, line: &str) -> bool;

    /// Name of this classifier (for logging).
    fn name(&self) -> &str;
}

/// Case-insensitive substring match against a keyword alternation.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    pattern: Regex,
}

impl KeywordClassifier {
    /// Build a classifier from a `|`-separated keyword alternation.
    pub fn new(keywords: &str) -> LogResult<Self> {
        let pattern = build_pattern(keywords).map_err(|e| LogError::Regex(e.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl LineClassifier for KeywordClassifier {
    fn is_significant(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
