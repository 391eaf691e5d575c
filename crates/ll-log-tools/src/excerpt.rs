//! Excerpt extraction: pick the lines of a log worth sending to the analyzer.
//!
//! The line block is either the first `max_lines` significant lines (trimmed,
//! in original order) or, when nothing is significant, the last `max_lines`
//! lines of the raw split. A trailing character window of the raw content is
//! always produced alongside it.

use crate::classifier::{KeywordClassifier, LineClassifier};
use crate::error::{LogError, LogResult};

/// Default cap on the number of lines in the line block.
pub const DEFAULT_MAX_LINES: usize = 50;

/// Default size of the trailing context window, in characters.
pub const DEFAULT_TAIL_CHARS: usize = 3000;

/// Size bounds applied by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcerptLimits {
    pub max_lines: usize,
    pub tail_chars: usize,
}

impl ExcerptLimits {
    pub fn new(max_lines: usize, tail_chars: usize) -> LogResult<Self> {
        if max_lines == 0 {
            return Err(LogError::Limits("max_lines must be at least 1".into()));
        }
        Ok(Self {
            max_lines,
            tail_chars,
        })
    }
}

impl Default for ExcerptLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            tail_chars: DEFAULT_TAIL_CHARS,
        }
    }
}

/// Which rule produced the line block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSelection {
    /// Lines matched by the classifier.
    Significant,
    /// No line matched; the last lines of the log were used instead.
    Fallback,
}

impl LineSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSelection::Significant => "significant",
            LineSelection::Fallback => "fallback",
        }
    }
}

/// Bounded, diagnostically relevant view of a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub lines: Vec<String>,
    pub selection: LineSelection,
    /// Last `min(tail_chars, len)` characters of the raw content.
    pub tail: String,
}

/// Reduces raw log content to an [`Excerpt`].
pub struct ExcerptExtractor {
    classifier: Box<dyn LineClassifier>,
    limits: ExcerptLimits,
}

impl ExcerptExtractor {
    pub fn new(classifier: Box<dyn LineClassifier>, limits: ExcerptLimits) -> Self {
        Self { classifier, limits }
    }

    pub fn extract(&self, content: &str) -> Excerpt {
        let lines: Vec<&str> = content.split('\n').collect();

        let mut significant = Vec::new();
        for line in &lines {
            if self.classifier.is_significant(line) {
                significant.push(line.trim().to_string());
                if significant.len() >= self.limits.max_lines {
                    break;
                }
            }
        }

        let (block, selection) = if significant.is_empty() {
            let start = lines.len().saturating_sub(self.limits.max_lines);
            let fallback = lines[start..].iter().map(|l| l.to_string()).collect();
            (fallback, LineSelection::Fallback)
        } else {
            (significant, LineSelection::Significant)
        };

        tracing::debug!(
            classifier = self.classifier.name(),
            total_lines = lines.len(),
            selected = block.len(),
            selection = selection.as_str(),
            "extracted excerpt"
        );

        Excerpt {
            lines: block,
            selection,
            tail: tail_chars(content, self.limits.tail_chars).to_string(),
        }
    }
}

impl Default for ExcerptExtractor {
    fn default() -> Self {
        Self::new(
            Box::new(KeywordClassifier::default()),
            ExcerptLimits::default(),
        )
    }
}

/// Last `count` characters of `content`, never splitting a UTF-8 sequence.
fn tail_chars(content: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match content.char_indices().rev().nth(count - 1) {
        Some((start, _)) => &content[start..],
        None => content,
    }
}
