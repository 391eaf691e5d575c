//! Prompt composition for log analysis requests.

use crate::excerpt::Excerpt;

pub const DEFAULT_PERSONA: &str = "an expert Minecraft Server Log Analyzer";
pub const DEFAULT_LOG_KIND: &str = "Minecraft server log";
pub const DEFAULT_LANGUAGE: &str = "simplified Chinese";

const EXCERPT_HEADING: &str = "### Log Excerpt (Errors/Warnings):";
const CONTEXT_HEADING: &str = "### End of Log (Context):";
const CLOSING: &str = "Provide your analysis in Markdown. Be professional, concise, and helpful.";

/// Builds the single text payload sent to the analysis provider.
///
/// Performs no truncation; the excerpt is already bounded.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    persona: String,
    log_kind: String,
    language: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            persona: DEFAULT_PERSONA.into(),
            log_kind: DEFAULT_LOG_KIND.into(),
            language: DEFAULT_LANGUAGE.into(),
        }
    }

    /// Role the analyzer is asked to play and the kind of log it reads,
    /// e.g. ("an expert Nginx Log Analyzer", "Nginx access log").
    pub fn with_subject(mut self, persona: impl Into<String>, log_kind: impl Into<String>) -> Self {
        self.persona = persona.into();
        self.log_kind = log_kind.into();
        self
    }

    /// Language the analysis must be written in.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn build(&self, excerpt: &Excerpt) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!("You are {}.\n", self.persona));
        prompt.push_str(&format!("Your answer must be in {}\n", self.language));
        prompt.push_str(&format!(
            "Analyze the following {} and identify the root cause of any crashes or errors.\n",
            self.log_kind
        ));
        prompt.push_str("Suggest specific, actionable solutions to fix the issues.\n\n");

        prompt.push_str(EXCERPT_HEADING);
        prompt.push('\n');
        prompt.push_str(&excerpt.lines.join("\n"));
        prompt.push_str("\n\n");

        prompt.push_str(CONTEXT_HEADING);
        prompt.push('\n');
        prompt.push_str(&excerpt.tail);
        prompt.push_str("\n\n");

        prompt.push_str(CLOSING);
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
