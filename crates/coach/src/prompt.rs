//! Prompt assembly for a single coach exchange.
//!
//! The prompt is built from fixed sections, always in this order:
//!
//! 1. persona preamble
//! 2. `User Health Context:` block
//! 3. the last [`TRANSCRIPT_WINDOW`] turns of history
//! 4. the new user message, verbatim
//!
//! followed by a fixed guidance paragraph. Building is pure: the same
//! inputs always give the same bytes.

use coach_core::ConversationTurn;

use crate::config::DEFAULT_ASSISTANT_NAME;
use crate::context::HealthContextSnapshot;

/// Most recent turns included in a prompt. Older turns are dropped.
pub const TRANSCRIPT_WINDOW: usize = 6;

const TRANSCRIPT_HEADER: &str = "Previous conversation context:";
const NO_TRANSCRIPT: &str = "No previous context";
const CLOSING_GUIDANCE: &str = "Respond in a friendly, encouraging tone. Keep responses concise \
but helpful. If recommending workouts or meals, be specific. Reference their data when relevant \
to show personalization.";

/// Renders coach prompts.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    assistant_name: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ASSISTANT_NAME)
    }
}

impl PromptBuilder {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    /// The persona preamble.
    pub fn preamble(&self) -> String {
        format!(
            "You are {}, a warm, supportive, and knowledgeable personal health coach. \
             You provide personalized advice based on the user's health data.",
            self.assistant_name
        )
    }

    /// Build the full prompt for `message`.
    pub fn build(
        &self,
        snapshot: &HealthContextSnapshot,
        history: &[ConversationTurn],
        message: &str,
    ) -> String {
        format!(
            "{}\n\n{}\n\n{}\n{}\n\nUser's message: {}\n\n{}",
            self.preamble(),
            snapshot.render(),
            TRANSCRIPT_HEADER,
            render_transcript(history),
            message,
            CLOSING_GUIDANCE
        )
    }
}

/// The trailing slice of `history` that fits the window.
pub fn transcript_window(history: &[ConversationTurn]) -> &[ConversationTurn] {
    &history[history.len().saturating_sub(TRANSCRIPT_WINDOW)..]
}

/// Render the transcript section body: one `role: content` line per turn
/// in chronological order.
pub fn render_transcript(history: &[ConversationTurn]) -> String {
    let window = transcript_window(history);
    if window.is_empty() {
        return NO_TRANSCRIPT.to_string();
    }
    window
        .iter()
        .map(ConversationTurn::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}
